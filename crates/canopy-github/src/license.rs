//! Repository license aspect.
//!
//! `extract` asks GitHub which license it detected for the repository and
//! turns the answer into a fingerprint. Lookup failures are not errors: a
//! repository without a recognizable license still gets a stable "unknown"
//! fingerprint so diffs across revisions stay well defined.
//!
//! `apply` writes the canonical text of a fingerprinted license to
//! `LICENSE`, creating or overwriting it.

use crate::config::ForgeConfig;
use crate::headers::headers;
use crate::model::{CatalogEntry, LicenseLookup, LicenseRecord, LicenseText, RepoLicenseResponse};
use async_trait::async_trait;
use canopy_core::{
    ApplyContext, ApplyOutcome, Aspect, AspectDetails, Error, ExchangeOptions, ExtractContext,
    Fingerprint, Headers, HttpClient, Project, Result, RetryOptions, SkipReason,
};
use tracing::{debug, info, warn};

pub const ASPECT_NAME: &str = "gh-license";
pub const ABBREVIATION: &str = "lic";
pub const FINGERPRINT_VERSION: &str = "0.0.1";
pub const LICENSE_FILE: &str = "LICENSE";

/// Fingerprint a license record.
pub fn license_fingerprint(record: LicenseRecord) -> Result<Fingerprint<LicenseRecord>> {
    Fingerprint::new(
        ASPECT_NAME,
        ASPECT_NAME,
        ABBREVIATION,
        FINGERPRINT_VERSION,
        record,
    )
}

/// Aspect detecting and enforcing the repository license via the GitHub API.
#[derive(Debug, Clone, Default)]
pub struct LicenseAspect {
    config: ForgeConfig,
}

impl LicenseAspect {
    pub fn new(config: ForgeConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    async fn lookup(
        &self,
        client: &dyn HttpClient,
        url: &str,
        headers: Option<Headers>,
    ) -> LicenseLookup {
        match fetch_repo_license(client, url, headers).await {
            Ok(record) => LicenseLookup::Detected(record),
            Err(e) => {
                debug!(url = %url, error = %e, "License lookup failed, using fallback");
                LicenseLookup::Fallback(LicenseRecord::unknown())
            }
        }
    }
}

async fn fetch_repo_license(
    client: &dyn HttpClient,
    url: &str,
    headers: Option<Headers>,
) -> Result<LicenseRecord> {
    let options = ExchangeOptions::get()
        .with_headers(headers)
        .with_retry(RetryOptions::none());
    let response = client.exchange(url, &options).await?;

    let license = response
        .json::<RepoLicenseResponse>()?
        .and_then(|body| body.license)
        .ok_or_else(|| Error::InvalidResponse {
            url: url.to_string(),
            message: "no license in response".to_string(),
        })?;

    Ok(license.into())
}

async fn fetch_catalog(
    client: &dyn HttpClient,
    url: &str,
    headers: Option<Headers>,
) -> Result<Vec<serde_json::Value>> {
    let response = client
        .exchange(url, &ExchangeOptions::get().with_headers(headers))
        .await?;
    Ok(response
        .json::<Vec<serde_json::Value>>()?
        .unwrap_or_default())
}

async fn fetch_license_text(client: &dyn HttpClient, url: &str) -> Result<Option<String>> {
    let response = client.exchange(url, &ExchangeOptions::get()).await?;
    Ok(response
        .json::<LicenseText>()?
        .and_then(|text| text.body)
        .filter(|body| !body.is_empty()))
}

fn skipped(project: &dyn Project, reason: SkipReason) -> ApplyOutcome {
    debug!(project = %project.id(), reason = %reason, "Not applying license");
    ApplyOutcome::Skipped(reason)
}

#[async_trait]
impl Aspect for LicenseAspect {
    type Data = LicenseRecord;

    fn name(&self) -> &str {
        ASPECT_NAME
    }

    fn display_name(&self) -> &str {
        "License"
    }

    async fn extract(
        &self,
        project: &dyn Project,
        ctx: &ExtractContext,
    ) -> Result<Vec<Fingerprint<LicenseRecord>>> {
        let Some(factory) = ctx.http.as_ref() else {
            debug!(project = %project.id(), "No HTTP client configured, skipping license extraction");
            return Ok(vec![]);
        };

        let url = self.config.repo_license_url(project.id());
        let client = factory.create(&url);
        let record = self
            .lookup(client.as_ref(), &url, headers(ctx))
            .await
            .into_record();

        debug!(project = %project.id(), license = %record.key, "Extracted license");
        Ok(vec![license_fingerprint(record)?])
    }

    async fn apply(
        &self,
        project: &dyn Project,
        ctx: &ApplyContext<LicenseRecord>,
    ) -> Result<ApplyOutcome> {
        let Some(parameters) = ctx.parameters.as_ref() else {
            return Ok(skipped(project, SkipReason::MissingParameters));
        };
        let Some(factory) = ctx.http.as_ref() else {
            return Ok(skipped(project, SkipReason::NoHttpClient));
        };
        let key = &parameters.fp.data.key;

        let catalog_url = self.config.license_catalog_url();
        let catalog = match fetch_catalog(
            factory.create(&catalog_url).as_ref(),
            &catalog_url,
            headers(ctx),
        )
        .await
        {
            Ok(catalog) if !catalog.is_empty() => catalog,
            Ok(_) => return Ok(skipped(project, SkipReason::CatalogUnavailable)),
            Err(e) => {
                warn!(url = %catalog_url, error = %e, "Failed to fetch license catalog");
                return Ok(skipped(project, SkipReason::CatalogUnavailable));
            }
        };

        let Some(entry) = CatalogEntry::find(&catalog, key) else {
            return Ok(skipped(
                project,
                SkipReason::NotInCatalog { key: key.clone() },
            ));
        };
        let Some(text_url) = entry.url.filter(|url| !url.is_empty()) else {
            return Ok(skipped(project, SkipReason::ContentUnavailable));
        };

        let text = match fetch_license_text(factory.create(&text_url).as_ref(), &text_url).await
        {
            Ok(Some(text)) => text,
            Ok(None) => return Ok(skipped(project, SkipReason::ContentUnavailable)),
            Err(e) => {
                warn!(url = %text_url, error = %e, "Failed to fetch license text");
                return Ok(skipped(project, SkipReason::ContentUnavailable));
            }
        };

        let created = match project.get_file(LICENSE_FILE).await? {
            Some(file) => {
                file.set_content(&text).await?;
                false
            }
            None => {
                project.add_file(LICENSE_FILE, &text).await?;
                true
            }
        };

        info!(project = %project.id(), license = %key, created, "Wrote license file");
        Ok(ApplyOutcome::Applied {
            path: LICENSE_FILE.to_string(),
            created,
        })
    }

    fn to_displayable_fingerprint(&self, fp: &Fingerprint<LicenseRecord>) -> String {
        fp.data.name.clone()
    }

    fn to_displayable_fingerprint_name(&self, _fingerprint_name: &str) -> String {
        "License".to_string()
    }

    fn details(&self) -> Option<AspectDetails> {
        Some(AspectDetails {
            description: "Repository licenses as detected by GitHub".to_string(),
            short_name: ASPECT_NAME.to_string(),
            unit: ASPECT_NAME.to_string(),
            category: "GitHub".to_string(),
            url: format!("fingerprint/{0}/{0}?byOrg=true&trim=false", ASPECT_NAME),
            manage: true,
        })
    }
}
