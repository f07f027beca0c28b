//! Port traits (hexagonal architecture).
//!
//! These traits define the interfaces between aspects, the host
//! orchestrator, and external adapters (HTTP, project storage).

use crate::context::{ApplyContext, ExtractContext};
use crate::fingerprint::Fingerprint;
use crate::http::{ExchangeOptions, HttpResponse};
use crate::ids::RepoRef;
use crate::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::sync::Arc;

/// HTTP client used by aspects to talk to remote services.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Perform a request. Non-2xx responses are errors.
    async fn exchange(&self, url: &str, options: &ExchangeOptions) -> Result<HttpResponse>;
}

/// Creates HTTP clients for a given base URL.
pub trait HttpClientFactory: Send + Sync {
    fn create(&self, url: &str) -> Arc<dyn HttpClient>;
}

/// A file inside a project.
#[async_trait]
pub trait ProjectFile: Send + Sync {
    /// Path relative to the project root.
    fn path(&self) -> &str;

    async fn get_content(&self) -> Result<String>;

    /// Replace the whole content of the file.
    async fn set_content(&self, content: &str) -> Result<()>;
}

/// A checked-out project an aspect can inspect and modify.
#[async_trait]
pub trait Project: Send + Sync {
    /// Forge coordinates of the project.
    fn id(&self) -> &RepoRef;

    /// Get a file by relative path, if it exists.
    async fn get_file(&self, path: &str) -> Result<Option<Box<dyn ProjectFile>>>;

    /// Create a file. Overwrites an existing file with the same path.
    async fn add_file(&self, path: &str, content: &str) -> Result<()>;

    async fn has_file(&self, path: &str) -> Result<bool> {
        Ok(self.get_file(path).await?.is_some())
    }
}

/// Reporting metadata for an aspect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AspectDetails {
    pub description: String,
    pub short_name: String,
    pub unit: String,
    pub category: String,
    /// Report URL template, relative to the host's UI.
    pub url: String,
    /// Whether the host may offer to apply fingerprints of this aspect.
    pub manage: bool,
}

/// A pluggable unit of project analysis.
#[async_trait]
pub trait Aspect: Send + Sync {
    type Data: Serialize + DeserializeOwned + Clone + Send + Sync;

    /// Unique name; also the fingerprint type.
    fn name(&self) -> &str;

    fn display_name(&self) -> &str;

    /// Extract fingerprints from a project. An empty vector means the aspect
    /// does not apply in this context.
    async fn extract(
        &self,
        project: &dyn Project,
        ctx: &ExtractContext,
    ) -> Result<Vec<Fingerprint<Self::Data>>>;

    /// Bring a project in line with a fingerprint.
    async fn apply(
        &self,
        project: &dyn Project,
        ctx: &ApplyContext<Self::Data>,
    ) -> Result<ApplyOutcome>;

    /// Human-readable value of a fingerprint.
    fn to_displayable_fingerprint(&self, fp: &Fingerprint<Self::Data>) -> String;

    /// Human-readable name for fingerprints with the given name.
    fn to_displayable_fingerprint_name(&self, fingerprint_name: &str) -> String;

    fn details(&self) -> Option<AspectDetails> {
        None
    }
}

/// Result of [`Aspect::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The project was modified.
    Applied { path: String, created: bool },
    /// Nothing was changed.
    Skipped(SkipReason),
}

impl ApplyOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, ApplyOutcome::Applied { .. })
    }
}

/// Why an apply left the project untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    MissingParameters,
    NoHttpClient,
    CatalogUnavailable,
    NotInCatalog { key: String },
    ContentUnavailable,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::MissingParameters => write!(f, "no fingerprint parameters supplied"),
            SkipReason::NoHttpClient => write!(f, "no HTTP client configured"),
            SkipReason::CatalogUnavailable => write!(f, "catalog unavailable"),
            SkipReason::NotInCatalog { key } => write!(f, "'{}' not found in catalog", key),
            SkipReason::ContentUnavailable => write!(f, "content unavailable"),
        }
    }
}
