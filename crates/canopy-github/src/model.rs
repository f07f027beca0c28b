//! License data and the forge response schemas it is parsed from.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// SPDX placeholder used when the forge reports no identifier.
pub const UNKNOWN_SPDX: &str = "unknown";

/// Fingerprint data for a repository license.
///
/// Field order is part of the content hash; do not reorder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LicenseRecord {
    pub key: String,
    pub name: String,
    pub spdx: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl LicenseRecord {
    /// Record used when no license could be determined.
    pub fn unknown() -> Self {
        Self {
            key: "unknown".to_string(),
            name: "Unknown".to_string(),
            spdx: UNKNOWN_SPDX.to_string(),
            url: None,
        }
    }

    pub fn is_unknown(&self) -> bool {
        *self == Self::unknown()
    }
}

impl From<LicenseSummary> for LicenseRecord {
    fn from(license: LicenseSummary) -> Self {
        Self {
            key: license.key,
            name: license.name,
            spdx: license
                .spdx_id
                .unwrap_or_else(|| UNKNOWN_SPDX.to_string()),
            url: license.url,
        }
    }
}

/// Outcome of a license lookup. Both variants carry a usable record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LicenseLookup {
    Detected(LicenseRecord),
    Fallback(LicenseRecord),
}

impl LicenseLookup {
    pub fn into_record(self) -> LicenseRecord {
        match self {
            LicenseLookup::Detected(record) | LicenseLookup::Fallback(record) => record,
        }
    }
}

/// `GET /repos/{owner}/{repo}/license`
#[derive(Debug, Clone, Deserialize)]
pub struct RepoLicenseResponse {
    pub license: Option<LicenseSummary>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LicenseSummary {
    pub key: String,
    pub name: String,
    pub spdx_id: Option<String>,
    pub url: Option<String>,
}

/// One element of `GET /licenses`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CatalogEntry {
    pub key: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl CatalogEntry {
    /// First entry whose `key` matches. Entries are only parsed once their key
    /// matches, so unrelated malformed entries don't hide a valid one.
    pub fn find(catalog: &[serde_json::Value], key: &str) -> Option<Self> {
        catalog
            .iter()
            .filter(|entry| entry.get("key").and_then(serde_json::Value::as_str) == Some(key))
            .find_map(|entry| serde_json::from_value(entry.clone()).ok())
    }
}

/// `GET /licenses/{key}`
#[derive(Debug, Clone, Deserialize)]
pub struct LicenseText {
    pub body: Option<String>,
}
