//! Fingerprints and content hashing.
//!
//! A fingerprint is a versioned snapshot of one extracted project property.
//! Its `sha` is the SHA-256 of the canonical JSON form of the data, which is
//! what the host's fingerprint store diffs on.

use crate::Result;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// A content-addressed snapshot of extracted data.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Fingerprint<T> {
    #[serde(rename = "type")]
    pub fp_type: String,
    pub name: String,
    pub abbreviation: String,
    pub version: String,
    pub data: T,
    /// Hex SHA-256 of the canonical JSON serialization of `data`.
    pub sha: String,
}

impl<T: Serialize> Fingerprint<T> {
    /// Build a fingerprint, hashing `data`.
    pub fn new(
        fp_type: impl Into<String>,
        name: impl Into<String>,
        abbreviation: impl Into<String>,
        version: impl Into<String>,
        data: T,
    ) -> Result<Self> {
        let sha = content_hash(&data)?;
        Ok(Self {
            fp_type: fp_type.into(),
            name: name.into(),
            abbreviation: abbreviation.into(),
            version: version.into(),
            data,
            sha,
        })
    }
}

impl<T> PartialEq for Fingerprint<T> {
    fn eq(&self, other: &Self) -> bool {
        self.sha == other.sha
    }
}

impl<T> Eq for Fingerprint<T> {}

/// Hash of the canonical (compact, declaration-ordered) JSON form of `data`.
pub fn content_hash<T: Serialize + ?Sized>(data: &T) -> Result<String> {
    let canonical = serde_json::to_string(data)?;
    Ok(sha256_hex(canonical.as_bytes()))
}

/// Lowercase hex SHA-256 digest.
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}
