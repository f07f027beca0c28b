//! Forge endpoint configuration.

use canopy_core::{Error, RepoRef, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Where the forge's REST API lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForgeConfig {
    /// API base URL, e.g. `https://api.github.com` or a GitHub Enterprise
    /// `https://ghe.example.com/api/v3`.
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

impl Default for ForgeConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
        }
    }
}

impl ForgeConfig {
    pub fn new(api_url: impl Into<String>) -> Result<Self> {
        let config = Self {
            api_url: api_url.into(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Invalid forge config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// The API URL must be an absolute http(s) URL.
    pub fn validate(&self) -> Result<()> {
        let parsed = url::Url::parse(&self.api_url)
            .map_err(|e| Error::Config(format!("Invalid api_url '{}': {}", self.api_url, e)))?;
        match parsed.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(Error::Config(format!(
                "Unsupported api_url scheme '{}'",
                scheme
            ))),
        }
    }

    /// `GET` endpoint returning the license GitHub detected for a repository.
    pub fn repo_license_url(&self, id: &RepoRef) -> String {
        format!("{}/repos/{}/{}/license", self.base(), id.owner, id.repo)
    }

    /// `GET` endpoint listing commonly used licenses.
    pub fn license_catalog_url(&self) -> String {
        format!("{}/licenses", self.base())
    }

    fn base(&self) -> &str {
        self.api_url.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_urls() {
        let config = ForgeConfig::default();
        let id = RepoRef::new("atomist", "sdm");
        assert_eq!(
            config.repo_license_url(&id),
            "https://api.github.com/repos/atomist/sdm/license"
        );
        assert_eq!(
            config.license_catalog_url(),
            "https://api.github.com/licenses"
        );
    }

    #[test]
    fn test_trailing_slash() {
        let config = ForgeConfig::new("https://ghe.example.com/api/v3/").unwrap();
        assert_eq!(
            config.license_catalog_url(),
            "https://ghe.example.com/api/v3/licenses"
        );
    }

    #[test]
    fn test_validation() {
        assert!(ForgeConfig::new("not a url").is_err());
        assert!(ForgeConfig::new("ftp://example.com").is_err());
        assert!(ForgeConfig::new("http://localhost:8080").is_ok());
    }
}
