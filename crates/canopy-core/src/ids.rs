//! Repository coordinates.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Owner/name coordinates of a repository on a code forge.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct RepoRef {
    pub owner: String,
    pub repo: String,
}

impl RepoRef {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
        }
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

impl std::str::FromStr for RepoRef {
    type Err = crate::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.split_once('/') {
            Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') => {
                Ok(Self::new(owner, repo))
            }
            _ => Err(crate::Error::Config(format!(
                "expected owner/repo, got '{}'",
                s
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_ref_display() {
        let id = RepoRef::new("atomist", "sdm");
        assert_eq!(id.to_string(), "atomist/sdm");
    }

    #[test]
    fn test_repo_ref_parse() {
        let id: RepoRef = "rust-lang/cargo".parse().unwrap();
        assert_eq!(id.owner, "rust-lang");
        assert_eq!(id.repo, "cargo");

        assert!("no-slash".parse::<RepoRef>().is_err());
        assert!("/repo".parse::<RepoRef>().is_err());
        assert!("a/b/c".parse::<RepoRef>().is_err());
    }
}
