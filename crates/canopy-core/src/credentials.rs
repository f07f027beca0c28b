//! Credentials supplied by the host for forge access.

use std::fmt;

/// Credentials handed to an aspect for a single invocation.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// A bearer token (personal access token, app installation token, ...).
    Token { token: String },
    /// Username and password, as used by some self-hosted forges.
    UsernamePassword { username: String, password: String },
}

impl Credentials {
    pub fn token(token: impl Into<String>) -> Self {
        Credentials::Token {
            token: token.into(),
        }
    }

    /// The bearer token, if these are token credentials.
    pub fn bearer_token(&self) -> Option<&str> {
        match self {
            Credentials::Token { token } => Some(token),
            Credentials::UsernamePassword { .. } => None,
        }
    }

    pub fn is_token(&self) -> bool {
        self.bearer_token().is_some()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::Token { .. } => f.debug_struct("Token").field("token", &"***").finish(),
            Credentials::UsernamePassword { username, .. } => f
                .debug_struct("UsernamePassword")
                .field("username", username)
                .field("password", &"***")
                .finish(),
        }
    }
}

/// Anything that carries the credentials of the current invocation.
pub trait CredentialsSource {
    fn credentials(&self) -> Option<&Credentials>;
}

impl CredentialsSource for Option<Credentials> {
    fn credentials(&self) -> Option<&Credentials> {
        self.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_token() {
        assert_eq!(Credentials::token("abc").bearer_token(), Some("abc"));

        let basic = Credentials::UsernamePassword {
            username: "octocat".into(),
            password: "hunter2".into(),
        };
        assert_eq!(basic.bearer_token(), None);
        assert!(!basic.is_token());
    }

    #[test]
    fn test_debug_masks_secrets() {
        let rendered = format!("{:?}", Credentials::token("ghp_secret"));
        assert!(!rendered.contains("ghp_secret"));

        let rendered = format!(
            "{:?}",
            Credentials::UsernamePassword {
                username: "octocat".into(),
                password: "hunter2".into(),
            }
        );
        assert!(rendered.contains("octocat"));
        assert!(!rendered.contains("hunter2"));
    }
}
