//! Authorization headers derived from invocation credentials.

use canopy_core::{CredentialsSource, Headers};

/// `Authorization: Bearer <token>` for token credentials, `None` otherwise.
pub fn headers<S: CredentialsSource + ?Sized>(source: &S) -> Option<Headers> {
    let token = source.credentials()?.bearer_token()?;
    let mut headers = Headers::new();
    headers.insert("Authorization".to_string(), format!("Bearer {}", token));
    Some(headers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use canopy_core::{Credentials, ExtractContext};

    #[test]
    fn test_token_credentials() {
        let ctx = ExtractContext::new().with_credentials(Credentials::token("abc123"));
        let headers = headers(&ctx).unwrap();
        assert_eq!(headers.len(), 1);
        assert_eq!(headers["Authorization"], "Bearer abc123");
    }

    #[test]
    fn test_other_credentials() {
        let ctx = ExtractContext::new().with_credentials(Credentials::UsernamePassword {
            username: "octocat".into(),
            password: "hunter2".into(),
        });
        assert_eq!(headers(&ctx), None);
    }

    #[test]
    fn test_no_credentials() {
        assert_eq!(headers(&ExtractContext::new()), None);
        assert_eq!(headers(&None::<Credentials>), None);
    }
}
