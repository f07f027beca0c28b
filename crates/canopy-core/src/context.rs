//! Invocation contexts passed to aspects by the host.

use crate::credentials::{Credentials, CredentialsSource};
use crate::fingerprint::Fingerprint;
use crate::ports::HttpClientFactory;
use std::sync::Arc;

/// Context for [`Aspect::extract`](crate::Aspect::extract).
#[derive(Clone, Default)]
pub struct ExtractContext {
    /// HTTP capability; absent when the host has none configured.
    pub http: Option<Arc<dyn HttpClientFactory>>,
    pub credentials: Option<Credentials>,
}

impl ExtractContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_http(mut self, factory: Arc<dyn HttpClientFactory>) -> Self {
        self.http = Some(factory);
        self
    }

    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }
}

impl CredentialsSource for ExtractContext {
    fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }
}

/// Parameters of an apply request.
#[derive(Debug, Clone)]
pub struct ApplyParameters<T> {
    /// The fingerprint to enforce on the project.
    pub fp: Fingerprint<T>,
}

/// Context for [`Aspect::apply`](crate::Aspect::apply).
#[derive(Clone)]
pub struct ApplyContext<T> {
    pub parameters: Option<ApplyParameters<T>>,
    pub http: Option<Arc<dyn HttpClientFactory>>,
    pub credentials: Option<Credentials>,
}

impl<T> Default for ApplyContext<T> {
    fn default() -> Self {
        Self {
            parameters: None,
            http: None,
            credentials: None,
        }
    }
}

impl<T> ApplyContext<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fingerprint(mut self, fp: Fingerprint<T>) -> Self {
        self.parameters = Some(ApplyParameters { fp });
        self
    }

    pub fn with_http(mut self, factory: Arc<dyn HttpClientFactory>) -> Self {
        self.http = Some(factory);
        self
    }

    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }
}

impl<T> CredentialsSource for ApplyContext<T> {
    fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }
}
