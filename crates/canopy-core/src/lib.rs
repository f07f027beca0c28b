//! Canopy Core
//!
//! Core domain types, traits, and error handling shared by Canopy aspects.
//! An aspect extracts a fingerprint from a project and can optionally apply
//! a fingerprint back to a project; this crate defines the vocabulary the
//! host orchestrator and the aspects agree on.

pub mod context;
pub mod credentials;
pub mod error;
pub mod fingerprint;
pub mod http;
pub mod ids;
pub mod ports;
pub mod project;

pub use context::{ApplyContext, ApplyParameters, ExtractContext};
pub use credentials::{Credentials, CredentialsSource};
pub use error::{Error, Result};
pub use fingerprint::{Fingerprint, content_hash, sha256_hex};
pub use http::{ExchangeOptions, Headers, HttpMethod, HttpResponse, RetryOptions};
pub use ids::RepoRef;
pub use ports::{
    ApplyOutcome, Aspect, AspectDetails, HttpClient, HttpClientFactory, Project, ProjectFile,
    SkipReason,
};
pub use project::{InMemoryProject, LocalProject};
