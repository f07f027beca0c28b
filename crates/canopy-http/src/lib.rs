//! HTTP client factory for Canopy aspects, backed by reqwest.
//!
//! Aspects only see the [`canopy_core::HttpClientFactory`] port; this crate
//! is the default adapter a host can hand them.

pub mod client;
pub mod config;

pub use client::{ReqwestClientFactory, ReqwestHttpClient};
pub use config::HttpClientConfig;
