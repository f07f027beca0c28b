//! HTTP exchange types shared between aspects and client implementations.

use crate::{Error, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Request headers, name to value.
pub type Headers = BTreeMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

/// Retry policy for a single exchange.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RetryOptions {
    /// Retries after the first attempt.
    #[serde(default = "default_retries")]
    pub retries: u32,
    /// Backoff multiplier between attempts.
    #[serde(default = "default_factor")]
    pub factor: u32,
    /// Delay before the first retry, in milliseconds.
    #[serde(default = "default_min_timeout_ms")]
    pub min_timeout_ms: u64,
    /// Upper bound for any single delay, in milliseconds.
    #[serde(default = "default_max_timeout_ms")]
    pub max_timeout_ms: u64,
}

fn default_retries() -> u32 {
    5
}

fn default_factor() -> u32 {
    3
}

fn default_min_timeout_ms() -> u64 {
    1_000
}

fn default_max_timeout_ms() -> u64 {
    10_000
}

impl Default for RetryOptions {
    fn default() -> Self {
        Self {
            retries: default_retries(),
            factor: default_factor(),
            min_timeout_ms: default_min_timeout_ms(),
            max_timeout_ms: default_max_timeout_ms(),
        }
    }
}

impl RetryOptions {
    /// Single attempt, no retries.
    pub fn none() -> Self {
        Self {
            retries: 0,
            ..Self::default()
        }
    }

    /// Delay before retry number `attempt` (1-based).
    pub fn delay(&self, attempt: u32) -> Duration {
        let exp = attempt.saturating_sub(1);
        let millis = (self.factor.max(1) as u64)
            .checked_pow(exp)
            .and_then(|m| m.checked_mul(self.min_timeout_ms))
            .unwrap_or(u64::MAX)
            .min(self.max_timeout_ms);
        Duration::from_millis(millis)
    }
}

/// Options for [`HttpClient::exchange`](crate::HttpClient::exchange).
#[derive(Debug, Clone, Default)]
pub struct ExchangeOptions {
    pub method: HttpMethod,
    pub headers: Option<Headers>,
    pub body: Option<serde_json::Value>,
    /// `None` leaves the retry policy to the client.
    pub retry: Option<RetryOptions>,
}

impl ExchangeOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn with_headers(mut self, headers: Option<Headers>) -> Self {
        self.headers = headers;
        self
    }

    pub fn with_retry(mut self, retry: RetryOptions) -> Self {
        self.retry = Some(retry);
        self
    }
}

/// Response of a successful (2xx) exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub url: String,
    pub status: u16,
    /// Parsed JSON body; `None` when the response had no content.
    pub body: Option<serde_json::Value>,
}

impl HttpResponse {
    /// Deserialize the body into `T`. An absent body is `Ok(None)`; a body of
    /// the wrong shape is an [`Error::InvalidResponse`].
    pub fn json<T: DeserializeOwned>(&self) -> Result<Option<T>> {
        match &self.body {
            None | Some(serde_json::Value::Null) => Ok(None),
            Some(value) => serde_json::from_value(value.clone())
                .map(Some)
                .map_err(|e| Error::InvalidResponse {
                    url: self.url.clone(),
                    message: e.to_string(),
                }),
        }
    }
}
