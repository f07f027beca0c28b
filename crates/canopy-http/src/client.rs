//! reqwest implementation of the HTTP client port.

use crate::config::HttpClientConfig;
use async_trait::async_trait;
use canopy_core::{
    Error, ExchangeOptions, HttpClient, HttpClientFactory, HttpMethod, HttpResponse, Result,
    RetryOptions,
};
use std::sync::Arc;
use tracing::{debug, warn};

/// Factory handing out clients that share one connection pool.
#[derive(Debug, Clone)]
pub struct ReqwestClientFactory {
    client: reqwest::Client,
    retry: RetryOptions,
}

impl ReqwestClientFactory {
    pub fn new(config: &HttpClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout())
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            retry: config.retry,
        })
    }
}

impl HttpClientFactory for ReqwestClientFactory {
    fn create(&self, url: &str) -> Arc<dyn HttpClient> {
        debug!(url = %url, "Creating HTTP client");
        Arc::new(ReqwestHttpClient {
            client: self.client.clone(),
            retry: self.retry,
        })
    }
}

/// HTTP client with retry and exponential backoff.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
    retry: RetryOptions,
}

impl ReqwestHttpClient {
    async fn send_once(&self, url: &str, options: &ExchangeOptions) -> Result<HttpResponse> {
        let mut request = self.client.request(to_reqwest_method(options.method), url);

        if let Some(headers) = &options.headers {
            for (name, value) in headers {
                request = request.header(name.as_str(), value.as_str());
            }
        }
        if let Some(body) = &options.body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| Error::Network {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await.map_err(|e| Error::Network {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        let body = if bytes.iter().all(u8::is_ascii_whitespace) {
            None
        } else {
            Some(
                serde_json::from_slice(&bytes).map_err(|e| Error::InvalidResponse {
                    url: url.to_string(),
                    message: e.to_string(),
                })?,
            )
        };

        Ok(HttpResponse {
            url: url.to_string(),
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn exchange(&self, url: &str, options: &ExchangeOptions) -> Result<HttpResponse> {
        let retry = options.retry.unwrap_or(self.retry);
        let mut attempt = 0;

        loop {
            match self.send_once(url, options).await {
                Ok(response) => {
                    debug!(url = %url, status = response.status, "Request completed");
                    return Ok(response);
                }
                Err(e) if attempt < retry.retries && is_retryable(&e) => {
                    attempt += 1;
                    let delay = retry.delay(attempt);
                    warn!(
                        url = %url,
                        attempt,
                        retries = retry.retries,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Request failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Transport failures, throttling and server errors are worth another try.
fn is_retryable(err: &Error) -> bool {
    match err {
        Error::Network { .. } => true,
        Error::HttpStatus { status, .. } => *status == 429 || *status >= 500,
        _ => false,
    }
}

fn to_reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Patch => reqwest::Method::PATCH,
        HttpMethod::Delete => reqwest::Method::DELETE,
    }
}
