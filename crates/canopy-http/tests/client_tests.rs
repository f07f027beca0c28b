//! reqwest client tests against a mock server.

use canopy_core::{Error, ExchangeOptions, Headers, HttpClientFactory, RetryOptions};
use canopy_http::{HttpClientConfig, ReqwestClientFactory};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fast_retry(retries: u32) -> RetryOptions {
    RetryOptions {
        retries,
        factor: 2,
        min_timeout_ms: 1,
        max_timeout_ms: 5,
    }
}

fn factory(retries: u32) -> ReqwestClientFactory {
    let config = HttpClientConfig {
        retry: fast_retry(retries),
        ..HttpClientConfig::default()
    };
    ReqwestClientFactory::new(&config).expect("client")
}

#[tokio::test]
async fn test_get_json_with_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/licenses"))
        .and(header("Authorization", "Bearer t0ken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"key": "mit"}])))
        .expect(1)
        .mount(&server)
        .await;

    let url = format!("{}/licenses", server.uri());
    let mut headers = Headers::new();
    headers.insert("Authorization".into(), "Bearer t0ken".into());

    let response = factory(0)
        .create(&url)
        .exchange(&url, &ExchangeOptions::get().with_headers(Some(headers)))
        .await
        .unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(response.body, Some(json!([{"key": "mit"}])));
}

#[tokio::test]
async fn test_sends_user_agent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(header(
            "User-Agent",
            format!("canopy/{}", env!("CARGO_PKG_VERSION")).as_str(),
        ))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let url = server.uri();
    let response = factory(0)
        .create(&url)
        .exchange(&url, &ExchangeOptions::get())
        .await
        .unwrap();

    assert_eq!(response.body, None);
}

#[tokio::test]
async fn test_not_found_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let url = format!("{}/repos/o/r/license", server.uri());
    let err = factory(3)
        .create(&url)
        .exchange(&url, &ExchangeOptions::get())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::HttpStatus { status: 404, .. }));
}

#[tokio::test]
async fn test_server_errors_are_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let url = server.uri();
    let response = factory(2)
        .create(&url)
        .exchange(&url, &ExchangeOptions::get())
        .await
        .unwrap();

    assert_eq!(response.body, Some(json!({"ok": true})));
}

#[tokio::test]
async fn test_explicit_zero_retries_overrides_default() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let url = server.uri();
    let err = factory(4)
        .create(&url)
        .exchange(&url, &ExchangeOptions::get().with_retry(RetryOptions::none()))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::HttpStatus { status: 500, .. }));
}

#[tokio::test]
async fn test_malformed_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let url = server.uri();
    let err = factory(0)
        .create(&url)
        .exchange(&url, &ExchangeOptions::get())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::InvalidResponse { .. }));
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let err = factory(0)
        .create(&url)
        .exchange(&url, &ExchangeOptions::get())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Network { .. }));
    assert!(err.is_remote());
}

#[tokio::test]
async fn test_config_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("http.yaml");
    std::fs::write(&path, "user_agent: test-agent\nretry:\n  retries: 0\n").unwrap();

    let config = HttpClientConfig::from_file(&path).unwrap();
    assert_eq!(config.user_agent, "test-agent");
    assert_eq!(config.retry.retries, 0);
    assert!(ReqwestClientFactory::new(&config).is_ok());
}
