//! Shared fixtures for GitHub aspect tests.

use canopy_core::RetryOptions;
use canopy_github::{ForgeConfig, LicenseAspect};
use canopy_http::{HttpClientConfig, ReqwestClientFactory};
use std::sync::{Arc, Once};
use wiremock::MockServer;

static TRACING: Once = Once::new();

/// Install a test subscriber once; `RUST_LOG` controls verbosity.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Aspect pointed at the mock forge.
pub fn aspect(server: &MockServer) -> LicenseAspect {
    LicenseAspect::new(ForgeConfig::new(server.uri()).expect("forge config")).expect("aspect")
}

/// reqwest factory with millisecond backoff so retrying tests stay fast.
pub fn http_factory() -> Arc<ReqwestClientFactory> {
    let config = HttpClientConfig {
        retry: RetryOptions {
            retries: 2,
            factor: 2,
            min_timeout_ms: 1,
            max_timeout_ms: 5,
        },
        ..HttpClientConfig::default()
    };
    Arc::new(ReqwestClientFactory::new(&config).expect("http client"))
}

pub fn mit_license_response(server: &MockServer) -> serde_json::Value {
    serde_json::json!({
        "name": "LICENSE",
        "path": "LICENSE",
        "license": {
            "key": "mit",
            "name": "MIT License",
            "spdx_id": "MIT",
            "url": format!("{}/licenses/mit", server.uri()),
            "node_id": "MDc6TGljZW5zZTEz"
        }
    })
}
