//! Common test utilities and helpers

use std::path::Path;
use std::time::Duration;

use wiremock::MockServer;
use xcloud::Client;

/// Load a response fixture
#[allow(dead_code)]
pub fn load_response_fixture(name: &str) -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let path = Path::new(manifest_dir)
        .join("tests")
        .join("fixtures")
        .join("responses")
        .join(format!("{}.json", name));

    std::fs::read_to_string(&path).unwrap_or_else(|e| {
        panic!(
            "Failed to load response fixture '{}' from {:?}: {}",
            name, path, e
        )
    })
}

/// Create a test token
#[allow(dead_code)]
pub fn test_token() -> String {
    "xc-test-token-0123456789abcdef".to_string()
}

/// Client pointed at the mock server with a short poll interval
#[allow(dead_code)]
pub fn client_for(server: &MockServer) -> Client {
    Client::builder()
        .endpoint(server.uri())
        .token(test_token())
        .poll_interval("10ms")
        .client_version("9.9.9")
        .timeout(Duration::from_secs(5))
        .build()
        .expect("Failed to build client")
}
