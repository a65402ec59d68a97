//! HTTP provider trait for abstracting the transport
//!
//! Resources talk to the API only through [`HttpProvider`], so the default
//! reqwest-based [`XcloudHttpProvider`](super::XcloudHttpProvider) can be
//! swapped for another transport (a proxy, an in-memory test double).

use crate::{
    error::Result,
    http::{Method, Response},
};
use async_trait::async_trait;
use std::fmt;

/// Provider trait for making HTTP requests to the XCLOUD API.
///
/// Implementations attach authentication and client identification headers,
/// bound every call with a timeout, and map any status other than 200 to
/// [`Error::Api`](crate::Error::Api) carrying the raw body.
#[async_trait]
pub trait HttpProvider: Send + Sync + fmt::Debug {
    /// Make a request and return the successful response.
    ///
    /// # Arguments
    ///
    /// * `method` - HTTP method (GET, POST, DELETE, ...)
    /// * `path` - API endpoint path (e.g., "/servers/42")
    /// * `body` - Optional request body (will be serialized to JSON)
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The request fails (network, timeout, etc.)
    /// - The API returns any status other than 200
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&(dyn erased_serde::Serialize + Send + Sync)>,
    ) -> Result<Response>;

    /// Get the provider name for debugging/logging.
    fn provider_name(&self) -> &'static str;

    /// Get the base URL for this provider (for debugging).
    fn base_url(&self) -> &str;
}

/// Helper function to serialize a body to JSON bytes.
pub(crate) fn serialize_body(
    body: &(dyn erased_serde::Serialize + Send + Sync),
) -> Result<Vec<u8>> {
    serde_json::to_vec(body).map_err(crate::error::Error::Serialization)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize)]
    struct TestRequest {
        name: String,
    }

    #[test]
    fn test_serialize_body() {
        let req = TestRequest {
            name: "web-1".to_string(),
        };
        let bytes = serialize_body(&req).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["name"], "web-1");
    }
}
