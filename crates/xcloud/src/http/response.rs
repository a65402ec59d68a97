//! HTTP response handling

use http::StatusCode;
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};

/// Status and raw body of one API response.
#[derive(Debug, Clone)]
pub struct Response {
    status: StatusCode,
    body: Vec<u8>,
}

impl Response {
    /// Create a new response.
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Create a `200 OK` response from a body.
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self::new(StatusCode::OK, body)
    }

    /// Get the status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Get the raw body bytes.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Parse the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(|e| Error::ResponseValidation(e.to_string()))
    }

    /// Check if the response is successful. The API signals success only with 200.
    pub fn is_success(&self) -> bool {
        self.status == StatusCode::OK
    }

    /// Turn a non-200 response into [`Error::Api`], keeping the body verbatim.
    pub fn error_for_status(self) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(Error::from_response(self.status.as_u16(), &self.body))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, serde::Deserialize)]
    struct Payload {
        value: u32,
    }

    #[test]
    fn test_json_success() {
        let response = Response::ok(r#"{"value": 3}"#).error_for_status().unwrap();
        let payload: Payload = response.json().unwrap();
        assert_eq!(payload.value, 3);
    }

    #[test]
    fn test_only_200_is_success() {
        let created = Response::new(StatusCode::CREATED, "{}");
        assert!(!created.is_success());

        let err = created.error_for_status().unwrap_err();
        assert_eq!(err.status(), Some(201));
    }

    #[test]
    fn test_json_decode_failure() {
        let err = Response::ok("not json").json::<Payload>().unwrap_err();
        assert!(matches!(err, Error::ResponseValidation(_)));
    }

    #[test]
    fn test_error_keeps_raw_body() {
        let response = Response::new(
            StatusCode::NOT_FOUND,
            r#"{"error": "action with 9 not found"}"#,
        );
        assert_eq!(response.body(), br#"{"error": "action with 9 not found"}"#);
        match response.error_for_status().unwrap_err() {
            Error::Api { status, body } => {
                assert_eq!(status, 404);
                assert_eq!(body, r#"{"error": "action with 9 not found"}"#);
            }
            other => panic!("Expected Api error, got {other:?}"),
        }
    }
}
