//! Error types for the XCLOUD client
//!
//! Every operation returns [`Result`]. Transport failures carry the HTTP
//! status and the raw response body verbatim; nothing is retried and no
//! partial values are synthesized.

use std::time::Duration;
use thiserror::Error;

use crate::types::ActionId;

/// Result type alias for operations that can fail with an XCLOUD client error.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the XCLOUD client.
#[derive(Debug, Error)]
pub enum Error {
    /// The API answered with a status other than 200.
    #[error("API error (status {status}): {body}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// Network or connection error.
    #[error("Connection error: {0}")]
    Connection(String),

    /// A single request exceeded the transport timeout.
    #[error("Request timeout after {0:?}")]
    Timeout(Duration),

    /// Response body did not have the expected shape.
    #[error("Failed to parse API response: {0}")]
    ResponseValidation(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Waiting for an action was cancelled by the caller.
    #[error("Waiting for action {action_id} was cancelled")]
    Cancelled {
        /// Action that was being awaited
        action_id: ActionId,
    },

    /// The action did not reach a terminal state before the deadline.
    #[error("Action {action_id} did not finish within {timeout:?}")]
    DeadlineExceeded {
        /// Action that was being awaited
        action_id: ActionId,
        /// Deadline that was applied
        timeout: Duration,
    },

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTTP client configuration or initialization error.
    #[error("HTTP client error: {0}")]
    HttpClient(String),

    /// Missing required configuration.
    #[error("Missing required configuration: {0}")]
    MissingConfig(String),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        /// Context description
        context: String,
        /// Underlying error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Other errors not covered by specific variants.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Create an API error from an HTTP status and raw body.
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        Error::Api {
            status,
            body: String::from_utf8_lossy(body).into_owned(),
        }
    }

    /// Add context to an error.
    pub fn context<C>(self, context: C) -> Self
    where
        C: std::fmt::Display + Send + Sync + 'static,
    {
        Error::WithContext {
            context: context.to_string(),
            source: Box::new(self),
        }
    }

    /// The innermost client error, looking through any added context.
    pub fn root_cause(&self) -> &Error {
        let mut current = self;
        while let Error::WithContext { source, .. } = current {
            match source.downcast_ref::<Error>() {
                Some(inner) => current = inner,
                None => break,
            }
        }
        current
    }

    /// HTTP status of the underlying API error, if any.
    pub fn status(&self) -> Option<u16> {
        match self.root_cause() {
            Error::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the operation stopped because of cancellation or its deadline.
    pub fn is_cancellation(&self) -> bool {
        matches!(
            self.root_cause(),
            Error::Cancelled { .. } | Error::DeadlineExceeded { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_response_keeps_body_verbatim() {
        let error = Error::from_response(404, br#"{"error": "server with 9 not found"}"#);
        match error {
            Error::Api { status, body } => {
                assert_eq!(status, 404);
                assert_eq!(body, r#"{"error": "server with 9 not found"}"#);
            }
            _ => panic!("Expected Api variant"),
        }
    }

    #[test]
    fn test_from_response_non_utf8_body() {
        let error = Error::from_response(500, &[0xff, 0xfe, b'x']);
        assert_eq!(error.status(), Some(500));
    }

    #[test]
    fn test_error_context() {
        let error = Error::Connection("refused".to_string());
        let with_context = error.context("Failed to submit server creation");

        match &with_context {
            Error::WithContext { context, .. } => {
                assert_eq!(context, "Failed to submit server creation");
            }
            _ => panic!("Expected WithContext variant"),
        }
        assert!(with_context.to_string().contains("refused"));
    }

    #[test]
    fn test_root_cause_through_context_chain() {
        let error = Error::from_response(403, b"forbidden")
            .context("Failed to read server 4")
            .context("Create failed");

        assert_eq!(error.status(), Some(403));
        assert!(matches!(error.root_cause(), Error::Api { .. }));
        assert!(error.to_string().starts_with("Create failed"));
    }

    #[test]
    fn test_is_cancellation() {
        assert!(Error::Cancelled { action_id: 1 }.is_cancellation());
        assert!(
            Error::DeadlineExceeded {
                action_id: 1,
                timeout: Duration::from_secs(1),
            }
            .context("waiting")
            .is_cancellation()
        );
        assert!(!Error::Timeout(Duration::from_secs(30)).is_cancellation());
    }

    #[test]
    fn test_status_absent_for_non_api_errors() {
        assert_eq!(Error::Connection("reset".to_string()).status(), None);
    }
}
