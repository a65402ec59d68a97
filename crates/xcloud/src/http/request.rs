//! HTTP request builder

use super::Response;
use crate::error::{Error, Result};
use crate::observability::HttpExchange;
use http::{HeaderMap, HeaderName, HeaderValue, Method};
use std::time::Duration;
use url::Url;

/// Builder for a single HTTP request.
///
/// Requests are sent exactly once; there is no retry layer.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    method: Method,
    url: Url,
    headers: HeaderMap,
    body: Option<Vec<u8>>,
    timeout: Duration,
    http_client: Option<reqwest::Client>,
}

impl RequestBuilder {
    /// Create a new request builder.
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: HeaderMap::new(),
            body: None,
            timeout: crate::DEFAULT_REQUEST_TIMEOUT,
            http_client: None,
        }
    }

    /// Set the HTTP client to use
    pub(crate) fn with_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Try to set a header, returning an error if the name or value is invalid.
    ///
    /// # Errors
    /// Returns an error if the header name or value contains invalid characters.
    pub fn try_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Result<Self> {
        let key_str = key.into();
        let value_str = value.into();

        let key = key_str
            .parse::<HeaderName>()
            .map_err(|e| Error::HttpClient(format!("Invalid header name '{}': {}", key_str, e)))?;
        let value = value_str.parse::<HeaderValue>().map_err(|e| {
            // values may hold the bearer token, keep them out of the message
            Error::HttpClient(format!("Invalid value for header '{}': {}", key, e))
        })?;

        self.headers.insert(key, value);
        Ok(self)
    }

    /// Set the request body.
    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Send the request and get a response.
    ///
    /// Any HTTP status is returned as a [`Response`]; only network failures
    /// and timeouts are errors here.
    pub async fn send(self) -> Result<Response> {
        let client = self
            .http_client
            .ok_or_else(|| Error::HttpClient("No HTTP client configured".to_string()))?;

        let exchange =
            HttpExchange::begin(&self.method, &self.url, self.body.as_ref().map_or(0, Vec::len));

        let mut req = client
            .request(self.method.clone(), self.url.as_str())
            .timeout(self.timeout)
            .headers(self.headers);

        if let Some(body) = self.body {
            req = req.body(body);
        }

        let timeout = self.timeout;
        let transport_error = |e: reqwest::Error| {
            let error = if e.is_timeout() {
                Error::Timeout(timeout)
            } else {
                Error::Connection(e.to_string())
            };
            exchange.fail(&error);
            error
        };

        let resp = req.send().await.map_err(transport_error)?;
        let status = resp.status();
        let body = resp.bytes().await.map_err(transport_error)?;

        exchange.finish(status, &body);
        Ok(Response::new(status, body))
    }

    /// Get the URL.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Get the headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}
