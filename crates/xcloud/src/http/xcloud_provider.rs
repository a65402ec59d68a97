//! Standard XCLOUD API HTTP provider implementation
//!
//! This provider sends requests to the XCLOUD control-plane API with bearer
//! authentication and a versioned user agent.

use super::{HttpProvider, Method, RequestBuilder, Response, provider::serialize_body};
use crate::{
    config::{ClientConfig, ConnectionPoolConfig, request_timeout_or_default},
    error::{Error, Result},
};
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use std::{sync::Arc, time::Duration};
use url::Url;

/// HTTP provider for the XCLOUD API.
///
/// # Architecture
///
/// - Uses `reqwest` for the HTTP client and its connection pool
/// - Authenticates with `Authorization: Bearer <token>`
/// - Identifies itself with `User-Agent: <product>/<version>`
/// - Sends `Content-Type: application/json` only on POST, PUT and PATCH
/// - Bounds every request with a single timeout; never retries
///
/// # Example
///
/// ```rust,no_run
/// use xcloud::http::XcloudHttpProvider;
///
/// let provider = XcloudHttpProvider::builder()
///     .endpoint("http://localhost:1337")
///     .token("my-token")
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct XcloudHttpProvider {
    pub(crate) inner: Arc<ProviderInner>,
}

#[derive(Debug)]
pub(crate) struct ProviderInner {
    /// HTTP client for making requests
    pub(crate) http_client: reqwest::Client,
    /// Endpoint without trailing slash
    pub(crate) endpoint: String,
    /// Bearer token
    pub(crate) token: SecretString,
    /// Value of the user-agent header
    pub(crate) user_agent: String,
    /// Timeout applied to every request
    pub(crate) timeout: Duration,
}

impl XcloudHttpProvider {
    /// Create a new builder for configuring the provider.
    pub fn builder() -> XcloudHttpProviderBuilder {
        XcloudHttpProviderBuilder::default()
    }

    /// Build a provider from a client configuration.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Self::builder()
            .endpoint(config.endpoint.clone())
            .token(config.token.expose_secret())
            .user_agent(config.user_agent())
            .timeout(config.timeout)
            .connection_pool(config.connection_pool.clone())
            .build()
    }

    /// Join the endpoint and an API path into a request URL.
    pub(crate) fn url_for(&self, path: &str) -> Result<Url> {
        let raw = format!("{}{}", self.inner.endpoint, path);
        Url::parse(&raw).map_err(|e| {
            Error::InvalidUrl(format!(
                "Failed to construct URL from endpoint '{}' and path '{}': {}",
                self.inner.endpoint, path, e
            ))
        })
    }

    /// Create a request builder with provider configuration.
    fn build_request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = self.url_for(path)?;
        let carries_body = matches!(method, Method::POST | Method::PUT | Method::PATCH);

        let mut builder = RequestBuilder::new(method, url)
            .with_client(self.inner.http_client.clone())
            .timeout(self.inner.timeout)
            .try_header(
                "authorization",
                format!("Bearer {}", self.inner.token.expose_secret()),
            )?
            .try_header("user-agent", &self.inner.user_agent)?;

        if carries_body {
            builder = builder.try_header("content-type", "application/json")?;
        }

        Ok(builder)
    }
}

#[async_trait]
impl HttpProvider for XcloudHttpProvider {
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&(dyn erased_serde::Serialize + Send + Sync)>,
    ) -> Result<Response> {
        let mut builder = self.build_request(method, path)?;

        if let Some(body) = body {
            builder = builder.body(serialize_body(body)?);
        }

        builder.send().await?.error_for_status()
    }

    fn provider_name(&self) -> &'static str {
        "xcloud"
    }

    fn base_url(&self) -> &str {
        &self.inner.endpoint
    }
}

/// Builder for creating an `XcloudHttpProvider` with custom configuration.
#[derive(Default)]
pub struct XcloudHttpProviderBuilder {
    endpoint: Option<String>,
    token: Option<SecretString>,
    user_agent: Option<String>,
    timeout: Option<Duration>,
    connection_pool: ConnectionPoolConfig,
}

impl XcloudHttpProviderBuilder {
    /// Set the API endpoint (e.g. `http://localhost:1337`).
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the bearer token.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(SecretString::new(token.into().into_boxed_str()));
        self
    }

    /// Set the full user-agent header value.
    ///
    /// Defaults to `xcloud-rust/<crate version>`.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set the request timeout.
    ///
    /// Defaults to 30 seconds; zero also means the default.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(request_timeout_or_default(timeout));
        self
    }

    /// Set connection pool configuration.
    pub fn connection_pool(mut self, config: ConnectionPoolConfig) -> Self {
        self.connection_pool = config;
        self
    }

    /// Build the provider with the configured settings.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The endpoint or token is missing
    /// - HTTP client creation fails
    pub fn build(self) -> Result<XcloudHttpProvider> {
        let endpoint = self
            .endpoint
            .ok_or_else(|| Error::MissingConfig("endpoint".to_string()))?;
        let token = self
            .token
            .ok_or_else(|| Error::MissingConfig("token".to_string()))?;
        let timeout = self.timeout.unwrap_or(crate::DEFAULT_REQUEST_TIMEOUT);

        let mut client_builder = reqwest::Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(self.connection_pool.max_idle_per_host)
            .pool_idle_timeout(self.connection_pool.idle_timeout);
        if let Some(keepalive) = self.connection_pool.tcp_keepalive {
            client_builder = client_builder.tcp_keepalive(keepalive);
        }
        let http_client = client_builder
            .build()
            .map_err(|e| Error::HttpClient(e.to_string()))?;

        let inner = Arc::new(ProviderInner {
            http_client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            token,
            user_agent: self.user_agent.unwrap_or_else(|| {
                format!("{}/{}", crate::DEFAULT_USER_AGENT_PRODUCT, crate::VERSION)
            }),
            timeout,
        });

        Ok(XcloudHttpProvider { inner })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> XcloudHttpProvider {
        XcloudHttpProvider::builder()
            .endpoint("http://localhost:1337/")
            .token("test-token")
            .build()
            .unwrap()
    }

    #[test]
    fn test_builder_defaults() {
        let provider = provider();

        assert_eq!(provider.provider_name(), "xcloud");
        assert_eq!(provider.base_url(), "http://localhost:1337");
        assert_eq!(provider.inner.timeout, Duration::from_secs(30));
        assert_eq!(
            provider.inner.user_agent,
            format!("xcloud-rust/{}", crate::VERSION)
        );
    }

    #[test]
    fn test_builder_without_token_fails() {
        let result = XcloudHttpProvider::builder()
            .endpoint("http://localhost:1337")
            .build();
        assert!(matches!(result, Err(Error::MissingConfig(_))));
    }

    #[test]
    fn test_builder_without_endpoint_fails() {
        let result = XcloudHttpProvider::builder().token("t").build();
        assert!(matches!(result, Err(Error::MissingConfig(_))));
    }

    #[test]
    fn test_get_request_headers() {
        let request = provider().build_request(Method::GET, "/servers/42").unwrap();

        assert_eq!(request.url().as_str(), "http://localhost:1337/servers/42");
        let headers = request.headers();
        assert_eq!(headers.get("authorization").unwrap(), "Bearer test-token");
        assert!(headers.get("user-agent").is_some());
        assert!(headers.get("content-type").is_none());
    }

    #[test]
    fn test_delete_request_has_no_content_type() {
        let request = provider()
            .build_request(Method::DELETE, "/servers/42")
            .unwrap();
        assert!(request.headers().get("content-type").is_none());
    }

    #[test]
    fn test_post_request_has_content_type() {
        let request = provider().build_request(Method::POST, "/servers").unwrap();
        assert_eq!(
            request.headers().get("content-type").unwrap(),
            "application/json"
        );
    }

    #[test]
    fn test_endpoint_with_path_prefix_is_kept() {
        let provider = XcloudHttpProvider::builder()
            .endpoint("https://api.example.com/v1")
            .token("t")
            .build()
            .unwrap();
        let url = provider.url_for("/actions/7").unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/v1/actions/7");
    }

    #[test]
    fn test_unusable_endpoint_fails_at_request_time() {
        let provider = XcloudHttpProvider::builder()
            .endpoint("not a url")
            .token("t")
            .build()
            .expect("endpoint is not validated at construction");

        let err = provider.url_for("/servers/1").unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));
    }

    #[test]
    fn test_zero_timeout_uses_default() {
        let mut config = ClientConfig::new("http://localhost:1337", "t", "1s", "1.0.0");
        config.timeout = Duration::ZERO;
        let provider = XcloudHttpProvider::from_config(&config).unwrap();
        assert_eq!(provider.inner.timeout, crate::DEFAULT_REQUEST_TIMEOUT);
    }

    #[test]
    fn test_from_config_uses_custom_user_agent() {
        let config = ClientConfig::new("http://localhost:1337", "t", "1s", "2.3.4");
        let provider = XcloudHttpProvider::from_config(&config).unwrap();
        assert_eq!(provider.inner.user_agent, "xcloud-rust/2.3.4");
    }
}
