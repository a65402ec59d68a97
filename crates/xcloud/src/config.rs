//! Configuration for the XCLOUD client

use secrecy::SecretString;
use std::time::Duration;

use crate::duration::parse_duration;

/// Configuration for the XCLOUD client.
///
/// Immutable once a [`Client`](crate::Client) has been built from it. The
/// endpoint and token are taken as opaque strings; an endpoint that does not
/// form a URL only fails when a request is made.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the API, e.g. `http://localhost:1337`
    pub endpoint: String,

    /// Bearer token for authentication
    pub token: SecretString,

    /// Wait between two polls of an action
    pub poll_interval: Duration,

    /// Version embedded in the user agent
    pub client_version: String,

    /// Product name embedded in the user agent
    pub user_agent_product: String,

    /// Timeout for a single request
    pub timeout: Duration,

    /// Default deadline for waiting on an action
    pub action_timeout: Duration,

    /// Connection pool configuration
    pub connection_pool: ConnectionPoolConfig,
}

impl ClientConfig {
    /// Create a configuration from raw inputs.
    ///
    /// `poll_interval` is parsed leniently: text that is not a valid,
    /// positive duration (`"banana"`, `""`, `"-1s"`) falls back to
    /// [`DEFAULT_POLL_INTERVAL`](crate::DEFAULT_POLL_INTERVAL). This never fails.
    ///
    /// # Example
    ///
    /// ```
    /// use std::time::Duration;
    /// use xcloud::ClientConfig;
    ///
    /// let config = ClientConfig::new("http://localhost:1337", "token", "banana", "1.0.0");
    /// assert_eq!(config.poll_interval, Duration::from_millis(500));
    /// ```
    pub fn new(
        endpoint: impl Into<String>,
        token: impl Into<String>,
        poll_interval: &str,
        client_version: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            token: SecretString::new(token.into().into_boxed_str()),
            poll_interval: poll_interval_or_default(poll_interval),
            client_version: client_version.into(),
            user_agent_product: crate::DEFAULT_USER_AGENT_PRODUCT.to_string(),
            timeout: crate::DEFAULT_REQUEST_TIMEOUT,
            action_timeout: crate::DEFAULT_ACTION_TIMEOUT,
            connection_pool: ConnectionPoolConfig::default(),
        }
    }

    /// Create a new builder.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Value sent in the `User-Agent` header.
    pub fn user_agent(&self) -> String {
        format!("{}/{}", self.user_agent_product, self.client_version)
    }

    /// Load configuration from environment variables.
    ///
    /// This will look for:
    /// - `XCLOUD_ENDPOINT` for the API base URL (required)
    /// - `XCLOUD_TOKEN` for authentication (required)
    /// - `XCLOUD_POLL_INTERVAL` for the action poll interval (e.g. `"1s"`)
    /// - `XCLOUD_TIMEOUT` for the request timeout (in seconds)
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingConfig`](crate::Error::MissingConfig) if the
    /// endpoint or token is unset or empty.
    #[cfg(feature = "env")]
    pub fn from_env() -> Result<Self, crate::error::Error> {
        use std::env;

        let non_empty = |name: &str| env::var(name).ok().filter(|v| !v.trim().is_empty());

        let mut builder = ClientConfigBuilder::new();

        if let Some(endpoint) = non_empty("XCLOUD_ENDPOINT") {
            builder = builder.endpoint(endpoint);
        }
        if let Some(token) = non_empty("XCLOUD_TOKEN") {
            builder = builder.token(token);
        }
        if let Some(poll_interval) = non_empty("XCLOUD_POLL_INTERVAL") {
            builder = builder.poll_interval_text(&poll_interval);
        }
        if let Some(timeout_str) = non_empty("XCLOUD_TIMEOUT") {
            match timeout_str.trim().parse::<u64>() {
                Ok(timeout_secs) => {
                    builder = builder.timeout(Duration::from_secs(timeout_secs));
                }
                Err(e) => tracing::warn!(
                    timeout = %timeout_str,
                    error = %e,
                    default_secs = crate::DEFAULT_REQUEST_TIMEOUT.as_secs(),
                    "Invalid XCLOUD_TIMEOUT, using default"
                ),
            }
        }

        builder.build()
    }

    /// Load a `.env` file, if present, then read the environment.
    #[cfg(feature = "env")]
    pub fn from_dotenv() -> Result<Self, crate::error::Error> {
        if let Err(e) = dotenvy::dotenv()
            && !e.not_found()
        {
            tracing::warn!(error = %e, "Failed to load .env file");
        }
        Self::from_env()
    }
}

/// Parse a poll interval, falling back to the default on bad input.
pub(crate) fn poll_interval_or_default(text: &str) -> Duration {
    match parse_duration(text) {
        Ok(interval) if !interval.is_zero() => interval,
        Ok(_) => {
            tracing::warn!(
                poll_interval = %text,
                default_ms = crate::DEFAULT_POLL_INTERVAL.as_millis(),
                "Poll interval must be positive, using default"
            );
            crate::DEFAULT_POLL_INTERVAL
        }
        Err(e) => {
            tracing::warn!(
                poll_interval = %text,
                error = %e,
                default_ms = crate::DEFAULT_POLL_INTERVAL.as_millis(),
                "Invalid poll interval, using default"
            );
            crate::DEFAULT_POLL_INTERVAL
        }
    }
}

/// Replace a zero request timeout with the default.
pub(crate) fn request_timeout_or_default(timeout: Duration) -> Duration {
    if timeout.is_zero() {
        tracing::warn!(
            default_secs = crate::DEFAULT_REQUEST_TIMEOUT.as_secs(),
            "Request timeout must be positive, using default"
        );
        crate::DEFAULT_REQUEST_TIMEOUT
    } else {
        timeout
    }
}

/// Configuration for HTTP connection pooling.
#[derive(Debug, Clone)]
pub struct ConnectionPoolConfig {
    /// Maximum number of idle connections per host
    pub max_idle_per_host: usize,

    /// Idle connection timeout
    pub idle_timeout: Duration,

    /// TCP keep-alive interval
    pub tcp_keepalive: Option<Duration>,
}

impl Default for ConnectionPoolConfig {
    fn default() -> Self {
        Self {
            max_idle_per_host: 10,
            idle_timeout: Duration::from_secs(90),
            tcp_keepalive: Some(Duration::from_secs(60)),
        }
    }
}

/// Builder for creating ClientConfig with a fluent API.
#[derive(Debug)]
pub struct ClientConfigBuilder {
    endpoint: Option<String>,
    token: Option<SecretString>,
    poll_interval: Duration,
    client_version: String,
    user_agent_product: String,
    timeout: Duration,
    action_timeout: Duration,
    connection_pool: ConnectionPoolConfig,
}

impl Default for ClientConfigBuilder {
    fn default() -> Self {
        Self {
            endpoint: None,
            token: None,
            poll_interval: crate::DEFAULT_POLL_INTERVAL,
            client_version: crate::VERSION.to_string(),
            user_agent_product: crate::DEFAULT_USER_AGENT_PRODUCT.to_string(),
            timeout: crate::DEFAULT_REQUEST_TIMEOUT,
            action_timeout: crate::DEFAULT_ACTION_TIMEOUT,
            connection_pool: ConnectionPoolConfig::default(),
        }
    }
}

impl ClientConfigBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API endpoint.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the bearer token.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(SecretString::new(token.into().into_boxed_str()));
        self
    }

    /// Set the poll interval.
    pub fn poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = if poll_interval.is_zero() {
            crate::DEFAULT_POLL_INTERVAL
        } else {
            poll_interval
        };
        self
    }

    /// Set the poll interval from text such as `"750ms"`, falling back to
    /// the default if it does not parse.
    pub fn poll_interval_text(mut self, poll_interval: &str) -> Self {
        self.poll_interval = poll_interval_or_default(poll_interval);
        self
    }

    /// Set the client version sent in the user agent.
    pub fn client_version(mut self, version: impl Into<String>) -> Self {
        self.client_version = version.into();
        self
    }

    /// Set the product name sent in the user agent.
    pub fn user_agent_product(mut self, product: impl Into<String>) -> Self {
        self.user_agent_product = product.into();
        self
    }

    /// Set the request timeout.
    ///
    /// A zero timeout is replaced by
    /// [`DEFAULT_REQUEST_TIMEOUT`](crate::DEFAULT_REQUEST_TIMEOUT).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = request_timeout_or_default(timeout);
        self
    }

    /// Set the default deadline for waiting on actions.
    pub fn action_timeout(mut self, timeout: Duration) -> Self {
        self.action_timeout = timeout;
        self
    }

    /// Set connection pool configuration.
    pub fn connection_pool(mut self, config: ConnectionPoolConfig) -> Self {
        self.connection_pool = config;
        self
    }

    /// Build the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingConfig`](crate::Error::MissingConfig) if the
    /// endpoint or token was not set or is empty.
    pub fn build(self) -> crate::Result<ClientConfig> {
        use secrecy::ExposeSecret;

        let endpoint = self
            .endpoint
            .filter(|e| !e.trim().is_empty())
            .ok_or_else(|| {
                crate::Error::MissingConfig(
                    "endpoint (set it explicitly or via XCLOUD_ENDPOINT)".to_string(),
                )
            })?;
        let token = self
            .token
            .filter(|t| !t.expose_secret().trim().is_empty())
            .ok_or_else(|| {
                crate::Error::MissingConfig(
                    "token (set it explicitly or via XCLOUD_TOKEN)".to_string(),
                )
            })?;

        Ok(ClientConfig {
            endpoint,
            token,
            poll_interval: self.poll_interval,
            client_version: self.client_version,
            user_agent_product: self.user_agent_product,
            timeout: self.timeout,
            action_timeout: self.action_timeout,
            connection_pool: self.connection_pool,
        })
    }
}
