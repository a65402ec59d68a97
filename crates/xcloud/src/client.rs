//! Main client implementation for the XCLOUD API

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::{
    config::{ClientConfig, ClientConfigBuilder, ConnectionPoolConfig},
    error::Result,
    http::{HttpProvider, Method, XcloudHttpProvider},
    resources::{Actions, Servers},
};

/// Main client for interacting with the XCLOUD API.
///
/// The client is an immutable value: it owns the transport and the settings
/// used by the action tracker. Cloning is cheap and clones share the same
/// connection pool.
///
/// # Example
///
/// ```rust,no_run
/// use xcloud::{Client, ClientConfig};
///
/// let config = ClientConfig::new("http://localhost:1337", "my-token", "1s", "1.0.0");
/// let client = Client::from_config(config).unwrap();
/// ```
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    /// HTTP provider for making requests (handles auth and headers)
    provider: Arc<dyn HttpProvider>,
    /// Default wait between two action polls
    poll_interval: Duration,
    /// Default deadline for waiting on an action
    action_timeout: Duration,
}

impl Client {
    /// Create a new client builder.
    pub fn builder() -> XcloudClientBuilder {
        XcloudClientBuilder::default()
    }

    /// Create a client from a configuration object.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        let provider = Arc::new(XcloudHttpProvider::from_config(&config)?);
        Ok(Self::from_parts(&config, provider))
    }

    /// Create a client with a custom HTTP provider.
    ///
    /// Tracker settings are taken from `config`; the transport settings in it
    /// are ignored in favour of the given provider.
    pub fn from_parts(config: &ClientConfig, provider: Arc<dyn HttpProvider>) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                provider,
                poll_interval: config.poll_interval,
                action_timeout: config.action_timeout,
            }),
        }
    }

    /// Access the Servers API endpoint.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// # use xcloud::Client;
    /// # async fn example(client: Client) -> Result<(), Box<dyn std::error::Error>> {
    /// let server = client.servers().get(42).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn servers(&self) -> Servers {
        Servers::new(self.clone())
    }

    /// Access the Actions API endpoint.
    pub fn actions(&self) -> Actions {
        Actions::new(self.clone())
    }

    /// Default wait between two action polls.
    pub fn poll_interval(&self) -> Duration {
        self.inner.poll_interval
    }

    /// Default deadline for waiting on an action.
    pub fn action_timeout(&self) -> Duration {
        self.inner.action_timeout
    }

    /// Send a request and decode the successful response body.
    pub(crate) async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&(dyn erased_serde::Serialize + Send + Sync)>,
    ) -> Result<T> {
        self.inner
            .provider
            .request(method, path, body)
            .await?
            .json()
    }

    /// Get the base URL for the API
    pub(crate) fn base_url(&self) -> &str {
        self.inner.provider.base_url()
    }

    /// Get the provider name (for debugging)
    pub(crate) fn provider_name(&self) -> &'static str {
        self.inner.provider.provider_name()
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("provider", &self.provider_name())
            .field("base_url", &self.base_url())
            .field("poll_interval", &self.inner.poll_interval)
            .field("action_timeout", &self.inner.action_timeout)
            .finish()
    }
}

/// Builder for creating a configured Client.
#[derive(Debug, Default)]
pub struct XcloudClientBuilder {
    config: ClientConfigBuilder,
}

impl XcloudClientBuilder {
    /// Set the API endpoint.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.config = self.config.endpoint(endpoint);
        self
    }

    /// Set the bearer token.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.config = self.config.token(token);
        self
    }

    /// Set the poll interval from text such as `"1s"`.
    ///
    /// Text that does not parse to a positive duration falls back to 500ms.
    pub fn poll_interval(mut self, poll_interval: &str) -> Self {
        self.config = self.config.poll_interval_text(poll_interval);
        self
    }

    /// Set the poll interval.
    pub fn poll_interval_duration(mut self, poll_interval: Duration) -> Self {
        self.config = self.config.poll_interval(poll_interval);
        self
    }

    /// Set the client version sent in the user agent.
    pub fn client_version(mut self, version: impl Into<String>) -> Self {
        self.config = self.config.client_version(version);
        self
    }

    /// Set the product name sent in the user agent.
    pub fn user_agent_product(mut self, product: impl Into<String>) -> Self {
        self.config = self.config.user_agent_product(product);
        self
    }

    /// Set the timeout for a single request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.timeout(timeout);
        self
    }

    /// Set the default deadline for waiting on actions.
    pub fn action_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.action_timeout(timeout);
        self
    }

    /// Set connection pool configuration.
    pub fn connection_pool(mut self, config: ConnectionPoolConfig) -> Self {
        self.config = self.config.connection_pool(config);
        self
    }

    /// Build the client with the configured options.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingConfig`](crate::Error::MissingConfig) if the
    /// endpoint or token is missing, or an error if the HTTP client cannot
    /// be initialized.
    pub fn build(self) -> Result<Client> {
        Client::from_config(self.config.build()?)
    }
}
