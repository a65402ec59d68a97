//! Servers API endpoint

use tracing::debug;

use super::{Resource, WaitOptions};
use crate::{
    client::Client,
    error::{Error, Result},
    http::Method,
    types::{
        Server, ServerCreateRequest, ServerCreateResponse, ServerDeleteResponse, ServerEnvelope,
        ServerId,
    },
};

/// Servers API resource.
///
/// Create and delete are asynchronous on the API side; both submit the
/// request and then wait for the returned action to finish. If either fails
/// part-way, the remote server state is unknown and is not reconciled.
#[derive(Debug, Clone)]
pub struct Servers {
    client: Client,
}

impl Servers {
    /// Create a new Servers resource.
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Fetch a server by id.
    pub async fn get(&self, server_id: ServerId) -> Result<Server> {
        let envelope: ServerEnvelope = self
            .client
            .send(Method::GET, &format!("/servers/{}", server_id), None)
            .await?;
        Ok(envelope.server)
    }

    /// Create a server and wait until it is provisioned.
    ///
    /// Returns the server as read back from the API after its creation
    /// action finished, so server-assigned fields such as `ipv4_address`
    /// are filled in.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// # use xcloud::{Client, ServerCreateRequest};
    /// # async fn example(client: Client) -> Result<(), Box<dyn std::error::Error>> {
    /// let request = ServerCreateRequest::new("web-1", "ubuntu-22.04", "cx11", "fsn1-dc14");
    /// let server = client.servers().create(&request).await?;
    /// println!("{:?}", server.ipv4_address);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create(&self, request: &ServerCreateRequest) -> Result<Server> {
        self.create_with(request, &WaitOptions::default()).await
    }

    /// Create a server with explicit wait options.
    ///
    /// # Errors
    ///
    /// Fails without a partial result if the submit, the wait or the final
    /// read fails. The error names the failing stage; use
    /// [`Error::root_cause`] to reach the underlying failure.
    pub async fn create_with(
        &self,
        request: &ServerCreateRequest,
        options: &WaitOptions,
    ) -> Result<Server> {
        let body: &(dyn erased_serde::Serialize + Send + Sync) = request;
        let submitted: ServerCreateResponse = self
            .client
            .send(Method::POST, "/servers", Some(body))
            .await
            .map_err(|e| {
                e.context(format!("failed to submit creation of server '{}'", request.name))
            })?;

        let server_id = submitted.server.id.ok_or_else(|| {
            Error::ResponseValidation("create response has no server id".to_string())
                .context(format!("failed to submit creation of server '{}'", request.name))
        })?;
        debug!(
            server_id,
            action_id = submitted.action.id,
            name = %request.name,
            "Server creation accepted"
        );

        self.client
            .actions()
            .wait_for(submitted.action.id, options)
            .await
            .map_err(|e| {
                e.context(format!("failed waiting for creation of server {}", server_id))
            })?;

        self.get(server_id)
            .await
            .map_err(|e| e.context(format!("failed to read server {} after creation", server_id)))
    }

    /// Delete a server and wait until the deletion finished.
    ///
    /// The server is not read back afterwards.
    pub async fn delete(&self, server_id: ServerId) -> Result<()> {
        self.delete_with(server_id, &WaitOptions::default()).await
    }

    /// Delete a server with explicit wait options.
    pub async fn delete_with(&self, server_id: ServerId, options: &WaitOptions) -> Result<()> {
        let submitted: ServerDeleteResponse = self
            .client
            .send(Method::DELETE, &format!("/servers/{}", server_id), None)
            .await
            .map_err(|e| e.context(format!("failed to submit deletion of server {}", server_id)))?;
        debug!(
            server_id,
            action_id = submitted.action.id,
            "Server deletion accepted"
        );

        self.client
            .actions()
            .wait_for(submitted.action.id, options)
            .await
            .map_err(|e| {
                e.context(format!("failed waiting for deletion of server {}", server_id))
            })?;

        Ok(())
    }
}

impl Resource for Servers {
    fn client(&self) -> &Client {
        &self.client
    }
}
