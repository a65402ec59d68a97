//! Server-related types

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use super::Action;

/// Identifier of a server.
pub type ServerId = i64;

/// A virtual server.
///
/// `id` is absent until the create flow has completed; `ipv4_address` and
/// `is_deprovisioned` are assigned by the API and are read-only from the
/// caller's point of view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Server {
    /// Unique identifier, absent before creation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ServerId>,

    /// Name of the server
    pub name: String,

    /// Operating system image
    pub image: Image,

    /// Size/flavour of the server
    pub server_type: ServerType,

    /// Datacenter hosting the server
    pub datacenter: Datacenter,

    /// Assigned IPv4 address, once provisioned
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipv4_address: Option<String>,

    /// Set once a delete has been accepted
    #[serde(default, skip_serializing)]
    pub is_deprovisioned: Option<bool>,
}

/// Operating system image reference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Image {
    /// Server-side identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// Caller-facing name, e.g. `ubuntu-22.04`
    pub name: String,

    /// When the image was registered
    #[serde(default, skip_serializing)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Image {
    /// Reference an image by name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// Server type reference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerType {
    /// Server-side identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// Caller-facing name, e.g. `cx11`
    pub name: String,

    /// CPU architecture
    #[serde(default, skip_serializing)]
    pub architecture: Option<String>,

    /// Whether the type is being phased out
    #[serde(default, skip_serializing)]
    pub is_deprecated: Option<bool>,
}

impl ServerType {
    /// Reference a server type by name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// Datacenter reference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Datacenter {
    /// Server-side identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// Caller-facing name, e.g. `fsn1-dc14`
    pub name: String,

    /// When the datacenter was registered
    #[serde(default, skip_serializing)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Datacenter {
    /// Reference a datacenter by name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// Parameters for creating a server.
///
/// Encodes to `{name, image:{name}, server_type:{name}, datacenter:{name}}`.
///
/// # Example
///
/// ```
/// use xcloud::ServerCreateRequest;
///
/// let request = ServerCreateRequest::builder()
///     .name("web-1")
///     .image("ubuntu-22.04")
///     .server_type("cx11")
///     .datacenter("fsn1-dc14")
///     .build()
///     .unwrap();
/// assert_eq!(request.name, "web-1");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Builder)]
#[builder(setter(into))]
pub struct ServerCreateRequest {
    /// Name of the new server
    pub name: String,

    /// Image to install
    pub image: Image,

    /// Server type to allocate
    pub server_type: ServerType,

    /// Datacenter to place the server in
    pub datacenter: Datacenter,
}

impl ServerCreateRequest {
    /// Create a request from plain names.
    pub fn new(
        name: impl Into<String>,
        image: impl Into<String>,
        server_type: impl Into<String>,
        datacenter: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            image: Image::named(image),
            server_type: ServerType::named(server_type),
            datacenter: Datacenter::named(datacenter),
        }
    }

    /// Create a new builder.
    pub fn builder() -> ServerCreateRequestBuilder {
        ServerCreateRequestBuilder::default()
    }
}

impl From<&str> for Image {
    fn from(name: &str) -> Self {
        Image::named(name)
    }
}

impl From<String> for Image {
    fn from(name: String) -> Self {
        Image::named(name)
    }
}

impl From<&str> for ServerType {
    fn from(name: &str) -> Self {
        ServerType::named(name)
    }
}

impl From<String> for ServerType {
    fn from(name: String) -> Self {
        ServerType::named(name)
    }
}

impl From<&str> for Datacenter {
    fn from(name: &str) -> Self {
        Datacenter::named(name)
    }
}

impl From<String> for Datacenter {
    fn from(name: String) -> Self {
        Datacenter::named(name)
    }
}

/// Envelope returned by `GET /servers/{id}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ServerEnvelope {
    pub(crate) server: Server,
}

/// Response to `POST /servers`.
#[derive(Debug, Deserialize)]
pub(crate) struct ServerCreateResponse {
    pub(crate) action: Action,
    pub(crate) server: Server,
}

/// Response to `DELETE /servers/{id}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ServerDeleteResponse {
    pub(crate) action: Action,
}
