//! HTTP transport
//!
//! This module provides the request/response layer for the client: a
//! transport trait, the default reqwest-backed provider, and the request and
//! response wrappers it uses.

pub use provider::HttpProvider;
pub use request::RequestBuilder;
pub use response::Response;
pub use xcloud_provider::{XcloudHttpProvider, XcloudHttpProviderBuilder};

#[cfg(test)]
pub(crate) mod mock;
pub mod provider;
mod request;
mod response;
mod xcloud_provider;

// Re-export HTTP types from the http crate for convenience
pub use http::{HeaderMap, Method, StatusCode};
