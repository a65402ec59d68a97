//! API resource endpoints
//!
//! This module contains the implementation of all API endpoints,
//! organized by resource type.

pub mod actions;
pub mod servers;

pub use actions::{Actions, ProgressCallback, WaitOptions};
pub use servers::Servers;

use crate::client::Client;

/// Base trait for API resources.
pub trait Resource {
    /// Get a reference to the client.
    fn client(&self) -> &Client;
}
