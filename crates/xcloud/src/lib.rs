//! # XCLOUD client
//!
//! Rust client for the XCLOUD control-plane API supporting:
//! - Server create, read and delete
//! - Polling of asynchronous actions until they finish
//! - Cancellation and deadlines while waiting
//! - Bearer authentication and a versioned user agent
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use xcloud::{Client, ServerCreateRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::builder()
//!         .endpoint("http://localhost:1337")
//!         .token("my-token")
//!         .poll_interval("1s")
//!         .build()?;
//!
//!     let server = client
//!         .servers()
//!         .create(&ServerCreateRequest::new("web-1", "ubuntu-22.04", "cx11", "fsn1-dc14"))
//!         .await?;
//!
//!     println!("{:?} at {:?}", server.id, server.ipv4_address);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

use std::time::Duration;

// Re-export commonly used types
pub use client::{Client, XcloudClientBuilder};
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use resources::{Actions, Servers, WaitOptions};
pub use types::*;

// Module declarations
pub mod client;
pub mod config;
pub mod duration;
pub mod error;
pub mod http;
pub mod observability;
pub mod resources;
pub mod types;

// Re-export key dependencies for convenience
pub use async_trait::async_trait;
pub use tokio_util::sync::CancellationToken;

/// Prelude module for common imports
///
/// # Examples
///
/// ```rust
/// use xcloud::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        CancellationToken, Client, ClientConfig, Error, Result, WaitOptions,
        types::{Action, ActionId, Server, ServerCreateRequest, ServerId},
    };
}

/// Crate version, automatically updated from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Product name sent in the user agent unless overridden
pub const DEFAULT_USER_AGENT_PRODUCT: &str = "xcloud-rust";

/// Wait between action polls when none (or an unusable one) is configured
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Timeout for a single HTTP request
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Deadline for waiting on an action
pub const DEFAULT_ACTION_TIMEOUT: Duration = Duration::from_secs(30 * 60);
