//! Type definitions for the XCLOUD API
//!
//! Wire types for servers and actions, mirroring the JSON the API returns.

mod action;
mod server;

pub use action::{Action, ActionId};
pub(crate) use action::ActionEnvelope;
pub use server::{
    Datacenter, Image, Server, ServerCreateRequest, ServerCreateRequestBuilder, ServerId,
    ServerType,
};
pub(crate) use server::{ServerCreateResponse, ServerDeleteResponse, ServerEnvelope};
