//! Action-related types

use serde::{Deserialize, Serialize};

/// Identifier of a server-side action.
pub type ActionId = i64;

/// Server-side handle for an asynchronous operation.
///
/// Actions are created by the API in response to a mutating request and
/// move from running to finished exactly once. The client only ever reads
/// them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    /// Unique identifier for the action
    pub id: ActionId,

    /// Operation the action represents (e.g. `CREATE_SERVER`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,

    /// Status reported by the API (e.g. `QUEUED`, `RUNNING`, `COMPLETED`)
    pub status: String,

    /// Terminal flag; once `true` the action will not change further
    pub is_finished: bool,

    /// Progress in percent, when reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<u8>,

    /// When the action started
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<chrono::DateTime<chrono::Utc>>,

    /// When the action finished
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Action {
    /// Whether the action reached its terminal state.
    pub fn is_terminal(&self) -> bool {
        self.is_finished
    }
}

/// Envelope returned by `GET /actions/{id}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ActionEnvelope {
    pub(crate) action: Action,
}
