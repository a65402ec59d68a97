//! Centralized observability utilities for structured logging
//!
//! Every API exchange and every action poll is logged through this
//! layer, so the rest of the crate never formats log events itself.

use std::time::Duration;

use http::{Method, StatusCode};
use tokio::time::Instant;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::Error;
use crate::types::{Action, ActionId};

/// Log record for one HTTP exchange with the API.
///
/// Events carry the full URL, and the action id when the request polls
/// `/actions/{id}`, so poll traffic can be matched to a [`PollContext`].
#[derive(Debug)]
pub struct HttpExchange {
    method: Method,
    url: String,
    action_id: Option<ActionId>,
    request_bytes: usize,
    started: Instant,
}

impl HttpExchange {
    /// Log the outgoing request and start timing it
    pub fn begin(method: &Method, url: &Url, request_bytes: usize) -> Self {
        let exchange = Self {
            method: method.clone(),
            url: url.to_string(),
            action_id: action_id_from_path(url.path()),
            request_bytes,
            started: Instant::now(),
        };
        debug!(
            method = %exchange.method,
            url = %exchange.url,
            action_id = exchange.action_id,
            request_bytes = exchange.request_bytes,
            "Sending API request"
        );
        exchange
    }

    /// Time since the request was sent
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Log a received response. Anything but 200 is logged with its body.
    pub fn finish(&self, status: StatusCode, body: &[u8]) {
        if status == StatusCode::OK {
            debug!(
                method = %self.method,
                url = %self.url,
                action_id = self.action_id,
                status = status.as_u16(),
                response_bytes = body.len(),
                elapsed_ms = self.elapsed().as_millis(),
                "API request succeeded"
            );
        } else {
            warn!(
                method = %self.method,
                url = %self.url,
                action_id = self.action_id,
                status = status.as_u16(),
                body = %String::from_utf8_lossy(body),
                elapsed_ms = self.elapsed().as_millis(),
                "API returned an error status"
            );
        }
    }

    /// Log a request that got no response
    pub fn fail(&self, error: &Error) {
        warn!(
            method = %self.method,
            url = %self.url,
            action_id = self.action_id,
            elapsed_ms = self.elapsed().as_millis(),
            error = %error,
            "API request failed"
        );
    }
}

/// Action id of an `/actions/{id}` path, under any endpoint prefix.
fn action_id_from_path(path: &str) -> Option<ActionId> {
    let mut segments = path.trim_end_matches('/').rsplit('/');
    let id = segments.next()?.parse().ok()?;
    (segments.next()? == "actions").then_some(id)
}

/// Logging context for one wait on an action
#[derive(Debug)]
pub struct PollContext {
    /// Action being awaited
    pub action_id: ActionId,
    /// Number of polls sent so far
    pub poll_count: u32,
    started: Instant,
}

impl PollContext {
    /// Start tracking an action
    pub fn start(action_id: ActionId, interval: Duration, timeout: Duration) -> Self {
        debug!(
            action_id,
            interval_ms = interval.as_millis(),
            timeout_ms = timeout.as_millis(),
            "Waiting for action"
        );
        Self {
            action_id,
            poll_count: 0,
            started: Instant::now(),
        }
    }

    /// Time since the wait started
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Record that a poll is about to be sent
    pub fn record_poll(&mut self) {
        self.poll_count += 1;
    }

    /// Log a non-terminal poll
    pub fn log_pending(&self, action: &Action) {
        info!(
            action_id = action.id,
            command = action.command.as_deref(),
            status = %action.status,
            progress = action.progress,
            poll = self.poll_count,
            "action still running"
        );
    }

    /// Log the terminal poll
    pub fn log_finished(&self, action: &Action) {
        info!(
            action_id = action.id,
            command = action.command.as_deref(),
            status = %action.status,
            polls = self.poll_count,
            elapsed_ms = self.elapsed().as_millis(),
            "Action finished"
        );
    }

    /// Log a poll that failed
    pub fn log_error(&self, error: &str) {
        warn!(
            action_id = self.action_id,
            polls = self.poll_count,
            error = %error,
            "Polling action failed"
        );
    }

    /// Log that the caller cancelled the wait
    pub fn log_cancelled(&self) {
        info!(
            action_id = self.action_id,
            polls = self.poll_count,
            elapsed_ms = self.elapsed().as_millis(),
            "Waiting for action cancelled"
        );
    }

    /// Log that the deadline passed
    pub fn log_deadline(&self, timeout: Duration) {
        warn!(
            action_id = self.action_id,
            polls = self.poll_count,
            timeout_ms = timeout.as_millis(),
            "Action did not finish before the deadline"
        );
    }
}

/// Install a `tracing` subscriber writing to stderr.
///
/// Filtering follows `RUST_LOG`, defaulting to `xcloud=info`. Returns an
/// error if a global subscriber is already installed.
#[cfg(feature = "trace")]
#[cfg_attr(docsrs, doc(cfg(feature = "trace")))]
pub fn init_tracing() -> crate::Result<()> {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("xcloud=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .map_err(|e| crate::Error::Other(anyhow::anyhow!("failed to install subscriber: {e}")))
}
