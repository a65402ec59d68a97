//! Actions API endpoint and the action tracker
//!
//! Mutating requests return an [`Action`] that finishes asynchronously.
//! [`Actions::wait_for`] polls it at a fixed interval until it reports
//! `is_finished`, the caller cancels, or the deadline passes.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::{Instant, sleep, sleep_until};
use tokio_util::sync::CancellationToken;

use super::Resource;
use crate::{
    client::Client,
    error::{Error, Result},
    http::Method,
    observability::PollContext,
    types::{Action, ActionEnvelope, ActionId},
};

/// Callback invoked with every non-terminal action seen while waiting.
pub type ProgressCallback = Arc<dyn Fn(&Action) + Send + Sync>;

/// Per-call settings for [`Actions::wait_for`].
///
/// Unset values fall back to the client configuration.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use xcloud::{CancellationToken, WaitOptions};
///
/// let cancel = CancellationToken::new();
/// let options = WaitOptions::new()
///     .poll_interval(Duration::from_secs(2))
///     .timeout(Duration::from_secs(300))
///     .cancellation(cancel.clone())
///     .on_progress(|action| println!("{} is {}", action.id, action.status));
/// ```
#[derive(Clone, Default)]
pub struct WaitOptions {
    poll_interval: Option<Duration>,
    timeout: Option<Duration>,
    cancel: Option<CancellationToken>,
    on_progress: Option<ProgressCallback>,
}

impl WaitOptions {
    /// Options that use the client defaults for everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait this long between polls instead of the configured interval.
    ///
    /// A zero interval is ignored.
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = Some(interval).filter(|i| !i.is_zero());
        self
    }

    /// Give up with [`Error::DeadlineExceeded`] after this long.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Stop with [`Error::Cancelled`] once this token is cancelled.
    pub fn cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Call `callback` with every non-terminal poll result.
    pub fn on_progress(mut self, callback: impl Fn(&Action) + Send + Sync + 'static) -> Self {
        self.on_progress = Some(Arc::new(callback));
        self
    }
}

impl fmt::Debug for WaitOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WaitOptions")
            .field("poll_interval", &self.poll_interval)
            .field("timeout", &self.timeout)
            .field("cancel", &self.cancel)
            .field("on_progress", &self.on_progress.is_some())
            .finish()
    }
}

/// Actions API resource.
#[derive(Debug, Clone)]
pub struct Actions {
    client: Client,
}

impl Actions {
    /// Create a new Actions resource.
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Fetch the current state of an action.
    pub async fn get(&self, action_id: ActionId) -> Result<Action> {
        let envelope: ActionEnvelope = self
            .client
            .send(Method::GET, &format!("/actions/{}", action_id), None)
            .await?;
        Ok(envelope.action)
    }

    /// Poll an action until it finishes.
    ///
    /// Every iteration checks cancellation and the deadline, waits one poll
    /// interval, then fetches the action. A wait always precedes the first
    /// fetch. The first terminal action is returned; any fetch failure is
    /// returned unchanged and stops polling.
    ///
    /// # Errors
    ///
    /// - [`Error::Cancelled`] if the cancellation token fires
    /// - [`Error::DeadlineExceeded`] if the deadline passes first
    /// - any transport or decode error from a poll
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// # use xcloud::{Client, WaitOptions};
    /// # async fn example(client: Client) -> Result<(), Box<dyn std::error::Error>> {
    /// let action = client.actions().wait_for(7, &WaitOptions::default()).await?;
    /// assert!(action.is_finished);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn wait_for(&self, action_id: ActionId, options: &WaitOptions) -> Result<Action> {
        let interval = options
            .poll_interval
            .unwrap_or_else(|| self.client.poll_interval());
        let timeout = options
            .timeout
            .unwrap_or_else(|| self.client.action_timeout());
        let cancel = options.cancel.clone().unwrap_or_default();
        let deadline = deadline_after(timeout);

        let mut ctx = PollContext::start(action_id, interval, timeout);

        let cancelled = |ctx: &PollContext| {
            ctx.log_cancelled();
            Error::Cancelled { action_id }
        };
        let expired = |ctx: &PollContext| {
            ctx.log_deadline(timeout);
            Error::DeadlineExceeded { action_id, timeout }
        };

        loop {
            if cancel.is_cancelled() {
                return Err(cancelled(&ctx));
            }
            if Instant::now() >= deadline {
                return Err(expired(&ctx));
            }

            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(cancelled(&ctx)),
                _ = sleep_until(deadline) => return Err(expired(&ctx)),
                _ = sleep(interval) => {}
            }

            ctx.record_poll();
            let action = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(cancelled(&ctx)),
                _ = sleep_until(deadline) => return Err(expired(&ctx)),
                result = self.get(action_id) => {
                    result.inspect_err(|e| ctx.log_error(&e.to_string()))?
                }
            };

            if action.is_terminal() {
                ctx.log_finished(&action);
                return Ok(action);
            }

            ctx.log_pending(&action);
            if let Some(callback) = &options.on_progress {
                callback(&action);
            }
        }
    }
}

impl Resource for Actions {
    fn client(&self) -> &Client {
        &self.client
    }
}

/// Instant `timeout` from now, saturating far in the future.
fn deadline_after(timeout: Duration) -> Instant {
    let now = Instant::now();
    now.checked_add(timeout)
        .unwrap_or_else(|| now + Duration::from_secs(100 * 365 * 24 * 60 * 60))
}
