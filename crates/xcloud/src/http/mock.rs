//! Scripted in-memory transport for unit tests

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::{HttpProvider, Method, Response, provider::serialize_body};
use crate::{
    client::Client,
    config::ClientConfig,
    error::{Error, Result},
};

/// A request seen by [`MockProvider`].
#[derive(Debug, Clone)]
pub(crate) struct RecordedCall {
    pub(crate) method: Method,
    pub(crate) path: String,
    pub(crate) body: Option<serde_json::Value>,
    pub(crate) at: tokio::time::Instant,
}

/// Replies to requests in order from a script.
///
/// Every request must match the next scripted method and path; running out
/// of script or a mismatch fails the request with a connection error.
#[derive(Debug, Default)]
pub(crate) struct MockProvider {
    script: Mutex<VecDeque<(Method, String, Result<Response>)>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockProvider {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queue a 200 reply with a JSON body.
    pub(crate) fn reply(self: &Arc<Self>, method: Method, path: &str, body: &str) -> &Arc<Self> {
        self.push(method, path, Ok(Response::ok(body.to_string())))
    }

    /// Queue a failed reply.
    pub(crate) fn fail(self: &Arc<Self>, method: Method, path: &str, error: Error) -> &Arc<Self> {
        self.push(method, path, Err(error))
    }

    fn push(self: &Arc<Self>, method: Method, path: &str, reply: Result<Response>) -> &Arc<Self> {
        self.script
            .lock()
            .unwrap()
            .push_back((method, path.to_string(), reply));
        self
    }

    pub(crate) fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn count(&self, method: &Method, path: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.method == *method && c.path == path)
            .count()
    }

    /// Client over this provider with the given poll interval.
    pub(crate) fn client(self: &Arc<Self>, poll_interval: &str) -> Client {
        let config = ClientConfig::new("http://mock", "mock-token", poll_interval, "0.0.0");
        Client::from_parts(&config, self.clone())
    }
}

#[async_trait]
impl HttpProvider for MockProvider {
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&(dyn erased_serde::Serialize + Send + Sync)>,
    ) -> Result<Response> {
        let body = match body {
            Some(body) => Some(serde_json::from_slice(&serialize_body(body)?)?),
            None => None,
        };
        self.calls.lock().unwrap().push(RecordedCall {
            method: method.clone(),
            path: path.to_string(),
            body,
            at: tokio::time::Instant::now(),
        });

        let next = self.script.lock().unwrap().pop_front();
        match next {
            Some((m, p, reply)) if m == method && p == path => reply,
            Some((m, p, _)) => Err(Error::Connection(format!(
                "unexpected request {} {}, expected {} {}",
                method, path, m, p
            ))),
            None => Err(Error::Connection(format!(
                "unexpected request {} {}, script is empty",
                method, path
            ))),
        }
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn base_url(&self) -> &str {
        "http://mock"
    }
}
