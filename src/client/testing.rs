//! Scripted transport for unit tests

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use super::{ApiRequest, ApiResponse, Method, Transport, TransportError};

type Key = (Method, String);

/// Replays canned responses per `(method, path)` and records every request.
///
/// A path with no canned response fails like an unreachable server.
#[derive(Clone, Default)]
pub(crate) struct MockTransport {
    responses: Arc<Mutex<HashMap<Key, VecDeque<ApiResponse>>>>,
    log: Arc<Mutex<Vec<ApiRequest>>>,
}

impl MockTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Queue a response; repeated calls for the same key answer in order and
    /// the last one repeats.
    pub(crate) fn respond(&self, method: Method, path: &str, status: u16, body: &str) {
        self.responses
            .lock()
            .unwrap()
            .entry((method, path.to_string()))
            .or_default()
            .push_back(ApiResponse {
                status,
                body: body.as_bytes().to_vec(),
            });
    }

    pub(crate) fn requests(&self) -> Vec<ApiRequest> {
        self.log.lock().unwrap().clone()
    }

    pub(crate) fn count(&self, method: Method, path: &str) -> usize {
        self.log
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.method == method && path_of(&r.url) == path)
            .count()
    }
}

fn path_of(url: &str) -> &str {
    url.find("://")
        .and_then(|scheme| url[scheme + 3..].find('/').map(|i| &url[scheme + 3 + i..]))
        .unwrap_or(url)
}

#[async_trait(?Send)]
impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let key = (request.method, path_of(&request.url).to_string());
        self.log.lock().unwrap().push(request);

        let mut responses = self.responses.lock().unwrap();
        let queue = responses
            .get_mut(&key)
            .ok_or_else(|| TransportError::new(format!("connection refused: {} {}", key.0, key.1)))?;

        let response = if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        };
        response.ok_or_else(|| TransportError::new("no response"))
    }
}
