//! Scripted transport for tests
//!
//! [`MockTransport`] records every request and answers from per-path
//! scripts: one-shot replies queued with [`MockTransport::respond_once`] are
//! consumed first, then the sticky reply set with [`MockTransport::respond`].
//! Unscripted paths answer 404.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use mcsw_core::prelude::*;
use serde_json::{json, Value};

use crate::transport::{ApiResponse, Transport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMethod {
    Get,
    Post,
    Download,
}

/// One request as seen by the mock
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: RequestMethod,
    pub path: String,
    pub body: Value,
    pub query: Vec<(String, String)>,
}

#[derive(Debug, Default)]
struct MockState {
    queued: HashMap<String, VecDeque<ApiResponse>>,
    sticky: HashMap<String, ApiResponse>,
    delays: HashMap<String, Duration>,
    downloads: HashMap<String, Vec<u8>>,
    requests: Vec<RecordedRequest>,
}

impl MockState {
    fn next_response(&mut self, path: &str) -> ApiResponse {
        if let Some(resp) = self.queued.get_mut(path).and_then(VecDeque::pop_front) {
            return resp;
        }
        self.sticky
            .get(path)
            .cloned()
            .unwrap_or_else(|| ApiResponse::new(404, json!({"message": "Not found"})))
    }
}

/// In-memory [`Transport`]. Clones share the same script and request log.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reply to every request on `path` with this response
    pub fn respond(&self, path: &str, status: u16, body: Value) {
        self.state
            .lock()
            .unwrap()
            .sticky
            .insert(path.to_string(), ApiResponse::new(status, body));
    }

    /// Queue a reply for the next request on `path`
    pub fn respond_once(&self, path: &str, status: u16, body: Value) {
        self.state
            .lock()
            .unwrap()
            .queued
            .entry(path.to_string())
            .or_default()
            .push_back(ApiResponse::new(status, body));
    }

    /// Make requests on `path` take `delay` before answering
    pub fn delay(&self, path: &str, delay: Duration) {
        self.state
            .lock()
            .unwrap()
            .delays
            .insert(path.to_string(), delay);
    }

    /// Serve `bytes` for a download whose `name` query equals `name`
    pub fn set_download(&self, name: &str, bytes: Vec<u8>) {
        self.state
            .lock()
            .unwrap()
            .downloads
            .insert(name.to_string(), bytes);
    }

    /// Every request seen so far, oldest first
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    /// Number of requests seen on `path`
    pub fn count(&self, path: &str) -> usize {
        self.state
            .lock()
            .unwrap()
            .requests
            .iter()
            .filter(|r| r.path == path)
            .count()
    }

    pub fn clear_requests(&self) {
        self.state.lock().unwrap().requests.clear();
    }

    fn record(
        &self,
        method: RequestMethod,
        path: &str,
        body: Value,
        query: &[(&str, &str)],
    ) -> Option<Duration> {
        let mut state = self.state.lock().unwrap();
        state.requests.push(RecordedRequest {
            method,
            path: path.to_string(),
            body,
            query: query
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        });
        state.delays.get(path).copied()
    }

    async fn answer(
        &self,
        method: RequestMethod,
        path: &str,
        body: Value,
        query: &[(&str, &str)],
    ) -> ApiResponse {
        if let Some(delay) = self.record(method, path, body, query) {
            tokio::time::sleep(delay).await;
        }
        self.state.lock().unwrap().next_response(path)
    }
}

impl Transport for MockTransport {
    async fn post(&self, path: &str, body: Value) -> ApiResponse {
        self.answer(RequestMethod::Post, path, body, &[]).await
    }

    async fn get(&self, path: &str, query: &[(&str, &str)]) -> ApiResponse {
        self.answer(RequestMethod::Get, path, Value::Null, query).await
    }

    async fn download(&self, path: &str, query: &[(&str, &str)]) -> Result<Vec<u8>> {
        if let Some(delay) = self.record(RequestMethod::Download, path, Value::Null, query) {
            tokio::time::sleep(delay).await;
        }
        let name = query
            .iter()
            .find(|(k, _)| *k == "name")
            .map(|(_, v)| *v)
            .unwrap_or_default();
        self.state
            .lock()
            .unwrap()
            .downloads
            .get(name)
            .cloned()
            .ok_or_else(|| Error::download("HTTP 404"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_queued_before_sticky() {
        let mock = MockTransport::new();
        mock.respond("/x", 200, json!({"n": 0}));
        mock.respond_once("/x", 500, json!({"n": 1}));

        assert_eq!(mock.post("/x", json!({})).await.status, 500);
        assert_eq!(mock.post("/x", json!({})).await.status, 200);
        assert_eq!(mock.post("/x", json!({})).await.status, 200);
        assert_eq!(mock.count("/x"), 3);
    }

    #[tokio::test]
    async fn test_unscripted_is_404() {
        let mock = MockTransport::new();
        let resp = mock.get("/nowhere", &[]).await;
        assert_eq!(resp.status, 404);
    }

    #[tokio::test(start_paused = true)]
    async fn test_delay_holds_reply() {
        let mock = MockTransport::new();
        mock.respond("/slow", 200, Value::Null);
        mock.delay("/slow", Duration::from_secs(5));

        let start = tokio::time::Instant::now();
        mock.post("/slow", json!({})).await;
        assert!(start.elapsed() >= Duration::from_secs(5));
    }
}
