//! Transport abstraction over the backend's JSON-over-HTTP surface
//!
//! A transport issues exactly one request per call and never retries.
//! Failures are reported through the status code only: a request that never
//! got an HTTP response comes back as [`STATUS_UNREACHABLE`] with a `Null`
//! body instead of an error, so polling callers can treat every outcome the
//! same way.

use mcsw_core::prelude::*;
use serde_json::Value;

/// Synthetic status for requests that produced no HTTP response
/// (connection refused, DNS failure, timeout).
pub const STATUS_UNREACHABLE: u16 = 0;

/// Raw reply from the backend
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    /// HTTP status, or [`STATUS_UNREACHABLE`]
    pub status: u16,
    /// Decoded JSON body, `Null` when absent or not JSON
    pub body: Value,
}

impl ApiResponse {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    /// Reply used when the request never reached the server
    pub fn unreachable() -> Self {
        Self {
            status: STATUS_UNREACHABLE,
            body: Value::Null,
        }
    }

    /// Any 2xx status
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_unreachable(&self) -> bool {
        self.status == STATUS_UNREACHABLE
    }

    /// The human-readable `message` field every backend reply carries
    pub fn message(&self) -> Option<&str> {
        self.body.get("message").and_then(Value::as_str)
    }
}

/// One round trip to the backend.
///
/// Implementations resolve `path` against their configured base URL.
#[trait_variant::make(Transport: Send)]
pub trait LocalTransport {
    /// POST `body` as JSON. Callers pass `{}` when they have nothing to send.
    async fn post(&self, path: &str, body: Value) -> ApiResponse;

    /// GET with query parameters, expecting a JSON reply
    async fn get(&self, path: &str, query: &[(&str, &str)]) -> ApiResponse;

    /// GET a binary payload. Non-2xx replies and network errors are errors
    /// here because there is no JSON body to inspect.
    async fn download(&self, path: &str, query: &[(&str, &str)]) -> Result<Vec<u8>>;
}
