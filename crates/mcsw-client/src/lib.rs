//! # mcsw-client - Backend REST Client
//!
//! Talks to the MC Server Web backend over JSON-over-HTTP.
//!
//! ## Public API
//!
//! - [`Transport`] - One request per call; no-response is status `0`
//! - [`HttpTransport`] - reqwest implementation with a cookie jar
//! - [`ServerApi`] - Typed endpoint wrappers (`list`, `manage`, `run_command`, ...)
//! - [`AlertMode`] / [`Reply`] - Which replies surface a message to the user
//!
//! With the `test-helpers` feature, `test_utils::MockTransport` provides a
//! scripted in-memory transport.

pub mod api;
pub mod http;
pub mod protocol;
pub mod transport;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_utils;

pub use api::{ListOutcome, ServerApi};
pub use http::{HttpConfig, HttpTransport};
pub use protocol::{endpoints, AlertMode, ManageAction, Reply};
pub use transport::{ApiResponse, LocalTransport, Transport, STATUS_UNREACHABLE};
