//! # mcsw-core - Core Domain Types
//!
//! Foundation crate for the MC Server Web client. Provides the domain model
//! shared by the HTTP client, the state machine and every view layer.
//!
//! This crate has **zero internal dependencies** -- it only depends on external
//! crates (serde, thiserror, regex, tracing).
//!
//! ## Public API
//!
//! ### Domain Types (`types`)
//! - [`ServerSummary`] - One server process as reported by the backend
//! - [`Registry`] - Ordered snapshot of all servers, replaced on every fetch
//! - [`Session`] - Signed-in identity and global admin flag
//! - [`effective_admin()`] - Derived per-server admin permission
//!
//! ### Selection (`selection`)
//! - [`Selection`] - `Unselected` / `Selected(name)` state machine
//! - [`ConsoleView`] - Selection resolved against a registry snapshot
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Custom error enum with `fatal` vs `recoverable` classification
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ### Console Text (`sanitize`)
//! - [`strip_console_codes()`] - Remove ANSI and `§` formatting codes
//! - [`tail_lines()`] - Last N cleaned lines of a log
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use mcsw_core::prelude::*;
//! ```

pub mod error;
pub mod logging;
pub mod sanitize;
pub mod selection;
pub mod types;

/// Prelude for common imports used throughout all MC Server Web crates
pub mod prelude {
    pub use super::error::{Error, Result, ResultExt};
    pub use tracing::{debug, error, info, instrument, trace, warn};
}

// Re-export commonly used types at crate root for convenience
pub use error::{Error, Result, ResultExt};
pub use sanitize::{strip_console_codes, tail_lines};
pub use selection::{ConsoleView, Selection};
pub use types::{effective_admin, Registry, ServerSummary, Session};
