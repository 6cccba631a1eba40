//! Domain events emitted by the Engine for external consumers
//!
//! Events are broadcast after each message processing cycle via
//! `Engine::subscribe()`. The headless runner serialises them to NDJSON.

use mcsw_core::{ServerSummary, Session};
use serde::Serialize;

/// Domain events emitted by the Engine.
///
/// Each event carries the full new value rather than a delta, so a
/// subscriber that joins late only needs the next event to catch up.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum EngineEvent {
    // ─────────────────────────────────────────────────────────
    // Session
    // ─────────────────────────────────────────────────────────
    /// Identity loaded or reset by a sign-out
    SessionChanged { session: Session },

    // ─────────────────────────────────────────────────────────
    // Registry
    // ─────────────────────────────────────────────────────────
    /// A fetch replaced (or cleared) the registry
    RegistryReplaced {
        status: Option<u16>,
        servers: Vec<ServerSummary>,
    },

    // ─────────────────────────────────────────────────────────
    // Selection & Console
    // ─────────────────────────────────────────────────────────
    /// The selected server name changed
    SelectionChanged { selected: Option<String> },

    /// The console pane for the selection changed state or text
    ConsoleChanged {
        selected: Option<String>,
        running: bool,
        log: Option<String>,
    },

    /// Command input became enabled or disabled
    CommandChannelChanged { enabled: bool },

    // ─────────────────────────────────────────────────────────
    // Alerts
    // ─────────────────────────────────────────────────────────
    /// A message the user must acknowledge
    Alert { message: String },

    // ─────────────────────────────────────────────────────────
    // Engine Lifecycle
    // ─────────────────────────────────────────────────────────
    /// Engine is shutting down
    Shutdown,
}

impl EngineEvent {
    /// Returns a short string label for this event type (for logging/debugging).
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::SessionChanged { .. } => "session_changed",
            Self::RegistryReplaced { .. } => "registry_replaced",
            Self::SelectionChanged { .. } => "selection_changed",
            Self::ConsoleChanged { .. } => "console_changed",
            Self::CommandChannelChanged { .. } => "command_channel_changed",
            Self::Alert { .. } => "alert",
            Self::Shutdown => "shutdown",
        }
    }
}
