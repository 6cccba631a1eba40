//! Message types for the application (TEA pattern)

use std::path::PathBuf;

use mcsw_client::{ListOutcome, Reply};
use mcsw_core::Session;

use crate::input_key::InputKey;

/// In-place edits of the command buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandEdit {
    Insert(char),
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
    Clear,
}

/// All possible messages/actions in the application
#[derive(Debug, Clone)]
pub enum Message {
    // ─────────────────────────────────────────────────────────
    // Input & Lifecycle
    // ─────────────────────────────────────────────────────────
    /// Keyboard event from the terminal
    Key(InputKey),

    /// Kick off the identity fetch
    Startup,

    /// Quit, asking first when `ui.confirm_quit` is set
    RequestQuit,

    /// Quit immediately (signal, Ctrl+C, confirmed dialog)
    Quit,

    ConfirmQuit,

    CancelQuit,

    // ─────────────────────────────────────────────────────────
    // Session
    // ─────────────────────────────────────────────────────────
    /// `/auth/info` reply applied (signed-out on any failure)
    IdentityLoaded { session: Session },

    /// Sign out of the backend
    Logout,

    LogoutCompleted { reply: Reply },

    // ─────────────────────────────────────────────────────────
    // Registry Polling
    // ─────────────────────────────────────────────────────────
    /// Periodic timer fired
    PollTick,

    /// Refresh outside the poll cadence (after a user action)
    RefreshRequested,

    /// A registry fetch finished
    RegistryFetched {
        generation: u64,
        outcome: ListOutcome,
    },

    // ─────────────────────────────────────────────────────────
    // Selection
    // ─────────────────────────────────────────────────────────
    /// Select a server by name (may not exist)
    SelectServer { name: String },

    /// Next server in registry order, wrapping
    SelectNext,

    /// Previous server in registry order, wrapping
    SelectPrevious,

    /// Next running server, wrapping
    SelectNextRunning,

    // ─────────────────────────────────────────────────────────
    // Server Lifecycle
    // ─────────────────────────────────────────────────────────
    /// Start the selected server if stopped, stop it if running
    ToggleSelected,

    ManageCompleted { name: String, reply: Reply },

    /// Ask the backend to rescan its server folders
    RescanServers,

    RescanCompleted { reply: Reply },

    /// Download the selected server's modpack
    DownloadModpack,

    DownloadCompleted {
        name: String,
        result: Result<PathBuf, String>,
    },

    // ─────────────────────────────────────────────────────────
    // Command Channel
    // ─────────────────────────────────────────────────────────
    /// Focus the command input (only when the channel is enabled)
    EnterCommandInput,

    /// Leave command input mode, keeping the buffer
    ExitCommandInput,

    /// Edit the command buffer in place
    CommandEdit(CommandEdit),

    /// Replace the command buffer
    SetCommandText { text: String },

    /// Send the buffered command to the selected server
    SubmitCommand,

    CommandCompleted { reply: Reply },

    // ─────────────────────────────────────────────────────────
    // Alerts
    // ─────────────────────────────────────────────────────────
    /// Acknowledge the alert currently shown
    DismissAlert,
}
