//! Handler module - TEA update function and event handlers
//!
//! Organized into submodules:
//! - `update`: Main update() function and message dispatch
//! - `registry`: Polling, fetch completion and selection handlers
//! - `command`: Command channel handlers
//! - `lifecycle`: Start/stop, rescan, download and logout handlers
//! - `keys`: Key event handlers for UI modes

pub(crate) mod command;
pub(crate) mod keys;
pub(crate) mod lifecycle;
pub(crate) mod registry;
pub(crate) mod update;


use std::path::PathBuf;

use mcsw_client::ManageAction;

use crate::message::Message;

// Re-export main entry point
pub use update::update;

pub use keys::handle_key;

/// Actions that the event loop should perform after update
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateAction {
    /// Fetch the signed-in identity from `/auth/info`
    FetchIdentity,

    /// Start the poll timer (no-op when already running)
    StartPolling,

    /// Stop the poll timer
    StopPolling,

    /// Fetch the registry, tagging the reply with `generation`
    FetchRegistry { generation: u64 },

    /// Spawn a one-shot request
    SpawnTask(Task),
}

/// One-shot background requests triggered by the user
#[derive(Debug, Clone, PartialEq)]
pub enum Task {
    Manage { name: String, action: ManageAction },
    RunCommand { name: String, command: String },
    RescanServers,
    DownloadModpack { name: String, dir: PathBuf },
    Logout,
}

/// Result of processing a message
#[derive(Debug, Default)]
pub struct UpdateResult {
    /// Optional follow-up message to process
    pub message: Option<Message>,
    /// Optional action for the event loop to perform
    pub action: Option<UpdateAction>,
}

impl UpdateResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn message(msg: Message) -> Self {
        Self {
            message: Some(msg),
            action: None,
        }
    }

    pub fn action(action: UpdateAction) -> Self {
        Self {
            message: None,
            action: Some(action),
        }
    }

    /// A follow-up message is only worth carrying when something changed
    pub fn message_if(changed: bool, msg: Message) -> Self {
        if changed {
            Self::message(msg)
        } else {
            Self::none()
        }
    }
}
