//! Application state (Model in TEA pattern)

use std::collections::VecDeque;

use chrono::{DateTime, Local};
use mcsw_core::{ConsoleView, Registry, Selection, Session};

use crate::config::Settings;

/// Lifecycle of the application as a whole
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AppPhase {
    /// Waiting for the identity reply
    #[default]
    Starting,
    /// Identity known, polling active
    Ready,
    /// Shutting down; every further message is ignored
    Quitting,
}

/// Current UI mode/screen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UiMode {
    /// Server list and console
    #[default]
    Normal,

    /// Keystrokes edit the command buffer
    CommandInput,

    /// Quit confirmation dialog
    ConfirmQuit,
}

// ─────────────────────────────────────────────────────────────────────────────
// Registry refresh serialisation
// ─────────────────────────────────────────────────────────────────────────────

/// Outcome of matching a fetch completion against [`RefreshState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshCompletion {
    /// Fetched before the last reset; must not be applied
    Stale,
    /// Current fetch. `refetch` asks for one more fetch right away because a
    /// forced refresh arrived while this one was in flight.
    Applied { refetch: bool },
}

/// Keeps at most one registry fetch in flight.
///
/// Poll ticks that land on an in-flight fetch are dropped. Forced refreshes
/// that land on one are remembered and run as soon as it completes, so a
/// user action is always followed by a fetch that started after it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefreshState {
    in_flight: bool,
    pending_forced: bool,
    generation: u64,
}

impl RefreshState {
    /// Ask for a fetch. Returns the generation to tag it with when one
    /// should start now.
    pub fn request(&mut self, forced: bool) -> Option<u64> {
        if self.in_flight {
            if forced {
                self.pending_forced = true;
            }
            return None;
        }
        self.in_flight = true;
        Some(self.generation)
    }

    /// Match a completion against the current generation
    pub fn complete(&mut self, generation: u64) -> RefreshCompletion {
        if generation != self.generation {
            return RefreshCompletion::Stale;
        }
        self.in_flight = false;
        let refetch = std::mem::take(&mut self.pending_forced);
        RefreshCompletion::Applied { refetch }
    }

    /// Invalidate every outstanding fetch
    pub fn reset(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.in_flight = false;
        self.pending_forced = false;
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn pending_forced(&self) -> bool {
        self.pending_forced
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Command input
// ─────────────────────────────────────────────────────────────────────────────

/// Console command buffer.
///
/// `cursor` counts chars, not bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandInput {
    pub text: String,
    pub cursor: usize,
    /// A submission is awaiting its reply
    pub pending: bool,
}

impl CommandInput {
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    fn byte_index(&self) -> usize {
        self.text
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }

    pub fn insert(&mut self, c: char) {
        let at = self.byte_index();
        self.text.insert(at, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let at = self.byte_index();
        self.text.remove(at);
    }

    pub fn delete(&mut self) {
        if self.cursor < self.text.chars().count() {
            let at = self.byte_index();
            self.text.remove(at);
        }
    }

    pub fn left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.text.chars().count());
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.text.chars().count();
    }

    /// Replace the whole buffer, cursor at the end
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.end();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Application state
// ─────────────────────────────────────────────────────────────────────────────

/// Complete application state (the Model in TEA)
#[derive(Debug, Default)]
pub struct AppState {
    pub phase: AppPhase,

    pub ui_mode: UiMode,

    /// Identity from `/auth/info`
    pub session: Session,

    /// Latest registry snapshot
    pub registry: Registry,

    pub selection: Selection,

    pub refresh: RefreshState,

    pub command: CommandInput,

    /// Messages waiting to be acknowledged, oldest first
    pub alerts: VecDeque<String>,

    /// A start/stop request is awaiting its reply
    pub manage_pending: bool,

    /// A rescan request is awaiting its reply
    pub rescan_pending: bool,

    /// A modpack download is running
    pub download_pending: bool,

    /// A logout request is awaiting its reply
    pub logout_pending: bool,

    /// When the registry was last replaced or cleared
    pub last_refreshed: Option<DateTime<Local>>,

    /// HTTP status of the last applied fetch
    pub last_status: Option<u16>,

    pub settings: Settings,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: Settings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    /// Resolve the selection against the current registry
    pub fn console_view(&self) -> ConsoleView<'_> {
        self.selection.resolve(&self.registry)
    }

    /// Whether the command channel accepts input for the current snapshot
    pub fn command_enabled(&self) -> bool {
        self.console_view().command_enabled(&self.session)
    }

    /// Rescanning the servers directory is reserved for global admins
    pub fn can_rescan(&self) -> bool {
        self.session.is_global_admin
    }

    /// The selected server offers a modpack download
    pub fn can_download(&self) -> bool {
        self.console_view()
            .server()
            .map(|s| s.has_modpack)
            .unwrap_or(false)
    }

    pub fn push_alert(&mut self, message: impl Into<String>) {
        let message = message.into();
        if message.is_empty() {
            return;
        }
        self.alerts.push_back(message);
    }

    /// The alert currently shown, if any
    pub fn current_alert(&self) -> Option<&str> {
        self.alerts.front().map(String::as_str)
    }

    /// Acknowledge the current alert
    pub fn dismiss_alert(&mut self) -> Option<String> {
        self.alerts.pop_front()
    }

    /// Back to the signed-out state: identity, registry and selection
    /// reset, in-flight fetches invalidated
    pub fn sign_out(&mut self) {
        self.session.sign_out();
        self.registry.clear();
        self.selection.clear();
        self.refresh.reset();
        self.command.clear();
        self.command.pending = false;
        if self.ui_mode == UiMode::CommandInput {
            self.ui_mode = UiMode::Normal;
        }
    }

    pub fn should_quit(&self) -> bool {
        self.phase == AppPhase::Quitting
    }

    pub fn request_quit(&mut self) {
        self.phase = AppPhase::Quitting;
    }
}
