//! Main update function - handles state transitions (TEA pattern)

use mcsw_core::prelude::*;

use crate::message::Message;
use crate::state::{AppState, UiMode};

use super::{command, keys::handle_key, lifecycle, registry, UpdateAction, UpdateResult};

/// Process a message and update state
/// Returns optional follow-up message and/or action
pub fn update(state: &mut AppState, message: Message) -> UpdateResult {
    if state.should_quit() {
        trace!("Dropping message after quit");
        return UpdateResult::none();
    }

    match message {
        Message::Key(key) => match handle_key(state, key) {
            Some(msg) => UpdateResult::message(msg),
            None => UpdateResult::none(),
        },

        Message::Startup => UpdateResult::action(UpdateAction::FetchIdentity),

        Message::RequestQuit => {
            if state.settings.ui.confirm_quit {
                state.ui_mode = UiMode::ConfirmQuit;
                UpdateResult::none()
            } else {
                UpdateResult::message(Message::Quit)
            }
        }

        Message::Quit | Message::ConfirmQuit => {
            info!("Quitting");
            state.request_quit();
            UpdateResult::action(UpdateAction::StopPolling)
        }

        Message::CancelQuit => {
            if state.ui_mode == UiMode::ConfirmQuit {
                state.ui_mode = UiMode::Normal;
            }
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Session
        // ─────────────────────────────────────────────────────────
        Message::IdentityLoaded { session } => lifecycle::handle_identity_loaded(state, session),
        Message::Logout => lifecycle::handle_logout(state),
        Message::LogoutCompleted { reply } => lifecycle::handle_logout_completed(state, reply),

        // ─────────────────────────────────────────────────────────
        // Registry Polling
        // ─────────────────────────────────────────────────────────
        Message::PollTick => registry::handle_refresh(state, false),
        Message::RefreshRequested => registry::handle_refresh(state, true),
        Message::RegistryFetched {
            generation,
            outcome,
        } => registry::handle_registry_fetched(state, generation, outcome),

        // ─────────────────────────────────────────────────────────
        // Selection
        // ─────────────────────────────────────────────────────────
        Message::SelectServer { name } => registry::handle_select(state, name),
        Message::SelectNext => registry::handle_select_step(state, 1),
        Message::SelectPrevious => registry::handle_select_step(state, -1),
        Message::SelectNextRunning => registry::handle_select_next_running(state),

        // ─────────────────────────────────────────────────────────
        // Server Lifecycle
        // ─────────────────────────────────────────────────────────
        Message::ToggleSelected => lifecycle::handle_toggle(state),
        Message::ManageCompleted { name, reply } => {
            lifecycle::handle_manage_completed(state, name, reply)
        }
        Message::RescanServers => lifecycle::handle_rescan(state),
        Message::RescanCompleted { reply } => lifecycle::handle_rescan_completed(state, reply),
        Message::DownloadModpack => lifecycle::handle_download(state),
        Message::DownloadCompleted { name, result } => {
            lifecycle::handle_download_completed(state, name, result)
        }

        // ─────────────────────────────────────────────────────────
        // Command Channel
        // ─────────────────────────────────────────────────────────
        Message::EnterCommandInput => command::handle_enter_input(state),
        Message::ExitCommandInput => command::handle_exit_input(state),
        Message::CommandEdit(edit) => command::handle_edit(state, edit),
        Message::SetCommandText { text } => {
            state.command.set_text(text);
            UpdateResult::none()
        }
        Message::SubmitCommand => command::handle_submit(state),
        Message::CommandCompleted { reply } => command::handle_completed(state, reply),

        // ─────────────────────────────────────────────────────────
        // Alerts
        // ─────────────────────────────────────────────────────────
        Message::DismissAlert => {
            state.dismiss_alert();
            UpdateResult::none()
        }
    }
}
