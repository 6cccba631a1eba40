//! Command channel handlers

use mcsw_client::Reply;
use mcsw_core::prelude::*;

use crate::message::{CommandEdit, Message};
use crate::state::{AppState, UiMode};

use super::{Task, UpdateAction, UpdateResult};

pub fn handle_enter_input(state: &mut AppState) -> UpdateResult {
    if state.command_enabled() {
        state.ui_mode = UiMode::CommandInput;
    }
    UpdateResult::none()
}

pub fn handle_exit_input(state: &mut AppState) -> UpdateResult {
    if state.ui_mode == UiMode::CommandInput {
        state.ui_mode = UiMode::Normal;
    }
    UpdateResult::none()
}

pub fn handle_edit(state: &mut AppState, edit: CommandEdit) -> UpdateResult {
    let input = &mut state.command;
    match edit {
        CommandEdit::Insert(c) => input.insert(c),
        CommandEdit::Backspace => input.backspace(),
        CommandEdit::Delete => input.delete(),
        CommandEdit::Left => input.left(),
        CommandEdit::Right => input.right(),
        CommandEdit::Home => input.home(),
        CommandEdit::End => input.end(),
        CommandEdit::Clear => input.clear(),
    }
    UpdateResult::none()
}

/// Send the buffered command to the selected server.
///
/// Ignored for an empty buffer, a disabled channel, or while a previous
/// submission is still waiting for its reply.
pub fn handle_submit(state: &mut AppState) -> UpdateResult {
    if state.command.pending || state.command.is_empty() {
        return UpdateResult::none();
    }
    if !state.command_enabled() {
        debug!("Command channel disabled, not sending");
        return UpdateResult::none();
    }
    let Some(name) = state.selection.name().map(str::to_string) else {
        return UpdateResult::none();
    };

    state.command.pending = true;
    let command = state.command.text.clone();
    UpdateResult::action(UpdateAction::SpawnTask(Task::RunCommand { name, command }))
}

/// Clear the buffer on success, keep it on failure; refresh either way.
///
/// A reply with no submission outstanding (sign-out reset the channel while
/// it was in flight) is dropped.
pub fn handle_completed(state: &mut AppState, reply: Reply) -> UpdateResult {
    if !state.command.pending {
        debug!("Dropping command reply with no pending submission");
        return UpdateResult::none();
    }
    state.command.pending = false;
    if reply.is_success() {
        state.command.clear();
    } else {
        warn!("Command failed with HTTP {}", reply.status());
    }
    if let Some(alert) = reply.alert {
        state.push_alert(alert);
    }
    UpdateResult::message(Message::RefreshRequested)
}
