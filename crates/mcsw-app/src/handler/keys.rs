//! Key event handlers for different UI modes

use crate::input_key::InputKey;
use crate::message::{CommandEdit, Message};
use crate::state::{AppState, UiMode};

/// Convert key events to messages based on current UI mode
pub fn handle_key(state: &AppState, key: InputKey) -> Option<Message> {
    // Force quit works everywhere, even over an alert
    if key == InputKey::CharCtrl('c') {
        return Some(Message::Quit);
    }

    // An alert blocks every other interaction until acknowledged
    if state.current_alert().is_some() {
        return handle_key_alert(key);
    }

    match state.ui_mode {
        UiMode::Normal => handle_key_normal(state, key),
        UiMode::CommandInput => handle_key_command_input(key),
        UiMode::ConfirmQuit => handle_key_confirm_quit(key),
    }
}

fn handle_key_alert(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Enter | InputKey::Esc | InputKey::Char(' ') => Some(Message::DismissAlert),
        _ => None,
    }
}

fn handle_key_confirm_quit(key: InputKey) -> Option<Message> {
    match key {
        // 'q' allows "qq" as a quick quit
        InputKey::Char('y' | 'Y' | 'q') | InputKey::Enter => Some(Message::ConfirmQuit),
        InputKey::Char('n' | 'N') | InputKey::Esc => Some(Message::CancelQuit),
        _ => None,
    }
}

fn handle_key_normal(state: &AppState, key: InputKey) -> Option<Message> {
    match key {
        InputKey::Char('q') | InputKey::Esc => Some(Message::RequestQuit),

        // ─────────────────────────────────────────────────────────
        // Selection
        // ─────────────────────────────────────────────────────────
        InputKey::Up | InputKey::Char('k') => Some(Message::SelectPrevious),
        InputKey::Down | InputKey::Char('j') => Some(Message::SelectNext),
        InputKey::Tab => Some(Message::SelectNextRunning),

        // ─────────────────────────────────────────────────────────
        // Server Control
        // ─────────────────────────────────────────────────────────
        InputKey::Char('s') if state.selection.is_selected() => Some(Message::ToggleSelected),
        InputKey::Char('r') => Some(Message::RefreshRequested),
        InputKey::Char('R') if state.can_rescan() => Some(Message::RescanServers),
        InputKey::Char('d') if state.can_download() => Some(Message::DownloadModpack),

        // ─────────────────────────────────────────────────────────
        // Command Channel
        // ─────────────────────────────────────────────────────────
        InputKey::Char(':' | 'i') | InputKey::Enter if state.command_enabled() => {
            Some(Message::EnterCommandInput)
        }

        // ─────────────────────────────────────────────────────────
        // Session
        // ─────────────────────────────────────────────────────────
        InputKey::Char('L') if state.session.is_signed_in() => Some(Message::Logout),

        _ => None,
    }
}

fn handle_key_command_input(key: InputKey) -> Option<Message> {
    let edit = match key {
        InputKey::Esc => return Some(Message::ExitCommandInput),
        InputKey::Enter => return Some(Message::SubmitCommand),
        InputKey::Backspace => CommandEdit::Backspace,
        InputKey::Delete => CommandEdit::Delete,
        InputKey::Left => CommandEdit::Left,
        InputKey::Right => CommandEdit::Right,
        InputKey::Home | InputKey::CharCtrl('a') => CommandEdit::Home,
        InputKey::End | InputKey::CharCtrl('e') => CommandEdit::End,
        InputKey::CharCtrl('u') => CommandEdit::Clear,
        InputKey::Char(c) => CommandEdit::Insert(c),
        _ => return None,
    };
    Some(Message::CommandEdit(edit))
}
