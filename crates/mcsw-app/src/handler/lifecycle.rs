//! Identity, start/stop, rescan, download and logout handlers

use std::path::PathBuf;

use mcsw_client::{ManageAction, Reply};
use mcsw_core::prelude::*;
use mcsw_core::Session;

use crate::message::Message;
use crate::state::{AppPhase, AppState};

use super::{Task, UpdateAction, UpdateResult};

/// Store the identity and, the first time, start polling with an immediate
/// refresh
pub fn handle_identity_loaded(state: &mut AppState, session: Session) -> UpdateResult {
    match session.name.as_deref() {
        Some(name) => info!(
            "Signed in as {} (global admin: {})",
            name, session.is_global_admin
        ),
        None => info!("Not signed in"),
    }
    state.session = session;

    if state.phase != AppPhase::Starting {
        return UpdateResult::none();
    }
    state.phase = AppPhase::Ready;
    UpdateResult {
        message: Some(Message::RefreshRequested),
        action: Some(UpdateAction::StartPolling),
    }
}

pub fn handle_logout(state: &mut AppState) -> UpdateResult {
    if state.logout_pending {
        return UpdateResult::none();
    }
    state.logout_pending = true;
    UpdateResult::action(UpdateAction::SpawnTask(Task::Logout))
}

/// The client forgets the session whatever the backend said
pub fn handle_logout_completed(state: &mut AppState, reply: Reply) -> UpdateResult {
    state.logout_pending = false;
    if let Some(alert) = reply.alert {
        state.push_alert(alert);
    }
    info!("Signed out (HTTP {})", reply.response.status);
    state.sign_out();
    UpdateResult::none()
}

/// Start the selected server if the registry says it is stopped, stop it
/// otherwise
pub fn handle_toggle(state: &mut AppState) -> UpdateResult {
    let Some(name) = state.selection.name().map(str::to_string) else {
        return UpdateResult::none();
    };
    if state.manage_pending {
        debug!("Start/stop already pending, ignoring toggle");
        return UpdateResult::none();
    }
    let action = ManageAction::toggle_for(state.registry.is_running(&name));
    state.manage_pending = true;
    UpdateResult::action(UpdateAction::SpawnTask(Task::Manage { name, action }))
}

pub fn handle_manage_completed(state: &mut AppState, name: String, reply: Reply) -> UpdateResult {
    state.manage_pending = false;
    debug!("Start/stop of {} finished with HTTP {}", name, reply.status());
    if let Some(alert) = reply.alert {
        state.push_alert(alert);
    }
    UpdateResult::message(Message::RefreshRequested)
}

pub fn handle_rescan(state: &mut AppState) -> UpdateResult {
    if !state.can_rescan() {
        debug!("Rescan ignored: not a global admin");
        return UpdateResult::none();
    }
    if state.rescan_pending {
        return UpdateResult::none();
    }
    state.rescan_pending = true;
    UpdateResult::action(UpdateAction::SpawnTask(Task::RescanServers))
}

pub fn handle_rescan_completed(state: &mut AppState, reply: Reply) -> UpdateResult {
    state.rescan_pending = false;
    if let Some(alert) = reply.alert {
        state.push_alert(alert);
    }
    UpdateResult::message(Message::RefreshRequested)
}

pub fn handle_download(state: &mut AppState) -> UpdateResult {
    if state.download_pending || !state.can_download() {
        return UpdateResult::none();
    }
    let Some(name) = state.selection.name().map(str::to_string) else {
        return UpdateResult::none();
    };
    state.download_pending = true;
    let dir = state.settings.download.resolved_dir();
    UpdateResult::action(UpdateAction::SpawnTask(Task::DownloadModpack { name, dir }))
}

pub fn handle_download_completed(
    state: &mut AppState,
    name: String,
    result: std::result::Result<PathBuf, String>,
) -> UpdateResult {
    state.download_pending = false;
    let alert = match result {
        Ok(path) => format!("Saved modpack for {} to {}", name, path.display()),
        Err(e) => format!("Modpack for {}: {}", name, e),
    };
    state.push_alert(alert);
    UpdateResult::none()
}
