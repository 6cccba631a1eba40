//! Registry refresh and selection handlers

use chrono::Local;
use mcsw_client::ListOutcome;
use mcsw_core::prelude::*;

use crate::message::Message;
use crate::state::{AppPhase, AppState, RefreshCompletion, UiMode};

use super::{UpdateAction, UpdateResult};

/// Start a registry fetch unless one is already in flight.
///
/// Before the identity reply there is nothing to poll for; the identity
/// handler requests the first fetch itself.
pub fn handle_refresh(state: &mut AppState, forced: bool) -> UpdateResult {
    if state.phase != AppPhase::Ready {
        return UpdateResult::none();
    }
    match state.refresh.request(forced) {
        Some(generation) => UpdateResult::action(UpdateAction::FetchRegistry { generation }),
        None => {
            trace!("Fetch in flight, refresh coalesced (forced: {})", forced);
            UpdateResult::none()
        }
    }
}

/// Apply a finished fetch: replace or clear the registry, then reconcile
/// the selection
pub fn handle_registry_fetched(
    state: &mut AppState,
    generation: u64,
    outcome: ListOutcome,
) -> UpdateResult {
    let refetch = match state.refresh.complete(generation) {
        RefreshCompletion::Stale => {
            debug!("Discarding stale registry fetch (generation {})", generation);
            return UpdateResult::none();
        }
        RefreshCompletion::Applied { refetch } => refetch,
    };

    if outcome.status == 200 {
        trace!("Registry replaced with {} servers", outcome.servers.len());
        state.registry.replace(outcome.servers);
    } else {
        debug!("Registry fetch returned HTTP {}, clearing", outcome.status);
        state.registry.clear();
    }
    state.last_status = Some(outcome.status);
    state.last_refreshed = Some(Local::now());

    if state.selection.reconcile(&state.registry) {
        info!(
            "Selected {} on first load",
            state.selection.name().unwrap_or_default()
        );
    }
    leave_input_if_disabled(state);

    if refetch {
        handle_refresh(state, true)
    } else {
        UpdateResult::none()
    }
}

/// Explicit selection; any change forces a refresh
pub fn handle_select(state: &mut AppState, name: String) -> UpdateResult {
    let changed = state.selection.select(name);
    if changed {
        debug!("Selected {:?}", state.selection.name());
        leave_input_if_disabled(state);
    }
    UpdateResult::message_if(changed, Message::RefreshRequested)
}

/// Move through the registry in list order, wrapping at both ends.
///
/// From an unknown or missing selection, forward starts at the first server
/// and backward at the last.
pub fn handle_select_step(state: &mut AppState, step: isize) -> UpdateResult {
    let servers = state.registry.servers();
    if servers.is_empty() {
        return UpdateResult::none();
    }
    let len = servers.len() as isize;
    let current = state
        .selection
        .name()
        .and_then(|name| state.registry.position(name));
    let index = match current {
        Some(i) => (i as isize + step).rem_euclid(len),
        None if step < 0 => len - 1,
        None => 0,
    };
    let name = servers[index as usize].name.clone();
    handle_select(state, name)
}

/// Jump to the next running server after the current one, wrapping
pub fn handle_select_next_running(state: &mut AppState) -> UpdateResult {
    let servers = state.registry.servers();
    let start = state
        .selection
        .name()
        .and_then(|name| state.registry.position(name))
        .map(|i| i + 1)
        .unwrap_or(0);

    let next = servers[start..]
        .iter()
        .chain(servers[..start].iter())
        .find(|s| s.running)
        .map(|s| s.name.clone());

    match next {
        Some(name) => handle_select(state, name),
        None => UpdateResult::none(),
    }
}

/// The input mode only makes sense while the channel is enabled
pub(super) fn leave_input_if_disabled(state: &mut AppState) {
    if state.ui_mode == UiMode::CommandInput && !state.command_enabled() {
        state.ui_mode = UiMode::Normal;
    }
}
