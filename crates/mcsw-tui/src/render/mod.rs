//! Main render/view function (View in TEA pattern)


use mcsw_app::state::{AppState, UiMode};
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;

use super::{layout, widgets};
use crate::theme::palette;

/// Render the complete UI (View function in TEA).
///
/// Pure: reads state, never modifies it.
pub fn view(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    let bg_block = Block::default().style(Style::default().bg(palette::DEEPEST_BG));
    frame.render_widget(bg_block, area);

    let areas = layout::create(area);

    let header = widgets::MainHeader::new(&state.session).with_rescan(state.can_rescan());
    frame.render_widget(header, areas.header);

    frame.render_widget(
        widgets::ServerList::new(&state.registry, &state.selection),
        areas.servers,
    );

    let console = widgets::ConsolePanel::new(state.console_view(), &state.command)
        .command_enabled(state.command_enabled())
        .input_active(state.ui_mode == UiMode::CommandInput)
        .max_log_lines(state.settings.ui.max_log_lines);
    frame.render_widget(console, areas.console);

    frame.render_widget(widgets::StatusBar::new(state), areas.status);

    // Overlays: an alert sits above everything, including the quit prompt
    if state.ui_mode == UiMode::ConfirmQuit {
        frame.render_widget(widgets::ConfirmQuitDialog, area);
    }
    if let Some(alert) = state.current_alert() {
        let queued = state.alerts.len().saturating_sub(1);
        frame.render_widget(widgets::AlertDialog::new(alert).queued(queued), area);
    }
}
