//! Status bar widget
//!
//! One line at the bottom: last refresh time and status, pending requests,
//! and hints for the actions available on the selection.

use mcsw_app::state::{AppState, UiMode};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

use crate::theme::styles;

pub struct StatusBar<'a> {
    state: &'a AppState,
}

impl<'a> StatusBar<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// "↻ 12:00:05 (HTTP 200)" or a waiting marker before the first fetch
    fn refresh_info(&self) -> Span<'static> {
        match (self.state.last_refreshed, self.state.last_status) {
            (Some(at), Some(status)) => {
                let style = if status == 200 {
                    styles::text_secondary()
                } else {
                    styles::status_red()
                };
                let status = match status {
                    0 => "unreachable".to_string(),
                    n => format!("HTTP {}", n),
                };
                Span::styled(format!("↻ {} ({})", at.format("%H:%M:%S"), status), style)
            }
            _ => Span::styled("↻ waiting", styles::text_muted()),
        }
    }

    fn pending(&self) -> Option<Span<'static>> {
        let state = self.state;
        let label = if state.manage_pending {
            "starting/stopping…"
        } else if state.download_pending {
            "downloading…"
        } else if state.rescan_pending {
            "rescanning…"
        } else if state.logout_pending {
            "signing out…"
        } else {
            return None;
        };
        Some(Span::styled(label, styles::status_yellow()))
    }

    fn hints(&self) -> Vec<Span<'static>> {
        let mut spans = Vec::new();
        match self.state.ui_mode {
            UiMode::CommandInput => {
                spans.extend(styles::key_hint("Enter", "Send"));
                spans.extend(styles::key_hint("Esc", "Back"));
            }
            UiMode::ConfirmQuit => {}
            UiMode::Normal => {
                spans.extend(styles::key_hint("↑↓", "Select"));
                spans.extend(styles::key_hint("Tab", "Next running"));
                if self.state.can_download() {
                    spans.extend(styles::key_hint("d", "Modpack"));
                }
                if self.state.session.is_signed_in() {
                    spans.extend(styles::key_hint("L", "Sign out"));
                }
            }
        }
        spans
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let mut left = vec![Span::raw(" "), self.refresh_info()];
        if let Some(pending) = self.pending() {
            left.push(Span::raw("  "));
            left.push(pending);
        }
        let left_line = Line::from(left);
        let left_width = left_line.width() as u16;
        buf.set_line(area.x, area.y, &left_line, area.width);

        let hints = Line::from(self.hints());
        let hints_width = hints.width() as u16;
        if left_width + hints_width + 2 <= area.width {
            buf.set_line(area.x + area.width - hints_width, area.y, &hints, hints_width);
        }
    }
}
