//! Header bar widget
//!
//! Shows the app title, the signed-in identity and the key hints that apply
//! to the current permissions.

use mcsw_core::Session;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

use crate::theme::styles;

/// Main header showing app title, identity and keybindings
pub struct MainHeader<'a> {
    session: &'a Session,
    can_rescan: bool,
}

impl<'a> MainHeader<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self {
            session,
            can_rescan: false,
        }
    }

    /// Show the global-admin rescan hint
    pub fn with_rescan(mut self, can_rescan: bool) -> Self {
        self.can_rescan = can_rescan;
        self
    }

    fn identity_spans(&self) -> Vec<Span<'a>> {
        match self.session.name.as_deref() {
            Some(name) => {
                let mut spans = vec![Span::styled(name, styles::text_secondary())];
                if self.session.is_global_admin {
                    spans.push(Span::raw(" "));
                    spans.push(Span::styled("[admin]", styles::status_yellow()));
                }
                spans
            }
            None => vec![Span::styled("not signed in", styles::text_muted())],
        }
    }

    fn shortcut_spans(&self) -> Vec<Span<'static>> {
        let mut spans = Vec::new();
        spans.extend(styles::key_hint("s", "Start/Stop"));
        spans.extend(styles::key_hint("r", "Refresh"));
        if self.can_rescan {
            spans.extend(styles::key_hint("R", "Rescan"));
        }
        spans.extend(styles::key_hint(":", "Command"));
        spans.extend(styles::key_hint("q", "Quit"));
        spans
    }
}

impl Widget for MainHeader<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(false);
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let (dot, dot_style) = styles::running_indicator(self.session.is_signed_in());
        let mut left_spans = vec![
            Span::raw(" "),
            Span::styled(dot, dot_style),
            Span::raw(" "),
            Span::styled("MC Server Web", styles::accent_bold()),
            Span::raw(" "),
            Span::styled("/", styles::text_muted()),
            Span::raw(" "),
        ];
        left_spans.extend(self.identity_spans());
        let left_line = Line::from(left_spans);
        let left_width = left_line.width() as u16;

        let shortcuts_line = Line::from(self.shortcut_spans());
        let shortcuts_width = shortcuts_line.width() as u16;

        buf.set_line(inner.x, inner.y, &left_line, inner.width);

        // Right-align the hints when they fit next to the title
        if left_width + shortcuts_width + 2 <= inner.width {
            let x = inner.x + inner.width - shortcuts_width;
            buf.set_line(x, inner.y, &shortcuts_line, shortcuts_width);
        }
    }
}
