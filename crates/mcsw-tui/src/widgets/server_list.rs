//! Server list widget
//!
//! One row per registry entry, in backend order, with a running dot and
//! the selected row highlighted. The selection is highlighted by name, so a
//! selected server that vanished from the registry simply has no row.

use mcsw_core::{Registry, Selection};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::theme::styles;

pub struct ServerList<'a> {
    registry: &'a Registry,
    selection: &'a Selection,
}

impl<'a> ServerList<'a> {
    pub fn new(registry: &'a Registry, selection: &'a Selection) -> Self {
        Self {
            registry,
            selection,
        }
    }

    /// First row to draw so the selected row stays visible
    fn scroll_offset(&self, visible_rows: usize) -> usize {
        let selected = self
            .selection
            .name()
            .and_then(|name| self.registry.position(name));
        match selected {
            Some(idx) if visible_rows > 0 && idx >= visible_rows => idx + 1 - visible_rows,
            _ => 0,
        }
    }
}

impl Widget for ServerList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let running = self.registry.running().count();
        let title = format!(" Servers {}/{} ", running, self.registry.len());
        let block = styles::glass_block(true).title(Span::styled(title, styles::accent()));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        if self.registry.is_empty() {
            Paragraph::new(Line::from(Span::styled(
                " No servers",
                styles::text_muted(),
            )))
            .render(inner, buf);
            return;
        }

        let visible = inner.height as usize;
        let offset = self.scroll_offset(visible);
        let width = inner.width as usize;

        for (row, server) in self
            .registry
            .servers()
            .iter()
            .skip(offset)
            .take(visible)
            .enumerate()
        {
            let (dot, dot_style) = styles::running_indicator(server.running);
            let selected = self.selection.name() == Some(server.name.as_str());

            // " ● name" padded to the full row so the highlight spans it
            let used = 3 + server.name.width();
            let padding = " ".repeat(width.saturating_sub(used));
            let line = if selected {
                Line::from(vec![
                    Span::styled(" ", styles::focused_selected()),
                    Span::styled(dot, styles::focused_selected()),
                    Span::styled(" ", styles::focused_selected()),
                    Span::styled(server.name.as_str(), styles::focused_selected()),
                    Span::styled(padding, styles::focused_selected()),
                ])
            } else {
                Line::from(vec![
                    Span::raw(" "),
                    Span::styled(dot, dot_style),
                    Span::raw(" "),
                    Span::styled(server.name.as_str(), styles::text_primary()),
                ])
            };

            buf.set_line(inner.x, inner.y + row as u16, &line, inner.width);
        }
    }
}
