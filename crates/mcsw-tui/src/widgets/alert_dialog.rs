//! Blocking alert dialog
//!
//! Shows the front of the alert queue over a dimmed screen until the user
//! acknowledges it.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Clear, Paragraph, Widget, Wrap},
};

use super::modal_overlay::{centered_rect, dim_background, render_shadow};
use crate::theme::styles;

pub struct AlertDialog<'a> {
    message: &'a str,
    /// Alerts queued behind this one
    queued: usize,
}

impl<'a> AlertDialog<'a> {
    pub fn new(message: &'a str) -> Self {
        Self { message, queued: 0 }
    }

    pub fn queued(mut self, queued: usize) -> Self {
        self.queued = queued;
        self
    }
}

impl Widget for AlertDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        dim_background(buf, area);

        let width = 60.min(area.width.saturating_sub(4)).max(20);
        // Borders + spacer + message rows + spacer + button row
        let text_width = width.saturating_sub(4).max(1) as usize;
        let message_rows = self
            .message
            .lines()
            .map(|l| l.chars().count().max(1).div_ceil(text_width))
            .sum::<usize>()
            .clamp(1, 8) as u16;
        let modal = centered_rect(width, message_rows + 5, area);

        Clear.render(modal, buf);
        render_shadow(buf, modal);

        let title = if self.queued > 0 {
            format!(" Alert (+{} more) ", self.queued)
        } else {
            " Alert ".to_string()
        };
        let block = styles::modal_block(&title).title_alignment(Alignment::Center);
        let inner = block.inner(modal);
        block.render(modal, buf);

        let chunks = Layout::vertical([
            Constraint::Length(1), // Spacer
            Constraint::Min(1),    // Message
            Constraint::Length(1), // Button
        ])
        .split(inner);

        Paragraph::new(self.message)
            .style(styles::text_primary())
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(chunks[1], buf);

        let button = Line::from(vec![
            Span::styled("[", styles::text_muted()),
            Span::styled("Enter", styles::keybinding()),
            Span::styled("] OK", styles::text_muted()),
        ]);
        Paragraph::new(button)
            .alignment(Alignment::Center)
            .render(chunks[2], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;

    #[test]
    fn test_alert_shows_message_and_button() {
        let mut term = TestTerminal::new();

        term.render_widget(AlertDialog::new("Server started!"), term.area());

        assert!(term.buffer_contains("Alert"));
        assert!(term.buffer_contains("Server started!"));
        assert!(term.buffer_contains("[Enter] OK"));
    }

    #[test]
    fn test_alert_counts_queue() {
        let mut term = TestTerminal::new();

        term.render_widget(AlertDialog::new("first").queued(2), term.area());

        assert!(term.buffer_contains("+2 more"));
    }

    #[test]
    fn test_long_message_wraps() {
        let mut term = TestTerminal::new();
        let message = "Download failed: server unreachable (error sending request for url)";

        term.render_widget(AlertDialog::new(message), term.area());

        assert!(term.buffer_contains("Download failed"));
        assert!(term.buffer_contains("unreachable"));
    }
}
