//! Quit confirmation dialog

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Clear, Paragraph, Widget},
};

use super::modal_overlay::{centered_rect, render_shadow};
use crate::theme::styles;

/// Confirmation dialog shown when `ui.confirm_quit` is set
pub struct ConfirmQuitDialog;

impl Widget for ConfirmQuitDialog {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let modal = centered_rect(40, 7, area);
        Clear.render(modal, buf);
        render_shadow(buf, modal);

        let block = styles::modal_block(" Quit? ").title_alignment(Alignment::Center);
        let inner = block.inner(modal);
        block.render(modal, buf);

        let chunks = Layout::vertical([
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Message
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Buttons
            Constraint::Min(0),
        ])
        .split(inner);

        Paragraph::new("Leave the control panel?")
            .alignment(Alignment::Center)
            .style(styles::status_yellow())
            .render(chunks[1], buf);

        let buttons = Line::from(vec![
            Span::styled("[", styles::text_muted()),
            Span::styled("y", styles::status_green().add_modifier(Modifier::BOLD)),
            Span::styled("] Yes  ", styles::text_muted()),
            Span::styled("[", styles::text_muted()),
            Span::styled("n", styles::status_red().add_modifier(Modifier::BOLD)),
            Span::styled("] No", styles::text_muted()),
        ]);
        Paragraph::new(buttons)
            .alignment(Alignment::Center)
            .render(chunks[3], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;

    #[test]
    fn test_confirm_dialog_renders() {
        let mut term = TestTerminal::new();

        term.render_widget(ConfirmQuitDialog, term.area());

        assert!(term.buffer_contains("Quit?"));
        assert!(term.buffer_contains("[y] Yes"));
        assert!(term.buffer_contains("[n] No"));
    }

    #[test]
    fn test_confirm_dialog_small_terminal() {
        let mut term = TestTerminal::with_size(20, 5);
        // Clamped to the area; must not panic
        term.render_widget(ConfirmQuitDialog, term.area());
    }
}
