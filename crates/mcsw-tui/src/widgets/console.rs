//! Console pane widget
//!
//! Renders the selected server's log tail and the command line beneath it.
//! What is shown comes entirely from the resolved [`ConsoleView`].

use mcsw_app::CommandInput;
use mcsw_core::{tail_lines, ConsoleView};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::theme::styles;

/// Console pane for the selected server
pub struct ConsolePanel<'a> {
    view: ConsoleView<'a>,
    command: &'a CommandInput,
    command_enabled: bool,
    input_active: bool,
    max_log_lines: usize,
}

impl<'a> ConsolePanel<'a> {
    pub fn new(view: ConsoleView<'a>, command: &'a CommandInput) -> Self {
        Self {
            view,
            command,
            command_enabled: false,
            input_active: false,
            max_log_lines: 200,
        }
    }

    pub fn command_enabled(mut self, enabled: bool) -> Self {
        self.command_enabled = enabled;
        self
    }

    /// The command line has keyboard focus
    pub fn input_active(mut self, active: bool) -> Self {
        self.input_active = active;
        self
    }

    pub fn max_log_lines(mut self, max: usize) -> Self {
        self.max_log_lines = max;
        self
    }

    fn title(&self) -> String {
        match self.view {
            ConsoleView::NoSelection => " Console ".to_string(),
            ConsoleView::NotFound { name } => format!(" Console: {} ", name),
            ConsoleView::Stopped { server } | ConsoleView::Running { server, .. } => {
                format!(" Console: {} ", server.name)
            }
        }
    }

    fn render_log(&self, area: Rect, buf: &mut Buffer) {
        let placeholder = |text: String| {
            Paragraph::new(Line::from(Span::styled(text, styles::text_muted())))
        };

        match self.view {
            ConsoleView::NoSelection => {
                placeholder(" No server selected".to_string()).render(area, buf);
            }
            ConsoleView::NotFound { name } => {
                placeholder(format!(" Server '{}' not found", name)).render(area, buf);
            }
            ConsoleView::Stopped { server } => {
                Paragraph::new(vec![
                    Line::from(Span::styled(
                        format!(" {} is not running", server.name),
                        styles::status_red(),
                    )),
                    Line::from(Span::styled(" Press [s] to start it", styles::text_muted())),
                ])
                .render(area, buf);
            }
            ConsoleView::Running { log, .. } => {
                // Never more lines than fit; the newest line sits at the bottom
                let rows = area.height as usize;
                let limit = match self.max_log_lines {
                    0 => rows,
                    max => max.min(rows),
                };
                let lines: Vec<Line> = tail_lines(log, limit)
                    .into_iter()
                    .map(|l| Line::from(Span::styled(l, styles::text_primary())))
                    .collect();
                Paragraph::new(lines).render(area, buf);
            }
        }
    }

    fn command_line(&self) -> Line<'a> {
        if !self.command_enabled {
            return Line::from(Span::styled(
                " Commands unavailable",
                styles::text_muted(),
            ));
        }

        let prompt_style = if self.input_active {
            styles::accent_bold()
        } else {
            styles::text_muted()
        };
        let mut spans = vec![Span::styled(" > ", prompt_style)];

        if self.command.pending {
            spans.push(Span::styled(self.command.text.clone(), styles::text_muted()));
            spans.push(Span::styled("  sending…", styles::status_yellow()));
            return Line::from(spans);
        }

        if !self.input_active {
            if self.command.is_empty() {
                spans.push(Span::styled("press : to type a command", styles::text_muted()));
            } else {
                spans.push(Span::styled(self.command.text.clone(), styles::text_secondary()));
            }
            return Line::from(spans);
        }

        // Active: draw the cursor as a reversed cell
        let chars: Vec<char> = self.command.text.chars().collect();
        let cursor = self.command.cursor.min(chars.len());
        let before: String = chars[..cursor].iter().collect();
        let at = chars.get(cursor).map(|c| c.to_string()).unwrap_or_else(|| " ".into());
        let after: String = chars.get(cursor + 1..).map(|s| s.iter().collect()).unwrap_or_default();

        spans.push(Span::styled(before, styles::text_primary()));
        spans.push(Span::styled(
            at,
            styles::text_primary().add_modifier(Modifier::REVERSED),
        ));
        spans.push(Span::styled(after, styles::text_primary()));
        Line::from(spans)
    }
}

impl Widget for ConsolePanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(self.input_active)
            .title(Span::styled(self.title(), styles::accent()));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let chunks = Layout::vertical([
            Constraint::Min(0),    // Log
            Constraint::Length(1), // Separator
            Constraint::Length(1), // Command line
        ])
        .split(inner);

        self.render_log(chunks[0], buf);

        Block::default()
            .borders(Borders::TOP)
            .border_style(styles::border_inactive())
            .render(chunks[1], buf);

        if chunks[2].height > 0 {
            let line = self.command_line();
            buf.set_line(chunks[2].x, chunks[2].y, &line, chunks[2].width);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;
    use mcsw_core::ServerSummary;

    #[test]
    fn test_no_selection_placeholder() {
        let mut term = TestTerminal::with_size(60, 10);
        let command = CommandInput::default();

        term.render_widget(
            ConsolePanel::new(ConsoleView::NoSelection, &command),
            term.area(),
        );

        assert!(term.buffer_contains("No server selected"));
        assert!(term.buffer_contains("Commands unavailable"));
    }

    #[test]
    fn test_not_found_names_the_server() {
        let mut term = TestTerminal::with_size(60, 10);
        let command = CommandInput::default();

        term.render_widget(
            ConsolePanel::new(ConsoleView::NotFound { name: "B" }, &command),
            term.area(),
        );

        assert!(term.buffer_contains("Server 'B' not found"));
    }

    #[test]
    fn test_stopped_server_has_no_log() {
        let mut term = TestTerminal::with_size(60, 10);
        let server = ServerSummary::new("B");
        let command = CommandInput::default();

        term.render_widget(
            ConsolePanel::new(ConsoleView::Stopped { server: &server }, &command),
            term.area(),
        );

        assert!(term.buffer_contains("B is not running"));
    }

    #[test]
    fn test_running_log_is_tailed_and_cleaned() {
        let mut term = TestTerminal::with_size(60, 10);
        let log = (1..=50)
            .map(|i| format!("\u{1b}[32mline {}\u{1b}[0m", i))
            .collect::<Vec<_>>()
            .join("\n");
        let server = ServerSummary::new("A").running_with_log(log.clone());
        let command = CommandInput::default();

        term.render_widget(
            ConsolePanel::new(
                ConsoleView::Running {
                    server: &server,
                    log: &log,
                },
                &command,
            )
            .command_enabled(true),
            term.area(),
        );

        assert!(term.buffer_contains("line 50"));
        assert!(!term.buffer_contains("line 1 "));
        assert!(!term.buffer_contains("[32m"));
        assert!(term.buffer_contains("press : to type a command"));
    }

    #[test]
    fn test_max_log_lines_limits_tail() {
        let mut term = TestTerminal::with_size(60, 12);
        let log = "one\ntwo\nthree";
        let server = ServerSummary::new("A").running_with_log(log);
        let command = CommandInput::default();

        term.render_widget(
            ConsolePanel::new(ConsoleView::Running { server: &server, log }, &command)
                .max_log_lines(2),
            term.area(),
        );

        assert!(!term.buffer_contains("one"));
        assert!(term.buffer_contains("two"));
        assert!(term.buffer_contains("three"));
    }

    #[test]
    fn test_active_input_shows_text() {
        let mut term = TestTerminal::with_size(60, 10);
        let server = ServerSummary::new("A").running_with_log("");
        let mut command = CommandInput::default();
        command.set_text("say hi");

        term.render_widget(
            ConsolePanel::new(
                ConsoleView::Running {
                    server: &server,
                    log: "",
                },
                &command,
            )
            .command_enabled(true)
            .input_active(true),
            term.area(),
        );

        assert!(term.buffer_contains("> say hi"));
    }

    #[test]
    fn test_pending_command_marked() {
        let mut term = TestTerminal::with_size(60, 10);
        let server = ServerSummary::new("A").running_with_log("");
        let mut command = CommandInput::default();
        command.set_text("list");
        command.pending = true;

        term.render_widget(
            ConsolePanel::new(
                ConsoleView::Running {
                    server: &server,
                    log: "",
                },
                &command,
            )
            .command_enabled(true),
            term.area(),
        );

        assert!(term.buffer_contains("sending"));
    }
}
