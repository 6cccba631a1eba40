//! Screen layout definitions for the TUI

use ratatui::layout::{Constraint, Layout, Rect};

/// Widest the server list gets, borders included
const SERVER_LIST_MAX_WIDTH: u16 = 32;

/// Screen areas for the main layout
#[derive(Debug, Clone, Copy)]
pub struct ScreenAreas {
    /// Title, identity and key hints
    pub header: Rect,

    /// Server list on the left
    pub servers: Rect,

    /// Console pane (log plus command line) on the right
    pub console: Rect,

    /// One-row status line at the bottom
    pub status: Rect,
}

/// Split the screen into header, server list, console and status line.
///
/// The server list takes a third of the width, capped at
/// [`SERVER_LIST_MAX_WIDTH`].
pub fn create(area: Rect) -> ScreenAreas {
    let rows = Layout::vertical([
        Constraint::Length(3), // Header (glass container)
        Constraint::Min(3),    // Body
        Constraint::Length(1), // Status line
    ])
    .split(area);

    let list_width = (rows[1].width / 3).min(SERVER_LIST_MAX_WIDTH);
    let columns =
        Layout::horizontal([Constraint::Length(list_width), Constraint::Min(10)]).split(rows[1]);

    ScreenAreas {
        header: rows[0],
        servers: columns[0],
        console: columns[1],
        status: rows[2],
    }
}
