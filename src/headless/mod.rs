//! Headless mode - NDJSON event output and line commands
//!
//! Runs the same engine as the terminal UI without drawing anything. Every
//! engine event is written to stdout as one JSON object per line, and stdin
//! lines drive the engine.
//!
//! # Event Format
//!
//! ```json
//! {"event":"session_changed","session":{"name":"bob","is_global_admin":false},"timestamp":1704700001000}
//! {"event":"selection_changed","selected":"survival","timestamp":1704700002000}
//! {"event":"alert","message":"Server started!","timestamp":1704700003000}
//! ```
//!
//! # Commands
//!
//! `select <name>`, `next`, `prev`, `toggle`, `run <command>`, `refresh`,
//! `rescan`, `download`, `logout`, `quit`.

pub mod runner;

use std::io::{self, Write};

use chrono::Utc;
use mcsw_app::{EngineEvent, Message};
use serde::Serialize;
use tracing::error;

/// One NDJSON line: the engine event plus a millisecond timestamp
#[derive(Debug, Serialize)]
pub struct HeadlessEvent<'a> {
    #[serde(flatten)]
    pub event: &'a EngineEvent,
    pub timestamp: i64,
}

impl<'a> HeadlessEvent<'a> {
    pub fn new(event: &'a EngineEvent) -> Self {
        Self {
            event,
            timestamp: Utc::now().timestamp_millis(),
        }
    }

    /// Write this event as a single JSON line
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let json = serde_json::to_string(self).map_err(io::Error::other)?;
        writeln!(out, "{}", json)?;
        out.flush()
    }

    /// Emit this event to stdout
    pub fn emit(&self) {
        let mut stdout = io::stdout().lock();
        if let Err(e) = self.write_to(&mut stdout) {
            error!("Failed to write headless event to stdout: {}", e);
        }
    }
}

/// Translate one stdin line into the messages it stands for.
///
/// Returns `None` for blank or unknown lines.
pub fn parse_command(line: &str) -> Option<Vec<Message>> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let messages = match (verb, rest) {
        ("select", name) if !name.is_empty() => vec![Message::SelectServer {
            name: name.to_string(),
        }],
        ("next", "") => vec![Message::SelectNext],
        ("prev", "") => vec![Message::SelectPrevious],
        ("toggle", "") => vec![Message::ToggleSelected],
        ("run", command) if !command.is_empty() => vec![
            Message::SetCommandText {
                text: command.to_string(),
            },
            Message::SubmitCommand,
        ],
        ("refresh", "") => vec![Message::RefreshRequested],
        ("rescan", "") => vec![Message::RescanServers],
        ("download", "") => vec![Message::DownloadModpack],
        ("logout", "") => vec![Message::Logout],
        ("q" | "quit", "") => vec![Message::Quit],
        _ => return None,
    };
    Some(messages)
}
