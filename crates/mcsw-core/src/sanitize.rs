//! Console text cleanup
//!
//! Game-server logs tailed by the backend frequently carry terminal colour
//! sequences (from the server's own console appender) and Minecraft `§`
//! formatting codes. Both render as garbage in the console pane.

use regex::Regex;
use std::sync::LazyLock;

/// ANSI escape sequences.
///
/// Covers:
/// - CSI sequences: ESC [ ... letter (colors, cursor, etc.)
/// - OSC sequences: ESC ] ... BEL or ST (hyperlinks, titles)
/// - Simple escapes: ESC letter
static ANSI_ESCAPE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?x)
        \x1b\[[0-9;?]*[A-Za-z]               # CSI sequences
        | \x1b\][^\x07\x1b]*(?:\x07|\x1b\\)  # OSC sequences
        | \x1b[A-Za-z]                       # Simple escapes
        ",
    )
    .expect("ANSI regex pattern is valid")
});

/// Minecraft legacy formatting codes: `§` followed by a colour/style char.
static SECTION_CODE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"§[0-9a-fk-orxA-FK-ORX]").expect("Section code regex pattern is valid")
});

/// Strip ANSI escape sequences and `§` formatting codes from console text.
///
/// Line breaks are kept; carriage returns from Windows-hosted servers are
/// dropped.
///
/// # Examples
///
/// ```
/// use mcsw_core::strip_console_codes;
///
/// assert_eq!(strip_console_codes("\x1b[31m[ERROR]\x1b[0m boom"), "[ERROR] boom");
/// assert_eq!(strip_console_codes("§aGreen §lbold"), "Green bold");
/// ```
pub fn strip_console_codes(input: &str) -> String {
    let without_ansi = ANSI_ESCAPE_PATTERN.replace_all(input, "");
    let without_sections = SECTION_CODE_PATTERN.replace_all(&without_ansi, "");
    without_sections.replace('\r', "")
}

/// Return the last `max_lines` lines of `text`, each cleaned with
/// [`strip_console_codes`].
///
/// A trailing newline does not produce an extra empty line. `max_lines == 0`
/// means unlimited.
pub fn tail_lines(text: &str, max_lines: usize) -> Vec<String> {
    let lines: Vec<&str> = text.lines().collect();
    let start = if max_lines == 0 {
        0
    } else {
        lines.len().saturating_sub(max_lines)
    };
    lines[start..]
        .iter()
        .map(|line| strip_console_codes(line))
        .collect()
}
