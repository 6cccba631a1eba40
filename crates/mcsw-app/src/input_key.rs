//! Abstract input key event, independent of terminal library.
//!
//! Keeps `mcsw-app` free of crossterm types so the headless runner can drive
//! the same engine.

/// Keyboard input, converted from crossterm at the TUI boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputKey {
    /// Regular character key
    Char(char),
    /// Character with Ctrl held
    CharCtrl(char),

    Up,
    Down,
    Left,
    Right,
    Home,
    End,

    Enter,
    Esc,
    Tab,
    BackTab,
    Backspace,
    Delete,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_key_equality() {
        assert_eq!(InputKey::Char('a'), InputKey::Char('a'));
        assert_ne!(InputKey::CharCtrl('c'), InputKey::Char('c'));
    }
}
