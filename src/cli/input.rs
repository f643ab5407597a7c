//! Keystroke input handling using crossterm
//!
//! Features:
//! - Blocking-with-timeout key capture
//! - A/B/neutral answer keys (letters or arrows)
//! - Ctrl+C / Escape abort

use crate::tuning::Choice;
use crossterm::event::{self, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::io::Result as IoResult;
use std::time::Duration;

/// Handles user input from terminal
pub struct InputHandler {
    /// Timeout for poll operations
    poll_timeout: Duration,
}

impl InputHandler {
    pub fn new() -> Self {
        InputHandler {
            poll_timeout: Duration::from_millis(100),
        }
    }

    pub fn enable_raw_mode() -> IoResult<()> {
        crossterm::terminal::enable_raw_mode()
    }

    /// Poll for a key press; None on timeout or non-key events
    pub fn read_key(&self) -> IoResult<Option<KeyEvent>> {
        if event::poll(self.poll_timeout)? {
            match event::read()? {
                // Only presses; Windows also reports releases
                event::Event::Key(key) if key.kind == KeyEventKind::Press => Ok(Some(key)),
                _ => Ok(None),
            }
        } else {
            Ok(None)
        }
    }

    /// Block until a key is pressed
    pub fn wait_key(&self) -> IoResult<KeyEvent> {
        loop {
            if let Some(key) = self.read_key()? {
                return Ok(key);
            }
        }
    }

    /// Ctrl+C or Escape
    pub fn is_exit(key: &KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => true,
            KeyCode::Esc => true,
            _ => false,
        }
    }

    /// Map an answer key: a/←, b/→, m/n/↓
    pub fn to_choice(key: &KeyEvent) -> Option<Choice> {
        if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
            return None;
        }
        match key.code {
            KeyCode::Left => Some(Choice::A),
            KeyCode::Right => Some(Choice::B),
            KeyCode::Down => Some(Choice::Neutral),
            KeyCode::Char(c) => Choice::from_char(c),
            _ => None,
        }
    }

    pub fn is_restart(key: &KeyEvent) -> bool {
        matches!(key.code, KeyCode::Char('r') | KeyCode::Char('R'))
    }

    pub fn is_quit(key: &KeyEvent) -> bool {
        matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q')) || Self::is_exit(key)
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_answer_keys() {
        assert_eq!(InputHandler::to_choice(&key(KeyCode::Char('a'))), Some(Choice::A));
        assert_eq!(InputHandler::to_choice(&key(KeyCode::Right)), Some(Choice::B));
        assert_eq!(InputHandler::to_choice(&key(KeyCode::Char('M'))), Some(Choice::Neutral));
        assert_eq!(InputHandler::to_choice(&key(KeyCode::Enter)), None);

        let ctrl_a = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL);
        assert_eq!(InputHandler::to_choice(&ctrl_a), None);
    }

    #[test]
    fn test_exit_and_quit_keys() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(InputHandler::is_exit(&ctrl_c));
        assert!(InputHandler::is_exit(&key(KeyCode::Esc)));
        assert!(!InputHandler::is_exit(&key(KeyCode::Char('c'))));
        assert!(InputHandler::is_quit(&key(KeyCode::Char('q'))));
        assert!(InputHandler::is_restart(&key(KeyCode::Char('r'))));
    }
}
