//! Key mapping from terminal events to virtual-key codes.

use crate::types::KEY_ESCAPE;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map a terminal key to the virtual-key code the game samples.
///
/// Letters fold to upper case so `r` and `R` share one code.
pub fn key_code(code: KeyCode) -> Option<u8> {
    match code {
        KeyCode::Esc => Some(KEY_ESCAPE),
        KeyCode::Enter => Some(0x0D),
        KeyCode::Backspace => Some(0x08),
        KeyCode::Tab => Some(0x09),
        KeyCode::Left => Some(0x25),
        KeyCode::Up => Some(0x26),
        KeyCode::Right => Some(0x27),
        KeyCode::Down => Some(0x28),
        KeyCode::Char(ch) if ch.is_ascii_graphic() || ch == ' ' => {
            Some(ch.to_ascii_uppercase() as u8)
        }
        _ => None,
    }
}

/// Check if key should quit the game.
///
/// Escape is a game key (it closes menus), so only Ctrl+C quits outright.
pub fn should_quit(key: KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}
