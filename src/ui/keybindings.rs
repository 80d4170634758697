// src/ui/keybindings.rs
//! Keyboard input handling and key mappings.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map digit/shifted-digit keys to section number (1..2).
pub fn map_key_to_digit(k: &KeyEvent) -> Option<usize> {
    match k.code {
        KeyCode::Char('1' | '!') => Some(1),
        KeyCode::Char('2' | '@') => Some(2),
        _ => None,
    }
}

/// Check if the key event is a shifted symbol (!, @).
pub fn is_shifted_symbol(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('!' | '@'))
}

/// Check if this is a section toggle key press (Shift+number).
pub fn is_section_toggle(key: &KeyEvent) -> bool {
    map_key_to_digit(key).is_some()
        && (key.modifiers.contains(KeyModifiers::SHIFT) || is_shifted_symbol(key))
}

/// Navigation actions derived from key events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NavigationAction {
    Up,
    Down,
    /// Short press (release) on the highlighted row
    Enter,
    /// Long press on the highlighted row
    LongPress,
    Back,
    Toggle,
    /// Type a message to deliver to the applet
    Request,
    Cancel,
    Input(char),
    Backspace,
    Quit,
    ToggleSection(usize),
    None,
}

/// Convert a key event to a navigation action.
///
/// With `text_entry` set, printable keys become [`NavigationAction::Input`].
pub fn key_to_action(key: &KeyEvent, text_entry: bool) -> NavigationAction {
    if text_entry {
        return match key.code {
            KeyCode::Enter => NavigationAction::Enter,
            KeyCode::Esc => NavigationAction::Cancel,
            KeyCode::Backspace => NavigationAction::Backspace,
            KeyCode::Char(c) => NavigationAction::Input(c),
            _ => NavigationAction::None,
        };
    }

    if is_section_toggle(key) {
        if let Some(d) = map_key_to_digit(key) {
            return NavigationAction::ToggleSection(d);
        }
    }

    match key.code {
        KeyCode::Down | KeyCode::Char('j') => NavigationAction::Down,
        KeyCode::Up | KeyCode::Char('k') => NavigationAction::Up,
        KeyCode::Enter | KeyCode::Right => NavigationAction::Enter,
        KeyCode::Char('l') => NavigationAction::LongPress,
        KeyCode::Left | KeyCode::Backspace => NavigationAction::Back,
        KeyCode::Char(' ') => NavigationAction::Toggle,
        KeyCode::Char('r') => NavigationAction::Request,
        KeyCode::Esc => NavigationAction::Cancel,
        KeyCode::Char('q') => NavigationAction::Quit,
        _ => NavigationAction::None,
    }
}
