//! Key mapping from terminal events to game commands.
//!
//! Follows the guideline table of basic controls as far as a terminal allows
//! (no bare Shift/Ctrl keys, no numpad distinction).

use crate::types::Command;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Actions handled by the driver rather than the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionAction {
    Pause,
    Restart,
    Quit,
}

/// What a key is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Binding {
    Game(Command),
    Session(SessionAction),
}

/// Map a key to its binding.
pub fn map_key(key: KeyEvent) -> Option<Binding> {
    if should_quit(key) {
        return Some(Binding::Session(SessionAction::Quit));
    }

    let command = match key.code {
        KeyCode::Left | KeyCode::Char('4') => Command::Left,
        KeyCode::Right | KeyCode::Char('6') => Command::Right,
        KeyCode::Down | KeyCode::Char('2') => Command::SoftDrop,
        KeyCode::Char(' ') | KeyCode::Char('8') => Command::HardDrop,

        // Rotation
        KeyCode::Up
        | KeyCode::Char('x')
        | KeyCode::Char('X')
        | KeyCode::Char('1')
        | KeyCode::Char('5')
        | KeyCode::Char('9') => Command::RotateCw,
        KeyCode::Char('z')
        | KeyCode::Char('Z')
        | KeyCode::Char('y')
        | KeyCode::Char('Y')
        | KeyCode::Char('3')
        | KeyCode::Char('7') => Command::RotateCcw,

        KeyCode::Char('c') | KeyCode::Char('C') | KeyCode::Char('0') => Command::Hold,

        KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('p') | KeyCode::Char('P') => {
            return Some(Binding::Session(SessionAction::Pause))
        }
        KeyCode::Char('r') | KeyCode::Char('R') => {
            return Some(Binding::Session(SessionAction::Restart))
        }
        _ => return None,
    };
    Some(Binding::Game(command))
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(code: KeyCode) -> Option<Command> {
        match map_key(KeyEvent::from(code)) {
            Some(Binding::Game(command)) => Some(command),
            _ => None,
        }
    }

    #[test]
    fn test_movement_keys() {
        assert_eq!(game(KeyCode::Left), Some(Command::Left));
        assert_eq!(game(KeyCode::Right), Some(Command::Right));
        assert_eq!(game(KeyCode::Down), Some(Command::SoftDrop));
        assert_eq!(game(KeyCode::Char(' ')), Some(Command::HardDrop));
        assert_eq!(game(KeyCode::Char('4')), Some(Command::Left));
    }

    #[test]
    fn test_rotation_keys() {
        assert_eq!(game(KeyCode::Up), Some(Command::RotateCw));
        assert_eq!(game(KeyCode::Char('x')), Some(Command::RotateCw));
        assert_eq!(game(KeyCode::Char('z')), Some(Command::RotateCcw));
        assert_eq!(game(KeyCode::Char('Y')), Some(Command::RotateCcw));
    }

    #[test]
    fn test_session_keys() {
        assert_eq!(game(KeyCode::Char('c')), Some(Command::Hold));
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Esc)),
            Some(Binding::Session(SessionAction::Pause))
        );
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Char('r'))),
            Some(Binding::Session(SessionAction::Restart))
        );
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('m'))), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(should_quit(ctrl_c));
        assert_eq!(
            map_key(ctrl_c),
            Some(Binding::Session(SessionAction::Quit))
        );
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('x'))));
    }
}
