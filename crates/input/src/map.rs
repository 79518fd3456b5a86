//! Key mapping from terminal events to game actions.
//!
//! Pad keys follow the original layout: `1/q` green, `2/w` red, `3/e`
//! yellow, `4/r` blue, with `z/x/c` on the slow/skip/hint power-ups.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tui_simon_types::{Action, Color, PowerupKind};

/// Map keyboard input to game actions.
pub fn handle_key_event(key: KeyEvent) -> Option<Action> {
    // Ctrl-R resets; a bare `r` is the blue pad.
    if key.code == KeyCode::Char('r') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(Action::Reset);
    }

    match key.code {
        // Session control
        KeyCode::Char(' ') | KeyCode::Enter => Some(Action::Start),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(Action::Pause),

        // Pads
        KeyCode::Char('1') | KeyCode::Char('q') | KeyCode::Char('Q') => {
            Some(Action::Press(Color::Green))
        }
        KeyCode::Char('2') | KeyCode::Char('w') | KeyCode::Char('W') => {
            Some(Action::Press(Color::Red))
        }
        KeyCode::Char('3') | KeyCode::Char('e') | KeyCode::Char('E') => {
            Some(Action::Press(Color::Yellow))
        }
        KeyCode::Char('4') | KeyCode::Char('r') | KeyCode::Char('R') => {
            Some(Action::Press(Color::Blue))
        }

        // Power-up shortcuts
        KeyCode::Char('z') | KeyCode::Char('Z') => Some(Action::Powerup(PowerupKind::Slow)),
        KeyCode::Char('x') | KeyCode::Char('X') => Some(Action::Powerup(PowerupKind::Skip)),
        KeyCode::Char('c') | KeyCode::Char('C') => Some(Action::Powerup(PowerupKind::Hint)),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
