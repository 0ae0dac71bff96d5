//! Keyboard Input Handler
//!
//! Processes crossterm key events and updates `AppState`. Returns the
//! submitted prompt when Enter completes one.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::AppState;

/// Handle a single key event.
pub fn handle_key_event(key: KeyEvent, state: &mut AppState) -> Option<String> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            state.should_quit = true;
            None
        }
        KeyCode::Esc => {
            state.should_quit = true;
            None
        }
        KeyCode::Enter => state.take_input(),
        KeyCode::Backspace => {
            if !state.is_streaming() {
                state.input.pop();
            }
            None
        }
        KeyCode::Char(c) => {
            if !state.is_streaming() {
                state.input.push(c);
            }
            None
        }
        _ => None,
    }
}
