use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Viewer commands accepted while a story plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerInput {
    Replay,
    Quit,
}

#[must_use]
pub fn map_key_event(key: &KeyEvent) -> Option<PlayerInput> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if matches!(key.code, KeyCode::Char('c')) && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(PlayerInput::Quit);
    }
    if matches!(key.code, KeyCode::Char('q' | 'Q') | KeyCode::Esc) {
        return Some(PlayerInput::Quit);
    }
    if matches!(key.code, KeyCode::Char('r' | 'R') | KeyCode::Enter) {
        return Some(PlayerInput::Replay);
    }
    None
}
