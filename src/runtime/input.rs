use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a key press asks the driver to do.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Action {
    Previous,
    Next,
    Quit,
}

pub fn action_for(key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Action::Quit),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::Previous),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::Next),
        KeyCode::Esc | KeyCode::Char('q') => Some(Action::Quit),
        _ => None,
    }
}
