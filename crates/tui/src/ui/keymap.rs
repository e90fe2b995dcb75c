use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use engine::Tab;

/// How plain characters are interpreted on the current screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Letters and digits are shortcuts.
    Navigate,
    /// Characters go into the focused text field.
    Text,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    Quit,
    Cancel,
    Submit,
    Save,
    ManageTags,
    New,
    Rename,
    Delete,
    NextField,
    PrevField,
    Backspace,
    Up,
    Down,
    Left,
    Right,
    Navigate(Tab),
    Input(char),
    None,
}

pub fn map_key(key: KeyEvent, mode: InputMode) -> AppAction {
    if key.kind == KeyEventKind::Release {
        return AppAction::None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => AppAction::Quit,
            KeyCode::Char('s') => AppAction::Save,
            KeyCode::Char('t') => AppAction::ManageTags,
            KeyCode::Char('n') => AppAction::New,
            KeyCode::Char('r') => AppAction::Rename,
            KeyCode::Char('d') => AppAction::Delete,
            _ => AppAction::None,
        };
    }

    match key.code {
        KeyCode::Esc => AppAction::Cancel,
        KeyCode::Enter => AppAction::Submit,
        KeyCode::Tab => AppAction::NextField,
        KeyCode::BackTab => AppAction::PrevField,
        KeyCode::Backspace => AppAction::Backspace,
        KeyCode::Up => AppAction::Up,
        KeyCode::Down => AppAction::Down,
        KeyCode::Left => AppAction::Left,
        KeyCode::Right => AppAction::Right,
        KeyCode::Char(ch) if mode == InputMode::Text => AppAction::Input(ch),
        KeyCode::Char('q') => AppAction::Quit,
        KeyCode::Char('j') => AppAction::Down,
        KeyCode::Char('k') => AppAction::Up,
        KeyCode::Char('h') => AppAction::Left,
        KeyCode::Char('l') => AppAction::Right,
        KeyCode::Char(ch @ '1'..='4') => {
            let idx = ch as usize - '1' as usize;
            AppAction::Navigate(Tab::ALL[idx])
        }
        KeyCode::Char(ch) => AppAction::Input(ch),
        _ => AppAction::None,
    }
}
