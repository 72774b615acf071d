use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a key means in the view it was pressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Up,
    Down,
    Top,
    Bottom,
    PageUp,
    PageDown,
    Start,
    Stop,
    Restart,
    Remove,
    ShowLogs,
    OpenFilter,
    Refresh,
    ToggleAll,
    ToggleHelp,
    Back,
    Submit,
    Input(char),
    Backspace,
    ClearInput,
}

fn is_ctrl_c(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
}

pub fn containers_action(key: &KeyEvent) -> Option<Action> {
    if is_ctrl_c(key) {
        return Some(Action::Quit);
    }
    let action = match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Up | KeyCode::Char('k') => Action::Up,
        KeyCode::Down | KeyCode::Char('j') => Action::Down,
        KeyCode::Home | KeyCode::Char('g') => Action::Top,
        KeyCode::End | KeyCode::Char('G') => Action::Bottom,
        KeyCode::PageUp => Action::PageUp,
        KeyCode::PageDown => Action::PageDown,
        KeyCode::Char('s') => Action::Start,
        KeyCode::Char('t') => Action::Stop,
        KeyCode::Char('r') => Action::Restart,
        KeyCode::Char('d') => Action::Remove,
        KeyCode::Char('l') | KeyCode::Enter => Action::ShowLogs,
        KeyCode::Char('f') | KeyCode::Char('/') => Action::OpenFilter,
        KeyCode::F(5) => Action::Refresh,
        KeyCode::Char('a') => Action::ToggleAll,
        KeyCode::Char('?') => Action::ToggleHelp,
        KeyCode::Esc => Action::Back,
        _ => return None,
    };
    Some(action)
}

pub fn logs_action(key: &KeyEvent) -> Option<Action> {
    if is_ctrl_c(key) {
        return Some(Action::Quit);
    }
    let action = match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Esc => Action::Back,
        KeyCode::Up | KeyCode::Char('k') => Action::Up,
        KeyCode::Down | KeyCode::Char('j') => Action::Down,
        KeyCode::Home | KeyCode::Char('g') => Action::Top,
        KeyCode::End | KeyCode::Char('G') => Action::Bottom,
        KeyCode::PageUp => Action::PageUp,
        KeyCode::PageDown | KeyCode::Char(' ') => Action::PageDown,
        _ => return None,
    };
    Some(action)
}

/// In the filter box every printable key is text, so quit is not bound.
pub fn filter_action(key: &KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Action::Back),
            KeyCode::Char('u') => Some(Action::ClearInput),
            _ => None,
        };
    }
    let action = match key.code {
        KeyCode::Enter => Action::Submit,
        KeyCode::Esc => Action::Back,
        KeyCode::Backspace => Action::Backspace,
        KeyCode::Char(c) => Action::Input(c),
        _ => return None,
    };
    Some(action)
}
