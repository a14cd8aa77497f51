use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    None,
    Quit,
    ToggleHelp,
    Back,
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    Activate,
    StartDefault,
    OpenCustom,
    Shuffle,
    Pick,
    Reset,
    Home,
    ToggleLocale,
}

pub fn map_key(key: KeyEvent) -> InputAction {
    match key.code {
        KeyCode::Esc => InputAction::Back,
        KeyCode::Enter => InputAction::Activate,
        KeyCode::Left => InputAction::MoveLeft,
        KeyCode::Right => InputAction::MoveRight,
        KeyCode::Up => InputAction::MoveUp,
        KeyCode::Down => InputAction::MoveDown,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            InputAction::Quit
        }
        KeyCode::Char('q') => InputAction::Quit,
        KeyCode::Char('?') => InputAction::ToggleHelp,
        KeyCode::Char(' ') => InputAction::Pick,
        KeyCode::Char('h') => InputAction::MoveLeft,
        KeyCode::Char('l') => InputAction::MoveRight,
        KeyCode::Char('k') => InputAction::MoveUp,
        KeyCode::Char('j') => InputAction::MoveDown,
        KeyCode::Char('1') | KeyCode::Char('d') => InputAction::StartDefault,
        KeyCode::Char('2') | KeyCode::Char('c') => InputAction::OpenCustom,
        KeyCode::Char('s') => InputAction::Shuffle,
        KeyCode::Char('r') => InputAction::Reset,
        KeyCode::Char('H') => InputAction::Home,
        KeyCode::Char('L') => InputAction::ToggleLocale,
        _ => InputAction::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_game_actions() {
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::NONE)),
            InputAction::Shuffle
        );
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE)),
            InputAction::Pick
        );
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('r'), KeyModifiers::NONE)),
            InputAction::Reset
        );
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)),
            InputAction::Quit
        );
    }

    #[test]
    fn maps_navigation() {
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('h'), KeyModifiers::NONE)),
            InputAction::MoveLeft
        );
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Down, KeyModifiers::NONE)),
            InputAction::MoveDown
        );
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('H'), KeyModifiers::SHIFT)),
            InputAction::Home
        );
    }

    #[test]
    fn ctrl_c_quits_instead_of_custom() {
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            InputAction::Quit
        );
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE)),
            InputAction::OpenCustom
        );
    }
}
