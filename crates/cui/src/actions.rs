use crate::app::{App, CursorMove};
use crate::input::InputAction;

pub fn dispatch(app: &mut App, action: InputAction) {
    match action {
        InputAction::None => {}
        InputAction::Quit => app.should_quit = true,
        InputAction::ToggleHelp => app.show_help = !app.show_help,
        InputAction::Back => app.back(),
        InputAction::MoveLeft => app.move_cursor(CursorMove::Left),
        InputAction::MoveRight => app.move_cursor(CursorMove::Right),
        InputAction::MoveUp => app.move_cursor(CursorMove::Up),
        InputAction::MoveDown => app.move_cursor(CursorMove::Down),
        InputAction::Activate => app.activate_primary(),
        InputAction::StartDefault => app.start_default_game(),
        InputAction::OpenCustom => app.open_custom_input(),
        InputAction::Shuffle => app.shuffle(),
        InputAction::Pick => app.pick_at_cursor(),
        InputAction::Reset => app.reset(),
        InputAction::Home => app.go_home(),
        InputAction::ToggleLocale => app.toggle_locale(),
    }
}
