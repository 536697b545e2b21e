//! Event handling utilities

use crossterm::event::KeyCode;

/// Map a key press in normal mode to an action
pub fn key_to_action(key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::Char('j') | KeyCode::Down => Some(Action::Down),
        KeyCode::Char('k') | KeyCode::Up => Some(Action::Up),
        KeyCode::Char(c @ 'A'..='Z') => Some(Action::Choose(c)),
        KeyCode::Enter => Some(Action::Confirm),
        KeyCode::Char('h') => Some(Action::Hint),
        KeyCode::Char('n') | KeyCode::Right => Some(Action::Next),
        KeyCode::Char('r') => Some(Action::Restart),
        KeyCode::Char(':') => Some(Action::CommandMode),
        KeyCode::Esc => Some(Action::Back),
        // Note: 'q' intentionally not mapped - use :q command to quit
        _ => None,
    }
}

/// Actions that can be taken in the app
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // Option cursor
    Up,
    Down,
    /// Pick an option by letter
    Choose(char),

    /// Submit, or advance once submitted
    Confirm,
    Hint,
    Next,
    Restart,

    CommandMode,
    Back,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn j_and_k_move_the_cursor() {
        assert_eq!(key_to_action(KeyCode::Char('j')), Some(Action::Down));
        assert_eq!(key_to_action(KeyCode::Char('k')), Some(Action::Up));
    }

    #[test]
    fn uppercase_letters_choose_options() {
        assert_eq!(key_to_action(KeyCode::Char('C')), Some(Action::Choose('C')));
        assert_eq!(key_to_action(KeyCode::Char('c')), None);
    }

    #[test]
    fn q_is_not_mapped() {
        assert_eq!(key_to_action(KeyCode::Char('q')), None);
    }

    #[test]
    fn colon_opens_command_line() {
        assert_eq!(key_to_action(KeyCode::Char(':')), Some(Action::CommandMode));
    }
}
