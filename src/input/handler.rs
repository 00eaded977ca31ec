use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::Heading;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Turn(Heading),
    /// Enter: restarts only from the game-over screen
    Confirm,
    Restart,
    Quit,
    None,
}

/// Maps keys onto the three axes.
///
/// Left/Right arrows drive X, W/S drive Y, Up/Down arrows drive Z
/// (Up moves away from the viewer, towards -Z).
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            // X axis
            KeyCode::Left => KeyAction::Turn(Heading::NegX),
            KeyCode::Right => KeyAction::Turn(Heading::PosX),

            // Y axis
            KeyCode::Char('w') | KeyCode::Char('W') => KeyAction::Turn(Heading::PosY),
            KeyCode::Char('s') | KeyCode::Char('S') => KeyAction::Turn(Heading::NegY),

            // Z axis
            KeyCode::Up => KeyAction::Turn(Heading::NegZ),
            KeyCode::Down => KeyAction::Turn(Heading::PosZ),

            // Controls
            KeyCode::Enter => KeyAction::Confirm,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,
            KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Restart,

            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyAction {
        InputHandler::new().handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_arrow_keys() {
        assert_eq!(press(KeyCode::Left), KeyAction::Turn(Heading::NegX));
        assert_eq!(press(KeyCode::Right), KeyAction::Turn(Heading::PosX));
        assert_eq!(press(KeyCode::Up), KeyAction::Turn(Heading::NegZ));
        assert_eq!(press(KeyCode::Down), KeyAction::Turn(Heading::PosZ));
    }

    #[test]
    fn test_vertical_keys() {
        assert_eq!(press(KeyCode::Char('w')), KeyAction::Turn(Heading::PosY));
        assert_eq!(press(KeyCode::Char('s')), KeyAction::Turn(Heading::NegY));

        let handler = InputHandler::new();
        let w_upper = KeyEvent::new(KeyCode::Char('W'), KeyModifiers::SHIFT);
        assert_eq!(
            handler.handle_key_event(w_upper),
            KeyAction::Turn(Heading::PosY)
        );
    }

    #[test]
    fn test_control_keys() {
        assert_eq!(press(KeyCode::Enter), KeyAction::Confirm);
        assert_eq!(press(KeyCode::Char('r')), KeyAction::Restart);
        assert_eq!(press(KeyCode::Char('R')), KeyAction::Restart);
        assert_eq!(press(KeyCode::Char('q')), KeyAction::Quit);
        assert_eq!(press(KeyCode::Esc), KeyAction::Quit);
    }

    #[test]
    fn test_unknown_key() {
        assert_eq!(press(KeyCode::Char('x')), KeyAction::None);
        assert_eq!(press(KeyCode::Tab), KeyAction::None);
    }

    #[test]
    fn test_ctrl_c() {
        let handler = InputHandler::new();

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handler.handle_key_event(ctrl_c), KeyAction::Quit);
    }
}
