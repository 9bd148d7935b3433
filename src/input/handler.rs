use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::Direction;

/// Autopilot tick rate, picked with the number keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackSpeed {
    /// 2 Hz
    Slow,
    /// 8 Hz, same as human play
    Normal,
    /// 20 Hz
    Fast,
    /// ~60 Hz
    VeryFast,
}

impl PlaybackSpeed {
    pub fn tick_interval(&self) -> Duration {
        match self {
            Self::Slow => Duration::from_millis(500),
            Self::Normal => Duration::from_millis(125),
            Self::Fast => Duration::from_millis(50),
            Self::VeryFast => Duration::from_millis(16),
        }
    }

    fn from_digit(digit: char) -> Option<Self> {
        match digit {
            '1' => Some(Self::Slow),
            '2' => Some(Self::Normal),
            '3' => Some(Self::Fast),
            '4' => Some(Self::VeryFast),
            _ => None,
        }
    }
}

/// Which key map is active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Controls {
    /// The player steers; H shows the cycle route to the food
    Keyboard,
    /// The agent steers; the keys tune it instead
    Autopilot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Steer(Direction),
    Restart,
    Quit,
    TogglePause,
    ToggleHint,
    ToggleOptimize,
    SetSpeed(PlaybackSpeed),
    None,
}

/// Translates key presses into actions for one set of [`Controls`]
pub struct InputHandler {
    controls: Controls,
}

impl InputHandler {
    pub fn new(controls: Controls) -> Self {
        Self { controls }
    }

    pub fn controls(&self) -> Controls {
        self.controls
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        let letter = match key.code {
            KeyCode::Esc => return KeyAction::Quit,
            KeyCode::Char(c) => c.to_ascii_lowercase(),
            code => {
                return match (self.controls, arrow(code)) {
                    (Controls::Keyboard, Some(direction)) => KeyAction::Steer(direction),
                    _ => KeyAction::None,
                };
            }
        };

        match (self.controls, letter) {
            (_, 'q') => KeyAction::Quit,
            (_, 'r') => KeyAction::Restart,
            (_, ' ' | 'p') => KeyAction::TogglePause,
            (Controls::Keyboard, 'h') => KeyAction::ToggleHint,
            (Controls::Keyboard, c) => wasd(c).map_or(KeyAction::None, KeyAction::Steer),
            (Controls::Autopilot, 'o') => KeyAction::ToggleOptimize,
            (Controls::Autopilot, c) => {
                PlaybackSpeed::from_digit(c).map_or(KeyAction::None, KeyAction::SetSpeed)
            }
        }
    }
}

fn arrow(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Up => Some(Direction::Up),
        KeyCode::Down => Some(Direction::Down),
        KeyCode::Left => Some(Direction::Left),
        KeyCode::Right => Some(Direction::Right),
        _ => None,
    }
}

fn wasd(letter: char) -> Option<Direction> {
    match letter {
        'w' => Some(Direction::Up),
        's' => Some(Direction::Down),
        'a' => Some(Direction::Left),
        'd' => Some(Direction::Right),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(handler: &InputHandler, code: KeyCode) -> KeyAction {
        handler.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_keyboard_steering() {
        let handler = InputHandler::new(Controls::Keyboard);
        let bindings = [
            (KeyCode::Up, Direction::Up),
            (KeyCode::Char('w'), Direction::Up),
            (KeyCode::Down, Direction::Down),
            (KeyCode::Char('S'), Direction::Down),
            (KeyCode::Left, Direction::Left),
            (KeyCode::Char('a'), Direction::Left),
            (KeyCode::Right, Direction::Right),
            (KeyCode::Char('D'), Direction::Right),
        ];

        for (code, direction) in bindings {
            assert_eq!(press(&handler, code), KeyAction::Steer(direction));
        }
        assert_eq!(press(&handler, KeyCode::Char('h')), KeyAction::ToggleHint);
    }

    #[test]
    fn test_autopilot_ignores_steering() {
        let handler = InputHandler::new(Controls::Autopilot);
        for code in [KeyCode::Up, KeyCode::Left, KeyCode::Char('w'), KeyCode::Char('d')] {
            assert_eq!(press(&handler, code), KeyAction::None);
        }
        assert_eq!(press(&handler, KeyCode::Char('h')), KeyAction::None);
    }

    #[test]
    fn test_autopilot_tuning_keys() {
        let handler = InputHandler::new(Controls::Autopilot);

        assert_eq!(press(&handler, KeyCode::Char('O')), KeyAction::ToggleOptimize);
        assert_eq!(
            press(&handler, KeyCode::Char('1')),
            KeyAction::SetSpeed(PlaybackSpeed::Slow)
        );
        assert_eq!(
            press(&handler, KeyCode::Char('4')),
            KeyAction::SetSpeed(PlaybackSpeed::VeryFast)
        );
        assert_eq!(press(&handler, KeyCode::Char('5')), KeyAction::None);
    }

    #[test]
    fn test_keyboard_ignores_tuning_keys() {
        let handler = InputHandler::new(Controls::Keyboard);
        assert_eq!(press(&handler, KeyCode::Char('o')), KeyAction::None);
        assert_eq!(press(&handler, KeyCode::Char('3')), KeyAction::None);
    }

    #[test]
    fn test_shared_keys() {
        for controls in [Controls::Keyboard, Controls::Autopilot] {
            let handler = InputHandler::new(controls);
            assert_eq!(handler.controls(), controls);

            assert_eq!(press(&handler, KeyCode::Char('Q')), KeyAction::Quit);
            assert_eq!(press(&handler, KeyCode::Esc), KeyAction::Quit);
            assert_eq!(press(&handler, KeyCode::Char('r')), KeyAction::Restart);
            assert_eq!(press(&handler, KeyCode::Char(' ')), KeyAction::TogglePause);
            assert_eq!(press(&handler, KeyCode::Char('x')), KeyAction::None);

            let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
            assert_eq!(handler.handle_key_event(ctrl_c), KeyAction::Quit);
        }
    }

    #[test]
    fn test_playback_speed_intervals() {
        assert_eq!(PlaybackSpeed::Slow.tick_interval(), Duration::from_millis(500));
        assert_eq!(PlaybackSpeed::Normal.tick_interval(), Duration::from_millis(125));
        assert_eq!(PlaybackSpeed::Fast.tick_interval(), Duration::from_millis(50));
        assert_eq!(PlaybackSpeed::VeryFast.tick_interval(), Duration::from_millis(16));
    }
}
