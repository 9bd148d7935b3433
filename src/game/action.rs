use crate::grid::Direction;

/// Action that can be taken in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Move in a specific direction
    Move(Direction),
    /// Continue in current direction
    Continue,
}

impl From<Direction> for Action {
    fn from(direction: Direction) -> Self {
        Action::Move(direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_from_direction() {
        assert_eq!(Action::from(Direction::Up), Action::Move(Direction::Up));
        assert_ne!(Action::from(Direction::Left), Action::Continue);
    }
}
