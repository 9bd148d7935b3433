//! Grid coordinate algebra shared by the cycle core and the game.
//!
//! Rows grow downward, so `Up` decreases `row` and `Down` increases it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

/// One of the four unit steps on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All directions, in the order used for deterministic tie-breaking
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Returns the direction pointing the other way
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(self, other: Direction) -> bool {
        self.opposite() == other
    }

    /// Returns the delta (dcol, drow) for moving in this direction
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// A cell on the grid, addressed by column and row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub col: i32,
    pub row: i32,
}

impl Cell {
    pub fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// Manhattan distance to another cell
    pub fn manhattan(self, other: Cell) -> u32 {
        self.col.abs_diff(other.col) + self.row.abs_diff(other.row)
    }

    /// The direction that steps from `self` onto `other`, if they are neighbours
    pub fn direction_to(self, other: Cell) -> Option<Direction> {
        Direction::ALL.into_iter().find(|&d| self + d == other)
    }

    /// The four orthogonal neighbours, in `Direction::ALL` order
    pub fn neighbors(self) -> impl Iterator<Item = Cell> {
        Direction::ALL.into_iter().map(move |d| self + d)
    }
}

impl Add<Direction> for Cell {
    type Output = Cell;

    fn add(self, direction: Direction) -> Cell {
        let (dcol, drow) = direction.delta();
        Cell::new(self.col + dcol, self.row + drow)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_directions() {
        assert!(Direction::Up.is_opposite(Direction::Down));
        assert!(Direction::Down.is_opposite(Direction::Up));
        assert!(Direction::Left.is_opposite(Direction::Right));
        assert!(Direction::Right.is_opposite(Direction::Left));

        assert!(!Direction::Up.is_opposite(Direction::Left));
        assert!(!Direction::Up.is_opposite(Direction::Right));
    }

    #[test]
    fn test_opposite_is_involution() {
        for d in Direction::ALL {
            assert_eq!(d.opposite().opposite(), d);
            assert_ne!(d.opposite(), d);
        }
    }

    #[test]
    fn test_direction_delta() {
        assert_eq!(Direction::Up.delta(), (0, -1));
        assert_eq!(Direction::Down.delta(), (0, 1));
        assert_eq!(Direction::Left.delta(), (-1, 0));
        assert_eq!(Direction::Right.delta(), (1, 0));
    }

    #[test]
    fn test_cell_plus_direction() {
        let cell = Cell::new(5, 5);
        assert_eq!(cell + Direction::Right, Cell::new(6, 5));
        assert_eq!(cell + Direction::Left, Cell::new(4, 5));
        assert_eq!(cell + Direction::Down, Cell::new(5, 6));
        assert_eq!(cell + Direction::Up, Cell::new(5, 4));
        assert_eq!(Cell::new(0, 0) + Direction::Up, Cell::new(0, -1));
    }

    #[test]
    fn test_direction_to() {
        let cell = Cell::new(2, 3);
        for d in Direction::ALL {
            assert_eq!(cell.direction_to(cell + d), Some(d));
        }
        assert_eq!(cell.direction_to(cell), None);
        assert_eq!(cell.direction_to(Cell::new(3, 4)), None);
    }

    #[test]
    fn test_manhattan() {
        assert_eq!(Cell::new(0, 0).manhattan(Cell::new(3, 1)), 4);
        assert_eq!(Cell::new(-2, 1).manhattan(Cell::new(1, -1)), 5);
    }
}
