//! Checkerboard orientation of the grid.
//!
//! Odd columns run down and even columns run up; even rows run right and odd
//! rows run left. Every cell therefore has one vertical and one horizontal
//! admissible direction, and shares both targets with exactly one diagonal
//! neighbour. Swapping the choice at such a pair of cells either cuts a loop
//! in two or fuses two loops into one.

use crate::grid::{Cell, Direction};

/// The vertical and horizontal direction a cell may point along
pub fn admissible_directions(cell: Cell) -> [Direction; 2] {
    let vertical = if cell.col.rem_euclid(2) == 1 {
        Direction::Down
    } else {
        Direction::Up
    };
    let horizontal = if cell.row.rem_euclid(2) == 0 {
        Direction::Right
    } else {
        Direction::Left
    };
    [vertical, horizontal]
}

/// The admissible direction other than `current`.
///
/// `None` when `current` is not admissible at `cell`, since then there is no
/// single alternative to switch to.
pub fn alternative_direction(cell: Cell, current: Direction) -> Option<Direction> {
    let [vertical, horizontal] = admissible_directions(cell);
    if current == vertical {
        Some(horizontal)
    } else if current == horizontal {
        Some(vertical)
    } else {
        None
    }
}
