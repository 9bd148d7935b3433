//! Full-board cycles built from 2x2 unit loops

use std::ops::Deref;

use tracing::debug;

use super::error::{Result, Violation};
use super::structure::Cycle;
use crate::grid::{Cell, Direction};

/// Step order of a unit loop anchored at its top-left cell
const UNIT_LOOP: [Direction; 4] = [
    Direction::Right,
    Direction::Down,
    Direction::Left,
    Direction::Up,
];

/// The 2x2 loop whose top-left cell is `anchor`
pub fn unit_loop(anchor: Cell) -> Result<Cycle> {
    let mut cells = Vec::with_capacity(UNIT_LOOP.len());
    let mut cell = anchor;
    for direction in UNIT_LOOP {
        cells.push(cell);
        cell = cell + direction;
    }
    Cycle::new(&cells, &UNIT_LOOP)
}

/// A cycle whose domain is exactly the cells of a `width` x `height` board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HamiltonianCycle {
    cycle: Cycle,
    width: usize,
    height: usize,
}

impl HamiltonianCycle {
    /// Tile the board with unit loops and merge them in raster order.
    ///
    /// Both dimensions must be even and non-zero.
    pub fn build(width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 || width % 2 != 0 || height % 2 != 0 {
            return Err(Violation::UnsupportedBoard { width, height }.into());
        }

        let mut loops = Vec::with_capacity(width * height / 4);
        for row in (0..height).step_by(2) {
            for col in (0..width).step_by(2) {
                loops.push(unit_loop(Cell::new(col as i32, row as i32))?);
            }
        }

        let cycle = Cycle::merge_all(loops)?;
        debug!(width, height, cells = cycle.len(), "built hamiltonian cycle");

        Self::from_cycle(cycle, width, height)
    }

    /// Accept `cycle` as Hamiltonian if it covers exactly the board
    pub fn from_cycle(cycle: Cycle, width: usize, height: usize) -> Result<Self> {
        let expected = width * height;
        let on_board = cycle.cells().all(|cell| in_bounds(cell, width, height));

        if cycle.len() != expected || !on_board {
            return Err(Violation::IncompleteCoverage {
                covered: cycle.len(),
                expected,
                width,
                height,
            }
            .into());
        }

        Ok(Self {
            cycle,
            width,
            height,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Check if a cell lies on the board this cycle covers
    pub fn is_on_board(&self, cell: Cell) -> bool {
        in_bounds(cell, self.width, self.height)
    }

    pub fn cycle(&self) -> &Cycle {
        &self.cycle
    }

    pub fn into_cycle(self) -> Cycle {
        self.cycle
    }
}

impl Deref for HamiltonianCycle {
    type Target = Cycle;

    fn deref(&self) -> &Cycle {
        &self.cycle
    }
}

fn in_bounds(cell: Cell, width: usize, height: usize) -> bool {
    cell.col >= 0 && cell.row >= 0 && (cell.col as usize) < width && (cell.row as usize) < height
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cycle::{CycleError, admissible_directions};

    #[test]
    fn test_unit_loop_is_admissible() {
        let cycle = unit_loop(Cell::new(2, 4)).unwrap();
        assert_eq!(cycle.len(), 4);
        for (cell, direction) in cycle.iter() {
            assert!(admissible_directions(cell).contains(&direction));
        }
    }

    #[test]
    fn test_build_even_boards() {
        for (width, height) in [(2, 2), (4, 2), (2, 6), (6, 4), (10, 10), (20, 20)] {
            let cycle = HamiltonianCycle::build(width, height).unwrap();
            assert_eq!(cycle.len(), width * height);
            assert!(cycle.validate().is_ok());
            for col in 0..width as i32 {
                for row in 0..height as i32 {
                    assert!(cycle.contains(Cell::new(col, row)));
                }
            }
        }
    }

    #[test]
    fn test_built_cycle_uses_admissible_directions() {
        let cycle = HamiltonianCycle::build(8, 6).unwrap();
        for (cell, direction) in cycle.iter() {
            assert!(admissible_directions(cell).contains(&direction));
        }
    }

    #[test]
    fn test_build_rejects_odd_or_empty_boards() {
        for (width, height) in [(3, 4), (4, 3), (0, 4), (5, 5)] {
            assert_eq!(
                HamiltonianCycle::build(width, height).unwrap_err(),
                CycleError::Invalid(Violation::UnsupportedBoard { width, height })
            );
        }
    }

    #[test]
    fn test_four_by_two_corners() {
        let cycle = HamiltonianCycle::build(4, 2).unwrap();
        assert_eq!(cycle.len(), 8);
        assert_eq!(cycle.distance(Cell::new(0, 0), Cell::new(3, 1)), Some(4));
        assert_eq!(cycle.distance(Cell::new(3, 1), Cell::new(0, 0)), Some(4));
        assert_eq!(cycle.distance(Cell::new(3, 0), Cell::new(0, 1)), Some(4));
    }

    #[test]
    fn test_from_cycle_requires_full_cover() {
        let cycle = unit_loop(Cell::new(0, 0)).unwrap();
        assert!(HamiltonianCycle::from_cycle(cycle.clone(), 2, 2).is_ok());
        assert!(matches!(
            HamiltonianCycle::from_cycle(cycle, 4, 2),
            Err(CycleError::Invalid(Violation::IncompleteCoverage { .. }))
        ));

        let shifted = unit_loop(Cell::new(1, 0)).unwrap();
        assert!(HamiltonianCycle::from_cycle(shifted, 2, 2).is_err());
    }
}
