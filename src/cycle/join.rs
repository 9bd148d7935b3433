//! Fusing two disjoint loops while leaving obstacle cells alone

use std::collections::HashSet;

use super::error::{CycleError, Result};
use super::parity::alternative_direction;
use super::splice::Splice;
use super::structure::Cycle;
use crate::grid::Cell;

/// Fuse two disjoint loops into one.
///
/// `start` picks the left loop (the one containing it). Its cells are
/// visited in loop order from `start`; the first cell outside `obstacles`
/// whose other admissible direction steps into the right loop, and whose
/// switch partner there can close the loop, becomes the exit. Cells in
/// `obstacles` never have their successor rewritten.
pub fn join(a: &Cycle, b: &Cycle, start: Cell, obstacles: &HashSet<Cell>) -> Result<Cycle> {
    let (left, right) = match (a.contains(start), b.contains(start)) {
        (true, false) => (a, b),
        (false, true) => (b, a),
        (true, true) => {
            return Err(CycleError::Structural(format!(
                "{start} belongs to both cycles"
            )));
        }
        (false, false) => {
            return Err(CycleError::Structural(format!(
                "{start} belongs to neither cycle"
            )));
        }
    };

    if right.cells().any(|cell| left.contains(cell)) {
        return Err(CycleError::Structural(
            "cycles to join must be disjoint".to_string(),
        ));
    }

    left.walk(start)
        .filter(|exit| !obstacles.contains(exit))
        .find_map(|exit| {
            let alternative = left
                .successor(exit)
                .and_then(|current| alternative_direction(exit, current));
            Splice::find(left, right, exit, alternative, |last| {
                obstacles.contains(&last)
            })
        })
        .ok_or_else(|| {
            CycleError::Structural(format!("no splice point reachable from {start}"))
        })?
        .apply(left, right)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cycle::{HamiltonianCycle, split, unit_loop};

    #[test]
    fn test_split_then_join_restores_cycle() {
        let board = HamiltonianCycle::build(6, 6).unwrap();
        let mut rejoined = 0;

        for cell in board.cells() {
            let Ok((ahead, skipped)) = split(&board, cell) else {
                continue;
            };
            let joined = join(&ahead, &skipped, cell, &HashSet::new()).unwrap();
            assert!(joined.validate().is_ok());
            assert_eq!(joined.len(), board.len());
            assert_eq!(&joined, board.cycle());
            rejoined += 1;
        }

        assert!(rejoined > 0);
    }

    #[test]
    fn test_join_either_argument_order() {
        let left = unit_loop(Cell::new(0, 0)).unwrap();
        let right = unit_loop(Cell::new(2, 0)).unwrap();

        let forward = join(&left, &right, Cell::new(0, 0), &HashSet::new()).unwrap();
        let backward = join(&right, &left, Cell::new(0, 0), &HashSet::new()).unwrap();
        assert_eq!(forward, backward);
        assert_eq!(forward.len(), 8);
    }

    #[test]
    fn test_join_avoids_obstacles() {
        let left = unit_loop(Cell::new(0, 0)).unwrap();
        let right = unit_loop(Cell::new(2, 0)).unwrap();

        // The only splice rewrites (1,0) and (2,1).
        let obstacles = HashSet::from([Cell::new(1, 0)]);
        let err = join(&left, &right, Cell::new(0, 0), &obstacles).unwrap_err();
        assert!(err.is_recoverable());

        let obstacles = HashSet::from([Cell::new(2, 1)]);
        assert!(join(&left, &right, Cell::new(0, 0), &obstacles).is_err());

        let obstacles = HashSet::from([Cell::new(0, 1)]);
        assert!(join(&left, &right, Cell::new(0, 0), &obstacles).is_ok());
    }

    #[test]
    fn test_join_separated_loops_fails() {
        let left = unit_loop(Cell::new(0, 0)).unwrap();
        let right = unit_loop(Cell::new(4, 0)).unwrap();

        let err = join(&left, &right, Cell::new(0, 0), &HashSet::new()).unwrap_err();
        assert!(matches!(err, CycleError::Structural(_)));
    }

    #[test]
    fn test_join_rejects_bad_start() {
        let left = unit_loop(Cell::new(0, 0)).unwrap();
        let right = unit_loop(Cell::new(2, 0)).unwrap();

        assert!(join(&left, &right, Cell::new(7, 7), &HashSet::new()).is_err());
        assert!(join(&left, &left, Cell::new(0, 0), &HashSet::new()).is_err());
    }
}
