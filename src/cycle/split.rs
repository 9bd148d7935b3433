//! Cutting one loop into two at a chosen cell

use std::collections::BTreeMap;

use super::error::{CycleError, Result};
use super::parity::alternative_direction;
use super::structure::Cycle;
use crate::grid::Cell;

/// Cut `cycle` at `cell` into two disjoint loops.
///
/// `cell` switches to its other admissible direction, which jumps ahead on
/// the loop. Returns `(ahead, skipped)`: `ahead` holds `cell` and everything
/// from the jump target back round to `cell`; `skipped` holds the bypassed
/// run, closed by redirecting its last cell to its first.
pub fn split(cycle: &Cycle, cell: Cell) -> Result<(Cycle, Cycle)> {
    let current = cycle
        .successor(cell)
        .ok_or_else(|| structural(format!("{cell} is not part of the cycle")))?;
    let alternative = alternative_direction(cell, current).ok_or_else(|| {
        structural(format!("{cell} does not follow an admissible direction"))
    })?;

    let shortcut = cell + alternative;
    if !cycle.contains(shortcut) {
        return Err(structural(format!(
            "{cell} has only one admissible direction on this cycle"
        )));
    }

    let skipped_from = cell + current;
    let partner = cycle
        .predecessor(shortcut)
        .ok_or_else(|| structural(format!("nothing points at {shortcut}")))?;
    let closing = partner.direction_to(skipped_from).ok_or_else(|| {
        structural(format!("{partner} cannot close the loop at {skipped_from}"))
    })?;

    let mut ahead = BTreeMap::from([(cell, alternative)]);
    ahead.extend(cycle.edges(shortcut).take_while(|&(c, _)| c != cell));

    let mut skipped: BTreeMap<_, _> = cycle
        .edges(skipped_from)
        .take_while(|&(c, _)| c != shortcut)
        .collect();
    skipped.insert(partner, closing);

    Ok((
        Cycle::from_successors(ahead)?,
        Cycle::from_successors(skipped)?,
    ))
}

fn structural(reason: String) -> CycleError {
    CycleError::Structural(reason)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cycle::HamiltonianCycle;
    use std::collections::BTreeSet;

    fn domain(cycle: &Cycle) -> BTreeSet<Cell> {
        cycle.cells().collect()
    }

    #[test]
    fn test_split_partitions_four_by_two() {
        let board = HamiltonianCycle::build(4, 2).unwrap();
        let (ahead, skipped) = split(&board, Cell::new(1, 0)).unwrap();

        assert!(ahead.validate().is_ok());
        assert!(skipped.validate().is_ok());
        assert!(ahead.contains(Cell::new(1, 0)));
        assert_eq!(ahead.len() + skipped.len(), 8);
        assert!(domain(&ahead).is_disjoint(&domain(&skipped)));

        let union: BTreeSet<Cell> = domain(&ahead).union(&domain(&skipped)).copied().collect();
        assert_eq!(union, domain(&board));
    }

    #[test]
    fn test_split_follows_shortcut() {
        let board = HamiltonianCycle::build(4, 2).unwrap();
        let (ahead, skipped) = split(&board, Cell::new(1, 0)).unwrap();

        // (1,0) used to step right into (2,0); now it drops to (1,1).
        assert_eq!(ahead.next_cell(Cell::new(1, 0)), Some(Cell::new(1, 1)));
        assert!(skipped.contains(Cell::new(2, 0)));
        assert_eq!(skipped.len(), 4);
    }

    #[test]
    fn test_split_at_degenerate_cell() {
        let board = HamiltonianCycle::build(4, 2).unwrap();
        // (0,0) can only go right; its other option leaves the board.
        let err = split(&board, Cell::new(0, 0)).unwrap_err();
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_split_outside_cycle() {
        let board = HamiltonianCycle::build(4, 2).unwrap();
        assert!(matches!(
            split(&board, Cell::new(9, 9)),
            Err(CycleError::Structural(_))
        ));
    }

    #[test]
    fn test_split_every_interior_cell() {
        let board = HamiltonianCycle::build(8, 8).unwrap();
        for cell in board.cells() {
            if let Ok((ahead, skipped)) = split(&board, cell) {
                assert_eq!(ahead.len() + skipped.len(), board.len());
                assert!(domain(&ahead).is_disjoint(&domain(&skipped)));
            }
        }
    }
}
