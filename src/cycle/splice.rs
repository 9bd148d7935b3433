//! The two-edge exchange shared by merging and joining

use super::error::{CycleError, Result};
use super::structure::Cycle;
use crate::grid::{Cell, Direction};

/// An exchange of two successor edges that fuses two disjoint loops.
///
/// `exit -> rejoin` is an edge of the left loop and `last -> entry` an edge
/// of the right loop. After the exchange the loop runs from `exit` into
/// `entry`, all the way around the right loop to `last`, then back to
/// `rejoin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Splice {
    pub exit: Cell,
    pub rejoin: Cell,
    pub entry: Cell,
    pub last: Cell,
}

impl Splice {
    /// Look for a splice leaving `left` at `exit`.
    ///
    /// Entry cells are tried in the order of `directions`. `blocked` vetoes
    /// the right-hand cell whose successor would be rewritten.
    pub fn find(
        left: &Cycle,
        right: &Cycle,
        exit: Cell,
        directions: impl IntoIterator<Item = Direction>,
        blocked: impl Fn(Cell) -> bool,
    ) -> Option<Splice> {
        let rejoin = left.next_cell(exit)?;

        directions
            .into_iter()
            .map(|direction| exit + direction)
            .filter(|&entry| right.contains(entry))
            .find_map(|entry| {
                let last = right.predecessor(entry)?;
                let closes = last.direction_to(rejoin).is_some();
                (closes && !blocked(last)).then_some(Splice {
                    exit,
                    rejoin,
                    entry,
                    last,
                })
            })
    }

    /// Rewire `left` through `right` and validate the result
    pub fn apply(&self, left: &Cycle, right: &Cycle) -> Result<Cycle> {
        let into_right = self.exit.direction_to(self.entry).ok_or_else(|| {
            CycleError::Structural(format!("{} is not next to {}", self.exit, self.entry))
        })?;
        let home = self.last.direction_to(self.rejoin).ok_or_else(|| {
            CycleError::Structural(format!("{} is not next to {}", self.last, self.rejoin))
        })?;

        let mut joined = left.successors().clone();
        joined.insert(self.exit, into_right);
        joined.extend(right.edges(self.entry));
        joined.insert(self.last, home);

        Cycle::from_successors(joined)
    }
}
