//! The successor map that forms exactly one closed loop

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use super::error::{CycleError, Result, Violation};
use super::splice::Splice;
use crate::grid::{Cell, Direction};

/// A closed loop over a set of cells.
///
/// Every cell maps to the direction of its successor. A `Cycle` can only be
/// obtained through a constructor that validates all three invariants:
/// every successor is in the domain, no two cells share a successor, and
/// following successors from any cell visits the whole domain once.
///
/// The map is ordered, so iteration and every search built on top of it are
/// deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cycle {
    successors: BTreeMap<Cell, Direction>,
}

impl Cycle {
    /// Build a cycle from parallel lists of cells and successor directions
    pub fn new(cells: &[Cell], directions: &[Direction]) -> Result<Self> {
        if cells.len() != directions.len() {
            return Err(Violation::LengthMismatch {
                cells: cells.len(),
                directions: directions.len(),
            }
            .into());
        }

        let mut successors = BTreeMap::new();
        for (&cell, &direction) in cells.iter().zip(directions) {
            if successors.insert(cell, direction).is_some() {
                return Err(Violation::DuplicateCell(cell).into());
            }
        }

        Self::from_successors(successors)
    }

    /// Wrap an existing successor map, validating it first
    pub fn from_successors(successors: BTreeMap<Cell, Direction>) -> Result<Self> {
        let cycle = Self { successors };
        cycle.validate()?;
        Ok(cycle)
    }

    /// Re-check totality, bijectivity and the single-loop property
    pub fn validate(&self) -> Result<()> {
        let Some(&start) = self.successors.keys().next() else {
            return Err(Violation::Empty.into());
        };

        let mut targets = BTreeSet::new();
        for (&cell, &direction) in &self.successors {
            let target = cell + direction;
            if !self.successors.contains_key(&target) {
                return Err(Violation::Dangling { cell, target }.into());
            }
            if !targets.insert(target) {
                return Err(Violation::SharedSuccessor(target).into());
            }
        }

        // Total and injective, so the walk from `start` must come back to it.
        let reached = self.walk(start).count();
        if reached != self.len() {
            return Err(Violation::Disconnected {
                start,
                reached,
                total: self.len(),
            }
            .into());
        }

        Ok(())
    }

    /// Number of cells in the loop
    pub fn len(&self) -> usize {
        self.successors.len()
    }

    /// Always false for a validated cycle
    pub fn is_empty(&self) -> bool {
        self.successors.is_empty()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.successors.contains_key(&cell)
    }

    /// Direction of the successor of `cell`
    pub fn successor(&self, cell: Cell) -> Option<Direction> {
        self.successors.get(&cell).copied()
    }

    /// The cell that follows `cell` on the loop
    pub fn next_cell(&self, cell: Cell) -> Option<Cell> {
        self.successor(cell).map(|direction| cell + direction)
    }

    /// The unique cell whose successor is `cell`
    pub fn predecessor(&self, cell: Cell) -> Option<Cell> {
        if !self.contains(cell) {
            return None;
        }
        cell.neighbors()
            .find(|&neighbor| self.next_cell(neighbor) == Some(cell))
    }

    /// All cells, in map order
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.successors.keys().copied()
    }

    /// All `(cell, successor direction)` pairs, in map order
    pub fn iter(&self) -> impl Iterator<Item = (Cell, Direction)> + '_ {
        self.successors.iter().map(|(&cell, &direction)| (cell, direction))
    }

    /// Cells in loop order, starting at `start` and stopping before it recurs.
    ///
    /// Empty if `start` is not part of the cycle.
    pub fn walk(&self, start: Cell) -> Walk<'_> {
        Walk {
            cycle: self,
            start,
            next: self.contains(start).then_some(start),
        }
    }

    /// Like [`Cycle::walk`], paired with each cell's successor direction
    pub fn edges(&self, start: Cell) -> impl Iterator<Item = (Cell, Direction)> + '_ {
        self.walk(start)
            .filter_map(|cell| self.successor(cell).map(|direction| (cell, direction)))
    }

    /// Number of forward steps from `start` to `end`.
    ///
    /// `None` means `end` cannot be reached going forward from `start`, which
    /// for a valid cycle only happens when one of the cells lies outside it.
    pub fn distance(&self, start: Cell, end: Cell) -> Option<usize> {
        if !self.contains(end) {
            return None;
        }
        self.walk(start).position(|cell| cell == end)
    }

    /// Cells visited after `start` up to and including `end`.
    ///
    /// Empty when the two coincide or either lies outside the cycle.
    pub fn route(&self, start: Cell, end: Cell) -> Vec<Cell> {
        if start == end || !self.contains(start) || !self.contains(end) {
            return Vec::new();
        }
        let mut route: Vec<Cell> = self
            .walk(start)
            .skip(1)
            .take_while(|&cell| cell != end)
            .collect();
        route.push(end);
        route
    }

    /// Absorb `other` into a copy of this cycle.
    ///
    /// - `other` inside this domain: nothing changes.
    /// - Overlapping domains: where `other` leads out of this domain, its
    ///   successors are copied until the walk comes back in.
    /// - Disjoint domains: the two loops are spliced at the first boundary
    ///   cell that offers a valid edge exchange.
    ///
    /// Neither input is modified; on error the caller still holds both.
    pub fn merge(&self, other: &Cycle) -> Result<Cycle> {
        if other.cells().all(|cell| self.contains(cell)) {
            return Ok(self.clone());
        }
        if other.cells().any(|cell| self.contains(cell)) {
            return self.merge_overlapping(other);
        }
        self.merge_disjoint(other)
    }

    /// Merge a sequence of cycles into one.
    ///
    /// A cycle that does not touch the accumulated loop yet is pushed to the
    /// back of the worklist and retried after the next successful merge.
    pub fn merge_all(cycles: impl IntoIterator<Item = Cycle>) -> Result<Cycle> {
        let mut pending: VecDeque<Cycle> = cycles.into_iter().collect();
        let mut merged = pending.pop_front().ok_or(Violation::Empty)?;
        let mut deferred = 0;

        while let Some(next) = pending.pop_front() {
            match merged.merge(&next) {
                Ok(cycle) => {
                    merged = cycle;
                    deferred = 0;
                }
                Err(CycleError::NonAdjacent) => {
                    deferred += 1;
                    if deferred > pending.len() {
                        return Err(CycleError::NonAdjacent);
                    }
                    pending.push_back(next);
                }
                Err(err) => return Err(err),
            }
        }

        Ok(merged)
    }

    pub(crate) fn successors(&self) -> &BTreeMap<Cell, Direction> {
        &self.successors
    }

    fn merge_overlapping(&self, other: &Cycle) -> Result<Cycle> {
        let mut merged = self.successors.clone();
        let shared: Vec<Cell> = other.cells().filter(|&cell| self.contains(cell)).collect();

        for cell in shared {
            let Some(theirs) = other.successor(cell) else {
                continue;
            };
            if merged.get(&cell) == Some(&theirs) || merged.contains_key(&(cell + theirs)) {
                continue;
            }

            let mut current = cell;
            while let Some(direction) = other.successor(current) {
                merged.insert(current, direction);
                current = current + direction;
                if merged.contains_key(&current) {
                    break;
                }
            }
        }

        Cycle::from_successors(merged)
    }

    fn merge_disjoint(&self, other: &Cycle) -> Result<Cycle> {
        let boundary: BTreeSet<Cell> = other
            .cells()
            .flat_map(Cell::neighbors)
            .filter(|&cell| self.contains(cell))
            .collect();

        if boundary.is_empty() {
            return Err(CycleError::NonAdjacent);
        }

        boundary
            .iter()
            .filter(|&&exit| self.next_cell(exit).is_some_and(|s| boundary.contains(&s)))
            .find_map(|&exit| Splice::find(self, other, exit, Direction::ALL, |_| false))
            .ok_or_else(|| {
                CycleError::Structural("adjacent cycles offer no splice point".to_string())
            })?
            .apply(self, other)
    }
}

/// Iterator over a cycle in loop order, see [`Cycle::walk`]
#[derive(Debug, Clone)]
pub struct Walk<'a> {
    cycle: &'a Cycle,
    start: Cell,
    next: Option<Cell>,
}

impl Iterator for Walk<'_> {
    type Item = Cell;

    fn next(&mut self) -> Option<Cell> {
        let current = self.next?;
        self.next = self
            .cycle
            .next_cell(current)
            .filter(|&cell| cell != self.start);
        Some(current)
    }
}
