//! Hamiltonian-cycle agent with opportunistic shortcuts
//!
//! The agent always moves to the successor of its current cell on a cycle
//! that covers the whole board. Because the snake's body occupies the cells
//! just behind the head on that cycle, the next cell is never part of the
//! body and the snake cannot trap itself.
//!
//! Each tick [`CycleAgent::optimize`] may replace the cycle with one that
//! reaches the target sooner: the cycle is split at the head so the head
//! jumps ahead, and the bypassed loop is spliced back in somewhere after the
//! target. The replacement is only committed when every step succeeded.

use std::collections::HashSet;

use tracing::{debug, trace};

use crate::cycle::{CycleError, HamiltonianCycle, Result, alternative_direction, join, split};
use crate::grid::{Cell, Direction};

/// Drives the snake along a live Hamiltonian cycle
#[derive(Debug, Clone)]
pub struct CycleAgent {
    cycle: HamiltonianCycle,
    position: Cell,
}

impl CycleAgent {
    /// Build the initial cycle for a `width` x `height` board
    pub fn new(width: usize, height: usize, position: Cell) -> Result<Self> {
        Self::from_cycle(HamiltonianCycle::build(width, height)?, position)
    }

    /// Start from an existing cycle; `position` must lie on it
    pub fn from_cycle(cycle: HamiltonianCycle, position: Cell) -> Result<Self> {
        if !cycle.contains(position) {
            return Err(CycleError::Structural(format!(
                "{position} is not on the board"
            )));
        }
        Ok(Self { cycle, position })
    }

    pub fn cycle(&self) -> &HamiltonianCycle {
        &self.cycle
    }

    pub fn position(&self) -> Cell {
        self.position
    }

    /// Re-align the tracked position with the game's head.
    ///
    /// Returns false, leaving the position unchanged, if `head` is off the board.
    pub fn sync(&mut self, head: Cell) -> bool {
        if !self.cycle.contains(head) {
            return false;
        }
        self.position = head;
        true
    }

    /// Direction to the next cell on the cycle; advances the tracked position
    pub fn next(&mut self) -> Direction {
        let direction = self.peek();
        self.position = self.position + direction;
        direction
    }

    /// Direction to the next cell on the cycle, without moving
    pub fn peek(&self) -> Direction {
        // `position` is kept on the board by every constructor and setter.
        match self.cycle.successor(self.position) {
            Some(direction) => direction,
            None => unreachable!("agent position {} left the cycle", self.position),
        }
    }

    /// Cells from the head (exclusive) up to and including `target`
    pub fn path_to(&self, target: Cell) -> Vec<Cell> {
        self.cycle.route(self.position, target)
    }

    /// Try to rewrite the cycle so the head reaches `target` sooner.
    ///
    /// `obstacles` holds cells whose successor must not change, normally the
    /// snake's body. Returns true iff the live cycle was replaced; on false
    /// nothing changed.
    pub fn optimize(&mut self, target: Cell, obstacles: &HashSet<Cell>) -> bool {
        let head = self.position;
        let Some(before) = self.cycle.distance(head, target) else {
            return false;
        };

        let Some(current) = self.cycle.successor(head) else {
            return false;
        };
        let Some(alternative) = alternative_direction(head, current) else {
            return false;
        };

        let shortcut = head + alternative;
        if !self.cycle.is_on_board(shortcut) || obstacles.contains(&shortcut) {
            trace!(%head, %shortcut, "shortcut blocked");
            return false;
        }

        let via_shortcut = self.cycle.distance(shortcut, target);
        let via_current = self.cycle.distance(head + current, target);
        match (via_shortcut, via_current) {
            (Some(short), Some(long)) if short < long => {}
            _ => return false,
        }

        let (ahead, skipped) = match split(&self.cycle, head) {
            Ok(parts) => parts,
            Err(err) => {
                debug!(%head, %err, "split rejected");
                return false;
            }
        };

        if skipped.cells().any(|cell| obstacles.contains(&cell)) {
            trace!(%head, "shortcut would strand part of the body");
            return false;
        }

        // Never splice into the stretch the head is about to travel.
        let mut avoid = obstacles.clone();
        avoid.extend(ahead.walk(head).take_while(|&cell| cell != target));

        let joined = match join(&ahead, &skipped, target, &avoid) {
            Ok(cycle) => cycle,
            Err(err) => {
                debug!(%head, %target, %err, "join rejected");
                return false;
            }
        };

        let after = match joined.distance(head, target) {
            Some(after) if after < before => after,
            _ => return false,
        };

        match HamiltonianCycle::from_cycle(joined, self.cycle.width(), self.cycle.height()) {
            Ok(cycle) => {
                debug!(%head, %target, before, after, "shortened path to target");
                self.cycle = cycle;
                true
            }
            Err(err) => {
                debug!(%err, "rewritten cycle lost coverage");
                false
            }
        }
    }
}
