//! Error types for cycle construction and transformation

use crate::grid::Cell;

/// Result type alias using CycleError
pub type Result<T> = std::result::Result<T, CycleError>;

/// Which cycle invariant a mapping breaks
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Violation {
    /// No cells at all
    #[error("a cycle needs at least one cell")]
    Empty,

    /// Cells and directions were supplied with different lengths
    #[error("{cells} cells but {directions} directions")]
    LengthMismatch { cells: usize, directions: usize },

    /// The same cell was given twice
    #[error("{0} appears more than once")]
    DuplicateCell(Cell),

    /// A successor lies outside the domain
    #[error("{cell} points to {target} which does not exist")]
    Dangling { cell: Cell, target: Cell },

    /// Two cells share the same successor
    #[error("several cells point to {0}")]
    SharedSuccessor(Cell),

    /// The mapping splits into more than one loop
    #[error("only {reached} of {total} cells are reachable starting from {start}")]
    Disconnected {
        start: Cell,
        reached: usize,
        total: usize,
    },

    /// A Hamiltonian cycle was requested for a board that cannot carry one
    #[error("board {width}x{height} cannot be tiled by 2x2 loops")]
    UnsupportedBoard { width: usize, height: usize },

    /// The domain is not exactly the board
    #[error("cycle covers {covered} cells, the {width}x{height} board has {expected}")]
    IncompleteCoverage {
        covered: usize,
        expected: usize,
        width: usize,
        height: usize,
    },
}

/// Errors raised by the cycle algebra
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CycleError {
    /// A constructed or merged mapping is not a single closed loop
    #[error("invalid cycle: {0}")]
    Invalid(#[from] Violation),

    /// Merge between disjoint cycles with no neighbouring cells
    #[error("cycles are not adjacent")]
    NonAdjacent,

    /// Split at a degenerate cell, or no splice point found
    #[error("cannot split or join here: {0}")]
    Structural(String),
}

impl CycleError {
    /// Split/join failures are routine and leave the caller's cycle untouched
    pub fn is_recoverable(&self) -> bool {
        matches!(self, CycleError::Structural(_))
    }
}
