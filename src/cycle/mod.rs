//! Cycle algebra: closed loops over grid cells and the operations that
//! build, cut and fuse them.

pub mod error;
pub mod hamiltonian;
pub mod join;
pub mod parity;
mod splice;
pub mod split;
pub mod structure;

pub use error::{CycleError, Result, Violation};
pub use hamiltonian::{HamiltonianCycle, unit_loop};
pub use join::join;
pub use parity::{admissible_directions, alternative_direction};
pub use split::split;
pub use structure::{Cycle, Walk};
