//! The cycle-following agent and the tick driver that couples it to a game
//!
//! - `CycleAgent` owns the live Hamiltonian cycle and the head position
//! - `AgentSession` runs one agent against a `GameEngine`, tick by tick

pub mod orchestrator;
pub mod session;

pub use orchestrator::CycleAgent;
pub use session::{AgentSession, TickOutcome};
