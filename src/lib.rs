//! Hamilton Snake - a Snake autopilot that follows a self-rewriting
//! Hamiltonian cycle
//!
//! This library provides:
//! - Grid coordinates and directions (grid module)
//! - Cycle algebra: validation, merge, split, join, board construction (cycle module)
//! - The cycle-following agent and its game driver (agent module)
//! - Core game logic (game module)
//! - TUI rendering, keyboard input and run statistics (render, input, metrics modules)
//! - Execution modes: human, autopilot, simulate (modes module)

pub mod agent;
pub mod cycle;
pub mod game;
pub mod grid;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod render;
