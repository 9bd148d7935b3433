pub mod autopilot;
pub mod human;
pub mod simulate;
mod terminal;

pub use autopilot::AutopilotMode;
pub use human::HumanMode;
pub use simulate::{GameRecord, SimulateMode, SimulationConfig, SimulationReport};
