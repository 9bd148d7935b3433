pub mod renderer;

pub use renderer::{AutopilotStatus, Hud, Renderer};
