pub mod handler;

pub use handler::{Controls, InputHandler, KeyAction, PlaybackSpeed};
