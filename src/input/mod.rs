//! Input handling: event types, the command vocabulary, and the processor
//! that converts raw window events into commands.

/// Frame-loop command vocabulary.
pub mod command;
/// Platform-agnostic input events.
pub mod event;
/// Converts raw events into commands.
pub mod processor;

pub use command::Command;
pub use event::{InputEvent, MouseButton};
pub use processor::InputProcessor;
