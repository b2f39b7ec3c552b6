//! Input handling: event types and the processor that converts raw
//! pointer/key events into viewer commands.

/// Platform-agnostic input events.
pub mod event;
/// Converts raw events into viewer commands.
pub mod processor;

pub use event::InputEvent;
pub use processor::{InputProcessor, KeyBindings, KeyCommandTag};
