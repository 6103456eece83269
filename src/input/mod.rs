//! Input handling: event types and the processor that turns clicks into
//! pick requests.

/// Platform-agnostic input events.
pub mod event;
/// Converts raw events into pick requests.
pub mod processor;

pub use event::{InputEvent, MouseButton};
pub use processor::PickInput;
