//! Input handling: event types, bindable key actions, and the input
//! processor that converts raw UI events into engine commands.

/// Platform-agnostic input events.
pub mod event;
/// Actions that can be bound to keys.
pub mod keyboard;
/// Converts raw events into engine commands.
pub mod processor;

pub use event::InputEvent;
pub use keyboard::KeyAction;
pub use processor::InputProcessor;
