//! Input handling: platform-agnostic events and the sampled input state
//! that feeds the camera tick.

/// Platform-agnostic input events.
pub mod event;
/// Camera movement actions that keys can be bound to.
pub mod keyboard;
/// Key and cursor state accumulated between camera ticks.
pub mod state;

pub use event::{InputEvent, MouseButton};
pub use keyboard::MoveAction;
pub use state::InputState;
