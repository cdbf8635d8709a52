//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! The window host translates platform events into `InputEvent`s.

mod keys;
pub(crate) mod platform;
mod state;
mod types;

pub use keys::key_code;
pub use state::InputState;
pub use types::{InputEvent, MouseButton};
