//! Time subsystem.
//!
//! Frame timing utilities that do not depend on the window runtime.
//! The window host ticks one `FrameClock` per presented frame; the delta of the
//! last tick is what scripts and the splash sequence see as "frame time".

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
