//! Selene engine crate.
//!
//! This crate owns the platform + GPU capability provider consumed by the
//! script host: a polled window, frame timing, text/texture resources and the
//! renderers that turn a recorded draw list into a presented frame.

pub mod audio;
pub mod coords;
pub mod device;
pub mod input;
pub mod logging;
pub mod paint;
pub mod render;
pub mod scene;
pub mod text;
pub mod texture;
pub mod time;
pub mod window;
