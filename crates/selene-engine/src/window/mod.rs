//! Polled window host.
//!
//! Owns the `winit` EventLoop and Window and wires them to the GPU layer.
//! Unlike a callback-driven runtime, the caller drives the loop: every
//! close-request check pumps pending platform events with a zero timeout.

mod config;
mod error;
mod handler;
mod host;

pub use config::WindowConfig;
pub use error::WindowError;
pub use host::WindowHost;
