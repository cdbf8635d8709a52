//! Paint model shared between the host and the renderers.

pub mod color;

pub use color::Color;
