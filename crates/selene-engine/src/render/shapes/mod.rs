//! Shape renderers.

mod common;

pub mod rect;
pub mod sprite;
pub mod text;
