//! Scene (draw stream) types.
//!
//! Scripts and the splash sequence record commands here between
//! `begin_drawing` and `end_drawing`; the renderers consume the list when the
//! frame is presented.

mod cmd;
mod list;

pub use cmd::{DrawCmd, RectCmd, SpriteCmd, TextCmd};
pub use list::DrawList;
