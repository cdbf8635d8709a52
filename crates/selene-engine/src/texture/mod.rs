//! GPU textures decoded from image bytes.

mod store;

pub use store::{TextureError, TextureId, TextureStore};
