use selene_engine::paint::Color;

/// Default surface description for textured draws.
///
/// `T` is the platform's texture handle.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Material<T> {
    pub diffuse_map: T,
    pub diffuse_color: Color,
}

impl<T: Copy> Material<T> {
    /// White diffuse color over `texture`.
    pub fn with_texture(texture: T) -> Self {
        Self { diffuse_map: texture, diffuse_color: Color::WHITE }
    }
}
