use crate::coords::{Rect, Vec2};
use crate::paint::Color;
use crate::text::FontId;
use crate::texture::TextureId;

/// Renderer-agnostic draw command.
///
/// Extending the scene:
/// - add a payload struct and a variant here
/// - add a push helper on `DrawList`
/// - add a matching renderer under `render::shapes::*`
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Rect(RectCmd),
    Sprite(SpriteCmd),
    Text(TextCmd),
}

/// Solid rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct RectCmd {
    pub rect: Rect,
    pub color: Color,
}

/// Textured quad. `source` is in texel coordinates of the texture.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteCmd {
    pub texture: TextureId,
    pub source: Rect,
    pub dest: Rect,
    pub tint: Color,
}

/// Single line of text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextCmd {
    pub text: String,
    pub font: FontId,
    /// Font size in logical pixels.
    pub size: f32,
    /// Extra advance between glyphs in logical pixels.
    pub spacing: f32,
    pub color: Color,
    /// Top-left of the text block in logical pixels.
    pub origin: Vec2,
}
