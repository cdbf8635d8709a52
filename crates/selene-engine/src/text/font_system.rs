use std::path::Path;

use fontdue::layout::{CoordinateSystem, Layout, LayoutSettings, TextStyle};

use crate::coords::Vec2;

/// Error returned by [`FontSystem::load_font`].
#[derive(Debug, thiserror::Error)]
#[error("font load error: {0}")]
pub struct FontLoadError(pub String);

/// Opaque handle to a font loaded into a [`FontSystem`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct FontId(pub(crate) usize);

impl FontId {
    /// The built-in font. It lives as long as the `FontSystem` and is never
    /// released through [`FontSystem::unload_font`].
    pub const BUILTIN: FontId = FontId(0);
}

/// Well-known locations probed for the built-in font.
const BUILTIN_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
    "C:\\Windows\\Fonts\\segoeui.ttf",
];

/// Owns every font the host can draw with.
///
/// Slot 0 is the built-in font; later slots hold custom fonts loaded from
/// bytes. Unloaded slots stay `None` so handles are never reused.
pub struct FontSystem {
    fonts: Vec<Option<fontdue::Font>>,
}

impl FontSystem {
    /// Creates a system whose built-in font is the first readable candidate.
    pub fn new() -> Self {
        let builtin = BUILTIN_FONT_CANDIDATES
            .iter()
            .map(Path::new)
            .find_map(|p| {
                let bytes = std::fs::read(p).ok()?;
                let font = parse(&bytes, 32.0).ok()?;
                log::debug!("built-in font: {}", p.display());
                Some(font)
            });

        if builtin.is_none() {
            log::warn!("no system font found; built-in text will not render");
        }

        Self { fonts: vec![builtin] }
    }

    /// Creates a system with an explicit built-in font (or none).
    pub fn with_builtin(bytes: Option<&[u8]>) -> Result<Self, FontLoadError> {
        let builtin = bytes.map(|b| parse(b, 32.0)).transpose()?;
        Ok(Self { fonts: vec![builtin] })
    }

    /// Parses a TrueType/OpenType font. `size` is the rasterization hint in px.
    pub fn load_font(&mut self, bytes: &[u8], size: f32) -> Result<FontId, FontLoadError> {
        let font = parse(bytes, size)?;
        let id = FontId(self.fonts.len());
        self.fonts.push(Some(font));
        Ok(id)
    }

    /// Releases a custom font. Returns `false` for the built-in font or an
    /// already-released handle.
    pub fn unload_font(&mut self, id: FontId) -> bool {
        if id == FontId::BUILTIN {
            log::warn!("refusing to unload the built-in font");
            return false;
        }
        match self.fonts.get_mut(id.0) {
            Some(slot @ Some(_)) => {
                *slot = None;
                true
            }
            _ => false,
        }
    }

    pub fn is_loaded(&self, id: FontId) -> bool {
        self.get(id).is_some()
    }

    pub(crate) fn get(&self, id: FontId) -> Option<&fontdue::Font> {
        self.fonts.get(id.0).and_then(Option::as_ref)
    }

    /// Measures a single line of text.
    ///
    /// `spacing` is extra advance inserted between consecutive glyphs.
    /// Returns `(width, height)` in logical pixels.
    #[must_use]
    pub fn measure_text(&self, text: &str, id: FontId, size: f32, spacing: f32) -> Vec2 {
        let Some(font) = self.get(id) else {
            return Vec2::new(0.0, size);
        };

        let mut layout: Layout<()> = Layout::new(CoordinateSystem::PositiveYDown);
        layout.reset(&LayoutSettings::default());
        layout.append(&[font], &TextStyle::new(text, size, 0));

        let glyphs = layout.glyphs();
        if glyphs.is_empty() {
            return Vec2::new(0.0, size);
        }

        // Pen position after the last glyph, not its bitmap edge, so trailing
        // spaces count.
        let w = glyphs
            .iter()
            .enumerate()
            .map(|(i, g)| {
                let m = font.metrics_indexed(g.key.glyph_index, size);
                g.x - m.xmin as f32 + m.advance_width + spacing * i as f32
            })
            .fold(0.0f32, f32::max);
        let h = layout.height().max(size);
        Vec2::new(w, h)
    }
}

impl Default for FontSystem {
    fn default() -> Self {
        Self::new()
    }
}

fn parse(bytes: &[u8], size: f32) -> Result<fontdue::Font, FontLoadError> {
    let settings = fontdue::FontSettings {
        scale: size.max(1.0),
        ..fontdue::FontSettings::default()
    };
    fontdue::Font::from_bytes(bytes, settings).map_err(|e| FontLoadError(e.to_string()))
}
