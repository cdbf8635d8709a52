use crate::coords::{Rect, Vec2};
use crate::paint::Color;
use crate::text::FontId;
use crate::texture::TextureId;

use super::{DrawCmd, RectCmd, SpriteCmd, TextCmd};

/// Recorded draw stream for one frame, in insertion order.
///
/// Each renderer draws its own command kind in one pass, so order is preserved
/// within a kind; across kinds the paint order is rects, sprites, then text.
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<DrawCmd>,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears recorded items. Keeps allocated capacity for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn items(&self) -> &[DrawCmd] {
        &self.items
    }

    #[inline]
    pub fn push(&mut self, cmd: DrawCmd) {
        self.items.push(cmd);
    }

    pub fn push_rect(&mut self, rect: Rect, color: Color) {
        let rect = rect.normalized();
        if rect.is_empty() || color.a == 0 {
            return;
        }
        self.push(DrawCmd::Rect(RectCmd { rect, color }));
    }

    pub fn push_sprite(&mut self, texture: TextureId, source: Rect, dest: Rect, tint: Color) {
        if dest.is_empty() || tint.a == 0 {
            return;
        }
        self.push(DrawCmd::Sprite(SpriteCmd { texture, source, dest, tint }));
    }

    pub fn push_text(
        &mut self,
        text: impl Into<String>,
        font: FontId,
        size: f32,
        spacing: f32,
        color: Color,
        origin: Vec2,
    ) {
        let text = text.into();
        if text.is_empty() || color.a == 0 {
            return;
        }
        self.push(DrawCmd::Text(TextCmd { text, font, size, spacing, color, origin }));
    }

    pub(crate) fn rects(&self) -> impl Iterator<Item = &RectCmd> {
        self.items.iter().filter_map(|c| match c {
            DrawCmd::Rect(r) => Some(r),
            _ => None,
        })
    }

    pub(crate) fn sprites(&self) -> impl Iterator<Item = &SpriteCmd> {
        self.items.iter().filter_map(|c| match c {
            DrawCmd::Sprite(s) => Some(s),
            _ => None,
        })
    }

    pub(crate) fn texts(&self) -> impl Iterator<Item = &TextCmd> {
        self.items.iter().filter_map(|c| match c {
            DrawCmd::Text(t) => Some(t),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invisible_commands_are_dropped() {
        let mut list = DrawList::new();
        list.push_rect(Rect::new(0.0, 0.0, 10.0, 10.0), Color::BLANK);
        list.push_rect(Rect::new(0.0, 0.0, 0.0, 10.0), Color::WHITE);
        list.push_text("", FontId::BUILTIN, 12.0, 0.0, Color::WHITE, Vec2::zero());
        list.push_text("hi", FontId::BUILTIN, 12.0, 0.0, Color::WHITE.fade(0.0), Vec2::zero());
        assert!(list.is_empty());
    }

    #[test]
    fn kinds_are_filtered_in_insertion_order() {
        let mut list = DrawList::new();
        list.push_text("a", FontId::BUILTIN, 12.0, 0.0, Color::WHITE, Vec2::zero());
        list.push_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Color::RED);
        list.push_text("b", FontId::BUILTIN, 12.0, 0.0, Color::WHITE, Vec2::zero());

        let texts: Vec<_> = list.texts().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, ["a", "b"]);
        assert_eq!(list.rects().count(), 1);
        assert_eq!(list.sprites().count(), 0);
    }

    #[test]
    fn negative_rects_are_normalized() {
        let mut list = DrawList::new();
        list.push_rect(Rect::new(10.0, 10.0, -5.0, -5.0), Color::WHITE);
        let r = list.rects().next().unwrap();
        assert_eq!(r.rect, Rect::new(5.0, 5.0, 5.0, 5.0));
    }

    #[test]
    fn clear_empties_the_list() {
        let mut list = DrawList::new();
        list.push_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Color::RED);
        list.clear();
        assert!(list.items().is_empty());
    }
}
