/// Straight-alpha sRGB color with 8-bit channels.
///
/// This is the color model scripts and the host speak in. Renderers convert
/// to linear premultiplied floats through [`Color::to_linear_premul`] right
/// before upload, so blending happens in linear space on sRGB surfaces.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLANK: Color = Color::rgba(0, 0, 0, 0);
    pub const BLACK: Color = Color::rgba(0, 0, 0, 255);
    pub const WHITE: Color = Color::rgba(255, 255, 255, 255);
    pub const RAYWHITE: Color = Color::rgba(245, 245, 245, 255);
    pub const RED: Color = Color::rgba(230, 41, 55, 255);

    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Returns the color with its alpha replaced by `255 * alpha`.
    ///
    /// `alpha` is clamped to `[0, 1]`; the original alpha is ignored.
    #[inline]
    pub fn fade(self, alpha: f32) -> Self {
        let a = (alpha.clamp(0.0, 1.0) * 255.0) as u8;
        Self { a, ..self }
    }

    /// Linear, premultiplied RGBA suitable for the GPU pipelines.
    #[inline]
    pub fn to_linear_premul(self) -> [f32; 4] {
        let a = self.a as f32 / 255.0;
        [
            srgb_to_linear(self.r) * a,
            srgb_to_linear(self.g) * a,
            srgb_to_linear(self.b) * a,
            a,
        ]
    }

    /// Opaque clear color for the frame's first render pass.
    #[inline]
    pub fn to_wgpu(self) -> wgpu::Color {
        let [r, g, b, a] = self.to_linear_premul();
        wgpu::Color { r: r as f64, g: g as f64, b: b as f64, a: a as f64 }
    }
}

fn srgb_to_linear(c: u8) -> f32 {
    let c = c as f32 / 255.0;
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fade_replaces_alpha() {
        assert_eq!(Color::WHITE.fade(0.0).a, 0);
        assert_eq!(Color::WHITE.fade(1.0).a, 255);
        assert_eq!(Color::WHITE.fade(0.5).a, 127);
        assert_eq!(Color::RED.fade(2.0), Color::RED);
    }

    #[test]
    fn premul_scales_rgb_by_alpha() {
        let [r, g, b, a] = Color::WHITE.fade(0.5).to_linear_premul();
        assert!((a - 127.0 / 255.0).abs() < 1e-6);
        assert!((r - a).abs() < 1e-6 && (g - a).abs() < 1e-6 && (b - a).abs() < 1e-6);
    }

    #[test]
    fn transparent_is_all_zero() {
        assert_eq!(Color::BLANK.to_linear_premul(), [0.0; 4]);
    }
}
