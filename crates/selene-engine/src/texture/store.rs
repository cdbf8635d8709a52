use image::RgbaImage;

/// Error returned when image bytes cannot be turned into a texture.
#[derive(Debug, thiserror::Error)]
pub enum TextureError {
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("image has zero size")]
    Empty,
}

/// Opaque handle to a texture held by a [`TextureStore`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct TextureId(pub(crate) usize);

impl TextureId {
    /// 1×1 opaque white texture, created with the device. Used as the default
    /// texture for materials and as the source for untextured shapes.
    pub const WHITE: TextureId = TextureId(0);
}

pub(crate) struct GpuTexture {
    // Kept alive for the view.
    _texture: wgpu::Texture,
    pub(crate) view: wgpu::TextureView,
    width: u32,
    height: u32,
}

/// Owns GPU textures. Slot 0 is [`TextureId::WHITE`]; released slots stay
/// empty so handles are never reused.
pub struct TextureStore {
    slots: Vec<Option<GpuTexture>>,
}

impl TextureStore {
    pub fn new() -> Self {
        Self { slots: vec![None] }
    }

    /// Creates the default white texture. Called once the device exists.
    pub fn init_defaults(&mut self, device: &wgpu::Device, queue: &wgpu::Queue) {
        let white = RgbaImage::from_pixel(1, 1, image::Rgba([255, 255, 255, 255]));
        let tex = create(device, queue, &white, "selene white texture");
        self.slots[0] = Some(tex);
    }

    /// Decodes `bytes` (PNG, JPEG, BMP, GIF) and uploads the result.
    pub fn load_from_memory(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        bytes: &[u8],
    ) -> Result<TextureId, TextureError> {
        let image = decode(bytes)?;
        Ok(self.upload(device, queue, &image))
    }

    pub fn upload(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, image: &RgbaImage) -> TextureId {
        let tex = create(device, queue, image, "selene texture");
        let id = TextureId(self.slots.len());
        self.slots.push(Some(tex));
        id
    }

    /// Releases a texture. Returns `false` for the white texture or a handle
    /// that is not loaded.
    pub fn unload(&mut self, id: TextureId) -> bool {
        if id == TextureId::WHITE {
            return false;
        }
        match self.slots.get_mut(id.0) {
            Some(slot @ Some(_)) => {
                *slot = None;
                true
            }
            _ => false,
        }
    }

    /// Texture size in texels.
    pub fn size(&self, id: TextureId) -> Option<(u32, u32)> {
        self.get(id).map(|t| (t.width, t.height))
    }

    pub(crate) fn get(&self, id: TextureId) -> Option<&GpuTexture> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }
}

impl Default for TextureStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Decodes image bytes into straight-alpha RGBA8.
pub(crate) fn decode(bytes: &[u8]) -> Result<RgbaImage, TextureError> {
    let image = image::load_from_memory(bytes)?.to_rgba8();
    if image.width() == 0 || image.height() == 0 {
        return Err(TextureError::Empty);
    }
    Ok(image)
}

fn create(device: &wgpu::Device, queue: &wgpu::Queue, image: &RgbaImage, label: &str) -> GpuTexture {
    let (width, height) = image.dimensions();
    let size = wgpu::Extent3d { width, height, depth_or_array_layers: 1 };

    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8UnormSrgb,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });

    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        image.as_raw(),
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(4 * width),
            rows_per_image: Some(height),
        },
        size,
    );

    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    GpuTexture { _texture: texture, view, width, height }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_bytes(w: u32, h: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(w, h, image::Rgba([10, 20, 30, 255]));
        let mut out = std::io::Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn decodes_png() {
        let img = decode(&png_bytes(3, 2)).unwrap();
        assert_eq!(img.dimensions(), (3, 2));
        assert_eq!(img.get_pixel(0, 0).0, [10, 20, 30, 255]);
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(decode(b"definitely not a png"), Err(TextureError::Decode(_))));
    }

    #[test]
    fn white_and_unknown_handles_cannot_be_unloaded() {
        let mut store = TextureStore::new();
        assert!(!store.unload(TextureId::WHITE));
        assert!(!store.unload(TextureId(42)));
        assert_eq!(store.size(TextureId(42)), None);
    }
}
