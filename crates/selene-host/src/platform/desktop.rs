use selene_engine::coords::{Rect, Vec2};
use selene_engine::device::GpuInit;
use selene_engine::input::InputEvent;
use selene_engine::paint::Color;
use selene_engine::render::{default_shader_locations, MAX_SHADER_LOCATIONS};
use selene_engine::text::FontId;
use selene_engine::texture::TextureId;
use selene_engine::window::{WindowConfig, WindowHost};

use super::Platform;

/// Desktop platform backed by a polled winit window and wgpu.
///
/// The window is optional: until [`Platform::open_window`] succeeds (or after
/// it is closed) every call degrades to a no-op.
pub struct Desktop {
    gpu_init: GpuInit,
    host: Option<WindowHost>,
}

impl Desktop {
    pub fn new(gpu_init: GpuInit) -> Self {
        Self { gpu_init, host: None }
    }
}

impl Platform for Desktop {
    type Font = FontId;
    type Texture = TextureId;

    fn open_window(&mut self, config: &WindowConfig) -> bool {
        if self.host.is_some() {
            return true;
        }
        match WindowHost::open(config.clone(), self.gpu_init.clone()) {
            Ok(host) => {
                self.host = Some(host);
                true
            }
            Err(e) => {
                log::warn!("platform: {e}");
                false
            }
        }
    }

    fn close_window(&mut self) {
        if let Some(host) = self.host.take() {
            host.close();
        }
    }

    fn should_close(&mut self) -> bool {
        self.host.as_mut().is_none_or(WindowHost::should_close)
    }

    fn frame_time(&self) -> f32 {
        self.host.as_ref().map_or(0.0, WindowHost::frame_time)
    }

    fn reset_frame_clock(&mut self) {
        if let Some(host) = self.host.as_mut() {
            host.reset_clock();
        }
    }

    fn screen_size(&self) -> Vec2 {
        self.host.as_ref().map_or(Vec2::zero(), WindowHost::screen_size)
    }

    fn set_window_size(&mut self, width: u32, height: u32) {
        if let Some(host) = self.host.as_mut() {
            host.set_window_size(width, height);
        }
    }

    fn mouse_position(&self) -> Vec2 {
        self.host.as_ref().map_or(Vec2::zero(), WindowHost::mouse_position)
    }

    fn begin_drawing(&mut self) {
        if let Some(host) = self.host.as_mut() {
            host.begin_drawing();
        }
    }

    fn end_drawing(&mut self) {
        if let Some(host) = self.host.as_mut() {
            host.end_drawing();
        }
    }

    fn clear_background(&mut self, color: Color) {
        if let Some(host) = self.host.as_mut() {
            host.clear_background(color);
        }
    }

    fn draw_rectangle(&mut self, rect: Rect, color: Color) {
        if let Some(host) = self.host.as_mut() {
            host.draw_rectangle(rect, color);
        }
    }

    fn draw_texture(&mut self, texture: TextureId, source: Rect, dest: Rect, tint: Color) {
        if let Some(host) = self.host.as_mut() {
            host.draw_texture(texture, source, dest, tint);
        }
    }

    fn draw_text(&mut self, font: FontId, text: &str, position: Vec2, size: f32, spacing: f32, color: Color) {
        if let Some(host) = self.host.as_mut() {
            host.draw_text(text, font, position, size, spacing, color);
        }
    }

    fn measure_text(&self, font: FontId, text: &str, size: f32, spacing: f32) -> Vec2 {
        self.host
            .as_ref()
            .map_or(Vec2::new(0.0, size), |h| h.measure_text(text, font, size, spacing))
    }

    fn default_font(&self) -> FontId {
        FontId::BUILTIN
    }

    fn load_font(&mut self, bytes: &[u8], size: f32) -> Option<FontId> {
        let host = self.host.as_mut()?;
        host.load_font(bytes, size)
            .map_err(|e| log::warn!("platform: {e}"))
            .ok()
    }

    fn unload_font(&mut self, font: FontId) {
        if let Some(host) = self.host.as_mut() {
            host.unload_font(font);
        }
    }

    fn default_texture(&self) -> TextureId {
        TextureId::WHITE
    }

    fn load_texture(&mut self, bytes: &[u8]) -> Option<TextureId> {
        let host = self.host.as_mut()?;
        host.load_texture(bytes)
            .map_err(|e| log::warn!("platform: {e}"))
            .ok()
    }

    fn unload_texture(&mut self, texture: TextureId) {
        if let Some(host) = self.host.as_mut() {
            host.unload_texture(texture);
        }
    }

    fn texture_size(&self, texture: TextureId) -> Option<(u32, u32)> {
        self.host.as_ref()?.texture_size(texture)
    }

    fn default_shader_locations(&self) -> [i32; MAX_SHADER_LOCATIONS] {
        default_shader_locations()
    }

    fn init_audio_device(&mut self) {
        if let Some(host) = self.host.as_mut() {
            host.init_audio_device();
        }
    }

    fn is_audio_device_ready(&self) -> bool {
        self.host.as_ref().is_some_and(WindowHost::is_audio_device_ready)
    }

    fn close_audio_device(&mut self) {
        if let Some(host) = self.host.as_mut() {
            host.close_audio_device();
        }
    }

    fn has_native_event_delivery(&self) -> bool {
        WindowHost::NATIVE_EVENT_DELIVERY
    }

    fn drain_events(&mut self) -> Vec<InputEvent> {
        self.host.as_mut().map_or_else(Vec::new, WindowHost::drain_events)
    }
}
