//! Windowing/graphics/audio capability consumed by the host.

mod desktop;

pub use desktop::Desktop;

use selene_engine::coords::{Rect, Vec2};
use selene_engine::input::InputEvent;
use selene_engine::paint::Color;
use selene_engine::render::MAX_SHADER_LOCATIONS;
use selene_engine::window::WindowConfig;

/// What the host needs from a windowing backend.
///
/// Handles are opaque `Copy` values owned by the platform. Every call other
/// than [`Platform::open_window`] must tolerate a platform whose window never
/// opened: draw calls become no-ops and loads fail.
pub trait Platform {
    type Font: Copy + std::fmt::Debug;
    type Texture: Copy + std::fmt::Debug;

    // ── window ────────────────────────────────────────────────────────────

    /// Opens the window. Returns its readiness.
    fn open_window(&mut self, config: &WindowConfig) -> bool;
    fn close_window(&mut self);

    /// Pumps platform events; `true` once the user asked to close.
    fn should_close(&mut self) -> bool;
    fn frame_time(&self) -> f32;
    /// Restarts frame timing so the next delta excludes work done outside
    /// the frame loop.
    fn reset_frame_clock(&mut self);
    fn screen_size(&self) -> Vec2;
    fn set_window_size(&mut self, width: u32, height: u32);
    /// Raw pointer position in logical pixels.
    fn mouse_position(&self) -> Vec2;

    // ── drawing ───────────────────────────────────────────────────────────

    fn begin_drawing(&mut self);
    fn end_drawing(&mut self);
    fn clear_background(&mut self, color: Color);
    fn draw_rectangle(&mut self, rect: Rect, color: Color);
    fn draw_texture(&mut self, texture: Self::Texture, source: Rect, dest: Rect, tint: Color);
    fn draw_text(&mut self, font: Self::Font, text: &str, position: Vec2, size: f32, spacing: f32, color: Color);
    fn measure_text(&self, font: Self::Font, text: &str, size: f32, spacing: f32) -> Vec2;

    // ── resources ─────────────────────────────────────────────────────────

    /// The backend's built-in font. Never released by the host.
    fn default_font(&self) -> Self::Font;
    fn load_font(&mut self, bytes: &[u8], size: f32) -> Option<Self::Font>;
    fn unload_font(&mut self, font: Self::Font);

    /// 1×1 white texture owned by the backend.
    fn default_texture(&self) -> Self::Texture;
    fn load_texture(&mut self, bytes: &[u8]) -> Option<Self::Texture>;
    fn unload_texture(&mut self, texture: Self::Texture);
    fn texture_size(&self, texture: Self::Texture) -> Option<(u32, u32)>;

    /// The backend's default shader-binding-slot table.
    fn default_shader_locations(&self) -> [i32; MAX_SHADER_LOCATIONS];

    // ── audio ─────────────────────────────────────────────────────────────

    fn init_audio_device(&mut self);
    fn is_audio_device_ready(&self) -> bool;
    fn close_audio_device(&mut self);

    // ── events ────────────────────────────────────────────────────────────

    /// `false` when input must be queued by the host between ticks.
    fn has_native_event_delivery(&self) -> bool;
    /// Takes every input event recorded since the last call.
    fn drain_events(&mut self) -> Vec<InputEvent>;
}
