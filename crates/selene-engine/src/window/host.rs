use std::sync::Arc;
use std::time::Duration;

use winit::dpi::LogicalSize;
use winit::event_loop::EventLoop;
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::Window;

use crate::audio::AudioDevice;
use crate::coords::{Rect, Vec2, Viewport};
use crate::device::{Gpu, GpuInit, SurfaceErrorAction};
use crate::input::InputEvent;
use crate::paint::Color;
use crate::render::shapes::{rect::RectRenderer, sprite::SpriteRenderer, text::TextRenderer};
use crate::render::{RenderCtx, RenderTarget};
use crate::scene::DrawList;
use crate::text::{FontId, FontLoadError, FontSystem};
use crate::texture::{TextureError, TextureId, TextureStore};
use crate::time::FrameClock;

use super::handler::Handler;
use super::{WindowConfig, WindowError};

/// Pumps allowed while waiting for the platform to create the window.
const RESUME_ATTEMPTS: u32 = 100;
const RESUME_WAIT: Duration = Duration::from_millis(10);

/// An event loop that exits before the window exists will never create it.
fn check_resume(status: PumpStatus) -> Result<(), WindowError> {
    match status {
        PumpStatus::Continue => Ok(()),
        PumpStatus::Exit(code) => {
            log::warn!("window: event loop exited with {code} before the window opened");
            Err(WindowError::NotResumed)
        }
    }
}

/// A single window with its GPU surface, resources and frame recording.
///
/// Dropping (or [`WindowHost::close`]) releases the window, every texture and
/// font, and the audio device.
pub struct WindowHost {
    event_loop: EventLoop<()>,
    handler: Handler,
    window: Arc<Window>,
    gpu: Gpu,

    fonts: FontSystem,
    textures: TextureStore,

    draw_list: DrawList,
    rects: RectRenderer,
    sprites: SpriteRenderer,
    text: TextRenderer,
    clear_color: Color,
    drawing: bool,

    clock: FrameClock,
    audio: AudioDevice,
}

impl WindowHost {
    /// Whether this build delivers input natively. Platforms without it
    /// queue translated events for the caller to drain.
    pub const NATIVE_EVENT_DELIVERY: bool = !cfg!(feature = "queued-events");

    /// Creates the event loop, opens the window and binds a GPU surface.
    pub fn open(config: WindowConfig, gpu_init: GpuInit) -> Result<Self, WindowError> {
        let mut event_loop = EventLoop::new()?;
        let mut handler = Handler::new(config);

        let mut attempts = 0;
        let window = loop {
            let status = event_loop.pump_app_events(Some(RESUME_WAIT), &mut handler);
            if let Some(e) = handler.create_error.take() {
                return Err(WindowError::Create(e));
            }
            if let Some(w) = &handler.window {
                break Arc::clone(w);
            }
            check_resume(status)?;
            attempts += 1;
            if attempts >= RESUME_ATTEMPTS {
                return Err(WindowError::NotResumed);
            }
        };

        let gpu = pollster::block_on(Gpu::new(Arc::clone(&window), gpu_init)).map_err(WindowError::Gpu)?;

        let mut textures = TextureStore::new();
        textures.init_defaults(gpu.device(), gpu.queue());

        let size = window.inner_size();
        log::info!(
            "window: opened {}x{} (scale {:.2}), native events: {}",
            size.width,
            size.height,
            window.scale_factor(),
            Self::NATIVE_EVENT_DELIVERY
        );

        Ok(Self {
            event_loop,
            handler,
            window,
            gpu,
            fonts: FontSystem::new(),
            textures,
            draw_list: DrawList::new(),
            rects: RectRenderer::new(),
            sprites: SpriteRenderer::new(),
            text: TextRenderer::new(),
            clear_color: Color::BLACK,
            drawing: false,
            clock: FrameClock::new(),
            audio: AudioDevice::new(),
        })
    }

    /// Pumps pending platform events and reports whether the user asked the
    /// window to close.
    pub fn should_close(&mut self) -> bool {
        if let PumpStatus::Exit(code) = self.event_loop.pump_app_events(Some(Duration::ZERO), &mut self.handler) {
            log::debug!("window: event loop exited with {code}");
            self.handler.close_requested = true;
        }

        if let Some(size) = self.handler.resized.take() {
            self.gpu.resize(size);
        }

        self.handler.close_requested
    }

    /// Seconds taken by the last presented frame.
    /// Drops the time since the last present from the next frame delta.
    pub fn reset_clock(&mut self) {
        self.clock.reset();
    }

    pub fn frame_time(&self) -> f32 {
        self.clock.last_dt()
    }

    /// Inner size in logical pixels.
    pub fn screen_size(&self) -> Vec2 {
        let size = self.window.inner_size().to_logical::<f32>(self.window.scale_factor());
        Vec2::new(size.width, size.height)
    }

    pub fn set_window_size(&mut self, width: u32, height: u32) {
        if let Some(size) = self.window.request_inner_size(LogicalSize::new(width as f64, height as f64)) {
            self.gpu.resize(size);
        }
    }

    /// Pointer position in logical pixels, untransformed.
    pub fn mouse_position(&self) -> Vec2 {
        let (x, y) = self.handler.input.pointer_pos;
        Vec2::new(x, y)
    }

    /// Takes every event recorded since the previous drain.
    pub fn drain_events(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.handler.events)
    }

    // ── drawing ───────────────────────────────────────────────────────────

    pub fn begin_drawing(&mut self) {
        if self.drawing {
            log::warn!("window: begin_drawing called twice");
        }
        self.draw_list.clear();
        self.drawing = true;
    }

    pub fn clear_background(&mut self, color: Color) {
        self.clear_color = color;
    }

    pub fn draw_rectangle(&mut self, rect: Rect, color: Color) {
        if self.accepts_draw() {
            self.draw_list.push_rect(rect, color);
        }
    }

    pub fn draw_texture(&mut self, texture: TextureId, source: Rect, dest: Rect, tint: Color) {
        if self.accepts_draw() {
            self.draw_list.push_sprite(texture, source, dest, tint);
        }
    }

    pub fn draw_text(&mut self, text: &str, font: FontId, origin: Vec2, size: f32, spacing: f32, color: Color) {
        if self.accepts_draw() {
            self.draw_list.push_text(text, font, size, spacing, color, origin);
        }
    }

    /// Renders the recorded frame and presents it. Ticks the frame clock.
    pub fn end_drawing(&mut self) {
        if !self.drawing {
            log::warn!("window: end_drawing without begin_drawing");
            return;
        }
        self.drawing = false;
        self.render();
        self.clock.tick();
    }

    fn accepts_draw(&self) -> bool {
        if !self.drawing {
            log::debug!("window: draw call outside begin/end ignored");
        }
        self.drawing
    }

    fn render(&mut self) {
        let mut frame = match self.gpu.begin_frame() {
            Ok(f) => f,
            Err(e) => {
                match self.gpu.handle_surface_error(e) {
                    SurfaceErrorAction::Fatal => {
                        log::error!("window: fatal surface error; closing");
                        self.handler.close_requested = true;
                    }
                    SurfaceErrorAction::Reconfigured | SurfaceErrorAction::SkipFrame => {}
                }
                return;
            }
        };

        let scale = self.window.scale_factor() as f32;
        let size = self.gpu.size();
        let viewport = Viewport::new(size.width as f32 / scale, size.height as f32 / scale);
        let ctx = RenderCtx::new(self.gpu.device(), self.gpu.queue(), self.gpu.surface_format(), viewport, scale);

        {
            let mut target = RenderTarget::new(&mut frame.encoder, &frame.view);
            target.clear_pass("selene clear pass", self.clear_color.to_wgpu());
            self.rects.render(&ctx, &mut target, &self.draw_list);
            self.sprites.render(&ctx, &mut target, &self.draw_list, &self.textures);
            self.text.render(&ctx, &mut target, &self.draw_list, &self.fonts);
        }

        self.gpu.submit(frame);
    }

    // ── resources ─────────────────────────────────────────────────────────

    /// The platform's default font. Owned by the host for its whole life.
    pub fn default_font(&self) -> FontId {
        FontId::BUILTIN
    }

    pub fn load_font(&mut self, bytes: &[u8], size: f32) -> Result<FontId, FontLoadError> {
        self.fonts.load_font(bytes, size)
    }

    pub fn unload_font(&mut self, id: FontId) -> bool {
        self.fonts.unload_font(id)
    }

    pub fn measure_text(&self, text: &str, font: FontId, size: f32, spacing: f32) -> Vec2 {
        self.fonts.measure_text(text, font, size, spacing)
    }

    pub fn load_texture(&mut self, bytes: &[u8]) -> Result<TextureId, TextureError> {
        self.textures.load_from_memory(self.gpu.device(), self.gpu.queue(), bytes)
    }

    pub fn unload_texture(&mut self, id: TextureId) -> bool {
        self.sprites.forget(id);
        self.textures.unload(id)
    }

    pub fn texture_size(&self, id: TextureId) -> Option<(u32, u32)> {
        self.textures.size(id)
    }

    // ── audio ─────────────────────────────────────────────────────────────

    pub fn init_audio_device(&mut self) {
        self.audio.init();
    }

    pub fn is_audio_device_ready(&self) -> bool {
        self.audio.is_ready()
    }

    pub fn close_audio_device(&mut self) {
        self.audio.close();
    }

    /// Closes the window and releases every GPU resource it owns.
    pub fn close(self) {
        log::info!("window: closed after {} s", self.clock.elapsed().round());
    }
}
