use selene_engine::coords::{Rect, Vec2};
use selene_engine::input::InputEvent;

use crate::config::LogPolicy;
use crate::engine::{HostCommand, HostCtx, HostSnapshot, ScriptEngine};
use crate::event_queue::EventQueue;
use crate::material::Material;
use crate::platform::Platform;

/// The single long-lived aggregate for one host run.
///
/// Created by [`crate::bootstrap`] and torn down exactly once, in reverse
/// acquisition order, either through [`RuntimeState::teardown`] or on drop.
/// Every release is guarded by the flag or `Option` recording that the
/// resource was acquired.
pub struct RuntimeState<P: Platform, E: ScriptEngine> {
    pub(crate) platform: P,

    /// Normalized, `/`-terminated base directory.
    pub(crate) base_path: String,
    pub(crate) has_window: bool,
    pub(crate) running: bool,
    pub(crate) resolution: Vec2,
    pub(crate) engine: Option<E>,
    pub(crate) log_policy: LogPolicy,

    pub(crate) default_font: Option<P::Font>,
    pub(crate) gui_font: Option<P::Font>,
    pub(crate) custom_font_loaded: bool,
    pub(crate) default_material: Option<Material<P::Texture>>,
    pub(crate) default_texture: Option<P::Texture>,
    pub(crate) shapes_texture: Option<P::Texture>,
    pub(crate) shader_locations: Vec<i32>,

    pub(crate) mouse_offset: Vec2,
    pub(crate) mouse_scale: Vec2,

    pub(crate) event_queue: Option<EventQueue>,
    torn_down: bool,
}

impl<P: Platform, E: ScriptEngine> RuntimeState<P, E> {
    /// Empty state: nothing acquired, not running.
    pub(crate) fn new(platform: P, base_path: String, log_policy: LogPolicy, resolution: Vec2) -> Self {
        Self {
            platform,
            base_path,
            has_window: false,
            running: false,
            resolution,
            engine: None,
            log_policy,
            default_font: None,
            gui_font: None,
            custom_font_loaded: false,
            default_material: None,
            default_texture: None,
            shapes_texture: None,
            shader_locations: Vec::new(),
            mouse_offset: Vec2::zero(),
            mouse_scale: Vec2::one(),
            event_queue: None,
            torn_down: false,
        }
    }

    // ── accessors ─────────────────────────────────────────────────────────

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    pub fn has_window(&self) -> bool {
        self.has_window
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Asks the frame loop to stop after the current tick.
    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn resolution(&self) -> Vec2 {
        self.resolution
    }

    pub fn log_policy(&self) -> LogPolicy {
        self.log_policy
    }

    pub fn has_engine(&self) -> bool {
        self.engine.is_some()
    }

    pub fn custom_font_loaded(&self) -> bool {
        self.custom_font_loaded
    }

    pub fn default_font(&self) -> Option<P::Font> {
        self.default_font
    }

    pub fn gui_font(&self) -> Option<P::Font> {
        self.gui_font
    }

    pub fn default_material(&self) -> Option<&Material<P::Texture>> {
        self.default_material.as_ref()
    }

    pub fn default_texture(&self) -> Option<P::Texture> {
        self.default_texture
    }

    pub fn shapes_texture(&self) -> Option<P::Texture> {
        self.shapes_texture
    }

    pub fn shader_locations(&self) -> &[i32] {
        &self.shader_locations
    }

    pub fn event_queue(&self) -> Option<&EventQueue> {
        self.event_queue.as_ref()
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    /// Raw pointer position shifted by the mouse offset, then scaled.
    pub fn mouse_position(&self) -> Vec2 {
        (self.platform.mouse_position() + self.mouse_offset).scale(self.mouse_scale)
    }

    pub fn snapshot(&self) -> HostSnapshot {
        HostSnapshot {
            frame_time: self.platform.frame_time(),
            screen_size: self.platform.screen_size(),
            mouse_position: self.mouse_position(),
            resolution: self.resolution,
        }
    }

    // ── script callbacks ──────────────────────────────────────────────────

    /// Runs `f` against the engine with a fresh context, then applies the
    /// buffered commands. `None` when no engine exists.
    fn with_engine<R>(
        &mut self,
        drawing: bool,
        f: impl FnOnce(&mut E, &mut HostCtx) -> R,
    ) -> Option<R> {
        let mut ctx = HostCtx::new(self.snapshot());
        let engine = self.engine.as_mut()?;
        let out = f(engine, &mut ctx);
        self.apply_commands(ctx.take_commands(), drawing);
        Some(out)
    }

    pub(crate) fn call_main(&mut self) -> Result<(), crate::ScriptError> {
        self.with_engine(false, |e, ctx| e.call_main(ctx))
            .unwrap_or_else(|| Err(crate::ScriptError::Init("no script engine".to_string())))
    }

    pub(crate) fn call_update(&mut self) {
        let delta = self.platform.frame_time();
        if let Some(Err(e)) = self.with_engine(false, |e, ctx| e.call_update(ctx, delta)) {
            log::error!("script update: {e}");
            self.running = false;
        }
    }

    /// Wraps the draw callback in begin/end drawing.
    pub(crate) fn call_draw(&mut self) {
        self.platform.begin_drawing();
        if let Some(Err(e)) = self.with_engine(true, |e, ctx| e.call_draw(ctx)) {
            log::error!("script draw: {e}");
            self.running = false;
        }
        self.platform.end_drawing();
    }

    pub(crate) fn call_exit(&mut self) {
        if let Some(Err(e)) = self.with_engine(false, |e, ctx| e.call_exit(ctx)) {
            log::error!("script exit: {e}");
        }
    }

    /// Hands pending input to the script.
    ///
    /// With a queue allocated, events pass through it (overflow is dropped);
    /// otherwise they are forwarded as delivered.
    pub(crate) fn dispatch_events(&mut self) {
        let incoming = self.platform.drain_events();
        let events: Vec<InputEvent> = match self.event_queue.as_mut() {
            Some(queue) => {
                let mut dropped = 0usize;
                for ev in incoming {
                    if !queue.push(ev) {
                        dropped += 1;
                    }
                }
                if dropped > 0 {
                    log::warn!("event queue full; dropped {dropped} events");
                }
                queue.drain().collect()
            }
            None => incoming,
        };

        for ev in &events {
            if let Some(Err(e)) = self.with_engine(false, |engine, ctx| engine.call_event(ctx, ev)) {
                log::error!("script event: {e}");
            }
        }
    }

    // ── host commands ─────────────────────────────────────────────────────

    pub(crate) fn apply_commands(&mut self, cmds: Vec<HostCommand>, drawing: bool) {
        for cmd in cmds {
            if cmd.is_draw() && !drawing {
                log::debug!("draw command outside draw callback dropped: {cmd:?}");
                continue;
            }
            self.apply_command(cmd);
        }
    }

    fn apply_command(&mut self, cmd: HostCommand) {
        match cmd {
            HostCommand::SetWindowSize { width, height } => {
                self.resolution = Vec2::new(width as f32, height as f32);
                self.platform.set_window_size(width, height);
            }
            HostCommand::SetMouseOffset(v) => self.mouse_offset = v,
            HostCommand::SetMouseScale(v) => self.mouse_scale = v,
            HostCommand::ClearBackground(color) => self.platform.clear_background(color),
            HostCommand::DrawRectangle { rect, color } => self.platform.draw_rectangle(rect, color),
            HostCommand::DrawText { text, position, size, color } => {
                let font = self.default_font.unwrap_or_else(|| self.platform.default_font());
                // Same letter spacing rule as the built-in text call.
                let spacing = size / 10.0;
                self.platform.draw_text(font, &text, position, size, spacing, color);
            }
            HostCommand::CloseWindow => self.running = false,
            HostCommand::InitAudioDevice => self.platform.init_audio_device(),
            HostCommand::CloseAudioDevice => self.platform.close_audio_device(),
            HostCommand::SetShaderLocation { index, value } => match self.shader_locations.get_mut(index) {
                Some(slot) => *slot = value,
                None => log::warn!("shader location {index} out of range"),
            },
        }
    }

    /// Draws a texture stretched over `dest` with the default material's
    /// color as tint.
    pub(crate) fn draw_texture(&mut self, texture: P::Texture, source: Rect, dest: Rect, alpha: f32) {
        let tint = self
            .default_material
            .map_or(selene_engine::paint::Color::WHITE, |m| m.diffuse_color)
            .fade(alpha);
        self.platform.draw_texture(texture, source, dest, tint);
    }

    // ── teardown ──────────────────────────────────────────────────────────

    /// Releases everything in reverse acquisition order.
    ///
    /// Safe to call on a partially-bootstrapped state and safe to call more
    /// than once: each step only runs if its resource is still held.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;

        if self.platform.is_audio_device_ready() {
            self.platform.close_audio_device();
        }

        if let Some(engine) = self.engine.take() {
            engine.close();
        }

        let custom_font = self.default_font.take();
        if self.has_window && self.custom_font_loaded {
            if let Some(font) = custom_font {
                self.platform.unload_font(font);
            }
        }
        self.custom_font_loaded = false;
        self.gui_font = None;
        self.default_material = None;
        self.default_texture = None;
        self.shapes_texture = None;

        if self.has_window {
            self.platform.close_window();
            self.has_window = false;
        }

        self.event_queue = None;
        self.base_path.clear();
        self.shader_locations.clear();
        self.running = false;

        log::debug!("runtime state released");
    }
}

impl<P: Platform, E: ScriptEngine> Drop for RuntimeState<P, E> {
    fn drop(&mut self) {
        self.teardown();
    }
}
