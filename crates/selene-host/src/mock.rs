//! Recording test doubles for the platform and script engine capabilities.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::Path;
use std::rc::Rc;

use selene_engine::coords::{Rect, Vec2};
use selene_engine::input::InputEvent;
use selene_engine::paint::Color;
use selene_engine::render::MAX_SHADER_LOCATIONS;
use selene_engine::window::WindowConfig;

use crate::engine::{HostCommand, HostCtx, ScriptEngine};
use crate::platform::Platform;
use crate::ScriptError;

/// Shared, ordered record of side-effecting calls.
#[derive(Debug, Clone, Default)]
pub(crate) struct CallLog(Rc<RefCell<Vec<String>>>);

impl CallLog {
    pub(crate) fn push(&self, call: impl Into<String>) {
        self.0.borrow_mut().push(call.into());
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.0.borrow().clone()
    }

    /// Number of recorded calls starting with `prefix`.
    pub(crate) fn count(&self, prefix: &str) -> usize {
        self.0.borrow().iter().filter(|c| c.starts_with(prefix)).count()
    }

    pub(crate) fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

// ── platform ──────────────────────────────────────────────────────────────

/// Platform double. Queries are not recorded; everything with a side effect is.
///
/// Font `0` is the built-in font; loaded fonts and textures count up from `1`.
pub(crate) struct MockPlatform {
    log: CallLog,
    pub(crate) mouse: Vec2,
    pub(crate) audio_ready: bool,
    pub(crate) window_ok: bool,
    pub(crate) font_ok: bool,
    pub(crate) texture_ok: bool,
    pub(crate) native_events: bool,
    /// `should_close` reports `true` from this call on (1-based).
    pub(crate) close_after: Option<usize>,
    pub(crate) frame_time: f32,
    pub(crate) pending_events: Vec<InputEvent>,
    close_polls: usize,
    next_font: u32,
    next_texture: u32,
}

impl MockPlatform {
    pub(crate) fn new(log: CallLog) -> Self {
        Self {
            log,
            mouse: Vec2::zero(),
            audio_ready: false,
            window_ok: true,
            font_ok: true,
            texture_ok: true,
            native_events: true,
            close_after: None,
            frame_time: 1.0 / 60.0,
            pending_events: Vec::new(),
            close_polls: 0,
            next_font: 1,
            next_texture: 1,
        }
    }
}

impl Platform for MockPlatform {
    type Font = u32;
    type Texture = u32;

    fn open_window(&mut self, _config: &WindowConfig) -> bool {
        self.log.push("open_window");
        self.window_ok
    }

    fn close_window(&mut self) {
        self.log.push("close_window");
    }

    fn should_close(&mut self) -> bool {
        self.log.push("should_close");
        self.close_polls += 1;
        self.close_after.is_some_and(|n| self.close_polls >= n)
    }

    fn frame_time(&self) -> f32 {
        self.frame_time
    }

    fn reset_frame_clock(&mut self) {
        self.log.push("reset_frame_clock");
    }

    fn screen_size(&self) -> Vec2 {
        Vec2::new(800.0, 600.0)
    }

    fn set_window_size(&mut self, _width: u32, _height: u32) {
        self.log.push("set_window_size");
    }

    fn mouse_position(&self) -> Vec2 {
        self.mouse
    }

    fn begin_drawing(&mut self) {
        self.log.push("begin_drawing");
    }

    fn end_drawing(&mut self) {
        self.log.push("end_drawing");
    }

    fn clear_background(&mut self, _color: Color) {
        self.log.push("clear_background");
    }

    fn draw_rectangle(&mut self, _rect: Rect, _color: Color) {
        self.log.push("draw_rectangle");
    }

    fn draw_texture(&mut self, texture: u32, _source: Rect, _dest: Rect, _tint: Color) {
        self.log.push(format!("draw_texture({texture})"));
    }

    fn draw_text(&mut self, _font: u32, text: &str, _position: Vec2, _size: f32, _spacing: f32, _color: Color) {
        self.log.push(format!("draw_text({text})"));
    }

    fn measure_text(&self, _font: u32, text: &str, size: f32, spacing: f32) -> Vec2 {
        let n = text.chars().count() as f32;
        Vec2::new(n * size * 0.5 + (n - 1.0).max(0.0) * spacing, size)
    }

    fn default_font(&self) -> u32 {
        0
    }

    fn load_font(&mut self, _bytes: &[u8], _size: f32) -> Option<u32> {
        self.log.push("load_font");
        if !self.font_ok {
            return None;
        }
        let id = self.next_font;
        self.next_font += 1;
        Some(id)
    }

    fn unload_font(&mut self, font: u32) {
        self.log.push(format!("unload_font({font})"));
    }

    fn default_texture(&self) -> u32 {
        0
    }

    fn load_texture(&mut self, _bytes: &[u8]) -> Option<u32> {
        self.log.push("load_texture");
        if !self.texture_ok {
            return None;
        }
        let id = self.next_texture;
        self.next_texture += 1;
        Some(id)
    }

    fn unload_texture(&mut self, texture: u32) {
        self.log.push(format!("unload_texture({texture})"));
    }

    fn texture_size(&self, texture: u32) -> Option<(u32, u32)> {
        (texture < self.next_texture).then_some((64, 32))
    }

    fn default_shader_locations(&self) -> [i32; MAX_SHADER_LOCATIONS] {
        [-1; MAX_SHADER_LOCATIONS]
    }

    fn init_audio_device(&mut self) {
        self.log.push("init_audio_device");
        self.audio_ready = true;
    }

    fn is_audio_device_ready(&self) -> bool {
        self.audio_ready
    }

    fn close_audio_device(&mut self) {
        self.log.push("close_audio_device");
        self.audio_ready = false;
    }

    fn has_native_event_delivery(&self) -> bool {
        self.native_events
    }

    fn drain_events(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.pending_events)
    }
}

// ── engine ────────────────────────────────────────────────────────────────

/// Script engine double. Every callback is recorded as `engine.<name>`.
pub(crate) struct MockEngine {
    log: CallLog,
    pub(crate) main_error: Option<String>,
    /// Commands issued from the main entry.
    pub(crate) commands_on_main: Vec<HostCommand>,
    /// Update tick (1-based) that fails.
    pub(crate) update_error_on: Option<usize>,
    /// Commands issued from the update callback on the given tick (1-based).
    pub(crate) commands_on_update: HashMap<usize, Vec<HostCommand>>,
    /// Commands issued from every draw callback.
    pub(crate) draw_commands: Vec<HostCommand>,
    pub(crate) run_file_error: Option<String>,
    pub(crate) last_delta: f32,
    updates: usize,
}

impl MockEngine {
    pub(crate) fn new(log: CallLog) -> Self {
        Self {
            log,
            main_error: None,
            commands_on_main: Vec::new(),
            update_error_on: None,
            commands_on_update: HashMap::new(),
            draw_commands: Vec::new(),
            run_file_error: None,
            last_delta: 0.0,
            updates: 0,
        }
    }
}

impl ScriptEngine for MockEngine {
    fn call_main(&mut self, ctx: &mut HostCtx) -> Result<(), ScriptError> {
        self.log.push("engine.main");
        ctx.extend(self.commands_on_main.drain(..));
        match &self.main_error {
            Some(msg) => Err(ScriptError::Runtime(msg.clone())),
            None => Ok(()),
        }
    }

    fn call_update(&mut self, ctx: &mut HostCtx, delta: f32) -> Result<(), ScriptError> {
        self.log.push("engine.update");
        self.updates += 1;
        self.last_delta = delta;
        if let Some(cmds) = self.commands_on_update.remove(&self.updates) {
            ctx.extend(cmds);
        }
        if self.update_error_on == Some(self.updates) {
            return Err(ScriptError::Runtime(format!("update {} failed", self.updates)));
        }
        Ok(())
    }

    fn call_draw(&mut self, ctx: &mut HostCtx) -> Result<(), ScriptError> {
        self.log.push("engine.draw");
        ctx.extend(self.draw_commands.iter().cloned());
        Ok(())
    }

    fn call_exit(&mut self, _ctx: &mut HostCtx) -> Result<(), ScriptError> {
        self.log.push("engine.exit");
        Ok(())
    }

    fn call_event(&mut self, _ctx: &mut HostCtx, event: &InputEvent) -> Result<(), ScriptError> {
        self.log.push(format!("engine.event({})", event.kind()));
        Ok(())
    }

    fn run_file(&mut self, path: &Path) -> Result<(), ScriptError> {
        self.log.push(format!("engine.run_file({})", path.display()));
        match &self.run_file_error {
            Some(msg) => Err(ScriptError::Runtime(msg.clone())),
            None => Ok(()),
        }
    }

    fn close(self) {
        self.log.push("engine.close");
    }
}
