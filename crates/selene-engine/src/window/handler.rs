use std::sync::Arc;

use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowId};

use crate::input::platform::winit::translate_window_event;
use crate::input::{InputEvent, InputState};

use super::WindowConfig;

/// Receives winit callbacks while the host pumps the event loop.
///
/// Nothing here renders; the handler only records what happened so the
/// host can act on it after the pump returns.
pub(super) struct Handler {
    config: WindowConfig,
    pub(super) window: Option<Arc<Window>>,
    pub(super) create_error: Option<winit::error::OsError>,
    pub(super) close_requested: bool,
    pub(super) resized: Option<PhysicalSize<u32>>,
    pub(super) input: InputState,
    pub(super) events: Vec<InputEvent>,
}

impl Handler {
    pub(super) fn new(config: WindowConfig) -> Self {
        Self {
            config,
            window: None,
            create_error: None,
            close_requested: false,
            resized: None,
            input: InputState::default(),
            events: Vec::new(),
        }
    }
}

impl ApplicationHandler for Handler {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(LogicalSize::new(self.config.width as f64, self.config.height as f64));

        match event_loop.create_window(attrs) {
            Ok(window) => self.window = Some(Arc::new(window)),
            Err(e) => self.create_error = Some(e),
        }
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        let scale = self.window.as_ref().map_or(1.0, |w| w.scale_factor());

        match &event {
            WindowEvent::CloseRequested => self.close_requested = true,
            WindowEvent::Resized(size) => self.resized = Some(*size),
            WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(w) = &self.window {
                    self.resized = Some(w.inner_size());
                }
            }
            _ => {}
        }

        if let Some(ev) = translate_window_event(scale, &event) {
            self.input.apply_event(&ev);
            self.events.push(ev);
        }
    }
}
