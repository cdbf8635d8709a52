/// Mouse button identifier.
///
/// `code()` yields the numbering scripts see: 0 left, 1 right, 2 middle,
/// 3 back, 4 forward.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Back,
    Forward,
    Other(u16),
}

impl MouseButton {
    pub fn code(self) -> i32 {
        match self {
            MouseButton::Left => 0,
            MouseButton::Right => 1,
            MouseButton::Middle => 2,
            MouseButton::Back => 3,
            MouseButton::Forward => 4,
            MouseButton::Other(v) => 5 + v as i32,
        }
    }
}

/// Platform-agnostic input and window event.
///
/// Positions are logical pixels relative to the window's top-left corner,
/// before any script-side mouse offset or scale.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Keyboard key. `code` follows the GLFW key numbering; 0 when unknown.
    Key { code: i32, pressed: bool, repeat: bool },

    PointerMoved { x: f32, y: f32 },
    PointerButton { button: MouseButton, pressed: bool },

    /// Wheel movement in lines; pixel deltas are converted by the host.
    MouseWheel { x: f32, y: f32 },

    /// Committed text.
    Text(String),

    /// Pointer entered (`true`) or left (`false`) the window surface.
    PointerEntered(bool),

    /// Window focus change.
    Focused(bool),

    /// Window resized, logical pixels.
    Resized { width: u32, height: u32 },
}

impl InputEvent {
    /// Short lowercase tag used when events are handed to scripts.
    pub fn kind(&self) -> &'static str {
        match self {
            InputEvent::Key { .. } => "key",
            InputEvent::PointerMoved { .. } => "mouse_move",
            InputEvent::PointerButton { .. } => "mouse_button",
            InputEvent::MouseWheel { .. } => "mouse_wheel",
            InputEvent::Text(_) => "text",
            InputEvent::PointerEntered(_) => "cursor_enter",
            InputEvent::Focused(_) => "focus",
            InputEvent::Resized { .. } => "resize",
        }
    }
}
