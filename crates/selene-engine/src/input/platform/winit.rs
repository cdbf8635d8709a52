use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton as WinitMouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::PhysicalKey;

use crate::input::{key_code, InputEvent, MouseButton};

/// Pixels per wheel line when a platform reports pixel deltas.
const PIXELS_PER_LINE: f64 = 20.0;

/// Translates a winit `WindowEvent` into an engine `InputEvent`.
///
/// `scale` is the window's scale factor. Returns `None` for events not
/// represented by the input subsystem.
pub(crate) fn translate_window_event(scale: f64, event: &WindowEvent) -> Option<InputEvent> {
    match event {
        WindowEvent::Focused(f) => Some(InputEvent::Focused(*f)),

        WindowEvent::CursorEntered { .. } => Some(InputEvent::PointerEntered(true)),
        WindowEvent::CursorLeft { .. } => Some(InputEvent::PointerEntered(false)),

        WindowEvent::CursorMoved { position, .. } => {
            let (x, y) = to_logical_f32(scale, *position);
            Some(InputEvent::PointerMoved { x, y })
        }

        WindowEvent::MouseInput { state, button, .. } => Some(InputEvent::PointerButton {
            button: map_mouse_button(*button),
            pressed: *state == ElementState::Pressed,
        }),

        WindowEvent::MouseWheel { delta, .. } => {
            let (x, y) = match delta {
                MouseScrollDelta::LineDelta(x, y) => (*x, *y),
                MouseScrollDelta::PixelDelta(p) => {
                    ((p.x / PIXELS_PER_LINE) as f32, (p.y / PIXELS_PER_LINE) as f32)
                }
            };
            Some(InputEvent::MouseWheel { x, y })
        }

        WindowEvent::KeyboardInput { event, .. } => {
            let code = match event.physical_key {
                PhysicalKey::Code(code) => key_code(code),
                // No stable numeric for native codes.
                PhysicalKey::Unidentified(_) => 0,
            };
            Some(InputEvent::Key {
                code,
                pressed: event.state == ElementState::Pressed,
                repeat: event.repeat,
            })
        }

        WindowEvent::Ime(winit::event::Ime::Commit(text)) if !text.is_empty() => {
            Some(InputEvent::Text(text.clone()))
        }

        WindowEvent::Resized(size) => {
            let logical = size.to_logical::<f64>(scale);
            Some(InputEvent::Resized {
                width: logical.width.round() as u32,
                height: logical.height.round() as u32,
            })
        }

        _ => None,
    }
}

fn to_logical_f32(scale: f64, pos: PhysicalPosition<f64>) -> (f32, f32) {
    let logical = pos.to_logical::<f64>(scale);
    (logical.x as f32, logical.y as f32)
}

fn map_mouse_button(b: WinitMouseButton) -> MouseButton {
    match b {
        WinitMouseButton::Left => MouseButton::Left,
        WinitMouseButton::Right => MouseButton::Right,
        WinitMouseButton::Middle => MouseButton::Middle,
        WinitMouseButton::Back => MouseButton::Back,
        WinitMouseButton::Forward => MouseButton::Forward,
        WinitMouseButton::Other(v) => MouseButton::Other(v),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focus_and_buttons_translate() {
        assert_eq!(
            translate_window_event(1.0, &WindowEvent::Focused(true)),
            Some(InputEvent::Focused(true))
        );
        assert_eq!(map_mouse_button(WinitMouseButton::Middle), MouseButton::Middle);
    }

    #[test]
    fn resize_reports_logical_size() {
        let ev = WindowEvent::Resized(winit::dpi::PhysicalSize::new(1600, 1200));
        assert_eq!(
            translate_window_event(2.0, &ev),
            Some(InputEvent::Resized { width: 800, height: 600 })
        );
    }

    #[test]
    fn cursor_is_scaled_to_logical() {
        assert_eq!(to_logical_f32(2.0, PhysicalPosition::new(100.0, 50.0)), (50.0, 25.0));
    }
}
