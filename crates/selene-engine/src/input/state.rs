use std::collections::HashSet;

use super::types::{InputEvent, MouseButton};

/// Current input state for the host window.
///
/// Holds "is down" information and the raw pointer position. The script-side
/// mouse offset and scale are applied by the host, not here.
#[derive(Debug, Default)]
pub struct InputState {
    /// Whether the window is focused.
    pub focused: bool,

    /// Pointer position in logical pixels; kept after the pointer leaves.
    pub pointer_pos: (f32, f32),

    /// Currently held key codes.
    pub keys_down: HashSet<i32>,

    /// Currently held mouse buttons.
    pub buttons_down: HashSet<MouseButton>,
}

impl InputState {
    /// Folds one event into the current state.
    pub fn apply_event(&mut self, ev: &InputEvent) {
        match ev {
            InputEvent::Focused(f) => {
                self.focused = *f;
                if !*f {
                    // On focus loss clear "down" sets to avoid stuck keys.
                    self.keys_down.clear();
                    self.buttons_down.clear();
                }
            }
            InputEvent::PointerMoved { x, y } => self.pointer_pos = (*x, *y),
            InputEvent::Key { code, pressed, .. } => {
                if *pressed {
                    self.keys_down.insert(*code);
                } else {
                    self.keys_down.remove(code);
                }
            }
            InputEvent::PointerButton { button, pressed } => {
                if *pressed {
                    self.buttons_down.insert(*button);
                } else {
                    self.buttons_down.remove(button);
                }
            }
            InputEvent::MouseWheel { .. }
            | InputEvent::Text(_)
            | InputEvent::PointerEntered(_)
            | InputEvent::Resized { .. } => {}
        }
    }

    pub fn key_down(&self, code: i32) -> bool {
        self.keys_down.contains(&code)
    }

    pub fn button_down(&self, btn: MouseButton) -> bool {
        self.buttons_down.contains(&btn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_keys_and_buttons() {
        let mut s = InputState::default();
        s.apply_event(&InputEvent::Key { code: 65, pressed: true, repeat: false });
        s.apply_event(&InputEvent::PointerButton { button: MouseButton::Left, pressed: true });
        assert!(s.key_down(65));
        assert!(s.button_down(MouseButton::Left));

        s.apply_event(&InputEvent::Key { code: 65, pressed: false, repeat: false });
        assert!(!s.key_down(65));
    }

    #[test]
    fn focus_loss_releases_everything() {
        let mut s = InputState::default();
        s.apply_event(&InputEvent::Key { code: 32, pressed: true, repeat: false });
        s.apply_event(&InputEvent::PointerButton { button: MouseButton::Right, pressed: true });
        s.apply_event(&InputEvent::Focused(false));
        assert!(s.keys_down.is_empty());
        assert!(s.buttons_down.is_empty());
    }

    #[test]
    fn pointer_position_follows_moves() {
        let mut s = InputState::default();
        s.apply_event(&InputEvent::PointerMoved { x: 12.5, y: 4.0 });
        s.apply_event(&InputEvent::PointerEntered(false));
        assert_eq!(s.pointer_pos, (12.5, 4.0));
    }
}
