use winit::keyboard::KeyCode;

/// Maps a physical key to its GLFW key number. Unmapped keys yield 0.
pub fn key_code(code: KeyCode) -> i32 {
    use KeyCode::*;

    match code {
        Space => 32,
        Quote => 39,
        Comma => 44,
        Minus => 45,
        Period => 46,
        Slash => 47,
        Digit0 => 48,
        Digit1 => 49,
        Digit2 => 50,
        Digit3 => 51,
        Digit4 => 52,
        Digit5 => 53,
        Digit6 => 54,
        Digit7 => 55,
        Digit8 => 56,
        Digit9 => 57,
        Semicolon => 59,
        Equal => 61,
        KeyA => 65,
        KeyB => 66,
        KeyC => 67,
        KeyD => 68,
        KeyE => 69,
        KeyF => 70,
        KeyG => 71,
        KeyH => 72,
        KeyI => 73,
        KeyJ => 74,
        KeyK => 75,
        KeyL => 76,
        KeyM => 77,
        KeyN => 78,
        KeyO => 79,
        KeyP => 80,
        KeyQ => 81,
        KeyR => 82,
        KeyS => 83,
        KeyT => 84,
        KeyU => 85,
        KeyV => 86,
        KeyW => 87,
        KeyX => 88,
        KeyY => 89,
        KeyZ => 90,
        BracketLeft => 91,
        Backslash => 92,
        BracketRight => 93,
        Backquote => 96,

        Escape => 256,
        Enter => 257,
        Tab => 258,
        Backspace => 259,
        Insert => 260,
        Delete => 261,
        ArrowRight => 262,
        ArrowLeft => 263,
        ArrowDown => 264,
        ArrowUp => 265,
        PageUp => 266,
        PageDown => 267,
        Home => 268,
        End => 269,
        CapsLock => 280,
        ScrollLock => 281,
        NumLock => 282,
        PrintScreen => 283,
        Pause => 284,

        F1 => 290,
        F2 => 291,
        F3 => 292,
        F4 => 293,
        F5 => 294,
        F6 => 295,
        F7 => 296,
        F8 => 297,
        F9 => 298,
        F10 => 299,
        F11 => 300,
        F12 => 301,

        Numpad0 => 320,
        Numpad1 => 321,
        Numpad2 => 322,
        Numpad3 => 323,
        Numpad4 => 324,
        Numpad5 => 325,
        Numpad6 => 326,
        Numpad7 => 327,
        Numpad8 => 328,
        Numpad9 => 329,
        NumpadDecimal => 330,
        NumpadDivide => 331,
        NumpadMultiply => 332,
        NumpadSubtract => 333,
        NumpadAdd => 334,
        NumpadEnter => 335,
        NumpadEqual => 336,

        ShiftLeft => 340,
        ControlLeft => 341,
        AltLeft => 342,
        SuperLeft => 343,
        ShiftRight => 344,
        ControlRight => 345,
        AltRight => 346,
        SuperRight => 347,
        ContextMenu => 348,

        _ => 0,
    }
}
