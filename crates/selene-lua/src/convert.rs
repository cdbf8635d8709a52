use mlua::{Lua, Result as LuaResult, Table};
use selene_engine::coords::{Rect, Vec2};
use selene_engine::input::InputEvent;
use selene_engine::paint::Color;

/// `{x, y}` or `{w, h}`.
pub(crate) fn vec2_from(t: &Table) -> LuaResult<Vec2> {
    Ok(Vec2::new(t.get(1)?, t.get(2)?))
}

/// `{x, y, w, h}`.
pub(crate) fn rect_from(t: &Table) -> LuaResult<Rect> {
    Ok(Rect::new(t.get(1)?, t.get(2)?, t.get(3)?, t.get(4)?))
}

/// `{r, g, b[, a]}` with 0..255 channels. Alpha defaults to opaque;
/// out-of-range channels are clamped.
pub(crate) fn color_from(t: &Table) -> LuaResult<Color> {
    let channel = |v: f64| v.clamp(0.0, 255.0) as u8;
    let a: Option<f64> = t.get(4)?;
    Ok(Color::rgba(
        channel(t.get(1)?),
        channel(t.get(2)?),
        channel(t.get(3)?),
        a.map_or(255, channel),
    ))
}

pub(crate) fn vec2_to(lua: &Lua, v: Vec2) -> LuaResult<Table> {
    lua.create_sequence_from([v.x, v.y])
}

/// Event table handed to `RL.event`: `type` plus the event's fields.
pub(crate) fn event_to(lua: &Lua, event: &InputEvent) -> LuaResult<Table> {
    let t = lua.create_table()?;
    t.set("type", event.kind())?;
    match event {
        InputEvent::Key { code, pressed, repeat } => {
            t.set("key", *code)?;
            t.set("pressed", *pressed)?;
            t.set("repeat", *repeat)?;
        }
        InputEvent::PointerMoved { x, y } | InputEvent::MouseWheel { x, y } => {
            t.set("x", *x)?;
            t.set("y", *y)?;
        }
        InputEvent::PointerButton { button, pressed } => {
            t.set("button", button.code())?;
            t.set("pressed", *pressed)?;
        }
        InputEvent::Text(text) => t.set("text", text.as_str())?,
        InputEvent::PointerEntered(entered) => t.set("entered", *entered)?,
        InputEvent::Focused(focused) => t.set("focused", *focused)?,
        InputEvent::Resized { width, height } => {
            t.set("width", *width)?;
            t.set("height", *height)?;
        }
    }
    Ok(t)
}
