use std::cell::RefCell;
use std::rc::Rc;

use mlua::{FromLuaMulti, Function, Lua, Result as LuaResult, Table};
use selene_host::{HostCommand, HostSnapshot};

use crate::convert::{color_from, rect_from, vec2_from, vec2_to};

pub(crate) const LOG_TRACE: i32 = 1;
pub(crate) const LOG_DEBUG: i32 = 2;
pub(crate) const LOG_INFO: i32 = 3;
pub(crate) const LOG_WARNING: i32 = 4;
pub(crate) const LOG_ERROR: i32 = 5;
pub(crate) const LOG_FATAL: i32 = 6;

/// State shared between the engine and the `RL` closures for the duration
/// of one callback.
#[derive(Debug, Default)]
pub(crate) struct Bridge {
    pub(crate) snapshot: HostSnapshot,
    pub(crate) commands: Vec<HostCommand>,
}

pub(crate) type SharedBridge = Rc<RefCell<Bridge>>;

/// Maps a script log level onto the `log` facade.
pub(crate) fn log_level(level: i32) -> log::Level {
    match level {
        LOG_TRACE => log::Level::Trace,
        LOG_DEBUG => log::Level::Debug,
        LOG_WARNING => log::Level::Warn,
        LOG_ERROR | LOG_FATAL => log::Level::Error,
        _ => log::Level::Info,
    }
}

/// Registers a binding that converts its arguments into a buffered command.
fn command<A, F>(lua: &Lua, bridge: &SharedBridge, f: F) -> LuaResult<Function>
where
    A: FromLuaMulti,
    F: Fn(A) -> LuaResult<HostCommand> + 'static,
{
    let bridge = Rc::clone(bridge);
    lua.create_function(move |_, args: A| {
        let cmd = f(args)?;
        bridge.borrow_mut().commands.push(cmd);
        Ok(())
    })
}

/// Creates the global `RL` table.
pub(crate) fn install(lua: &Lua, bridge: &SharedBridge) -> LuaResult<()> {
    let rl = lua.create_table()?;

    rl.set("LOG_TRACE", LOG_TRACE)?;
    rl.set("LOG_DEBUG", LOG_DEBUG)?;
    rl.set("LOG_INFO", LOG_INFO)?;
    rl.set("LOG_WARNING", LOG_WARNING)?;
    rl.set("LOG_ERROR", LOG_ERROR)?;
    rl.set("LOG_FATAL", LOG_FATAL)?;

    // ── queries ───────────────────────────────────────────────────────────

    let b = Rc::clone(bridge);
    rl.set("GetFrameTime", lua.create_function(move |_, ()| Ok(b.borrow().snapshot.frame_time))?)?;

    let b = Rc::clone(bridge);
    rl.set(
        "GetScreenSize",
        lua.create_function(move |lua, ()| vec2_to(lua, b.borrow().snapshot.screen_size))?,
    )?;

    let b = Rc::clone(bridge);
    rl.set(
        "GetMousePosition",
        lua.create_function(move |lua, ()| vec2_to(lua, b.borrow().snapshot.mouse_position))?,
    )?;

    // ── window / input ────────────────────────────────────────────────────

    rl.set(
        "SetWindowSize",
        command(lua, bridge, |size: Table| {
            let v = vec2_from(&size)?;
            Ok(HostCommand::SetWindowSize { width: v.x.max(1.0) as u32, height: v.y.max(1.0) as u32 })
        })?,
    )?;
    rl.set(
        "SetMouseOffset",
        command(lua, bridge, |v: Table| Ok(HostCommand::SetMouseOffset(vec2_from(&v)?)))?,
    )?;
    rl.set(
        "SetMouseScale",
        command(lua, bridge, |v: Table| Ok(HostCommand::SetMouseScale(vec2_from(&v)?)))?,
    )?;
    rl.set("CloseWindow", command(lua, bridge, |()| Ok(HostCommand::CloseWindow))?)?;

    // ── drawing ───────────────────────────────────────────────────────────

    rl.set(
        "ClearBackground",
        command(lua, bridge, |color: Table| Ok(HostCommand::ClearBackground(color_from(&color)?)))?,
    )?;
    rl.set(
        "DrawRectangle",
        command(lua, bridge, |(rect, color): (Table, Table)| {
            Ok(HostCommand::DrawRectangle { rect: rect_from(&rect)?, color: color_from(&color)? })
        })?,
    )?;
    rl.set(
        "DrawText",
        command(lua, bridge, |(text, position, size, color): (String, Table, f32, Table)| {
            Ok(HostCommand::DrawText {
                text,
                position: vec2_from(&position)?,
                size,
                color: color_from(&color)?,
            })
        })?,
    )?;

    // ── audio / shaders ───────────────────────────────────────────────────

    rl.set("InitAudioDevice", command(lua, bridge, |()| Ok(HostCommand::InitAudioDevice))?)?;
    rl.set("CloseAudioDevice", command(lua, bridge, |()| Ok(HostCommand::CloseAudioDevice))?)?;
    rl.set(
        "SetShaderLocation",
        command(lua, bridge, |(index, value): (usize, i32)| Ok(HostCommand::SetShaderLocation { index, value }))?,
    )?;

    // ── logging ───────────────────────────────────────────────────────────

    rl.set(
        "TraceLog",
        lua.create_function(|_, (level, msg): (i32, String)| {
            log::log!(target: "script", log_level(level), "{msg}");
            Ok(())
        })?,
    )?;

    lua.globals().set("RL", rl)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use selene_engine::coords::{Rect, Vec2};
    use selene_engine::paint::Color;

    fn setup() -> (Lua, SharedBridge) {
        let lua = Lua::new();
        let bridge = SharedBridge::default();
        install(&lua, &bridge).unwrap();
        (lua, bridge)
    }

    #[test]
    fn draw_calls_are_buffered_in_order() {
        let (lua, bridge) = setup();
        lua.load(
            r#"
            RL.ClearBackground({0, 0, 0})
            RL.DrawRectangle({1, 2, 30, 40}, {255, 0, 0, 128})
            RL.DrawText("hi", {5, 6}, 20, {255, 255, 255})
            "#,
        )
        .exec()
        .unwrap();

        assert_eq!(
            bridge.borrow().commands,
            vec![
                HostCommand::ClearBackground(Color::BLACK),
                HostCommand::DrawRectangle { rect: Rect::new(1.0, 2.0, 30.0, 40.0), color: Color::rgba(255, 0, 0, 128) },
                HostCommand::DrawText {
                    text: "hi".to_string(),
                    position: Vec2::new(5.0, 6.0),
                    size: 20.0,
                    color: Color::WHITE,
                },
            ]
        );
    }

    #[test]
    fn queries_read_the_snapshot() {
        let (lua, bridge) = setup();
        bridge.borrow_mut().snapshot = HostSnapshot {
            frame_time: 0.5,
            screen_size: Vec2::new(640.0, 480.0),
            mouse_position: Vec2::new(3.0, 4.0),
            resolution: Vec2::new(640.0, 480.0),
        };

        let (dt, w, my): (f32, f32, f32) = lua
            .load("local s = RL.GetScreenSize(); local m = RL.GetMousePosition(); return RL.GetFrameTime(), s[1], m[2]")
            .eval()
            .unwrap();
        assert_eq!((dt, w, my), (0.5, 640.0, 4.0));
        assert!(bridge.borrow().commands.is_empty());
    }

    #[test]
    fn bad_arguments_raise_a_lua_error() {
        let (lua, bridge) = setup();
        assert!(lua.load("RL.DrawRectangle({1, 2}, {0, 0, 0})").exec().is_err());
        assert!(bridge.borrow().commands.is_empty());
    }

    #[test]
    fn window_and_audio_commands() {
        let (lua, bridge) = setup();
        lua.load("RL.SetWindowSize({320, 240}); RL.InitAudioDevice(); RL.SetShaderLocation(2, 7); RL.CloseWindow()")
            .exec()
            .unwrap();
        assert_eq!(
            bridge.borrow().commands,
            vec![
                HostCommand::SetWindowSize { width: 320, height: 240 },
                HostCommand::InitAudioDevice,
                HostCommand::SetShaderLocation { index: 2, value: 7 },
                HostCommand::CloseWindow,
            ]
        );
    }

    #[test]
    fn log_levels_map_onto_the_facade() {
        assert_eq!(log_level(LOG_INFO), log::Level::Info);
        assert_eq!(log_level(LOG_WARNING), log::Level::Warn);
        assert_eq!(log_level(LOG_ERROR), log::Level::Error);
        assert_eq!(log_level(LOG_FATAL), log::Level::Error);
        assert_eq!(log_level(99), log::Level::Info);
    }
}
