use std::path::Path;

use mlua::{Function, IntoLuaMulti, Lua, LuaOptions, Result as LuaResult, StdLib, Table};
use selene_engine::input::InputEvent;
use selene_host::{EngineInit, HostCtx, ScriptEngine, ScriptError, DEFAULT_ENTRY};

use crate::bindings::{self, SharedBridge};
use crate::convert::event_to;

/// Lua 5.4 interpreter with the `RL` bindings installed.
pub struct LuaEngine {
    lua: Lua,
    bridge: SharedBridge,
    base_path: String,
    version: String,
}

impl LuaEngine {
    /// Creates the interpreter: standard libraries, `arg`, `package.path`
    /// rooted at the base path, and the `RL` table.
    pub fn new(init: &EngineInit) -> Result<Self, ScriptError> {
        let lua = Lua::new_with(StdLib::ALL_SAFE, LuaOptions::default()).map_err(init_error)?;
        let bridge = SharedBridge::default();

        install_args(&lua, &init.args).map_err(init_error)?;
        install_package_path(&lua, &init.base_path).map_err(init_error)?;
        bindings::install(&lua, &bridge).map_err(init_error)?;

        let version = lua.globals().get::<String>("_VERSION").unwrap_or_default();
        log::debug!("lua: {version} ready, base path {}", init.base_path);

        Ok(Self { lua, bridge, base_path: init.base_path.clone(), version })
    }

    fn callback(&self, name: &str) -> LuaResult<Option<Function>> {
        match self.lua.globals().get::<Option<Table>>("RL")? {
            Some(rl) => rl.get(name),
            None => Ok(None),
        }
    }

    /// Runs `f` with the bridge primed from `ctx`, then moves every command
    /// the script issued into `ctx`, including those issued before an error.
    fn with_ctx(&self, ctx: &mut HostCtx, f: impl FnOnce(&Self) -> LuaResult<()>) -> Result<(), ScriptError> {
        {
            let mut bridge = self.bridge.borrow_mut();
            bridge.snapshot = ctx.snapshot();
            bridge.commands.clear();
        }
        let result = f(self);
        ctx.extend(self.bridge.borrow_mut().commands.drain(..));
        result.map_err(runtime_error)
    }

    /// Calls `RL.<name>(args)`; a missing callback is skipped.
    fn invoke(&self, ctx: &mut HostCtx, name: &str, args: impl IntoLuaMulti) -> Result<(), ScriptError> {
        self.with_ctx(ctx, |this| match this.callback(name)? {
            Some(f) => f.call::<()>(args),
            None => Ok(()),
        })
    }

    fn exec(&self, path: &Path, source: &[u8]) -> LuaResult<()> {
        self.lua.load(source).set_name(format!("@{}", path.display())).exec()
    }
}

fn read_source(path: &Path) -> Result<Vec<u8>, ScriptError> {
    std::fs::read(path).map_err(|source| ScriptError::Read { path: path.to_path_buf(), source })
}

impl ScriptEngine for LuaEngine {
    /// Loads `<base>main.lua`, then calls `RL.init`.
    fn call_main(&mut self, ctx: &mut HostCtx) -> Result<(), ScriptError> {
        let path = format!("{}{DEFAULT_ENTRY}", self.base_path);
        let path = Path::new(&path);
        let source = read_source(path)?;
        self.with_ctx(ctx, |this| {
            this.exec(path, &source)?;
            match this.callback("init")? {
                Some(init) => init.call::<()>(()),
                None => Ok(()),
            }
        })
    }

    fn call_update(&mut self, ctx: &mut HostCtx, delta: f32) -> Result<(), ScriptError> {
        self.invoke(ctx, "update", delta)
    }

    fn call_draw(&mut self, ctx: &mut HostCtx) -> Result<(), ScriptError> {
        self.invoke(ctx, "draw", ())
    }

    fn call_exit(&mut self, ctx: &mut HostCtx) -> Result<(), ScriptError> {
        self.invoke(ctx, "exit", ())
    }

    fn call_event(&mut self, ctx: &mut HostCtx, event: &InputEvent) -> Result<(), ScriptError> {
        let table = event_to(&self.lua, event).map_err(runtime_error)?;
        self.invoke(ctx, "event", table)
    }

    /// Executes `path` once. Host commands it issues are discarded.
    fn run_file(&mut self, path: &Path) -> Result<(), ScriptError> {
        let source = read_source(path)?;
        let result = self.exec(path, &source);
        self.bridge.borrow_mut().commands.clear();
        result.map_err(runtime_error)
    }

    fn version(&self) -> &str {
        &self.version
    }

    fn close(self) {
        log::debug!("lua: closing interpreter");
    }
}

fn init_error(e: mlua::Error) -> ScriptError {
    ScriptError::Init(e.to_string())
}

fn runtime_error(e: mlua::Error) -> ScriptError {
    ScriptError::Runtime(e.to_string())
}

/// `arg[0]` is the program, `arg[1..]` the remaining process arguments.
fn install_args(lua: &Lua, args: &[String]) -> LuaResult<()> {
    let arg = lua.create_table()?;
    for (i, a) in args.iter().enumerate() {
        arg.set(i as i64, a.as_str())?;
    }
    lua.globals().set("arg", arg)
}

fn install_package_path(lua: &Lua, base_path: &str) -> LuaResult<()> {
    let package: Table = lua.globals().get("package")?;
    let current: String = package.get("path")?;
    package.set("path", format!("{base_path}?.lua;{base_path}?/init.lua;{current}"))
}
