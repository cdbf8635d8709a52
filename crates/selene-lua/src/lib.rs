//! Lua script engine for the Selene host.
//!
//! Scripts talk to the host through the global `RL` table. Queries read the
//! snapshot taken when the current callback started; everything else is
//! buffered as a [`selene_host::HostCommand`] and applied by the host once
//! the callback returns.

mod bindings;
mod convert;
mod engine;

pub use engine::LuaEngine;

/// `_VERSION` of the linked interpreter.
pub const LUA_VERSION: &str = "Lua 5.4";
