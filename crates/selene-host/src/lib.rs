//! Selene host.
//!
//! Owns the process-wide [`RuntimeState`] and the lifecycle around it:
//! bootstrap, the optional splash sequence, the frame driver and teardown.
//! Windowing and scripting are reached only through the [`Platform`] and
//! [`ScriptEngine`] capability traits.
//!
//! # Lifecycle
//!
//! ```rust,ignore
//! let platform = Desktop::new(GpuInit::default());
//! let exit = selene_host::run_interactive(config, platform, |init| LuaEngine::new(init));
//! std::process::exit(exit.code());
//! ```

mod app;
mod assets;
mod bootstrap;
mod config;
mod driver;
mod engine;
mod error;
mod event_queue;
mod material;
mod path;
mod splash;
mod state;

pub mod platform;

#[cfg(test)]
mod mock;

pub use app::{run_interactive, run_interpret, HostExit};
pub use assets::{AssetError, AssetSource};
pub use bootstrap::{bootstrap, bootstrap_interpret};
pub use config::{HostConfig, LogPolicy, SplashConfig};
pub use driver::run_frames;
pub use engine::{EngineInit, HostCommand, HostCtx, HostSnapshot, ScriptEngine};
pub use error::ScriptError;
pub use event_queue::{EventQueue, EVENT_QUEUE_CAPACITY};
pub use material::Material;
pub use path::{interpret_path, normalize_base_path, resolve_base_path, DEFAULT_ENTRY};
pub use platform::Platform;
pub use splash::{run_splash, splash_alpha, Phase, SplashSequencer};
pub use state::RuntimeState;
