use std::path::Path;

use crate::bootstrap::{bootstrap, bootstrap_interpret};
use crate::config::HostConfig;
use crate::driver::run_frames;
use crate::engine::{EngineInit, ScriptEngine};
use crate::platform::Platform;
use crate::splash::run_splash;
use crate::ScriptError;

/// How a host run ended. Maps onto the process exit code.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum HostExit {
    /// Normal run, teardown included.
    Ok,
    /// Printed version or usage and stopped.
    Info,
    /// The entry script failed to load or its main entry failed.
    ScriptError,
    /// Window or script engine could not be initialized.
    BootFailed,
}

impl HostExit {
    pub fn code(self) -> i32 {
        match self {
            HostExit::Ok => 0,
            HostExit::Info => 1,
            HostExit::ScriptError => 2,
            HostExit::BootFailed => 3,
        }
    }
}

/// Interactive lifecycle: bootstrap, splash (unless skipped), frame loop,
/// teardown. Teardown runs on every path.
pub fn run_interactive<P, E, F>(config: HostConfig, platform: P, init_engine: F) -> HostExit
where
    P: Platform,
    E: ScriptEngine,
    F: FnOnce(&EngineInit) -> Result<E, ScriptError>,
{
    let (mut state, ok) = bootstrap(&config, platform, init_engine);
    if !ok {
        log::error!("bootstrap failed; shutting down");
        state.teardown();
        return HostExit::BootFailed;
    }

    if config.skip_splash {
        log::info!("splash skipped");
    } else {
        run_splash(&mut state, config.splash.clone());
    }

    let exit = match run_frames(&mut state) {
        Ok(()) => HostExit::Ok,
        Err(_) => HostExit::ScriptError,
    };
    state.teardown();
    exit
}

/// Interpret lifecycle: engine only, run `script` once, teardown.
pub fn run_interpret<P, E, F>(config: HostConfig, platform: P, init_engine: F, script: &Path) -> HostExit
where
    P: Platform,
    E: ScriptEngine,
    F: FnOnce(&EngineInit) -> Result<E, ScriptError>,
{
    let (mut state, ok) = bootstrap_interpret(&config, platform, init_engine);
    if !ok {
        state.teardown();
        return HostExit::BootFailed;
    }

    let result = match state.engine.as_mut() {
        Some(engine) => engine.run_file(script),
        None => Err(ScriptError::Init("no script engine".to_string())),
    };
    let exit = match result {
        Ok(()) => HostExit::Ok,
        Err(e) => {
            log::error!("{}: {e}", script.display());
            HostExit::ScriptError
        }
    };
    state.teardown();
    exit
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetSource;
    use crate::config::SplashConfig;
    use crate::mock::{CallLog, MockEngine, MockPlatform};

    fn config(skip_splash: bool) -> HostConfig {
        HostConfig {
            base_path: "/game".to_string(),
            skip_splash,
            font: AssetSource::Embedded(b"font"),
            splash: SplashConfig {
                logos: [AssetSource::Embedded(b"a"), AssetSource::Embedded(b"b")],
                ..SplashConfig::default()
            },
            ..HostConfig::default()
        }
    }

    fn platform(log: &CallLog, close_after: usize) -> MockPlatform {
        let mut p = MockPlatform::new(log.clone());
        p.frame_time = 0.5;
        p.close_after = Some(close_after);
        p
    }

    fn position(calls: &[String], name: &str) -> usize {
        calls.iter().position(|c| c == name).unwrap_or(usize::MAX)
    }

    #[test]
    fn exit_codes() {
        assert_eq!(HostExit::Ok.code(), 0);
        assert_eq!(HostExit::Info.code(), 1);
        assert_eq!(HostExit::ScriptError.code(), 2);
        assert_eq!(HostExit::BootFailed.code(), 3);
    }

    #[test]
    fn splash_runs_before_main() {
        let log = CallLog::default();
        // 18 polls finish the splash, the 19th ends the first frame-loop tick.
        let exit = run_interactive(config(false), platform(&log, 19), |_| Ok(MockEngine::new(log.clone())));

        assert_eq!(exit, HostExit::Ok);
        let calls = log.calls();
        assert_eq!(log.count("unload_texture"), 2);
        assert!(position(&calls, "unload_texture(2)") < position(&calls, "engine.main"));
        assert_eq!(log.count("engine.update"), 1);
        assert_eq!(log.count("engine.exit"), 1);
        assert_eq!(calls.last().map(String::as_str), Some("close_window"));
    }

    #[test]
    fn no_logo_goes_straight_to_main() {
        let log = CallLog::default();
        let exit = run_interactive(config(true), platform(&log, 2), |_| Ok(MockEngine::new(log.clone())));

        assert_eq!(exit, HostExit::Ok);
        assert_eq!(log.count("load_texture"), 0);
        assert_eq!(log.count("engine.update"), 2);
        assert_eq!(log.count("engine.exit"), 1);
        assert_eq!(log.count("engine.close"), 1);
    }

    #[test]
    fn main_failure_is_a_script_error_without_exit() {
        let log = CallLog::default();
        let exit = run_interactive(config(true), platform(&log, 1), |_| {
            let mut engine = MockEngine::new(log.clone());
            engine.main_error = Some("main.lua: syntax error".to_string());
            Ok(engine)
        });

        assert_eq!(exit, HostExit::ScriptError);
        assert_eq!(log.count("engine.exit"), 0);
        assert_eq!(log.count("engine.close"), 1);
        assert_eq!(log.count("close_window"), 1);
    }

    #[test]
    fn boot_failure_still_tears_down() {
        let log = CallLog::default();
        let exit = run_interactive::<_, MockEngine, _>(config(false), platform(&log, 1), |_| {
            Err(ScriptError::Init("no lua".to_string()))
        });

        assert_eq!(exit, HostExit::BootFailed);
        assert_eq!(log.count("should_close"), 0);
        assert_eq!(log.count("unload_font(1)"), 1);
        assert_eq!(log.count("close_window"), 1);
    }

    #[test]
    fn interpret_runs_the_file_once() {
        let log = CallLog::default();
        let exit = run_interpret(config(false), platform(&log, 1), |_| Ok(MockEngine::new(log.clone())), Path::new("/work/tool.lua"));

        assert_eq!(exit, HostExit::Ok);
        assert_eq!(log.calls(), ["engine.run_file(/work/tool.lua)", "engine.close"]);
    }

    #[test]
    fn interpret_load_failure_is_a_script_error() {
        let log = CallLog::default();
        let exit = run_interpret(
            config(false),
            platform(&log, 1),
            |_| {
                let mut engine = MockEngine::new(log.clone());
                engine.run_file_error = Some("cannot open missing.lua".to_string());
                Ok(engine)
            },
            Path::new("missing.lua"),
        );

        assert_eq!(exit, HostExit::ScriptError);
        assert_eq!(log.count("engine.main"), 0);
        assert_eq!(log.count("engine.close"), 1);
        assert_eq!(log.count("open_window"), 0);
    }
}
