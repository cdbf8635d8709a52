use selene_engine::logging;

use crate::config::HostConfig;
use crate::engine::{EngineInit, ScriptEngine};
use crate::event_queue::EventQueue;
use crate::material::Material;
use crate::path::normalize_base_path;
use crate::platform::Platform;
use crate::state::RuntimeState;
use crate::ScriptError;

/// Full bootstrap for interactive mode.
///
/// Acquires, in order: window, script engine, default font, default
/// material/textures/shader-location table and (when the platform lacks
/// native event delivery) the event queue. Capability failures fall back
/// and log; the returned flag is `true` only if both the window and the
/// engine came up. The state is always valid for teardown.
pub fn bootstrap<P, E, F>(config: &HostConfig, platform: P, init_engine: F) -> (RuntimeState<P, E>, bool)
where
    P: Platform,
    E: ScriptEngine,
    F: FnOnce(&EngineInit) -> Result<E, ScriptError>,
{
    let base_path = normalize_base_path(&config.base_path);
    logging::set_threshold(config.log_policy.level());

    let mut state = RuntimeState::new(platform, base_path, config.log_policy, config.resolution);
    state.running = true;

    // window
    state.has_window = state.platform.open_window(&config.window());
    if !state.has_window {
        log::warn!("bootstrap: window creation failed");
        state.running = false;
    }

    if state.has_window {
        // script engine
        let init = EngineInit { args: config.args.clone(), base_path: state.base_path.clone() };
        match init_engine(&init) {
            Ok(engine) => {
                log::info!("bootstrap: script engine {}", engine.version());
                state.engine = Some(engine);
            }
            Err(e) => {
                log::error!("bootstrap: {e}");
                state.running = false;
            }
        }

        // default font
        let custom = config
            .font
            .load()
            .and_then(|bytes| state.platform.load_font(&bytes, config.font_size));
        match custom {
            Some(font) => {
                state.default_font = Some(font);
                state.custom_font_loaded = true;
                log::info!("bootstrap: custom default font loaded");
            }
            None => {
                log::warn!("bootstrap: custom font not found, using the built-in font");
                state.default_font = Some(state.platform.default_font());
                state.custom_font_loaded = false;
            }
        }
    }

    // default render state
    let white = state.platform.default_texture();
    state.gui_font = Some(state.platform.default_font());
    state.default_material = Some(Material::with_texture(white));
    state.default_texture = Some(white);
    state.shapes_texture = Some(white);
    state.shader_locations = state.platform.default_shader_locations().to_vec();

    if !state.platform.has_native_event_delivery() {
        state.event_queue = Some(EventQueue::new());
    }

    let ok = state.running;
    (state, ok)
}

/// Minimal bootstrap for interpret mode: no window, fonts or render state,
/// only the script engine.
pub fn bootstrap_interpret<P, E, F>(config: &HostConfig, platform: P, init_engine: F) -> (RuntimeState<P, E>, bool)
where
    P: Platform,
    E: ScriptEngine,
    F: FnOnce(&EngineInit) -> Result<E, ScriptError>,
{
    let base_path = normalize_base_path(&config.base_path);
    logging::set_threshold(config.log_policy.level());

    let mut state = RuntimeState::new(platform, base_path, config.log_policy, config.resolution);

    let init = EngineInit { args: config.args.clone(), base_path: state.base_path.clone() };
    match init_engine(&init) {
        Ok(engine) => {
            log::debug!("bootstrap: script engine {}", engine.version());
            state.engine = Some(engine);
            state.running = true;
        }
        Err(e) => log::error!("bootstrap: {e}"),
    }

    let ok = state.running;
    (state, ok)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetSource;
    use crate::mock::{CallLog, MockEngine, MockPlatform};
    use selene_engine::render::MAX_SHADER_LOCATIONS;

    fn config() -> HostConfig {
        HostConfig {
            base_path: "/game".to_string(),
            font: AssetSource::Embedded(b"font bytes"),
            ..HostConfig::default()
        }
    }

    fn engine_ok(log: &CallLog) -> impl FnOnce(&EngineInit) -> Result<MockEngine, ScriptError> + '_ {
        move |init| {
            log.push(format!("engine.init({})", init.base_path));
            Ok(MockEngine::new(log.clone()))
        }
    }

    #[test]
    fn acquires_in_order() {
        let log = CallLog::default();
        let (state, ok) = bootstrap(&config(), MockPlatform::new(log.clone()), engine_ok(&log));

        assert!(ok);
        assert!(state.is_running());
        assert_eq!(state.base_path(), "/game/");
        assert_eq!(log.calls(), ["open_window", "engine.init(/game/)", "load_font"]);
        assert!(state.custom_font_loaded());
        assert_eq!(state.shader_locations().len(), MAX_SHADER_LOCATIONS);
        assert!(state.default_material().is_some());
        drop(state);
    }

    #[test]
    fn window_failure_skips_engine_and_font() {
        let log = CallLog::default();
        let mut platform = MockPlatform::new(log.clone());
        platform.window_ok = false;

        let (mut state, ok) = bootstrap(&config(), platform, engine_ok(&log));

        assert!(!ok);
        assert!(!state.has_window());
        assert!(!state.has_engine());
        assert!(!state.custom_font_loaded());
        assert!(state.default_texture().is_some());

        log.clear();
        state.teardown();
        assert_eq!(log.count("unload_font"), 0);
        assert_eq!(log.count("close_window"), 0);
    }

    #[test]
    fn engine_failure_keeps_state_freeable() {
        let log = CallLog::default();
        let (mut state, ok) = bootstrap::<_, MockEngine, _>(&config(), MockPlatform::new(log.clone()), |_| {
            Err(ScriptError::Init("boom".to_string()))
        });

        assert!(!ok);
        assert!(state.has_window());
        assert!(!state.has_engine());

        log.clear();
        state.teardown();
        assert_eq!(log.calls(), ["unload_font(1)", "close_window"]);
    }

    #[test]
    fn missing_font_falls_back_to_builtin() {
        let log = CallLog::default();
        let cfg = HostConfig { font: AssetSource::Filesystem(Vec::new()), ..config() };
        let (mut state, ok) = bootstrap(&cfg, MockPlatform::new(log.clone()), engine_ok(&log));

        assert!(ok);
        assert!(!state.custom_font_loaded());
        assert_eq!(state.default_font(), Some(0));

        log.clear();
        state.teardown();
        assert_eq!(log.count("unload_font"), 0);
    }

    #[test]
    fn unparseable_font_falls_back_to_builtin() {
        let log = CallLog::default();
        let mut platform = MockPlatform::new(log.clone());
        platform.font_ok = false;
        let (state, _) = bootstrap(&config(), platform, engine_ok(&log));
        assert!(!state.custom_font_loaded());
    }

    #[test]
    fn event_queue_only_without_native_delivery() {
        let log = CallLog::default();
        let (state, _) = bootstrap(&config(), MockPlatform::new(log.clone()), engine_ok(&log));
        assert!(state.event_queue().is_none());

        let mut platform = MockPlatform::new(log.clone());
        platform.native_events = false;
        let (state, _) = bootstrap(&config(), platform, engine_ok(&log));
        let queue = state.event_queue().unwrap();
        assert_eq!(queue.len(), 0);
    }

    #[test]
    fn interpret_bootstrap_only_creates_engine() {
        let log = CallLog::default();
        let (state, ok) = bootstrap_interpret(&config(), MockPlatform::new(log.clone()), engine_ok(&log));

        assert!(ok);
        assert!(!state.has_window());
        assert!(state.default_font().is_none());
        assert!(state.shader_locations().is_empty());
        assert_eq!(log.calls(), ["engine.init(/game/)"]);
    }
}
