use selene_engine::coords::Vec2;
use selene_engine::paint::Color;
use selene_engine::window::WindowConfig;

use crate::assets::AssetSource;

/// Minimum log severity policy.
///
/// Debug builds are always verbose; release builds only when asked for.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct LogPolicy {
    pub debug_build: bool,
    pub verbose_flag: bool,
}

impl LogPolicy {
    /// Policy for the running build.
    pub fn for_build(verbose_flag: bool) -> Self {
        Self { debug_build: cfg!(debug_assertions), verbose_flag }
    }

    pub fn level(self) -> log::LevelFilter {
        if self.debug_build || self.verbose_flag {
            log::LevelFilter::Info
        } else {
            log::LevelFilter::Warn
        }
    }
}

/// Everything the host needs to boot.
#[derive(Debug, Clone)]
pub struct HostConfig {
    pub title: String,
    /// Initial window size in logical pixels.
    pub resolution: Vec2,
    /// Base directory; normalized during bootstrap.
    pub base_path: String,
    pub log_policy: LogPolicy,
    pub skip_splash: bool,
    /// Process arguments handed to the script engine.
    pub args: Vec<String>,
    pub font: AssetSource,
    /// Rasterization size for the custom default font.
    pub font_size: f32,
    pub splash: SplashConfig,
}

impl HostConfig {
    pub fn window(&self) -> WindowConfig {
        WindowConfig {
            title: self.title.clone(),
            width: self.resolution.x.max(1.0) as u32,
            height: self.resolution.y.max(1.0) as u32,
        }
    }
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            title: "Selene".to_string(),
            resolution: Vec2::new(800.0, 600.0),
            base_path: "./".to_string(),
            log_policy: LogPolicy::for_build(false),
            skip_splash: false,
            args: Vec::new(),
            font: AssetSource::probe("fonts/default.ttf"),
            font_size: 48.0,
            splash: SplashConfig::default(),
        }
    }
}

/// Look and timing of the intro sequence.
#[derive(Debug, Clone)]
pub struct SplashConfig {
    pub fade_in: f32,
    pub hold: f32,
    pub fade_out: f32,

    // phase 1
    pub title: String,
    pub title_size: f32,
    pub title_spacing: f32,
    pub title_background: Color,

    // phase 2
    pub caption: String,
    pub caption_size: f32,
    pub logos: [AssetSource; 2],
    pub max_logo_size: f32,
    pub logo_spacing: f32,
}

impl SplashConfig {
    /// Length of one phase in seconds.
    pub fn phase_duration(&self) -> f32 {
        self.fade_in + self.hold + self.fade_out
    }
}

impl Default for SplashConfig {
    fn default() -> Self {
        Self {
            fade_in: 0.8,
            hold: 2.5,
            fade_out: 0.8,
            title: "SELENE MAKES GAMES".to_string(),
            title_size: 48.0,
            title_spacing: 2.0,
            title_background: Color::RED,
            caption: "Made using".to_string(),
            caption_size: 32.0,
            logos: [
                AssetSource::probe("logo/engine_logo.png"),
                AssetSource::probe("logo/selene_logo.png"),
            ],
            max_logo_size: 200.0,
            logo_spacing: 40.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_build_is_quiet_unless_asked() {
        let quiet = LogPolicy { debug_build: false, verbose_flag: false };
        let loud = LogPolicy { debug_build: false, verbose_flag: true };
        assert_eq!(quiet.level(), log::LevelFilter::Warn);
        assert_eq!(loud.level(), log::LevelFilter::Info);
    }

    #[test]
    fn debug_build_is_always_verbose() {
        let p = LogPolicy { debug_build: true, verbose_flag: false };
        assert_eq!(p.level(), log::LevelFilter::Info);
    }

    #[test]
    fn defaults() {
        let c = HostConfig::default();
        assert_eq!(c.window(), WindowConfig::default());
        assert!((c.splash.phase_duration() - 4.1).abs() < 1e-6);
    }
}
