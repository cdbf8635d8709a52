use selene_engine::coords::{Rect, Vec2};
use selene_engine::paint::Color;

use crate::config::SplashConfig;
use crate::engine::ScriptEngine;
use crate::platform::Platform;
use crate::state::RuntimeState;

/// Splash sequence phase.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Phase {
    /// Full-screen color field with the studio title.
    Phase1,
    /// Caption over the two logos.
    Phase2,
    Done,
}

impl Phase {
    /// Explicit transition table.
    pub fn next(self) -> Phase {
        match self {
            Phase::Phase1 => Phase::Phase2,
            Phase::Phase2 => Phase::Done,
            Phase::Done => Phase::Done,
        }
    }
}

/// Opacity at `t` seconds into a phase: ramps up over `fade_in`, holds at 1,
/// ramps down over `fade_out`. Clamped to `[0, 1]`.
pub fn splash_alpha(config: &SplashConfig, t: f32) -> f32 {
    let alpha = if t < config.fade_in {
        t / config.fade_in
    } else if t < config.fade_in + config.hold {
        1.0
    } else {
        1.0 - (t - config.fade_in - config.hold) / config.fade_out
    };
    alpha.clamp(0.0, 1.0)
}

/// Timed intro shown before the script's main entry point.
pub struct SplashSequencer<T> {
    config: SplashConfig,
    phase: Phase,
    elapsed: f32,
    logos: Option<[Option<T>; 2]>,
}

impl<T: Copy> SplashSequencer<T> {
    pub fn new(config: SplashConfig) -> Self {
        Self { config, phase: Phase::Phase1, elapsed: 0.0, logos: None }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn is_done(&self) -> bool {
        self.phase == Phase::Done
    }

    /// Loads the logos on first use and rewinds to the first phase.
    pub fn start<P: Platform<Texture = T>>(&mut self, platform: &mut P) {
        if self.logos.is_none() {
            let [a, b] = &self.config.logos;
            let load = |p: &mut P, src: &crate::AssetSource| src.load().and_then(|bytes| p.load_texture(&bytes));
            let first = load(platform, a);
            let second = load(platform, b);
            if first.is_none() || second.is_none() {
                log::warn!("splash: logo missing; it will be skipped");
            }
            self.logos = Some([first, second]);
        }
        self.phase = Phase::Phase1;
        self.elapsed = 0.0;
    }

    /// Accumulates `delta`; advances the phase once a full phase has elapsed.
    /// Returns `true` when the sequence is done.
    pub fn update(&mut self, delta: f32) -> bool {
        if self.phase == Phase::Done {
            return true;
        }
        self.elapsed += delta.max(0.0);
        if self.elapsed >= self.config.phase_duration() {
            self.elapsed = 0.0;
            self.phase = self.phase.next();
        }
        self.is_done()
    }

    pub fn alpha(&self) -> f32 {
        splash_alpha(&self.config, self.elapsed)
    }

    /// Renders the current phase as one frame.
    pub fn draw<P: Platform<Texture = T>>(&self, platform: &mut P, font: P::Font) {
        let alpha = self.alpha();
        platform.begin_drawing();
        match self.phase {
            Phase::Phase1 => self.draw_title(platform, font, alpha),
            Phase::Phase2 => self.draw_logos(platform, font, alpha),
            Phase::Done => {}
        }
        platform.end_drawing();
    }

    fn draw_title<P: Platform<Texture = T>>(&self, platform: &mut P, font: P::Font, alpha: f32) {
        let c = &self.config;
        platform.clear_background(c.title_background);

        // Grows from 95% to full size with the fade-in.
        let size = c.title_size * (0.95 + alpha * 0.05);
        let screen = platform.screen_size();
        let text = platform.measure_text(font, &c.title, size, c.title_spacing);
        let pos = Vec2::new((screen.x / 2.0).floor() - text.x / 2.0, (screen.y / 2.0).floor() - text.y / 2.0);
        platform.draw_text(font, &c.title, pos, size, c.title_spacing, Color::WHITE.fade(alpha));
    }

    fn draw_logos<P: Platform<Texture = T>>(&self, platform: &mut P, font: P::Font, alpha: f32) {
        let c = &self.config;
        platform.clear_background(Color::BLACK);

        let screen = platform.screen_size();
        let spacing = c.caption_size / 10.0;
        let caption = platform.measure_text(font, &c.caption, c.caption_size, spacing);
        let caption_pos = Vec2::new((screen.x / 2.0 - caption.x / 2.0).floor(), (screen.y / 2.0).floor() - 100.0);
        platform.draw_text(font, &c.caption, caption_pos, c.caption_size, spacing, Color::WHITE.fade(alpha));

        let logos = self.logos.unwrap_or([None, None]);
        let sizes = logos.map(|l| {
            l.and_then(|t| platform.texture_size(t))
                .map_or(Vec2::zero(), |(w, h)| fit_within(Vec2::new(w as f32, h as f32), c.max_logo_size))
        });

        let total = sizes[0].x + c.logo_spacing + sizes[1].x;
        let mut x = (screen.x / 2.0 - total / 2.0).floor();
        let y = (screen.y / 2.0).floor() - 20.0;
        let tint = Color::WHITE.fade(alpha);

        for (logo, size) in logos.into_iter().zip(sizes) {
            if let (Some(tex), Some((w, h))) = (logo, logo.and_then(|t| platform.texture_size(t))) {
                let source = Rect::new(0.0, 0.0, w as f32, h as f32);
                platform.draw_texture(tex, source, Rect::from_origin_size(Vec2::new(x, y), size), tint);
            }
            x += size.x + c.logo_spacing;
        }
    }

    /// Releases the logos. Only the first call after loading unloads them.
    pub fn finish<P: Platform<Texture = T>>(&mut self, platform: &mut P) {
        if let Some(logos) = self.logos.take() {
            for tex in logos.into_iter().flatten() {
                platform.unload_texture(tex);
            }
        }
    }
}

/// Scales `size` down so its larger side is at most `max`. Never upscales.
fn fit_within(size: Vec2, max: f32) -> Vec2 {
    let largest = size.max_element();
    if largest > max && largest > 0.0 {
        size * (max / largest)
    } else {
        size
    }
}

/// Runs the splash to completion or until the window is asked to close.
///
/// Logos are released exactly once on either path.
pub fn run_splash<P: Platform, E: ScriptEngine>(state: &mut RuntimeState<P, E>, config: SplashConfig) {
    let font = state.default_font().unwrap_or_else(|| state.platform().default_font());
    let mut splash = SplashSequencer::new(config);
    splash.start(state.platform_mut());

    let mut done = false;
    while !done && !state.platform_mut().should_close() {
        // Input during the splash never reaches the script.
        state.platform_mut().drain_events();
        let delta = state.platform().frame_time();
        done = splash.update(delta);
        splash.draw(state.platform_mut(), font);
    }

    if !done {
        log::info!("splash: cancelled by close request");
    }
    splash.finish(state.platform_mut());
    state.platform_mut().reset_frame_clock();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetSource;
    use crate::config::LogPolicy;
    use crate::mock::{CallLog, MockEngine, MockPlatform};

    fn cfg() -> SplashConfig {
        SplashConfig {
            logos: [AssetSource::Embedded(b"logo-a"), AssetSource::Embedded(b"logo-b")],
            ..SplashConfig::default()
        }
    }

    #[test]
    fn alpha_profile() {
        let c = cfg();
        assert_eq!(splash_alpha(&c, 0.0), 0.0);
        assert_eq!(splash_alpha(&c, 2.0), 1.0);
        assert_eq!(splash_alpha(&c, 0.8), 1.0);
        assert!(splash_alpha(&c, 4.1) < 1e-5);
        assert!((splash_alpha(&c, 0.4) - 0.5).abs() < 1e-6);
        assert_eq!(splash_alpha(&c, 10.0), 0.0);
    }

    #[test]
    fn alpha_is_monotonic_per_segment() {
        let c = cfg();
        let samples = |from: f32, to: f32| -> Vec<f32> {
            (0..=100).map(|i| splash_alpha(&c, from + (to - from) * i as f32 / 100.0)).collect()
        };
        assert!(samples(0.0, 0.79).windows(2).all(|w| w[0] <= w[1]));
        assert!(samples(0.8, 3.29).iter().all(|&a| a == 1.0));
        assert!(samples(3.3, 4.1).windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn phases_follow_transition_table() {
        assert_eq!(Phase::Phase1.next(), Phase::Phase2);
        assert_eq!(Phase::Phase2.next(), Phase::Done);
        assert_eq!(Phase::Done.next(), Phase::Done);
    }

    #[test]
    fn done_after_two_phases_of_any_delta_split() {
        for delta in [0.016_f32, 0.1, 0.25, 1.0, 5.0] {
            let mut s: SplashSequencer<u32> = SplashSequencer::new(cfg());
            let mut total = 0.0;
            let mut done = false;
            let mut ticks = 0;
            while !done {
                done = s.update(delta);
                total += delta;
                ticks += 1;
                assert!(ticks < 10_000);
            }
            assert!(total >= 4.1 * 2.0 - 1e-3 || delta >= 4.1, "delta {delta}: {total}");
            assert_eq!(s.phase(), Phase::Done);
        }
    }

    #[test]
    fn accumulator_resets_on_phase_change() {
        let mut s: SplashSequencer<u32> = SplashSequencer::new(cfg());
        s.update(4.0);
        assert_eq!(s.phase(), Phase::Phase1);
        s.update(0.2);
        assert_eq!(s.phase(), Phase::Phase2);
        assert_eq!(s.elapsed(), 0.0);
    }

    #[test]
    fn start_resets_unconditionally_and_loads_once() {
        let log = CallLog::default();
        let mut p = MockPlatform::new(log.clone());
        let mut s = SplashSequencer::new(cfg());

        s.start(&mut p);
        s.update(5.0);
        s.update(1.0);
        s.start(&mut p);

        assert_eq!(s.phase(), Phase::Phase1);
        assert_eq!(s.elapsed(), 0.0);
        assert_eq!(log.count("load_texture"), 2);
    }

    #[test]
    fn logos_released_exactly_once() {
        let log = CallLog::default();
        let mut p = MockPlatform::new(log.clone());
        let mut s = SplashSequencer::new(cfg());
        s.start(&mut p);
        s.finish(&mut p);
        s.finish(&mut p);
        assert_eq!(log.count("unload_texture"), 2);
    }

    #[test]
    fn missing_logo_is_not_released() {
        let log = CallLog::default();
        let mut p = MockPlatform::new(log.clone());
        let mut s = SplashSequencer::new(SplashConfig {
            logos: [AssetSource::Embedded(b"a"), AssetSource::Filesystem(Vec::new())],
            ..SplashConfig::default()
        });
        s.start(&mut p);
        s.finish(&mut p);
        assert_eq!(log.count("unload_texture"), 1);
    }

    #[test]
    fn large_logos_are_downscaled_by_largest_side() {
        assert_eq!(fit_within(Vec2::new(400.0, 100.0), 200.0), Vec2::new(200.0, 50.0));
        assert_eq!(fit_within(Vec2::new(100.0, 400.0), 200.0), Vec2::new(50.0, 200.0));
        assert_eq!(fit_within(Vec2::new(64.0, 32.0), 200.0), Vec2::new(64.0, 32.0));
    }

    #[test]
    fn draws_logos_in_phase_two() {
        let log = CallLog::default();
        let mut p = MockPlatform::new(log.clone());
        let mut s = SplashSequencer::new(cfg());
        s.start(&mut p);
        s.update(4.2);
        s.update(1.0);
        assert_eq!(s.phase(), Phase::Phase2);

        log.clear();
        s.draw(&mut p, 0);
        assert_eq!(log.count("draw_texture"), 2);
        assert_eq!(log.count("draw_text("), 1);
        assert_eq!(log.calls().first().map(String::as_str), Some("begin_drawing"));
        assert_eq!(log.calls().last().map(String::as_str), Some("end_drawing"));
    }

    fn splash_state(log: &CallLog, close_after: Option<usize>) -> RuntimeState<MockPlatform, MockEngine> {
        let mut platform = MockPlatform::new(log.clone());
        platform.close_after = close_after;
        platform.frame_time = 0.5;
        let policy = LogPolicy { debug_build: false, verbose_flag: false };
        let mut state = RuntimeState::new(platform, "/".to_string(), policy, Vec2::new(800.0, 600.0));
        state.has_window = true;
        state
    }

    #[test]
    fn runs_both_phases_to_completion() {
        let log = CallLog::default();
        let mut state = splash_state(&log, None);
        run_splash(&mut state, cfg());

        // 0.5 s ticks: 9 ticks per 4.1 s phase.
        assert_eq!(log.count("should_close"), 18);
        assert_eq!(log.count("unload_texture"), 2);
    }

    #[test]
    fn close_request_cancels_before_done() {
        let log = CallLog::default();
        let mut state = splash_state(&log, Some(3));
        run_splash(&mut state, cfg());

        assert_eq!(log.count("should_close"), 3);
        assert_eq!(log.count("end_drawing"), 2);
        assert_eq!(log.count("unload_texture"), 2);
    }

    #[test]
    fn frame_clock_restarts_after_logo_release() {
        let log = CallLog::default();
        let mut state = splash_state(&log, Some(2));
        run_splash(&mut state, cfg());

        let calls = log.calls();
        let last_unload = calls.iter().rposition(|c| c.starts_with("unload_texture")).unwrap();
        assert_eq!(calls.last().map(String::as_str), Some("reset_frame_clock"));
        assert!(last_unload < calls.len() - 1);
        assert_eq!(log.count("reset_frame_clock"), 1);
    }
}
