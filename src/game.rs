//! Frame driver
//!
//! Owns the scenes, the input translator and the fixed clock. The outer
//! loop feeds it one device snapshot and one real frame duration per
//! frame; it runs as many fixed ticks as the frame allows and exposes a
//! render snapshot interpolated between the last two ticks.

use std::time::Duration;

use crate::error::{Result, SimError};
use crate::input::{DeviceState, InputTranslator};
use crate::render::RenderSnapshot;
use crate::scene::{GameScene, MainMenuScene, SceneId, SceneManager};
use crate::settings::Settings;
use crate::sim::{FixedClock, GameMode, LevelConfig, SimContext};

pub struct Game {
    settings: Settings,
    scenes: SceneManager,
    input: InputTranslator,
    clock: FixedClock,
    ctx: SimContext,
}

impl Game {
    /// Register every scene and enter the main menu.
    ///
    /// Game scenes without a level can still be registered; selecting them
    /// fails at init and drops back to the menu.
    pub fn new(settings: Settings, level: Option<LevelConfig>) -> Result<Self> {
        let mut scenes = SceneManager::new(SceneId::MainMenu);
        scenes.register(SceneId::MainMenu, MainMenuScene::new());
        scenes.register(
            SceneId::Tutorial,
            GameScene::new(GameMode::Tutorial, level.clone(), settings.clone()),
        );
        scenes.register(
            SceneId::RandomGame,
            GameScene::new(GameMode::RandomGame, level, settings.clone()),
        );

        let mut ctx = SimContext::new(settings.debug);
        scenes.start(&mut ctx)?;

        log::info!(
            "Game ready (seed {}, countdown {})",
            settings.seed,
            settings.countdown.as_str()
        );

        Ok(Self {
            settings,
            scenes,
            input: InputTranslator::new(),
            clock: FixedClock::default(),
            ctx,
        })
    }

    /// Run one rendered frame.
    ///
    /// `now_ms` is a monotonic real-time stamp used for cooldowns and
    /// toggle debouncing. Returns the interpolation factor for rendering.
    /// A failed scene switch is reported after the frame completes; the
    /// game is already back on the main menu by then.
    pub fn frame(&mut self, device: &DeviceState, frame_time: Duration, now_ms: u64) -> Result<f64> {
        self.ctx.now_ms = now_ms;
        let scale = self.settings.time_scale(self.ctx.slow_motion);
        let scaled = if scale < 1.0 {
            frame_time.mul_f64(scale)
        } else {
            frame_time
        };

        let scenes = &mut self.scenes;
        let input = &mut self.input;
        let ctx = &mut self.ctx;
        let mut failure: Option<SimError> = None;

        self.clock.advance(scaled, |dt| {
            if scenes.should_exit() {
                return;
            }

            input.update(device, scenes.input_mode(), ctx);
            scenes.handle_events(input.input(), ctx);
            scenes.update(dt, ctx);
            input.clear();

            if let Err(e) = scenes.process_transitions(ctx) {
                failure.get_or_insert(e);
            }
        });

        match failure {
            Some(e) => Err(e),
            None => Ok(self.clock.alpha()),
        }
    }

    /// Polled once per frame by the outer loop
    pub fn should_exit(&self) -> bool {
        self.scenes.should_exit()
    }

    pub fn current_scene(&self) -> SceneId {
        self.scenes.current()
    }

    pub fn context(&self) -> &SimContext {
        &self.ctx
    }

    pub fn clock(&self) -> &FixedClock {
        &self.clock
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        let mut drawables = Vec::new();
        self.scenes.render(&mut drawables);

        let mut hud = self.scenes.hud();
        hud.paused = self.ctx.paused;

        RenderSnapshot {
            alpha: self.clock.alpha(),
            scene: self.scenes.current(),
            drawables,
            hud,
        }
    }
}
