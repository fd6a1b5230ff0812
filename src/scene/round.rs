//! Star-collecting game scene (tutorial and random game)

use std::time::Duration;

use super::{Scene, SceneId};
use crate::error::{Result, SimError};
use crate::input::{GameEvent, TickInput};
use crate::render::{Drawable, DrawableKind, Hud, RenderHint};
use crate::settings::Settings;
use crate::sim::{
    Countdown, GameMode, Level, LevelConfig, PortalStatus, SimContext, World, apply_events, tick,
};

/// One game mode played on one level.
///
/// Everything a run needs (player, stars, timer) lives in `world` and
/// `countdown`, created by `init` and dropped by `end`.
#[derive(Debug)]
pub struct GameScene {
    mode: GameMode,
    level_config: Option<LevelConfig>,
    settings: Settings,
    world: Option<World>,
    countdown: Option<Countdown>,
    show_help: bool,
    /// Completed `init` calls, mixed into the star seed
    runs: u64,
}

impl GameScene {
    pub fn new(mode: GameMode, level_config: Option<LevelConfig>, settings: Settings) -> Self {
        Self {
            mode,
            level_config,
            settings,
            world: None,
            countdown: None,
            show_help: false,
            runs: 0,
        }
    }

    pub fn id(&self) -> SceneId {
        match self.mode {
            GameMode::Tutorial => SceneId::Tutorial,
            GameMode::RandomGame => SceneId::RandomGame,
        }
    }

    pub fn world(&self) -> Option<&World> {
        self.world.as_ref()
    }

    pub fn world_mut(&mut self) -> Option<&mut World> {
        self.world.as_mut()
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.countdown.as_ref().map_or(0, Countdown::elapsed)
    }

    pub fn show_help(&self) -> bool {
        self.show_help
    }
}

impl Scene for GameScene {
    fn init(&mut self, _ctx: &mut SimContext) -> Result<()> {
        let config = self
            .level_config
            .as_ref()
            .ok_or(SimError::MissingLevel { scene: self.id() })?;
        let level = Level::from_config(config)?;
        let seed = self.settings.seed.wrapping_add(self.runs);
        let world = World::new(self.mode, level, &self.settings, seed)?;
        let countdown = Countdown::start(self.settings.countdown)?;

        log::info!(
            "{:?} started: {} stars, {}s, seed {}",
            self.mode,
            world.stars.len(),
            world.duration_secs,
            seed
        );

        self.world = Some(world);
        self.countdown = Some(countdown);
        self.show_help = false;
        self.runs += 1;
        Ok(())
    }

    fn handle_events(&mut self, input: &TickInput, ctx: &mut SimContext) -> Option<SceneId> {
        let world = self.world.as_mut()?;

        for &event in &input.events {
            match event {
                GameEvent::Quit => return Some(SceneId::MainMenu),
                GameEvent::Validate if world.is_ended() => return Some(SceneId::MainMenu),
                GameEvent::Help => self.show_help = !self.show_help,
                _ => {}
            }
        }

        apply_events(world, input, ctx);
        None
    }

    fn update(&mut self, dt: Duration, ctx: &SimContext) {
        let (Some(world), Some(countdown)) = (self.world.as_mut(), self.countdown.as_mut()) else {
            return;
        };

        countdown.advance(dt, ctx.paused || world.is_ended());
        tick(world, dt, countdown.elapsed(), ctx);

        if world.is_ended() {
            countdown.stop();
        }
    }

    fn end(&mut self) {
        if let Some(mut countdown) = self.countdown.take() {
            countdown.stop();
        }
        if let Some(world) = self.world.take() {
            log::debug!("{:?} released with score {}", self.mode, world.score);
        }
        self.show_help = false;
    }

    fn render(&self, out: &mut Vec<Drawable>) {
        let Some(world) = self.world.as_ref() else {
            return;
        };

        out.extend(
            world
                .level
                .walls()
                .iter()
                .map(|w| Drawable::fixed(DrawableKind::Wall, w.pos(), w.size(), RenderHint::Normal)),
        );

        for star in &world.stars {
            let rect = star.rect();
            out.push(Drawable::fixed(
                DrawableKind::Star,
                rect.pos(),
                rect.size(),
                RenderHint::Normal,
            ));
        }

        let player = &world.player;
        let portal = &player.portal;
        let entry = portal.entry_rect();
        match portal.status {
            PortalStatus::Idle => {}
            PortalStatus::Triggered => out.push(Drawable::fixed(
                DrawableKind::PortalEntry,
                entry.pos(),
                entry.size(),
                RenderHint::Pending,
            )),
            PortalStatus::Linked => {
                let exit = portal.exit_rect();
                out.push(Drawable::fixed(
                    DrawableKind::PortalEntry,
                    entry.pos(),
                    entry.size(),
                    RenderHint::Linked,
                ));
                out.push(Drawable::fixed(
                    DrawableKind::PortalExit,
                    exit.pos(),
                    exit.size(),
                    RenderHint::Linked,
                ));
            }
        }

        if let Some(hook) = player.hook.as_ref() {
            out.push(Drawable {
                kind: DrawableKind::Hook,
                pos: hook.body.pos,
                prev_pos: hook.body.prev_pos,
                size: hook.body.size,
                hint: if hook.hooked {
                    RenderHint::Latched
                } else {
                    RenderHint::Flying
                },
            });
        }

        out.push(Drawable {
            kind: DrawableKind::Player,
            pos: player.body.pos,
            prev_pos: player.body.prev_pos,
            size: player.body.size,
            hint: if player.colliding {
                RenderHint::Colliding
            } else {
                RenderHint::Normal
            },
        });
    }

    fn hud(&self) -> Hud {
        let Some(world) = self.world.as_ref() else {
            return Hud::default();
        };
        Hud {
            score: world.score,
            elapsed_secs: self.elapsed_secs(),
            duration_secs: world.duration_secs,
            outcome: world.outcome,
            show_help: self.show_help,
            paused: false,
            menu: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::PORTAL_SIZE;
    use crate::settings::CountdownMode;
    use crate::sim::{RoundOutcome, Star};
    use glam::Vec2;

    const DT: Duration = Duration::from_millis(10);

    fn arena() -> LevelConfig {
        let mut rows = vec![format!("#{}#", ".".repeat(38)); 21];
        rows.push("#".repeat(40));
        let rows: Vec<&str> = rows.iter().map(String::as_str).collect();
        LevelConfig::from_ascii(&rows, 32, 32)
    }

    fn scene(mode: GameMode, settings: Settings) -> GameScene {
        let mut scene = GameScene::new(mode, Some(arena()), settings);
        scene.init(&mut SimContext::new(true)).unwrap();
        scene
    }

    fn send(scene: &mut GameScene, events: &[GameEvent], ctx: &mut SimContext) -> Option<SceneId> {
        scene.handle_events(&TickInput::new(events.to_vec(), Vec2::ZERO), ctx)
    }

    #[test]
    fn test_init_without_level_fails() {
        let mut scene = GameScene::new(GameMode::RandomGame, None, Settings::default());
        let err = scene.init(&mut SimContext::default()).unwrap_err();
        assert!(matches!(
            err,
            SimError::MissingLevel {
                scene: SceneId::RandomGame
            }
        ));
        assert!(scene.world().is_none());
    }

    #[test]
    fn test_init_builds_world() {
        let scene = scene(GameMode::RandomGame, Settings::default());
        let world = scene.world().unwrap();
        assert_eq!(world.stars.len(), Settings::default().random_game_stars);
        assert_eq!(world.player.body.pos, Vec2::new(32.0, 32.0));
        assert_eq!(scene.elapsed_secs(), 0);
    }

    #[test]
    fn test_reinit_reseeds_stars() {
        let mut scene = scene(GameMode::RandomGame, Settings::default());
        let first = scene.world().unwrap().stars.clone();
        scene.end();
        assert!(scene.world().is_none());

        scene.init(&mut SimContext::default()).unwrap();
        assert_ne!(scene.world().unwrap().stars, first);
    }

    #[test]
    fn test_quit_returns_to_menu() {
        let mut scene = scene(GameMode::Tutorial, Settings::default());
        let mut ctx = SimContext::new(true);
        assert_eq!(send(&mut scene, &[GameEvent::Quit], &mut ctx), Some(SceneId::MainMenu));
    }

    #[test]
    fn test_validate_only_after_round_end() {
        let mut scene = scene(GameMode::RandomGame, Settings::default());
        let mut ctx = SimContext::new(true);
        assert_eq!(send(&mut scene, &[GameEvent::Validate], &mut ctx), None);

        scene.world_mut().unwrap().end_round(false, 30);
        assert_eq!(
            send(&mut scene, &[GameEvent::Validate], &mut ctx),
            Some(SceneId::MainMenu)
        );
    }

    #[test]
    fn test_help_toggles() {
        let mut scene = scene(GameMode::Tutorial, Settings::default());
        let mut ctx = SimContext::new(true);
        send(&mut scene, &[GameEvent::Help], &mut ctx);
        assert!(scene.show_help());
        assert!(scene.hud().show_help);
        send(&mut scene, &[GameEvent::Help], &mut ctx);
        assert!(!scene.show_help());
    }

    #[test]
    fn test_time_up_ends_round() {
        let settings = Settings {
            duration_secs: 1,
            ..Settings::default()
        };
        let mut scene = scene(GameMode::RandomGame, settings);
        // keep stars out of reach
        scene.world_mut().unwrap().stars = vec![Star {
            pos: Vec2::new(1100.0, 100.0),
        }];

        let ctx = SimContext::new(true);
        for _ in 0..99 {
            scene.update(DT, &ctx);
        }
        assert!(!scene.world().unwrap().is_ended());

        scene.update(DT, &ctx);
        assert_eq!(scene.world().unwrap().outcome, Some(RoundOutcome::TimeUp));
        assert_eq!(scene.hud().elapsed_secs, 1);
    }

    #[test]
    fn test_paused_timer_holds() {
        let mut scene = scene(GameMode::Tutorial, Settings::default());
        let mut ctx = SimContext::new(true);
        send(&mut scene, &[GameEvent::Pause], &mut ctx);
        assert!(ctx.paused);

        for _ in 0..300 {
            scene.update(DT, &ctx);
        }
        assert_eq!(scene.elapsed_secs(), 0);
    }

    #[test]
    fn test_end_stops_wall_clock_countdown() {
        let settings = Settings {
            countdown: CountdownMode::WallClock,
            ..Settings::default()
        };
        let mut scene = scene(GameMode::Tutorial, settings);
        assert!(matches!(
            scene.countdown,
            Some(Countdown::WallClock(ref countdown)) if countdown.is_running()
        ));

        scene.end();
        assert!(scene.countdown.is_none());
        assert!(scene.world().is_none());
        assert_eq!(scene.elapsed_secs(), 0);
    }

    #[test]
    fn test_render_linked_portal() {
        let mut scene = scene(GameMode::Tutorial, Settings::default());
        let portal = &mut scene.world_mut().unwrap().player.portal;
        portal.trigger(Vec2::new(600.0, 300.0));
        portal.trigger(Vec2::new(900.0, 300.0));

        let mut out = Vec::new();
        scene.render(&mut out);
        let exit = out
            .iter()
            .find(|d| d.kind == DrawableKind::PortalExit)
            .unwrap();
        assert_eq!(exit.pos, Vec2::new(900.0, 300.0));
        assert_eq!(exit.size, PORTAL_SIZE);
        assert_eq!(exit.hint, RenderHint::Linked);
    }

    #[test]
    fn test_render_lists_drawables() {
        let scene = scene(GameMode::Tutorial, Settings::default());
        let mut out = Vec::new();
        scene.render(&mut out);

        let world = scene.world().unwrap();
        let count = |kind| out.iter().filter(|d| d.kind == kind).count();
        assert_eq!(count(DrawableKind::Wall), world.level.walls().len());
        assert_eq!(count(DrawableKind::Star), world.stars.len());
        assert_eq!(count(DrawableKind::Player), 1);
        assert_eq!(count(DrawableKind::Hook), 0);
        assert_eq!(count(DrawableKind::PortalEntry), 0);
    }
}
