//! Scene system
//!
//! Exactly one scene is active at a time. Scenes are registered once by id;
//! switching always tears down the outgoing scene before the incoming one is
//! set up.
//!
//! Per tick: `handle_events()` -> `update()` -> pending transition applied.

mod manager;
mod menu;
mod round;

pub use manager::SceneManager;
pub use menu::{MainMenuScene, MenuItem};
pub use round::GameScene;

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::input::{InputMode, TickInput};
use crate::render::{Drawable, Hud};
use crate::sim::SimContext;

/// Scene identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SceneId {
    MainMenu,
    Tutorial,
    RandomGame,
}

/// Scene lifecycle and per-tick hooks.
///
/// `init` allocates per-run state (player, stars, timers) and may fail on
/// bad configuration; `end` releases it.
pub trait Scene {
    fn init(&mut self, ctx: &mut SimContext) -> Result<()>;

    /// Consume this tick's events; returns a requested transition
    fn handle_events(&mut self, input: &TickInput, ctx: &mut SimContext) -> Option<SceneId>;

    fn update(&mut self, dt: Duration, ctx: &SimContext);

    /// Polled once per frame; `true` terminates the process loop
    fn should_exit(&self) -> bool {
        false
    }

    fn end(&mut self);

    /// Input mapping this scene expects
    fn input_mode(&self) -> InputMode {
        InputMode::Gameplay
    }

    /// Append this scene's drawables
    fn render(&self, _out: &mut Vec<Drawable>) {}

    fn hud(&self) -> Hud {
        Hud::default()
    }
}
