//! Hookshot - deterministic simulation core of a 2D grappling-hook platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, portals, stars, clock)
//! - `scene`: Scene state machine (main menu, tutorial, random game)
//! - `input`: Raw device state to semantic event translation
//! - `game`: Fixed-timestep frame driver
//! - `render`: Render snapshot handed to the external renderer
//! - `settings`: Data-driven configuration

pub mod error;
pub mod game;
pub mod input;
pub mod render;
pub mod scene;
pub mod settings;
pub mod sim;

pub use error::{Result, SimError};
pub use game::Game;
pub use input::{Control, DeviceState, GameEvent, InputMode, InputTranslator, TickInput};
pub use render::{Drawable, DrawableKind, Hud, RenderHint, RenderSnapshot};
pub use scene::SceneId;
pub use settings::{CountdownMode, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Fixed simulation timestep (100 Hz physics)
    pub const SIM_DT: f64 = 0.01;
    /// Largest frame time fed to the accumulator (spiral of death guard)
    pub const MAX_FRAME_TIME: f64 = 0.25;

    /// Screen bounds used for star placement
    pub const SCREEN_WIDTH: f32 = 1280.0;
    pub const SCREEN_HEIGHT: f32 = 720.0;

    /// Horizontal velocity multiplier applied every tick
    pub const FRICTION: f32 = 0.80;
    /// Added to vertical velocity every tick (y grows downward)
    pub const GRAVITY: f32 = 10.0;

    /// Player defaults
    pub const PLAYER_SPAWN: Vec2 = Vec2::new(32.0, 32.0);
    pub const PLAYER_SIZE: Vec2 = Vec2::new(32.0, 64.0);
    /// Impulse added per tick while a movement control is held
    pub const PLAYER_SPEED: f32 = 100.0;
    pub const PLAYER_JUMP_SPEED: f32 = 550.0;
    /// Dash multiplies the current horizontal velocity
    pub const DASH_FACTOR: f32 = 8.0;
    pub const DASH_COOLDOWN_MS: u64 = 500;

    /// Hook defaults
    pub const HOOK_SIZE: Vec2 = Vec2::new(32.0, 32.0);
    pub const HOOK_SPEED: f32 = 1800.0;
    pub const HOOK_HORIZONTAL_FORCE: f32 = 60.0;
    pub const HOOK_VERTICAL_FORCE: f32 = 30.0;
    /// Vertical pull scale when the pull points toward +y
    pub const HOOK_VERTICAL_DAMPING: f32 = 0.3;
    /// Horizontal pull scale when the player holds the pull direction
    pub const HOOK_ASSIST: f32 = 0.95;
    /// Horizontal pull scale otherwise
    pub const HOOK_RESIST: f32 = 0.75;

    /// Portal defaults
    pub const PORTAL_SIZE: Vec2 = Vec2::new(32.0, 32.0);
    pub const PORTAL_STEP: f32 = 10.0;
    pub const PORTAL_MAX_STEPS: usize = 10_000;
    pub const PORTAL_COOLDOWN_MS: u64 = 500;

    /// Penetration below this on both axes is ignored
    pub const COLLISION_NOISE: f32 = 1.0;

    /// Star pickups
    pub const STAR_SIZE: Vec2 = Vec2::new(32.0, 32.0);
    pub const STAR_SCORE: u64 = 10;
    pub const RANDOM_GAME_STARS: usize = 20;
    pub const TUTORIAL_STARS: usize = 2;
    /// Rejection sampling budget per star
    pub const MAX_STAR_ATTEMPTS: u32 = 10_000;

    /// Round length in seconds
    pub const GAME_DURATION_SECS: u32 = 30;

    /// Minimum real time between two pause/slow-motion toggles
    pub const TOGGLE_DEBOUNCE_MS: u64 = 100;
}

/// Unit vector pointing from `from` toward `to`.
///
/// Coincident points yield `(1, 0)`, matching `atan2(0, 0) == 0`.
#[inline]
pub fn direction_between(from: Vec2, to: Vec2) -> Vec2 {
    let delta = to - from;
    let angle = delta.y.atan2(delta.x);
    Vec2::new(angle.cos(), angle.sin())
}
