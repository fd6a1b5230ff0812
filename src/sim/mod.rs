//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Real time only through explicit inputs (frame time, `SimContext::now_ms`)
//! - No rendering or platform dependencies

pub mod body;
pub mod clock;
pub mod collision;
pub mod context;
pub mod countdown;
pub mod geometry;
pub mod hook;
pub mod player;
pub mod portal;
pub mod stars;
pub mod state;
pub mod tick;

pub use body::Body;
pub use clock::FixedClock;
pub use collision::{Penetration, Side, collision_side, resolve_body, snap_position};
pub use context::SimContext;
pub use countdown::{Countdown, TickCountdown, WallClockCountdown};
pub use geometry::{Level, LevelConfig, Rect, Tile, TileProperty};
pub use hook::Hook;
pub use player::Player;
pub use portal::{Portal, PortalStatus, march_box};
pub use stars::{Star, collect_stars, place_stars, spawn_star};
pub use state::{GameMode, RoundOutcome, World};
pub use tick::{apply_events, tick};
