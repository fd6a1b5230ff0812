//! Render boundary
//!
//! The core never draws. Each frame it hands the external renderer the
//! previous and current state of every drawable plus the clock's
//! interpolation factor.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::scene::SceneId;
use crate::sim::RoundOutcome;

/// What a drawable represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawableKind {
    Wall,
    Player,
    Hook,
    PortalEntry,
    PortalExit,
    Star,
}

/// Status/colour hint for the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RenderHint {
    #[default]
    Normal,
    /// Player touched a wall this tick
    Colliding,
    /// Hook still in flight
    Flying,
    /// Hook attached to a wall
    Latched,
    /// Portal endpoint waiting for its pair
    Pending,
    /// Portal endpoint linked
    Linked,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Drawable {
    pub kind: DrawableKind,
    pub pos: Vec2,
    pub prev_pos: Vec2,
    pub size: Vec2,
    pub hint: RenderHint,
}

impl Drawable {
    /// Static drawable (no motion between ticks)
    pub fn fixed(kind: DrawableKind, pos: Vec2, size: Vec2, hint: RenderHint) -> Self {
        Self {
            kind,
            pos,
            prev_pos: pos,
            size,
            hint,
        }
    }

    /// Position blended between the previous and current tick
    pub fn lerp(&self, alpha: f32) -> Vec2 {
        self.prev_pos.lerp(self.pos, alpha)
    }
}

/// Menu state for the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuView {
    pub items: Vec<String>,
    pub selected: usize,
}

/// Heads-up display values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hud {
    pub score: u64,
    pub elapsed_secs: u32,
    pub duration_secs: u32,
    pub outcome: Option<RoundOutcome>,
    pub show_help: bool,
    pub paused: bool,
    pub menu: Option<MenuView>,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSnapshot {
    /// Interpolation factor in `[0, 1)`
    pub alpha: f64,
    pub scene: SceneId,
    pub drawables: Vec<Drawable>,
    pub hud: Hud,
}
