//! Grappling hook projectile
//!
//! The hook flies in a straight line until it touches a wall, then sticks
//! there and pulls the player toward it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::collision::{Side, resolve_body};
use super::geometry::Rect;
use crate::consts::*;
use crate::direction_between;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hook {
    pub body: Body,
    /// Set once the hook has touched a wall
    pub hooked: bool,
}

impl Hook {
    /// Launch from `origin` toward `target` at hook speed
    pub fn launch(origin: Vec2, target: Vec2) -> Self {
        let mut body = Body::new(origin, HOOK_SIZE);
        body.vel = direction_between(origin, target) * HOOK_SPEED;
        Self {
            body,
            hooked: false,
        }
    }

    /// Free flight; a latched hook stays put
    pub fn update(&mut self, dt: f32) {
        if !self.hooked {
            self.body.integrate(dt);
        }
    }

    /// Stick to the first wall the hook overlaps
    pub fn resolve_collisions(&mut self, walls: &[Rect]) -> Option<Side> {
        if self.hooked {
            return None;
        }
        let side = walls.iter().find_map(|wall| resolve_body(&mut self.body, wall))?;
        self.body.vel = Vec2::ZERO;
        self.hooked = true;
        Some(side)
    }
}
