//! Kinematic body shared by the player and the hook

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;

/// Position, velocity and fixed size, plus last tick's values for
/// render interpolation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub prev_pos: Vec2,
    pub vel: Vec2,
    pub prev_vel: Vec2,
    pub size: Vec2,
}

impl Body {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            prev_pos: pos,
            vel: Vec2::ZERO,
            prev_vel: Vec2::ZERO,
            size,
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    /// Remember the current state before a tick mutates it
    pub fn record_previous(&mut self) {
        self.prev_pos = self.pos;
        self.prev_vel = self.vel;
    }

    /// Semi-implicit Euler position step
    #[inline]
    pub fn integrate(&mut self, dt: f32) {
        self.pos += self.vel * dt;
    }

    /// Position blended between the previous and current tick
    pub fn lerp_pos(&self, alpha: f32) -> Vec2 {
        self.prev_pos.lerp(self.pos, alpha)
    }
}
