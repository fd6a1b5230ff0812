//! Player character: movement commands, hook steering and integration
//!
//! Hook steering is modelled on the Teeworlds hook: the pull is split into a
//! horizontal and a vertical force, the downward pull is weakened so hooks
//! lift the player onto platforms, and the horizontal pull is stronger when
//! the player already moves that way.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::collision::{Side, resolve_body};
use super::geometry::Rect;
use super::hook::Hook;
use super::portal::{Portal, march_box};
use crate::consts::*;
use crate::direction_between;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    /// Standing on a surface; only a bottom-side resolution sets it
    pub can_jump: bool,
    /// Present while the hook is active
    pub hook: Option<Hook>,
    pub portal: Portal,
    pub last_dash_ms: Option<u64>,
    pub last_portal_ms: Option<u64>,
    /// Horizontal direction held this tick (-1, 0 or 1)
    held_direction: f32,
    /// Whether any wall was resolved during the last tick
    pub colliding: bool,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            body: Body::new(pos, PLAYER_SIZE),
            can_jump: true,
            hook: None,
            portal: Portal::default(),
            last_dash_ms: None,
            last_portal_ms: None,
            held_direction: 0.0,
            colliding: false,
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        self.body.rect()
    }

    pub fn hook_active(&self) -> bool {
        self.hook.is_some()
    }

    //--- Commands ----------------------------------------------------------

    pub fn move_left(&mut self) {
        self.body.vel.x -= PLAYER_SPEED;
        self.held_direction -= 1.0;
    }

    pub fn move_right(&mut self) {
        self.body.vel.x += PLAYER_SPEED;
        self.held_direction += 1.0;
    }

    pub fn jump(&mut self) {
        if self.can_jump {
            self.can_jump = false;
            self.body.vel.y -= PLAYER_JUMP_SPEED;
        }
    }

    /// Multiply horizontal velocity; returns `false` while on cooldown
    pub fn dash(&mut self, now_ms: u64) -> bool {
        if !cooldown_elapsed(self.last_dash_ms, now_ms, DASH_COOLDOWN_MS) {
            return false;
        }
        self.last_dash_ms = Some(now_ms);
        self.body.vel.x *= DASH_FACTOR;
        true
    }

    /// Launch the hook toward `target` unless one is already out
    pub fn launch_hook(&mut self, target: Vec2) {
        if self.hook.is_none() {
            self.hook = Some(Hook::launch(self.body.pos, target));
        }
    }

    pub fn stop_hook(&mut self) {
        self.hook = None;
    }

    /// Shoot a portal toward `target`.
    ///
    /// A copy of the player's box marches toward the target until it meets
    /// a wall; the snapped position feeds the portal state machine. Returns
    /// `false` on cooldown, when nothing was hit or when the exit was
    /// rejected.
    pub fn fire_portal(&mut self, target: Vec2, walls: &[Rect], now_ms: u64) -> bool {
        if !cooldown_elapsed(self.last_portal_ms, now_ms, PORTAL_COOLDOWN_MS) {
            return false;
        }
        self.last_portal_ms = Some(now_ms);

        let dir = direction_between(self.body.pos, target);
        match march_box(self.body.pos, self.body.size, dir, walls) {
            Some(pos) => self.portal.trigger(pos),
            None => {
                log::debug!("Portal shot toward {:?} hit nothing", target);
                false
            }
        }
    }

    //--- Simulation --------------------------------------------------------

    /// Hook pull for this tick, if latched
    pub fn hook_force(&self) -> Option<Vec2> {
        let hook = self.hook.as_ref().filter(|h| h.hooked)?;
        let dir = direction_between(self.body.pos, hook.body.pos);
        let mut pull = Vec2::new(dir.x * HOOK_HORIZONTAL_FORCE, dir.y * HOOK_VERTICAL_FORCE);

        // +y is down: only the pull toward the floor is weakened
        if pull.y > 0.0 {
            pull.y *= HOOK_VERTICAL_DAMPING;
        }

        if pull.x * self.held_direction > 0.0 {
            pull.x *= HOOK_ASSIST;
        } else {
            pull.x *= HOOK_RESIST;
        }

        Some(pull)
    }

    /// Steering, friction, gravity, then position
    pub fn update(&mut self, dt: f32) {
        if let Some(pull) = self.hook_force() {
            self.body.vel += pull;
        }
        if let Some(hook) = self.hook.as_mut() {
            hook.update(dt);
        }

        self.body.vel.x *= FRICTION;
        self.body.vel.y += GRAVITY;
        self.body.integrate(dt);

        self.held_direction = 0.0;
    }

    /// Resolve the player and its hook against every wall
    pub fn resolve_collisions(&mut self, walls: &[Rect]) {
        self.colliding = false;
        for wall in walls {
            if let Some(side) = resolve_body(&mut self.body, wall) {
                self.colliding = true;
                if side == Side::Bottom {
                    self.can_jump = true;
                }
            }
        }

        if let Some(hook) = self.hook.as_mut() {
            hook.resolve_collisions(walls);
        }
    }

    /// Move to the portal exit when touching a linked entry
    pub fn apply_portal(&mut self) -> bool {
        let Some(exit) = self.portal.teleport_target(&self.rect()) else {
            return false;
        };
        self.body.pos = exit;
        // no interpolation across the jump
        self.body.prev_pos = exit;
        self.hook = None;
        log::debug!("Player teleported to {:?}", exit);
        true
    }
}

fn cooldown_elapsed(last_ms: Option<u64>, now_ms: u64, cooldown_ms: u64) -> bool {
    last_ms.is_none_or(|last| now_ms.saturating_sub(last) > cooldown_ms)
}
