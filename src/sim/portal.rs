//! Two-shot teleport portal
//!
//! The first shot places the entry, the second places the exit and links
//! them. While linked, touching the entry moves the player to the exit.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{collision_side, snap_position};
use super::geometry::Rect;
use crate::consts::*;

/// Portal lifecycle: Idle -> Triggered -> Linked, then a new shot restarts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PortalStatus {
    #[default]
    Idle,
    /// Entry placed, waiting for the exit shot
    Triggered,
    /// Entry and exit both placed
    Linked,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Portal {
    pub entry: Vec2,
    pub exit: Vec2,
    pub status: PortalStatus,
}

impl Portal {
    pub fn entry_rect(&self) -> Rect {
        Rect::from_pos_size(self.entry, PORTAL_SIZE)
    }

    pub fn exit_rect(&self) -> Rect {
        Rect::from_pos_size(self.exit, PORTAL_SIZE)
    }

    /// Record a shot that landed at `pos`.
    ///
    /// Returns `false` when the shot was rejected because an exit would
    /// overlap the entry.
    pub fn trigger(&mut self, pos: Vec2) -> bool {
        match self.status {
            PortalStatus::Triggered => {
                if self.entry_rect().overlaps(&Rect::from_pos_size(pos, PORTAL_SIZE)) {
                    log::debug!("Portal exit at {:?} overlaps entry, ignored", pos);
                    return false;
                }
                self.exit = pos;
                self.status = PortalStatus::Linked;
                log::debug!("Portal linked {:?} -> {:?}", self.entry, self.exit);
            }
            PortalStatus::Idle | PortalStatus::Linked => {
                self.entry = pos;
                self.status = PortalStatus::Triggered;
                log::debug!("Portal entry placed at {:?}", pos);
            }
        }
        true
    }

    /// Exit position if `rect` touches a linked entry
    pub fn teleport_target(&self, rect: &Rect) -> Option<Vec2> {
        (self.status == PortalStatus::Linked && rect.overlaps(&self.entry_rect())).then_some(self.exit)
    }
}

/// March a box from `origin` along `dir` in fixed steps and return the
/// snapped position at the first wall it hits.
///
/// Steps that only graze a wall (below the collision noise threshold) keep
/// marching.
pub fn march_box(origin: Vec2, size: Vec2, dir: Vec2, walls: &[Rect]) -> Option<Vec2> {
    let step = dir * PORTAL_STEP;
    let mut pos = origin;

    for _ in 0..PORTAL_MAX_STEPS {
        pos += step;
        let rect = Rect::from_pos_size(pos, size);
        if let Some((wall, side)) = walls
            .iter()
            .find_map(|wall| collision_side(&rect, wall).map(|side| (wall, side)))
        {
            return Some(snap_position(pos, size, wall, side));
        }
    }

    None
}
