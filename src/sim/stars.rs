//! Star pickups and their rejection-sampled placement

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometry::{Level, Rect};
use crate::consts::*;
use crate::error::{Result, SimError};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Star {
    pub pos: Vec2,
}

impl Star {
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, STAR_SIZE)
    }
}

/// Draw one star position clear of walls and existing stars.
///
/// Gives up after `MAX_STAR_ATTEMPTS` rejected samples.
pub fn spawn_star<R: Rng>(rng: &mut R, bounds: Vec2, level: &Level, stars: &[Star]) -> Option<Star> {
    // keep the whole star inside the sampled area
    let max_x = (bounds.x - STAR_SIZE.x).max(1.0) as u32;
    let max_y = (bounds.y - STAR_SIZE.y).max(1.0) as u32;

    for _ in 0..MAX_STAR_ATTEMPTS {
        let star = Star {
            pos: Vec2::new(
                rng.random_range(0..max_x) as f32,
                rng.random_range(0..max_y) as f32,
            ),
        };
        let rect = star.rect();
        if level.overlaps_any(&rect) || stars.iter().any(|s| s.rect().overlaps(&rect)) {
            continue;
        }
        return Some(star);
    }

    None
}

/// Place `count` stars, each by rejection sampling
pub fn place_stars<R: Rng>(rng: &mut R, count: usize, bounds: Vec2, level: &Level) -> Result<Vec<Star>> {
    let mut stars = Vec::with_capacity(count);
    for _ in 0..count {
        match spawn_star(rng, bounds, level, &stars) {
            Some(star) => stars.push(star),
            None => {
                return Err(SimError::StarPlacement {
                    requested: count,
                    placed: stars.len(),
                    attempts: MAX_STAR_ATTEMPTS,
                });
            }
        }
    }
    log::debug!("Placed {} stars", stars.len());
    Ok(stars)
}

/// Remove every star overlapping `rect`; returns how many were taken
pub fn collect_stars(stars: &mut Vec<Star>, rect: &Rect) -> usize {
    let before = stars.len();
    stars.retain(|star| !star.rect().overlaps(rect));
    before - stars.len()
}
