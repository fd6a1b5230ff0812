//! Round state for the star-collecting game modes

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geometry::Level;
use super::player::Player;
use super::stars::{Star, place_stars};
use crate::consts::*;
use crate::error::Result;
use crate::settings::Settings;

/// Rules that differ between the game scenes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    /// Endless practice: every pickup spawns a replacement
    Tutorial,
    /// Collect every star before the timer runs out
    RandomGame,
}

impl GameMode {
    pub fn star_count(&self, settings: &Settings) -> usize {
        match self {
            GameMode::Tutorial => settings.tutorial_stars,
            GameMode::RandomGame => settings.random_game_stars,
        }
    }

    pub fn respawns_stars(&self) -> bool {
        matches!(self, GameMode::Tutorial)
    }
}

/// How a round finished
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundOutcome {
    /// All stars collected; score multiplied by the seconds left
    Completed { multiplier: u32 },
    /// Timer ran out with stars remaining
    TimeUp,
}

/// Everything a game scene simulates
#[derive(Debug, Clone)]
pub struct World {
    pub mode: GameMode,
    pub level: Level,
    pub player: Player,
    pub stars: Vec<Star>,
    pub score: u64,
    pub duration_secs: u32,
    /// Set once the round has ended
    pub outcome: Option<RoundOutcome>,
    /// Area stars are sampled from: the level's extent, or the screen for
    /// a level without walls
    pub bounds: Vec2,
    pub(crate) rng: Pcg32,
}

impl World {
    /// Spawn the player and place the mode's stars
    pub fn new(mode: GameMode, level: Level, settings: &Settings, seed: u64) -> Result<Self> {
        let mut rng = Pcg32::seed_from_u64(seed);
        let bounds = match level.bounds() {
            b if b.x > 0.0 && b.y > 0.0 => b,
            _ => Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT),
        };
        let stars = place_stars(&mut rng, mode.star_count(settings), bounds, &level)?;

        Ok(Self {
            mode,
            level,
            player: Player::new(PLAYER_SPAWN),
            stars,
            score: 0,
            duration_secs: settings.duration_secs,
            outcome: None,
            bounds,
            rng,
        })
    }

    pub fn is_ended(&self) -> bool {
        self.outcome.is_some()
    }

    /// Finish the round, applying the time bonus when every star was taken
    pub fn end_round(&mut self, completed: bool, elapsed_secs: u32) {
        if self.is_ended() {
            return;
        }

        let outcome = if completed {
            let multiplier = self.duration_secs.saturating_sub(elapsed_secs);
            self.score *= u64::from(multiplier);
            RoundOutcome::Completed { multiplier }
        } else {
            RoundOutcome::TimeUp
        };

        log::info!(
            "{:?} round ended after {}s: {:?}, score {}",
            self.mode,
            elapsed_secs,
            outcome,
            self.score
        );
        self.outcome = Some(outcome);
    }
}
