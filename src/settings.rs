//! Game settings
//!
//! Loaded from a JSON file next to the level; every field falls back to the
//! compiled-in constants.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::Result;

/// How the round timer advances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CountdownMode {
    /// Elapsed seconds accumulate from physics ticks (deterministic)
    #[default]
    Ticks,
    /// A background task increments elapsed seconds once per real second
    WallClock,
}

impl CountdownMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CountdownMode::Ticks => "Ticks",
            CountdownMode::WallClock => "WallClock",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "ticks" | "tick" => Some(CountdownMode::Ticks),
            "wallclock" | "wall_clock" | "realtime" => Some(CountdownMode::WallClock),
            _ => None,
        }
    }
}

/// Game settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Seed for star placement
    pub seed: u64,
    /// Round timer source
    pub countdown: CountdownMode,
    /// Round length in seconds
    pub duration_secs: u32,
    /// Stars placed at the start of a random game
    pub random_game_stars: usize,
    /// Stars kept on screen in the tutorial
    pub tutorial_stars: usize,
    /// Enables pause and slow-motion toggles
    pub debug: bool,
    /// Real-time scale applied to frames while slow motion is on
    pub slow_motion_factor: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 0x5EED,
            countdown: CountdownMode::Ticks,
            duration_secs: GAME_DURATION_SECS,
            random_game_stars: RANDOM_GAME_STARS,
            tutorial_stars: TUTORIAL_STARS,
            debug: true,
            slow_motion_factor: 0.25,
        }
    }
}

impl Settings {
    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    /// Frame time scale for the current slow-motion state
    pub fn time_scale(&self, slow_motion: bool) -> f64 {
        if slow_motion {
            self.slow_motion_factor.clamp(0.0, 1.0)
        } else {
            1.0
        }
    }
}
