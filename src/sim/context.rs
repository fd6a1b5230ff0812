//! Per-run simulation flags passed into every tick

use serde::{Deserialize, Serialize};

/// Mutable flags shared by the scenes of one simulation instance
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimContext {
    /// Physics and round timer frozen
    pub paused: bool,
    /// Frame time scaled down before it reaches the clock
    pub slow_motion: bool,
    /// Debug toggles (pause, slow motion) accepted
    pub debug: bool,
    /// Monotonic real time in milliseconds, for cooldowns
    pub now_ms: u64,
}

impl SimContext {
    pub fn new(debug: bool) -> Self {
        Self {
            debug,
            ..Default::default()
        }
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        log::info!("Pause {}", if self.paused { "on" } else { "off" });
    }

    pub fn toggle_slow_motion(&mut self) {
        self.slow_motion = !self.slow_motion;
        log::info!("Slow motion {}", if self.slow_motion { "on" } else { "off" });
    }
}
