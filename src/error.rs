//! Crate error type
//!
//! Physics and collision code is total; only scene setup and configuration
//! loading can fail.

use thiserror::Error;

use crate::scene::SceneId;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("scene {scene:?} has no level configuration")]
    MissingLevel { scene: SceneId },

    #[error("invalid level configuration: {0}")]
    InvalidLevel(String),

    #[error("could only place {placed} of {requested} stars after {attempts} attempts")]
    StarPlacement {
        requested: usize,
        placed: usize,
        attempts: u32,
    },

    #[error("scene {0:?} is not registered")]
    UnknownScene(SceneId),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
