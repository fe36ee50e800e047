//! Tunable game constants, loadable from a JSON file.
//!
//! Every field has a default, so a config file only needs the keys it
//! overrides.  A missing file is the caller's business: `GameConfig::default()`
//! is always valid.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::animation::FrameTimer;
use crate::grid::{LevelError, TileGrid};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid level: {0}")]
    Level(#[from] LevelError),
}

/// Frame count and per-frame duration of one animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimConfig {
    pub frames: usize,
    pub frame_ms: u32,
}

impl AnimConfig {
    pub const fn new(frames: usize, frame_ms: u32) -> Self {
        Self { frames, frame_ms }
    }

    pub fn timer(&self) -> FrameTimer {
        FrameTimer::new(self.frames, self.frame_ms)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Horizontal walking speed, pixels per tick.
    pub player_speed: i32,
    /// Vertical velocity set by a jump (negative is up).
    pub jump_velocity: i32,
    /// Added to the player's vertical velocity every tick.
    pub gravity: i32,
    pub projectile_speed: i32,
    /// Target frame time of the front-end loop.
    pub frame_ms: u32,
    pub player_hitbox: i32,
    pub player_texbox: i32,
    pub player_idle: AnimConfig,
    pub player_walking: AnimConfig,
    pub projectile_active: AnimConfig,
    pub projectile_poof: AnimConfig,
    /// ASCII layout, `#` for walls.  `None` uses the built-in level.
    pub level: Option<Vec<String>>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_speed: 4,
            jump_velocity: -20,
            gravity: 1,
            projectile_speed: 10,
            frame_ms: 16,
            player_hitbox: 44,
            player_texbox: 64,
            player_idle: AnimConfig::new(1, 200),
            player_walking: AnimConfig::new(4, 100),
            projectile_active: AnimConfig::new(5, 70),
            projectile_poof: AnimConfig::new(4, 70),
            level: None,
        }
    }
}

impl GameConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        // reject a bad layout here rather than at grid construction
        config.grid()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// The tile grid this config describes.
    pub fn grid(&self) -> Result<TileGrid, LevelError> {
        match &self.level {
            Some(rows) => TileGrid::from_rows(rows),
            None => Ok(TileGrid::default_level()),
        }
    }
}
