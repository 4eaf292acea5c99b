//! Engine configuration
//!
//! Everything here is a construction-time constant: board size, spawn offset,
//! scoring table, drop interval bounds and the piece randomizer. A config can
//! come from TOML and be overridden by environment variables:
//!
//! - `BLOCKFALL_WIDTH` / `BLOCKFALL_HEIGHT`: board size
//! - `BLOCKFALL_SEED`: fixed RNG seed
//! - `BLOCKFALL_RANDOMIZER`: `uniform` or `seven_bag`
//!
//! Unparseable environment values are ignored.
//!
//! ```
//! use blockfall_core::config::GameConfig;
//!
//! let config = GameConfig::from_toml_str("board_width = 12\nseed = 7").unwrap();
//! assert_eq!(config.board_width, 12);
//! assert_eq!(config.spawn_x(), 4);
//! assert_eq!(config.drop_interval.base_ms, 1000);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::rng::Randomizer;
use crate::scoring::ScoreTable;
use crate::types::{
    BASE_DROP_MS, BOARD_HEIGHT, BOARD_WIDTH, DEFAULT_LOOKAHEAD, LINE_SCORES, MAX_DROP_MS,
    MIN_DROP_MS, SPAWN_Y,
};

/// Gravity interval defaults and bounds, in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DropIntervalConfig {
    pub base_ms: u32,
    pub min_ms: u32,
    pub max_ms: u32,
}

impl DropIntervalConfig {
    /// Clamp a requested interval into `[min_ms, max_ms]`
    pub fn clamp(&self, interval_ms: u32) -> u32 {
        interval_ms.clamp(self.min_ms, self.max_ms)
    }
}

impl Default for DropIntervalConfig {
    fn default() -> Self {
        Self {
            base_ms: BASE_DROP_MS,
            min_ms: MIN_DROP_MS,
            max_ms: MAX_DROP_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub board_width: u16,
    pub board_height: u16,
    /// Spawn column; centered for a 4-wide piece when absent
    pub spawn_x: Option<i32>,
    pub spawn_y: i32,
    pub score_table: ScoreTable,
    pub drop_interval: DropIntervalConfig,
    pub lookahead: usize,
    pub randomizer: Randomizer,
    /// Fixed RNG seed; entropy-seeded when absent
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_width: BOARD_WIDTH,
            board_height: BOARD_HEIGHT,
            spawn_x: None,
            spawn_y: SPAWN_Y,
            score_table: LINE_SCORES,
            drop_interval: DropIntervalConfig::default(),
            lookahead: DEFAULT_LOOKAHEAD,
            randomizer: Randomizer::Uniform,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Default config with a fixed seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a TOML config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Overlay `BLOCKFALL_*` environment variables
    pub fn apply_env(mut self) -> Self {
        use std::env;

        if let Some(width) = env::var("BLOCKFALL_WIDTH").ok().and_then(|s| s.parse().ok()) {
            self.board_width = width;
        }
        if let Some(height) = env::var("BLOCKFALL_HEIGHT").ok().and_then(|s| s.parse().ok()) {
            self.board_height = height;
        }
        if let Some(seed) = env::var("BLOCKFALL_SEED").ok().and_then(|s| s.parse().ok()) {
            self.seed = Some(seed);
        }
        if let Some(randomizer) = env::var("BLOCKFALL_RANDOMIZER")
            .ok()
            .and_then(|s| Randomizer::from_str(s.trim()))
        {
            self.randomizer = randomizer;
        }
        self
    }

    /// Effective spawn column
    pub fn spawn_x(&self) -> i32 {
        self.spawn_x
            .unwrap_or_else(|| (self.board_width as i32 - 4).max(0) / 2)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_width == 0 || self.board_height == 0 {
            return Err(ConfigError::InvalidDimensions {
                width: self.board_width,
                height: self.board_height,
            });
        }

        let bounds = &self.drop_interval;
        if bounds.min_ms == 0 || bounds.min_ms > bounds.max_ms {
            return Err(ConfigError::InvalidIntervalBounds {
                min_ms: bounds.min_ms,
                max_ms: bounds.max_ms,
            });
        }

        let spawn_x = self.spawn_x();
        if spawn_x < 0 || spawn_x >= self.board_width as i32 {
            return Err(ConfigError::InvalidSpawn {
                spawn_x,
                width: self.board_width,
            });
        }

        Ok(())
    }
}
