//! Error types for engine construction and configuration loading

use thiserror::Error;

/// Configuration error
///
/// Gameplay itself never fails; only building a board or loading a config can.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Board width or height is zero
    #[error("invalid board dimensions {width}x{height}: both must be positive")]
    InvalidDimensions { width: u16, height: u16 },

    /// Drop interval bounds are inverted or zero
    #[error("invalid drop interval bounds: min {min_ms}ms, max {max_ms}ms")]
    InvalidIntervalBounds { min_ms: u32, max_ms: u32 },

    /// Spawn offset places a piece entirely outside the board
    #[error("spawn column {spawn_x} does not fit a board {width} cells wide")]
    InvalidSpawn { spawn_x: i32, width: u16 },

    /// Config file is not valid TOML for [`crate::config::GameConfig`]
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config file could not be read
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
