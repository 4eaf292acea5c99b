//! Core game logic - grid, pieces, queue, scoring and session state
//!
//! This crate contains the gameplay rules and has no dependency on rendering,
//! input devices or timing sources:
//!
//! - **Deterministic** when seeded: the same seed yields the same piece sequence
//! - **Testable**: every rule is reachable through plain method calls
//! - **Boolean outcomes**: invalid moves return `false`, never an error
//!
//! # Module Structure
//!
//! - [`tetromino`]: canonical shape matrices, colors and clockwise rotation
//! - [`board`]: width x height grid, collision, locking and line clearing
//! - [`rng`]: uniform (or 7-bag) piece generation with a lookahead buffer
//! - [`scoring`]: line clear points
//! - [`game_state`]: spawning, score, game over and drop interval
//! - [`config`]: construction-time constants loaded from TOML/env
//! - [`error`]: configuration errors
//!
//! # Game Rules
//!
//! - Pieces spawn at (3, 0) on a 10-wide board, above-the-top overhang allowed
//! - Rotation is a plain 90° matrix turn with no wall kicks
//! - Full rows are removed and the rows above fall down
//! - Score: 100 / 300 / 500 / 800 points for 1 / 2 / 3 / 4 lines
//! - Game over when a spawned piece does not fit or the top row is occupied
//!
//! # Example
//!
//! ```
//! use blockfall_core::{GameCallbacks, GameConfig, GameState};
//!
//! let mut game = GameState::from_config(&GameConfig::seeded(12345), GameCallbacks::new()).unwrap();
//!
//! game.board_mut().move_current_piece_left();
//! game.board_mut().rotate_current_piece();
//! let lines = game.board_mut().hard_drop_current_piece();
//! game.update_score(lines);
//! game.spawn_piece(None);
//!
//! assert!(!game.is_game_over());
//! assert_eq!(game.piece_id(), 2);
//! ```

pub mod board;
pub mod config;
pub mod error;
pub mod game_state;
pub mod rng;
pub mod scoring;
pub mod tetromino;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::{ActivePiece, Board};
pub use config::{DropIntervalConfig, GameConfig};
pub use error::ConfigError;
pub use game_state::{GameCallbacks, GameState};
pub use rng::{PieceQueue, Randomizer};
pub use scoring::{calculate_line_score, line_clear_points, ScoreTable};
pub use tetromino::{canonical_shape, MinoOffset, Shape, Tetromino};
