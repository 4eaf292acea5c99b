//! Engine layer - optional features, gravity loop and session facade
//!
//! Built on `blockfall-core`. The core crate knows the rules; this crate
//! decides when they run:
//!
//! - [`features`]: ghost piece, hard drop, hold piece and speed control
//!   behind one toggleable contract, plus the registry that drives them
//! - [`game_loop`]: accumulates frame time into gravity steps
//! - [`game`]: the [`Game`] session that input handlers drive
//! - [`snapshot`]: serializable view for renderers and tooling
//!
//! # Example
//!
//! ```
//! use blockfall_engine::{Game, GameConfig};
//! use blockfall_engine::types::{FeatureId, GameAction};
//!
//! let mut game = Game::new(&GameConfig::seeded(7)).unwrap();
//! game.toggle_feature(FeatureId::GhostPiece);
//! game.start(0);
//!
//! game.apply_action(GameAction::MoveLeft);
//! game.tick(1000);
//! game.apply_action(GameAction::HardDrop);
//!
//! let snapshot = game.snapshot();
//! assert_eq!(snapshot.piece_id, 2);
//! assert!(snapshot.ghost.is_some());
//! ```

pub mod features;
pub mod game;
pub mod game_loop;
pub mod snapshot;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use blockfall_core::{ConfigError, GameCallbacks, GameConfig, GameState};
pub use features::{
    Feature, FeatureManager, GameFeature, GhostPiece, GhostPieceFeature, HardDropFeature,
    HoldPieceFeature, SpeedControlFeature,
};
pub use game::Game;
pub use game_loop::{FrameCallback, GameLoop, Gravity, TickReport};
pub use snapshot::{FeatureSnapshot, GameSnapshot, PieceSnapshot};
