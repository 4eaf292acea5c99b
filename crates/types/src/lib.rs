//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the engine.
//! All types are plain data with no engine logic, making them usable in any
//! context (core logic, feature plug-ins, input dispatch, renderers).
//!
//! # Board Dimensions
//!
//! Default playfield dimensions (both are configurable at construction time):
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 is the top)
//! - **Spawn position**: (3, 0) on a 10-wide board
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BASE_DROP_MS` | 1000 | Default gravity interval |
//! | `MIN_DROP_MS` | 100 | Fastest allowed gravity interval |
//! | `MAX_DROP_MS` | 2000 | Slowest allowed gravity interval |
//! | `ACTION_COOLDOWN_MS` | 100 | Debounce window for discrete inputs |
//! | `SOFT_DROP_INTERVAL_MS` | 50 | Soft drop repeat rate while held |
//! | `HARD_DROP_COOLDOWN_MS` | 500 | Minimum time between hard drops |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{FeatureId, GameAction, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let piece = PieceKind::from_str("t").unwrap();
//! assert_eq!(piece, PieceKind::T);
//! assert_eq!(piece.color(), "#a000f0");
//!
//! assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
//! assert_eq!(FeatureId::from_str("hold-piece"), Some(FeatureId::HoldPiece));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

use serde::{Deserialize, Serialize};

/// Default board width in cells (10 columns)
pub const BOARD_WIDTH: u16 = 10;

/// Default board height in cells (20 rows)
pub const BOARD_HEIGHT: u16 = 20;

/// Default spawn row for new pieces
pub const SPAWN_Y: i32 = 0;

/// Base gravity interval (1000ms = 1 second per row)
pub const BASE_DROP_MS: u32 = 1000;

/// Fastest gravity interval the engine accepts
pub const MIN_DROP_MS: u32 = 100;

/// Slowest gravity interval the engine accepts
pub const MAX_DROP_MS: u32 = 2000;

/// Number of upcoming pieces kept in the lookahead buffer
pub const DEFAULT_LOOKAHEAD: usize = 3;

/// Debounce window for move/rotate/hold key presses
pub const ACTION_COOLDOWN_MS: u64 = 100;

/// Repeat rate of soft drop while the down key is held
pub const SOFT_DROP_INTERVAL_MS: u64 = 50;

/// Minimum time between two hard drops
pub const HARD_DROP_COOLDOWN_MS: u64 = 500;

/// Lowest value accepted by the speed control
pub const SPEED_MIN: u8 = 1;

/// Highest value accepted by the speed control
pub const SPEED_MAX: u8 = 10;

/// Line clear scoring table
///
/// Points for clearing N lines with a single lock:
/// - 0 lines: 0 points
/// - 1 line: 100 points
/// - 2 lines: 300 points
/// - 3 lines: 500 points
/// - 4 lines: 800 points
///
/// Larger counts are scored as 4 lines.
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Render color of the ghost projection
pub const GHOST_COLOR: &str = "rgba(255, 255, 255, 0.3)";


/// The seven tetromino piece kinds
///
/// Each kind has a fixed canonical shape and color:
/// - **I**: Cyan, horizontal bar
/// - **J**: Blue
/// - **L**: Orange (mirror of J)
/// - **O**: Yellow, 2x2 square
/// - **S**: Green
/// - **T**: Purple
/// - **Z**: Red (mirror of S)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// All kinds, in draw-table order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "o" => Some(PieceKind::O),
            "s" => Some(PieceKind::S),
            "t" => Some(PieceKind::T),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Convert to uppercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::J => "J",
            PieceKind::L => "L",
            PieceKind::O => "O",
            PieceKind::S => "S",
            PieceKind::T => "T",
            PieceKind::Z => "Z",
        }
    }

    /// CSS color string used to draw this kind
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.color(), "#00f0f0");
    /// assert_eq!(PieceKind::Z.color(), "#f00000");
    /// ```
    pub fn color(&self) -> &'static str {
        match self {
            PieceKind::I => "#00f0f0",
            PieceKind::J => "#0000f0",
            PieceKind::L => "#f0a000",
            PieceKind::O => "#f0f000",
            PieceKind::S => "#00f000",
            PieceKind::T => "#a000f0",
            PieceKind::Z => "#f00000",
        }
    }
}

/// Rotation state of a piece relative to its spawn orientation
///
/// The cycle goes: North → East → South → West → North, one 90° clockwise
/// quarter turn per step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotate clockwise (90°)
    ///
    /// ```
    /// use blockfall_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Rotation::North => "north",
            Rotation::East => "east",
            Rotation::South => "south",
            Rotation::West => "west",
        }
    }
}

/// Discrete input actions understood by the engine
///
/// These are produced by an input dispatcher (keyboard map, bot, test script)
/// and routed to the board or to the owning feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down; repeats while held
    SoftDrop,
    /// Rotate piece 90° clockwise
    Rotate,
    /// Instantly drop piece to lowest valid position (hard-drop feature)
    HardDrop,
    /// Bank the current piece (hold feature)
    Hold,
    /// Start a new game
    Restart,
}

impl GameAction {
    /// Parse action from camelCase string (case-insensitive)
    ///
    /// ```
    /// use blockfall_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("rotate"), Some(GameAction::Rotate));
    /// assert_eq!(GameAction::from_str("unknown"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "rotate" => Some(GameAction::Rotate),
            "harddrop" => Some(GameAction::HardDrop),
            "hold" => Some(GameAction::Hold),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::Rotate => "rotate",
            GameAction::HardDrop => "hardDrop",
            GameAction::Hold => "hold",
            GameAction::Restart => "restart",
        }
    }
}

/// Stable keys of the optional gameplay features
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FeatureId {
    #[serde(rename = "ghost-piece")]
    GhostPiece,
    #[serde(rename = "hard-drop")]
    HardDrop,
    #[serde(rename = "hold-piece")]
    HoldPiece,
    #[serde(rename = "game-speed")]
    GameSpeed,
}

impl FeatureId {
    /// All built-in feature ids, in panel order
    pub const ALL: [FeatureId; 4] = [
        FeatureId::GhostPiece,
        FeatureId::HardDrop,
        FeatureId::HoldPiece,
        FeatureId::GameSpeed,
    ];

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "ghost-piece" => Some(FeatureId::GhostPiece),
            "hard-drop" => Some(FeatureId::HardDrop),
            "hold-piece" => Some(FeatureId::HoldPiece),
            "game-speed" => Some(FeatureId::GameSpeed),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureId::GhostPiece => "ghost-piece",
            FeatureId::HardDrop => "hard-drop",
            FeatureId::HoldPiece => "hold-piece",
            FeatureId::GameSpeed => "game-speed",
        }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Occupied, drawn with that kind's color
///
/// Storing the kind instead of a free-form color keeps every occupied cell
/// colored by construction.
pub type Cell = Option<PieceKind>;
