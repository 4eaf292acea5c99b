//! Serializable view of a running game
//!
//! A snapshot is a plain copy of everything a renderer or an external
//! observer needs: locked cells, the active and ghost pieces, the next-piece
//! preview, the held piece and the feature panel. It holds no references
//! into the game and serializes to JSON with `serde_json`.

use serde::Serialize;

use crate::core::{GameState, Tetromino};
use crate::features::{FeatureManager, GameFeature, GhostPiece};
use crate::types::{Cell, FeatureId, PieceKind, Rotation, GHOST_COLOR};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PieceSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i32,
    pub y: i32,
    pub color: &'static str,
    /// Absolute (x, y) board coordinates of every mino
    pub cells: Vec<(i32, i32)>,
}

impl PieceSnapshot {
    fn new(tetromino: &Tetromino, x: i32, y: i32, color: &'static str) -> Self {
        Self {
            kind: tetromino.kind(),
            rotation: tetromino.rotation(),
            x,
            y,
            color,
            cells: tetromino
                .cells()
                .iter()
                .map(|&(dx, dy)| (x + dx, y + dy))
                .collect(),
        }
    }
}

impl From<&GhostPiece> for PieceSnapshot {
    fn from(ghost: &GhostPiece) -> Self {
        Self::new(&ghost.tetromino, ghost.x, ghost.y, GHOST_COLOR)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureSnapshot {
    pub id: FeatureId,
    pub name: &'static str,
    pub description: &'static str,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    pub width: u16,
    pub height: u16,
    /// Locked cells, row-major, top row first
    pub board: Vec<Vec<Cell>>,
    pub active: Option<PieceSnapshot>,
    pub ghost: Option<PieceSnapshot>,
    pub next: Vec<PieceKind>,
    pub held: Option<PieceKind>,
    pub can_hold: bool,
    pub score: u32,
    pub game_over: bool,
    pub piece_id: u32,
    pub drop_interval_ms: u32,
    /// None while speed control is inactive or unregistered
    pub speed: Option<u8>,
    pub features: Vec<FeatureSnapshot>,
}

impl GameSnapshot {
    pub fn capture(state: &GameState, features: &FeatureManager) -> Self {
        let board = state.board();
        let active = board
            .current_piece()
            .map(|p| PieceSnapshot::new(&p.tetromino, p.x, p.y, p.tetromino.color()));
        // Projected fresh so actions since the last frame are reflected
        let ghost = features
            .ghost()
            .filter(|g| g.is_active())
            .and_then(|_| GhostPiece::project(board))
            .map(|g| PieceSnapshot::from(&g));
        let hold = features.hold();

        Self {
            width: board.width(),
            height: board.height(),
            board: board.grid().map(|row| row.to_vec()).collect(),
            active,
            ghost,
            next: state.next_pieces().map(|t| t.kind()).collect(),
            held: hold.and_then(|h| h.held_piece()),
            can_hold: hold.is_some_and(|h| h.is_active() && h.can_hold(state)),
            score: state.score(),
            game_over: state.game_over_flag(),
            piece_id: state.piece_id(),
            drop_interval_ms: state.drop_interval(),
            speed: features
                .speed()
                .filter(|s| s.is_active())
                .map(|s| s.speed_value()),
            features: features
                .all_features()
                .map(|f| FeatureSnapshot {
                    id: f.id(),
                    name: f.name(),
                    description: f.description(),
                    active: f.is_active(),
                })
                .collect(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
