//! Ghost piece - where the active piece would land if hard-dropped

use crate::core::{Board, GameState, Tetromino};
use crate::features::GameFeature;
use crate::types::{FeatureId, GHOST_COLOR};

/// A non-interactive copy of the active piece at its resting row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GhostPiece {
    pub tetromino: Tetromino,
    pub x: i32,
    pub y: i32,
}

impl GhostPiece {
    pub fn color(&self) -> &'static str {
        GHOST_COLOR
    }

    /// Project the board's active piece straight down without touching the board
    pub fn project(board: &Board) -> Option<Self> {
        let current = board.current_piece()?;
        let tetromino = current.tetromino;
        let x = current.x;
        let mut y = current.y;

        while board.is_valid_move(&tetromino, x, y + 1) {
            y += 1;
        }

        Some(Self { tetromino, x, y })
    }
}

#[derive(Debug, Clone, Default)]
pub struct GhostPieceFeature {
    active: bool,
    ghost: Option<GhostPiece>,
}

impl GhostPieceFeature {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last projection; None while inactive or without an active piece
    pub fn ghost_piece(&self) -> Option<&GhostPiece> {
        self.ghost.as_ref()
    }
}

impl GameFeature for GhostPieceFeature {
    fn id(&self) -> FeatureId {
        FeatureId::GhostPiece
    }

    fn name(&self) -> &'static str {
        "Ghost Piece"
    }

    fn description(&self) -> &'static str {
        "Shows where the piece will land"
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn set_active_flag(&mut self, active: bool) {
        self.active = active;
    }

    fn on_deactivate(&mut self, _state: &mut GameState) {
        self.ghost = None;
    }

    fn on_update(&mut self, state: &mut GameState, _delta_ms: u32) {
        self.ghost = GhostPiece::project(state.board());
    }
}
