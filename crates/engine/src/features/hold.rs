//! Hold piece - park the active piece and swap it back later
//!
//! One hold is allowed per piece. The allowance comes back whenever a new
//! piece spawns, which the feature notices by comparing the state's
//! `piece_id` against the id it saw last.

use tracing::debug;

use crate::core::{GameState, Tetromino};
use crate::features::GameFeature;
use crate::types::{FeatureId, PieceKind};

#[derive(Debug, Clone)]
pub struct HoldPieceFeature {
    active: bool,
    held: Option<PieceKind>,
    can_hold: bool,
    seen_piece_id: u32,
}

impl HoldPieceFeature {
    pub fn new() -> Self {
        Self {
            active: false,
            held: None,
            can_hold: true,
            seen_piece_id: 0,
        }
    }

    /// Swap the active piece with the held one.
    ///
    /// With nothing held, the next queued piece spawns instead. The swapped-in
    /// piece starts at the spawn offset in its canonical orientation. Returns
    /// false when inactive, after game over, without an active piece or when
    /// this piece has already been held.
    pub fn hold_piece(&mut self, state: &mut GameState) -> bool {
        if !self.active || state.is_game_over() {
            return false;
        }
        self.sync(state);
        if !self.can_hold {
            return false;
        }
        let Some(current) = state.board().current_piece() else {
            return false;
        };

        let kind = current.tetromino.kind();
        let swap_in = self.held.map(Tetromino::new);
        state.spawn_piece(swap_in);

        self.held = Some(kind);
        self.can_hold = false;
        // The swap spawn does not restore the allowance
        self.seen_piece_id = state.piece_id();
        debug!(held = kind.as_str(), "piece held");
        true
    }

    /// Allow the next hold
    pub fn reset_hold(&mut self) {
        self.can_hold = true;
    }

    pub fn held_piece(&self) -> Option<PieceKind> {
        self.held
    }

    /// Whether a hold is allowed right now, counting spawns since the last sync
    pub fn can_hold(&self, state: &GameState) -> bool {
        self.can_hold || state.piece_id() != self.seen_piece_id
    }

    /// Forget the held piece, e.g. on restart
    pub fn clear(&mut self, state: &GameState) {
        self.held = None;
        self.can_hold = true;
        self.seen_piece_id = state.piece_id();
    }

    fn sync(&mut self, state: &GameState) {
        if state.piece_id() != self.seen_piece_id {
            self.seen_piece_id = state.piece_id();
            self.reset_hold();
        }
    }
}

impl Default for HoldPieceFeature {
    fn default() -> Self {
        Self::new()
    }
}

impl GameFeature for HoldPieceFeature {
    fn id(&self) -> FeatureId {
        FeatureId::HoldPiece
    }

    fn name(&self) -> &'static str {
        "Hold Piece"
    }

    fn description(&self) -> &'static str {
        "Store a piece for later use"
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn set_active_flag(&mut self, active: bool) {
        self.active = active;
    }

    fn on_activate(&mut self, state: &mut GameState) {
        self.seen_piece_id = state.piece_id();
    }

    fn on_deactivate(&mut self, state: &mut GameState) {
        self.clear(state);
    }

    fn on_update(&mut self, state: &mut GameState, _delta_ms: u32) {
        self.sync(state);
    }
}
