//! Hard drop - instantly drop and lock the active piece

use tracing::debug;

use crate::core::GameState;
use crate::features::GameFeature;
use crate::types::FeatureId;

#[derive(Debug, Clone)]
pub struct HardDropFeature {
    active: bool,
}

impl HardDropFeature {
    pub fn new() -> Self {
        Self { active: true }
    }

    /// Drop, lock, clear lines, score them and spawn the next piece.
    ///
    /// Does nothing while inactive, after game over, or without an active
    /// piece. Returns the number of lines cleared.
    pub fn hard_drop(&mut self, state: &mut GameState) -> u32 {
        if !self.active || state.is_game_over() || state.board().current_piece().is_none() {
            return 0;
        }

        let lines = state.board_mut().hard_drop_current_piece();
        state.update_score(lines);
        state.spawn_piece(None);
        debug!(lines, "hard drop");
        lines
    }
}

impl Default for HardDropFeature {
    fn default() -> Self {
        Self::new()
    }
}

impl GameFeature for HardDropFeature {
    fn id(&self) -> FeatureId {
        FeatureId::HardDrop
    }

    fn name(&self) -> &'static str {
        "Hard Drop"
    }

    fn description(&self) -> &'static str {
        "Instantly drop piece to bottom"
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn set_active_flag(&mut self, active: bool) {
        self.active = active;
    }
}
