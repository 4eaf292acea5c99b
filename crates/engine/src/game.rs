//! One play session: state, features and game loop wired together
//!
//! [`Game`] is the surface input handlers and hosts talk to. Player actions
//! go through it so feature gating (hard drop, hold) and the game-over guard
//! are applied consistently.

use tracing::info;

use crate::core::{ConfigError, GameCallbacks, GameConfig, GameState};
use crate::features::FeatureManager;
use crate::game_loop::{GameLoop, TickReport};
use crate::snapshot::GameSnapshot;
use crate::types::{FeatureId, GameAction};

#[derive(Debug)]
pub struct Game {
    state: GameState,
    features: FeatureManager,
    game_loop: GameLoop,
}

impl Game {
    pub fn new(config: &GameConfig) -> Result<Self, ConfigError> {
        Self::with_callbacks(config, GameCallbacks::new())
    }

    pub fn with_callbacks(config: &GameConfig, callbacks: GameCallbacks) -> Result<Self, ConfigError> {
        let state = GameState::from_config(config, callbacks)?;
        Ok(Self::from_parts(state, FeatureManager::new(), GameLoop::new()))
    }

    /// Assemble a session from prepared parts; features are initialized here
    pub fn from_parts(mut state: GameState, mut features: FeatureManager, game_loop: GameLoop) -> Self {
        features.initialize(&mut state);
        features.update(&mut state, 0);
        Self {
            state,
            features,
            game_loop,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn features(&self) -> &FeatureManager {
        &self.features
    }

    pub fn game_loop(&self) -> &GameLoop {
        &self.game_loop
    }

    pub fn start(&mut self, now_ms: u64) {
        self.game_loop.start(now_ms);
    }

    pub fn stop(&mut self) {
        self.game_loop.stop();
    }

    pub fn is_running(&self) -> bool {
        self.game_loop.is_running()
    }

    pub fn tick(&mut self, now_ms: u64) -> Option<TickReport> {
        self.game_loop
            .tick(now_ms, &mut self.state, &mut self.features)
    }

    pub fn is_game_over(&mut self) -> bool {
        self.state.is_game_over()
    }

    pub fn move_left(&mut self) -> bool {
        !self.state.is_game_over() && self.state.board_mut().move_current_piece_left()
    }

    pub fn move_right(&mut self) -> bool {
        !self.state.is_game_over() && self.state.board_mut().move_current_piece_right()
    }

    pub fn rotate(&mut self) -> bool {
        !self.state.is_game_over() && self.state.board_mut().rotate_current_piece()
    }

    /// Move down one row; a piece that cannot fall is locked instead.
    ///
    /// Returns whether the piece moved.
    pub fn soft_drop(&mut self) -> bool {
        if self.state.is_game_over() {
            return false;
        }
        if self.state.board_mut().move_current_piece_down() {
            return true;
        }
        self.state.lock_current_piece();
        false
    }

    /// Lines cleared by the drop; 0 when hard drop is off or the game is over
    pub fn hard_drop(&mut self) -> u32 {
        self.game_loop
            .hard_drop(&mut self.state, &mut self.features)
    }

    pub fn hold(&mut self) -> bool {
        self.features.hold_piece(&mut self.state)
    }

    pub fn toggle_feature(&mut self, id: FeatureId) -> Option<bool> {
        self.features.toggle(id, &mut self.state)
    }

    pub fn set_feature_active(&mut self, id: FeatureId, active: bool) -> bool {
        self.features.set_active(id, active, &mut self.state)
    }

    pub fn is_feature_active(&self, id: FeatureId) -> bool {
        self.features.is_feature_active(id)
    }

    pub fn set_speed(&mut self, value: u8) -> bool {
        self.features.set_speed(&mut self.state, value)
    }

    /// Perform one player action; returns whether it changed anything
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::Rotate => self.rotate(),
            GameAction::SoftDrop => {
                let piece_id = self.state.piece_id();
                self.soft_drop() || self.state.piece_id() != piece_id
            }
            GameAction::HardDrop => {
                let piece_id = self.state.piece_id();
                self.hard_drop();
                self.state.piece_id() != piece_id
            }
            GameAction::Hold => self.hold(),
            GameAction::Restart => {
                self.restart();
                true
            }
        }
    }

    /// New game in the same session: board, queue and score start over,
    /// feature toggles and the drop interval are kept.
    pub fn restart(&mut self) {
        self.state.reset();
        self.features.restart(&mut self.state);
        info!("session restarted");
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::capture(&self.state, &self.features)
    }

    /// Detach all features and stop the loop
    pub fn shutdown(&mut self) {
        self.game_loop.stop();
        self.features.cleanup(&mut self.state);
    }
}
