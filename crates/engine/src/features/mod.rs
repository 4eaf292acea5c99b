//! Optional gameplay features
//!
//! A feature is a toggleable behavior layered on top of the core loop. All
//! features share one contract ([`GameFeature`]): an id, an active flag,
//! lifecycle hooks and a per-frame update that only runs while active.
//! Each hook receives the [`GameState`] explicitly; features never keep a
//! reference to it.
//!
//! | Id | Feature | Default |
//! |----|---------|---------|
//! | `ghost-piece` | [`GhostPieceFeature`] | off |
//! | `hard-drop` | [`HardDropFeature`] | on |
//! | `hold-piece` | [`HoldPieceFeature`] | off |
//! | `game-speed` | [`SpeedControlFeature`] | on |

mod ghost;
mod hard_drop;
mod hold;
mod manager;
mod speed;

use tracing::debug;

use crate::core::GameState;
use crate::types::FeatureId;

pub use ghost::{GhostPiece, GhostPieceFeature};
pub use hard_drop::HardDropFeature;
pub use hold::HoldPieceFeature;
pub use manager::FeatureManager;
pub use speed::SpeedControlFeature;

/// Capability set shared by every feature
pub trait GameFeature {
    fn id(&self) -> FeatureId;

    /// Label for feature panels
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    fn is_active(&self) -> bool;

    /// Raw flag write; lifecycle hooks are not run. Use [`GameFeature::toggle`].
    fn set_active_flag(&mut self, active: bool);

    fn on_activate(&mut self, _state: &mut GameState) {}

    fn on_deactivate(&mut self, _state: &mut GameState) {}

    fn on_update(&mut self, _state: &mut GameState, _delta_ms: u32) {}

    /// Flip the active flag and run the matching hook
    fn toggle(&mut self, state: &mut GameState) {
        let active = !self.is_active();
        self.set_active_flag(active);
        if active {
            self.on_activate(state);
        } else {
            self.on_deactivate(state);
        }
        debug!(feature = self.id().as_str(), active, "feature toggled");
    }

    /// Attach to a session; active features run their activation hook
    fn initialize(&mut self, state: &mut GameState) {
        if self.is_active() {
            self.on_activate(state);
        }
    }

    /// Per-frame hook, a no-op while inactive
    fn update(&mut self, state: &mut GameState, delta_ms: u32) {
        if self.is_active() {
            self.on_update(state, delta_ms);
        }
    }

    /// Detach from a session; active features run their deactivation hook
    fn cleanup(&mut self, state: &mut GameState) {
        if self.is_active() {
            self.on_deactivate(state);
        }
    }
}

/// One registered feature instance
#[derive(Debug, Clone)]
pub enum Feature {
    Ghost(GhostPieceFeature),
    HardDrop(HardDropFeature),
    Hold(HoldPieceFeature),
    Speed(SpeedControlFeature),
}

impl Feature {
    pub fn as_dyn(&self) -> &dyn GameFeature {
        match self {
            Feature::Ghost(f) => f,
            Feature::HardDrop(f) => f,
            Feature::Hold(f) => f,
            Feature::Speed(f) => f,
        }
    }

    pub fn as_dyn_mut(&mut self) -> &mut dyn GameFeature {
        match self {
            Feature::Ghost(f) => f,
            Feature::HardDrop(f) => f,
            Feature::Hold(f) => f,
            Feature::Speed(f) => f,
        }
    }

    pub fn id(&self) -> FeatureId {
        self.as_dyn().id()
    }
}

impl From<GhostPieceFeature> for Feature {
    fn from(f: GhostPieceFeature) -> Self {
        Feature::Ghost(f)
    }
}

impl From<HardDropFeature> for Feature {
    fn from(f: HardDropFeature) -> Self {
        Feature::HardDrop(f)
    }
}

impl From<HoldPieceFeature> for Feature {
    fn from(f: HoldPieceFeature) -> Self {
        Feature::Hold(f)
    }
}

impl From<SpeedControlFeature> for Feature {
    fn from(f: SpeedControlFeature) -> Self {
        Feature::Speed(f)
    }
}
