//! Feature registry keyed by [`FeatureId`]

use std::collections::BTreeMap;

use tracing::debug;

use crate::core::GameState;
use crate::features::{
    Feature, GameFeature, GhostPieceFeature, HardDropFeature, HoldPieceFeature,
    SpeedControlFeature,
};
use crate::types::FeatureId;

/// Registered features, iterated in [`FeatureId`] order
#[derive(Debug, Clone, Default)]
pub struct FeatureManager {
    features: BTreeMap<FeatureId, Feature>,
}

impl FeatureManager {
    /// Registry with no features
    pub fn empty() -> Self {
        Self::default()
    }

    /// All four features in their default activation states
    pub fn new() -> Self {
        let mut manager = Self::empty();
        manager.add_feature(GhostPieceFeature::new());
        manager.add_feature(HardDropFeature::new());
        manager.add_feature(HoldPieceFeature::new());
        manager.add_feature(SpeedControlFeature::new());
        manager
    }

    /// Register a feature, replacing any feature with the same id
    pub fn add_feature(&mut self, feature: impl Into<Feature>) -> Option<Feature> {
        let feature = feature.into();
        self.features.insert(feature.id(), feature)
    }

    pub fn feature(&self, id: FeatureId) -> Option<&dyn GameFeature> {
        self.features.get(&id).map(Feature::as_dyn)
    }

    pub fn feature_mut(&mut self, id: FeatureId) -> Option<&mut dyn GameFeature> {
        self.features.get_mut(&id).map(Feature::as_dyn_mut)
    }

    pub fn all_features(&self) -> impl Iterator<Item = &dyn GameFeature> + '_ {
        self.features.values().map(Feature::as_dyn)
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Unregistered features count as inactive
    pub fn is_feature_active(&self, id: FeatureId) -> bool {
        self.feature(id).is_some_and(|f| f.is_active())
    }

    /// Toggle a feature; returns its new state, or None if it is not registered
    pub fn toggle(&mut self, id: FeatureId, state: &mut GameState) -> Option<bool> {
        let feature = self.feature_mut(id)?;
        feature.toggle(state);
        Some(feature.is_active())
    }

    /// Bring a feature to the requested state, running hooks only on change
    pub fn set_active(&mut self, id: FeatureId, active: bool, state: &mut GameState) -> bool {
        match self.feature_mut(id) {
            Some(feature) => {
                if feature.is_active() != active {
                    feature.toggle(state);
                }
                true
            }
            None => false,
        }
    }

    pub fn initialize(&mut self, state: &mut GameState) {
        for feature in self.features.values_mut() {
            feature.as_dyn_mut().initialize(state);
        }
        debug!(count = self.features.len(), "features initialized");
    }

    /// Run every active feature's per-frame hook
    pub fn update(&mut self, state: &mut GameState, delta_ms: u32) {
        for feature in self.features.values_mut() {
            feature.as_dyn_mut().update(state, delta_ms);
        }
    }

    /// Clean up every feature and empty the registry
    pub fn cleanup(&mut self, state: &mut GameState) {
        for feature in self.features.values_mut() {
            feature.as_dyn_mut().cleanup(state);
        }
        self.features.clear();
        debug!("features cleaned up");
    }

    /// Drop per-game data (held piece, stale ghost) while keeping activation states
    pub fn restart(&mut self, state: &mut GameState) {
        if let Some(hold) = self.hold_mut() {
            hold.clear(state);
        }
        self.update(state, 0);
    }

    pub fn ghost(&self) -> Option<&GhostPieceFeature> {
        match self.features.get(&FeatureId::GhostPiece) {
            Some(Feature::Ghost(f)) => Some(f),
            _ => None,
        }
    }

    pub fn hard_drop_feature(&self) -> Option<&HardDropFeature> {
        match self.features.get(&FeatureId::HardDrop) {
            Some(Feature::HardDrop(f)) => Some(f),
            _ => None,
        }
    }

    pub fn hard_drop_mut(&mut self) -> Option<&mut HardDropFeature> {
        match self.features.get_mut(&FeatureId::HardDrop) {
            Some(Feature::HardDrop(f)) => Some(f),
            _ => None,
        }
    }

    pub fn hold(&self) -> Option<&HoldPieceFeature> {
        match self.features.get(&FeatureId::HoldPiece) {
            Some(Feature::Hold(f)) => Some(f),
            _ => None,
        }
    }

    pub fn hold_mut(&mut self) -> Option<&mut HoldPieceFeature> {
        match self.features.get_mut(&FeatureId::HoldPiece) {
            Some(Feature::Hold(f)) => Some(f),
            _ => None,
        }
    }

    pub fn speed(&self) -> Option<&SpeedControlFeature> {
        match self.features.get(&FeatureId::GameSpeed) {
            Some(Feature::Speed(f)) => Some(f),
            _ => None,
        }
    }

    pub fn speed_mut(&mut self) -> Option<&mut SpeedControlFeature> {
        match self.features.get_mut(&FeatureId::GameSpeed) {
            Some(Feature::Speed(f)) => Some(f),
            _ => None,
        }
    }

    /// Hard drop through the registered feature; 0 lines when unavailable
    pub fn hard_drop(&mut self, state: &mut GameState) -> u32 {
        self.hard_drop_mut()
            .map_or(0, |feature| feature.hard_drop(state))
    }

    pub fn hold_piece(&mut self, state: &mut GameState) -> bool {
        self.hold_mut()
            .is_some_and(|feature| feature.hold_piece(state))
    }

    /// Apply a speed value; false when no speed feature is registered
    pub fn set_speed(&mut self, state: &mut GameState, value: u8) -> bool {
        self.speed_mut()
            .map(|feature| feature.set_speed(state, value))
            .is_some()
    }
}
