//! Speed control - map a 1..=10 speed value onto the drop interval
//!
//! | Value | Interval |
//! |-------|----------|
//! | 1 | max (2000 ms) |
//! | 10 | min (100 ms) |
//!
//! Values in between interpolate linearly. Deactivating restores the base
//! interval.

use tracing::debug;

use crate::core::{DropIntervalConfig, GameState};
use crate::features::GameFeature;
use crate::types::{FeatureId, SPEED_MAX, SPEED_MIN};

#[derive(Debug, Clone)]
pub struct SpeedControlFeature {
    active: bool,
    bounds: DropIntervalConfig,
    current_ms: u32,
}

impl SpeedControlFeature {
    pub fn new() -> Self {
        Self::with_bounds(DropIntervalConfig::default())
    }

    pub fn with_bounds(bounds: DropIntervalConfig) -> Self {
        Self {
            active: true,
            bounds,
            current_ms: bounds.base_ms,
        }
    }

    /// Interval for a speed value; out-of-range values clamp to the bounds
    pub fn interval_for(&self, value: u8) -> u32 {
        let min = self.bounds.min_ms as f64;
        let max = self.bounds.max_ms as f64;
        let step = (value as f64 - SPEED_MIN as f64) / (SPEED_MAX - SPEED_MIN) as f64;
        let interval = (max - step * (max - min)).round() as u32;
        self.bounds.clamp(interval)
    }

    /// Apply a speed value and push the resulting interval to the state.
    ///
    /// Applies whether or not the feature is active; only deactivation
    /// resets the interval to its base value.
    pub fn set_speed(&mut self, state: &mut GameState, value: u8) -> u32 {
        self.current_ms = self.interval_for(value);
        state.set_drop_interval(self.current_ms);
        debug!(value, interval_ms = self.current_ms, "speed set");
        self.current_ms
    }

    /// Current interval expressed as a 1..=10 speed value
    pub fn speed_value(&self) -> u8 {
        let min = self.bounds.min_ms as f64;
        let max = self.bounds.max_ms as f64;
        if max <= min {
            return SPEED_MIN;
        }
        let span = (SPEED_MAX - SPEED_MIN) as f64;
        let value = ((max - self.current_ms as f64) / (max - min)) * span + SPEED_MIN as f64;
        (value.round() as u8).clamp(SPEED_MIN, SPEED_MAX)
    }

    pub fn drop_interval(&self) -> u32 {
        self.current_ms
    }

    pub fn bounds(&self) -> DropIntervalConfig {
        self.bounds
    }
}

impl Default for SpeedControlFeature {
    fn default() -> Self {
        Self::new()
    }
}

impl GameFeature for SpeedControlFeature {
    fn id(&self) -> FeatureId {
        FeatureId::GameSpeed
    }

    fn name(&self) -> &'static str {
        "Game Speed"
    }

    fn description(&self) -> &'static str {
        "Adjust the drop speed of pieces"
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn set_active_flag(&mut self, active: bool) {
        self.active = active;
    }

    fn on_deactivate(&mut self, state: &mut GameState) {
        self.current_ms = self.bounds.base_ms;
        state.set_drop_interval(self.current_ms);
    }

    /// Adopt the session's interval bounds and current interval
    fn initialize(&mut self, state: &mut GameState) {
        self.bounds = state.drop_interval_bounds();
        self.current_ms = state.drop_interval();
        if self.active {
            self.on_activate(state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameCallbacks, GameConfig};

    fn state() -> GameState {
        GameState::from_config(&GameConfig::seeded(4), GameCallbacks::new()).unwrap()
    }

    #[test]
    fn test_speed_value_endpoints() {
        let speed = SpeedControlFeature::new();
        assert_eq!(speed.interval_for(1), 2000);
        assert_eq!(speed.interval_for(10), 100);
        assert_eq!(speed.interval_for(0), 2000);
        assert_eq!(speed.interval_for(200), 100);
    }

    #[test]
    fn test_set_speed_updates_state() {
        let mut state = state();
        let mut speed = SpeedControlFeature::new();
        speed.initialize(&mut state);

        assert_eq!(speed.set_speed(&mut state, 10), 100);
        assert_eq!(state.drop_interval(), 100);
        assert_eq!(speed.speed_value(), 10);

        speed.set_speed(&mut state, 5);
        // 2000 - (4/9) * 1900
        assert_eq!(state.drop_interval(), 1156);
        assert_eq!(speed.speed_value(), 5);
    }

    #[test]
    fn test_base_interval_reads_as_six() {
        let speed = SpeedControlFeature::new();
        // (2000 - 1000) / 1900 * 9 + 1 = 5.74
        assert_eq!(speed.speed_value(), 6);
    }

    #[test]
    fn test_deactivate_restores_base_interval() {
        let mut state = state();
        let mut speed = SpeedControlFeature::new();
        speed.initialize(&mut state);
        speed.set_speed(&mut state, 9);
        assert_ne!(state.drop_interval(), 1000);

        speed.toggle(&mut state);
        assert_eq!(state.drop_interval(), 1000);
        assert_eq!(speed.speed_value(), 6);
    }

    #[test]
    fn test_set_speed_applies_while_inactive() {
        let mut state = state();
        let mut speed = SpeedControlFeature::new();
        speed.initialize(&mut state);
        speed.toggle(&mut state);
        assert!(!speed.is_active());

        assert_eq!(speed.set_speed(&mut state, 10), 100);
        assert_eq!(state.drop_interval(), 100);
        assert_eq!(speed.speed_value(), 10);

        // Gravity picks up the interval set while inactive
        speed.update(&mut state, 16);
        assert_eq!(state.drop_interval(), 100);
    }

    #[test]
    fn test_initialize_adopts_config_bounds() {
        let mut config = GameConfig::seeded(4);
        config.drop_interval = DropIntervalConfig {
            base_ms: 500,
            min_ms: 50,
            max_ms: 950,
        };
        let mut state = GameState::from_config(&config, GameCallbacks::new()).unwrap();
        let mut speed = SpeedControlFeature::new();
        speed.initialize(&mut state);

        assert_eq!(speed.drop_interval(), 500);
        assert_eq!(speed.interval_for(10), 50);
        assert_eq!(speed.interval_for(1), 950);
    }
}
