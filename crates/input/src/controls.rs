//! Debounced player controls.
//!
//! Turns key presses and releases into [`Game`] calls with per-action
//! cooldowns:
//!
//! | Action | Behavior |
//! |--------|----------|
//! | move / rotate / hold | once per press, at most every 100 ms |
//! | hard drop | once per press, at most every 500 ms, only while its feature is on |
//! | soft drop | one row on press, then every 50 ms while held; locks when blocked |
//! | restart | once per press |
//!
//! Timestamps are supplied by the caller in milliseconds. Terminals that
//! never report key releases can set a release timeout so a tap does not
//! turn into a held key.

use arrayvec::ArrayVec;
use tracing::trace;

use crate::engine::Game;
use crate::types::{
    FeatureId, GameAction, ACTION_COOLDOWN_MS, HARD_DROP_COOLDOWN_MS, SOFT_DROP_INTERVAL_MS,
};

const ACTION_SLOTS: usize = 7;

fn slot(action: GameAction) -> usize {
    match action {
        GameAction::MoveLeft => 0,
        GameAction::MoveRight => 1,
        GameAction::SoftDrop => 2,
        GameAction::Rotate => 3,
        GameAction::HardDrop => 4,
        GameAction::Hold => 5,
        GameAction::Restart => 6,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct HeldKey {
    action: GameAction,
    last_seen_ms: u64,
}

#[derive(Debug, Clone, Default)]
pub struct Controls {
    held: ArrayVec<HeldKey, ACTION_SLOTS>,
    last_action_ms: [Option<u64>; ACTION_SLOTS],
    last_hard_drop_ms: Option<u64>,
    release_timeout_ms: Option<u64>,
}

impl Controls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Treat keys as released when no event refreshed them for `timeout_ms`
    pub fn with_release_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.release_timeout_ms = Some(timeout_ms);
        self
    }

    pub fn is_held(&self, action: GameAction) -> bool {
        self.held.iter().any(|k| k.action == action)
    }

    /// Handle a press. Repeated presses of a held key only refresh it.
    ///
    /// Returns whether the game changed.
    pub fn key_down(&mut self, action: GameAction, now_ms: u64, game: &mut Game) -> bool {
        if let Some(key) = self.held.iter_mut().find(|k| k.action == action) {
            key.last_seen_ms = now_ms;
            return false;
        }
        // Capacity equals the number of actions, so this never overflows
        let _ = self.held.try_push(HeldKey {
            action,
            last_seen_ms: now_ms,
        });
        self.press(action, now_ms, game)
    }

    pub fn key_up(&mut self, action: GameAction) {
        self.held.retain(|k| k.action != action);
    }

    pub fn release_all(&mut self) {
        self.held.clear();
    }

    /// Per-frame work: expire stale keys and repeat the soft drop.
    ///
    /// Returns whether the game changed.
    pub fn frame(&mut self, now_ms: u64, game: &mut Game) -> bool {
        if let Some(timeout) = self.release_timeout_ms {
            self.held
                .retain(|k| now_ms.saturating_sub(k.last_seen_ms) <= timeout);
        }

        if !self.is_held(GameAction::SoftDrop) {
            return false;
        }
        let last = self.last_action_ms[slot(GameAction::SoftDrop)];
        if last.is_some_and(|t| now_ms.saturating_sub(t) < SOFT_DROP_INTERVAL_MS) {
            return false;
        }

        self.last_action_ms[slot(GameAction::SoftDrop)] = Some(now_ms);
        Self::soft_drop(game)
    }

    fn press(&mut self, action: GameAction, now_ms: u64, game: &mut Game) -> bool {
        let index = slot(action);
        if self.last_action_ms[index].is_some_and(|t| now_ms.saturating_sub(t) < ACTION_COOLDOWN_MS) {
            trace!(action = action.as_str(), "action on cooldown");
            return false;
        }

        let changed = match action {
            GameAction::HardDrop => {
                let ready = self
                    .last_hard_drop_ms
                    .map_or(true, |t| now_ms.saturating_sub(t) >= HARD_DROP_COOLDOWN_MS);
                if ready && game.is_feature_active(FeatureId::HardDrop) {
                    self.last_hard_drop_ms = Some(now_ms);
                    game.apply_action(GameAction::HardDrop)
                } else {
                    false
                }
            }
            GameAction::SoftDrop => Self::soft_drop(game),
            other => game.apply_action(other),
        };

        self.last_action_ms[index] = Some(now_ms);
        trace!(action = action.as_str(), changed, "action");
        changed
    }

    fn soft_drop(game: &mut Game) -> bool {
        game.apply_action(GameAction::SoftDrop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::GameConfig;

    fn game() -> Game {
        Game::new(&GameConfig::seeded(5150)).unwrap()
    }

    fn active_x(game: &Game) -> i32 {
        game.state().board().current_piece().unwrap().x
    }

    fn active_y(game: &Game) -> i32 {
        game.state().board().current_piece().unwrap().y
    }

    #[test]
    fn test_press_moves_once() {
        let mut game = game();
        let mut controls = Controls::new();
        let x = active_x(&game);

        assert!(controls.key_down(GameAction::MoveLeft, 1000, &mut game));
        assert_eq!(active_x(&game), x - 1);

        // Held key: further key-down events do not repeat the move
        assert!(!controls.key_down(GameAction::MoveLeft, 1200, &mut game));
        assert_eq!(active_x(&game), x - 1);
    }

    #[test]
    fn test_cooldown_between_presses() {
        let mut game = game();
        let mut controls = Controls::new();
        let x = active_x(&game);

        controls.key_down(GameAction::MoveRight, 1000, &mut game);
        controls.key_up(GameAction::MoveRight);
        assert!(!controls.key_down(GameAction::MoveRight, 1050, &mut game));
        assert_eq!(active_x(&game), x + 1);

        controls.key_up(GameAction::MoveRight);
        assert!(controls.key_down(GameAction::MoveRight, 1100, &mut game));
        assert_eq!(active_x(&game), x + 2);
    }

    #[test]
    fn test_soft_drop_repeats_while_held() {
        let mut game = game();
        let mut controls = Controls::new();

        controls.key_down(GameAction::SoftDrop, 0, &mut game);
        assert_eq!(active_y(&game), 1);

        assert!(!controls.frame(30, &mut game));
        assert!(controls.frame(50, &mut game));
        assert_eq!(active_y(&game), 2);
        assert!(controls.frame(100, &mut game));
        assert_eq!(active_y(&game), 3);

        controls.key_up(GameAction::SoftDrop);
        assert!(!controls.frame(200, &mut game));
        assert_eq!(active_y(&game), 3);
    }

    #[test]
    fn test_hard_drop_cooldown_and_feature_gate() {
        let mut game = game();
        let mut controls = Controls::new();

        assert!(controls.key_down(GameAction::HardDrop, 0, &mut game));
        assert_eq!(game.state().piece_id(), 2);
        controls.key_up(GameAction::HardDrop);

        // Past the per-key cooldown but inside the hard-drop cooldown
        assert!(!controls.key_down(GameAction::HardDrop, 300, &mut game));
        controls.key_up(GameAction::HardDrop);
        assert_eq!(game.state().piece_id(), 2);

        game.toggle_feature(FeatureId::HardDrop);
        assert!(!controls.key_down(GameAction::HardDrop, 1000, &mut game));
        assert_eq!(game.state().piece_id(), 2);
    }

    #[test]
    fn test_hold_requires_feature() {
        let mut game = game();
        let mut controls = Controls::new();

        assert!(!controls.key_down(GameAction::Hold, 0, &mut game));
        controls.key_up(GameAction::Hold);

        game.toggle_feature(FeatureId::HoldPiece);
        assert!(controls.key_down(GameAction::Hold, 200, &mut game));
        assert!(game.features().hold().unwrap().held_piece().is_some());
    }

    #[test]
    fn test_release_timeout_expires_held_keys() {
        let mut game = game();
        let mut controls = Controls::new().with_release_timeout_ms(150);

        controls.key_down(GameAction::SoftDrop, 0, &mut game);
        controls.frame(100, &mut game);
        assert!(controls.is_held(GameAction::SoftDrop));

        controls.frame(400, &mut game);
        assert!(!controls.is_held(GameAction::SoftDrop));
    }
}
