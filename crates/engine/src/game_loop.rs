//! Frame-driven gravity
//!
//! The loop is fed monotonic timestamps by its host (a render loop, a timer
//! or a test). Each tick accumulates the elapsed time; once it reaches the
//! state's drop interval the active piece falls one row, or locks when it
//! cannot. At most one gravity step happens per tick and the accumulator
//! restarts from zero afterwards. Features and the frame callback run on
//! every tick, including after game over.

use std::fmt;

use tracing::trace;

use crate::core::GameState;
use crate::features::FeatureManager;

/// Receives the state and features after every running tick
pub type FrameCallback = Box<dyn FnMut(&GameState, &FeatureManager)>;

/// What gravity did during one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gravity {
    /// The interval has not elapsed yet
    Waiting,
    Moved,
    /// The piece could not fall; it was locked and `lines` were cleared
    Locked { lines: u32 },
    /// The interval elapsed but the game is over
    Halted,
}

/// Outcome of one [`GameLoop::tick`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    pub delta_ms: u64,
    pub gravity: Gravity,
}

#[derive(Default)]
pub struct GameLoop {
    running: bool,
    last_time_ms: u64,
    since_last_drop_ms: u64,
    on_frame: Option<FrameCallback>,
}

impl GameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_frame_callback(
        mut self,
        f: impl FnMut(&GameState, &FeatureManager) + 'static,
    ) -> Self {
        self.on_frame = Some(Box::new(f));
        self
    }

    /// Start ticking from `now_ms`; a running loop is left alone
    pub fn start(&mut self, now_ms: u64) {
        if self.running {
            return;
        }
        self.running = true;
        self.last_time_ms = now_ms;
        self.since_last_drop_ms = 0;
        trace!(now_ms, "game loop started");
    }

    pub fn stop(&mut self) {
        self.running = false;
        trace!("game loop stopped");
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Time accumulated toward the next gravity step
    pub fn pending_ms(&self) -> u64 {
        self.since_last_drop_ms
    }

    /// Advance to `now_ms`. Returns None while stopped.
    pub fn tick(
        &mut self,
        now_ms: u64,
        state: &mut GameState,
        features: &mut FeatureManager,
    ) -> Option<TickReport> {
        if !self.running {
            return None;
        }

        let delta_ms = now_ms.saturating_sub(self.last_time_ms);
        self.last_time_ms = now_ms;
        self.since_last_drop_ms = self.since_last_drop_ms.saturating_add(delta_ms);

        let mut gravity = Gravity::Waiting;
        if self.since_last_drop_ms >= u64::from(state.drop_interval()) {
            gravity = Self::drop_piece(state);
            self.since_last_drop_ms = 0;
        }

        features.update(state, u32::try_from(delta_ms).unwrap_or(u32::MAX));

        if let Some(f) = self.on_frame.as_mut() {
            f(state, features);
        }

        trace!(delta_ms, ?gravity, "tick");
        Some(TickReport { delta_ms, gravity })
    }

    /// Hard drop unless the game is over; returns the lines cleared
    pub fn hard_drop(&self, state: &mut GameState, features: &mut FeatureManager) -> u32 {
        if state.is_game_over() {
            return 0;
        }
        features.hard_drop(state)
    }

    fn drop_piece(state: &mut GameState) -> Gravity {
        if state.is_game_over() {
            return Gravity::Halted;
        }
        if state.board_mut().move_current_piece_down() {
            Gravity::Moved
        } else {
            let lines = state.lock_current_piece();
            Gravity::Locked { lines }
        }
    }
}

impl fmt::Debug for GameLoop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameLoop")
            .field("running", &self.running)
            .field("last_time_ms", &self.last_time_ms)
            .field("since_last_drop_ms", &self.since_last_drop_ms)
            .field("on_frame", &self.on_frame.is_some())
            .finish()
    }
}
