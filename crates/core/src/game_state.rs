//! Game state module - spawning, scoring, game over and gravity speed
//!
//! `GameState` owns the [`Board`] and the [`PieceQueue`] for one session.
//! It spawns pieces at the configured offset, turns line clears into score,
//! detects game over and holds the drop interval the game loop reads on its
//! next tick. Observers are notified through optional callbacks.

use std::fmt;

use tracing::{debug, info};

use crate::board::Board;
use crate::config::{DropIntervalConfig, GameConfig};
use crate::error::ConfigError;
use crate::rng::PieceQueue;
use crate::scoring::{line_clear_points, ScoreTable};
use crate::tetromino::Tetromino;
use crate::types::{LINE_SCORES, SPAWN_Y};

/// Callback receiving a score or an interval in milliseconds
pub type Listener = Box<dyn FnMut(u32)>;

/// Optional observers of a [`GameState`]
#[derive(Default)]
pub struct GameCallbacks {
    /// Receives the new total score after every score update and on reset
    pub on_score_change: Option<Listener>,
    /// Receives the final score, once per game
    pub on_game_over: Option<Listener>,
    /// Receives the clamped interval whenever it is set
    pub on_drop_interval_change: Option<Listener>,
}

impl GameCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_score_change(mut self, f: impl FnMut(u32) + 'static) -> Self {
        self.on_score_change = Some(Box::new(f));
        self
    }

    pub fn on_game_over(mut self, f: impl FnMut(u32) + 'static) -> Self {
        self.on_game_over = Some(Box::new(f));
        self
    }

    pub fn on_drop_interval_change(mut self, f: impl FnMut(u32) + 'static) -> Self {
        self.on_drop_interval_change = Some(Box::new(f));
        self
    }
}

impl fmt::Debug for GameCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameCallbacks")
            .field("on_score_change", &self.on_score_change.is_some())
            .field("on_game_over", &self.on_game_over.is_some())
            .field("on_drop_interval_change", &self.on_drop_interval_change.is_some())
            .finish()
    }
}

/// Complete game state of one session
#[derive(Debug)]
pub struct GameState {
    board: Board,
    queue: PieceQueue,
    score: u32,
    /// Monotonic: only `reset` clears it
    game_over: bool,
    drop_interval_ms: u32,
    /// Monotonic id of successfully spawned pieces (hold swaps included).
    ///
    /// Features compare it against a remembered value to notice new pieces.
    piece_id: u32,
    spawn_x: i32,
    spawn_y: i32,
    score_table: ScoreTable,
    interval_bounds: DropIntervalConfig,
    callbacks: GameCallbacks,
}

impl GameState {
    /// Create a session with default scoring and interval bounds and spawn
    /// the first piece.
    ///
    /// The spawn column is centered for a 4-wide piece (3 on a 10-wide board).
    pub fn new(board: Board, queue: PieceQueue, callbacks: GameCallbacks) -> Self {
        let spawn_x = (board.width() as i32 - 4).max(0) / 2;
        let interval_bounds = DropIntervalConfig::default();

        let mut state = Self {
            board,
            queue,
            score: 0,
            game_over: false,
            drop_interval_ms: interval_bounds.base_ms,
            piece_id: 0,
            spawn_x,
            spawn_y: SPAWN_Y,
            score_table: LINE_SCORES,
            interval_bounds,
            callbacks,
        };
        state.spawn_piece(None);
        state
    }

    /// Build board, queue and state from a validated config
    pub fn from_config(config: &GameConfig, callbacks: GameCallbacks) -> Result<Self, ConfigError> {
        config.validate()?;

        let board = Board::new(config.board_width, config.board_height)?;
        let queue = match config.seed {
            Some(seed) => PieceQueue::seeded(config.randomizer, seed),
            None => PieceQueue::new(config.randomizer),
        }
        .with_lookahead(config.lookahead);

        let bounds = config.drop_interval;
        let mut state = Self {
            board,
            queue,
            score: 0,
            game_over: false,
            drop_interval_ms: bounds.clamp(bounds.base_ms),
            piece_id: 0,
            spawn_x: config.spawn_x(),
            spawn_y: config.spawn_y,
            score_table: config.score_table,
            interval_bounds: bounds,
            callbacks,
        };
        state.spawn_piece(None);
        Ok(state)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn queue(&self) -> &PieceQueue {
        &self.queue
    }

    /// Upcoming pieces, next spawn first
    pub fn next_pieces(&self) -> impl Iterator<Item = &Tetromino> + '_ {
        self.queue.upcoming()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn piece_id(&self) -> u32 {
        self.piece_id
    }

    pub fn spawn_position(&self) -> (i32, i32) {
        (self.spawn_x, self.spawn_y)
    }

    /// Install a new active piece at the spawn offset.
    ///
    /// `specific` is used as-is (hold swaps); otherwise the next queued piece
    /// is taken and the queue is topped up by one. When the piece does not
    /// fit, the game ends and no replacement is queued. Returns whether the
    /// spawn succeeded.
    pub fn spawn_piece(&mut self, specific: Option<Tetromino>) -> bool {
        let from_queue = specific.is_none();
        let piece = match specific {
            Some(piece) => piece,
            None => self.queue.take_next(),
        };

        self.board
            .set_current_piece(piece, self.spawn_x, self.spawn_y);

        if !self
            .board
            .is_valid_move(&piece, self.spawn_x, self.spawn_y)
        {
            debug!(kind = piece.kind().as_str(), "spawn blocked");
            self.enter_game_over();
            return false;
        }

        if from_queue {
            self.queue.push_random();
        }

        self.piece_id = self.piece_id.wrapping_add(1);
        debug!(
            kind = piece.kind().as_str(),
            piece_id = self.piece_id,
            "piece spawned"
        );
        true
    }

    /// Lock the active piece, clear lines, score them and spawn the next piece.
    ///
    /// Returns the number of lines cleared.
    pub fn lock_current_piece(&mut self) -> u32 {
        self.board.place_current_piece();
        let lines = self.board.clear_lines();
        self.update_score(lines);
        self.spawn_piece(None);
        lines
    }

    /// Add the points for `lines_cleared` and notify the score listener
    pub fn update_score(&mut self, lines_cleared: u32) {
        let points = line_clear_points(&self.score_table, lines_cleared);
        self.score = self.score.saturating_add(points);
        if let Some(f) = self.callbacks.on_score_change.as_mut() {
            f(self.score);
        }
    }

    fn enter_game_over(&mut self) {
        if self.game_over {
            return;
        }
        self.game_over = true;
        info!(score = self.score, "game over");
        if let Some(f) = self.callbacks.on_game_over.as_mut() {
            f(self.score);
        }
    }

    /// Whether the game has ended.
    ///
    /// Besides the internal flag this also checks the board's top row; the
    /// first time that detects game over, the flag is set and the game-over
    /// listener fires. Later calls never fire it again.
    pub fn is_game_over(&mut self) -> bool {
        if !self.game_over && self.board.is_game_over() {
            self.enter_game_over();
        }
        self.game_over
    }

    /// Internal flag only, without checking the board
    pub fn game_over_flag(&self) -> bool {
        self.game_over
    }

    /// Set the gravity interval, clamped to the configured bounds.
    ///
    /// The game loop picks it up on its next tick.
    pub fn set_drop_interval(&mut self, interval_ms: u32) {
        let clamped = self.interval_bounds.clamp(interval_ms);
        self.drop_interval_ms = clamped;
        debug!(requested = interval_ms, interval_ms = clamped, "drop interval set");
        if let Some(f) = self.callbacks.on_drop_interval_change.as_mut() {
            f(clamped);
        }
    }

    pub fn drop_interval(&self) -> u32 {
        self.drop_interval_ms
    }

    pub fn drop_interval_bounds(&self) -> DropIntervalConfig {
        self.interval_bounds
    }

    /// Start over: empty board, fresh queue, zero score, game over cleared.
    ///
    /// The drop interval is kept.
    pub fn reset(&mut self) {
        self.board.reset();
        self.queue.reset();
        self.score = 0;
        self.game_over = false;
        info!("game reset");
        if let Some(f) = self.callbacks.on_score_change.as_mut() {
            f(self.score);
        }
        self.spawn_piece(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::Randomizer;
    use crate::types::PieceKind;
    use std::cell::Cell;
    use std::rc::Rc;

    fn seeded_state(seed: u64) -> GameState {
        GameState::from_config(&GameConfig::seeded(seed), GameCallbacks::new()).unwrap()
    }

    #[test]
    fn test_new_game_state_spawns() {
        let state = seeded_state(12345);

        assert_eq!(state.score(), 0);
        assert!(!state.game_over_flag());
        assert_eq!(state.piece_id(), 1);
        assert_eq!(state.drop_interval(), 1000);

        let active = state.board().current_piece().unwrap();
        assert_eq!((active.x, active.y), (3, 0));
        assert_eq!(state.next_pieces().count(), 3);
    }

    #[test]
    fn test_spawn_takes_queue_front_and_refills() {
        let mut state = seeded_state(7);
        let upcoming: Vec<PieceKind> = state.next_pieces().map(|t| t.kind()).collect();

        assert!(state.spawn_piece(None));
        let active = state.board().current_piece().unwrap();
        assert_eq!(active.tetromino.kind(), upcoming[0]);

        let now: Vec<PieceKind> = state.next_pieces().map(|t| t.kind()).collect();
        assert_eq!(now.len(), 3);
        assert_eq!(now[..2], upcoming[1..]);
    }

    #[test]
    fn test_specific_spawn_leaves_queue_alone() {
        let mut state = seeded_state(7);
        let upcoming: Vec<PieceKind> = state.next_pieces().map(|t| t.kind()).collect();

        assert!(state.spawn_piece(Some(Tetromino::new(PieceKind::Z))));
        assert_eq!(
            state.board().current_piece().unwrap().tetromino.kind(),
            PieceKind::Z
        );
        let now: Vec<PieceKind> = state.next_pieces().map(|t| t.kind()).collect();
        assert_eq!(now, upcoming);
    }

    #[test]
    fn test_update_score_notifies() {
        let seen = Rc::new(Cell::new(0));
        let sink = seen.clone();
        let callbacks = GameCallbacks::new().on_score_change(move |s| sink.set(s));
        let mut state = GameState::from_config(&GameConfig::seeded(1), callbacks).unwrap();

        state.update_score(2);
        state.update_score(1);
        assert_eq!(state.score(), 400);
        assert_eq!(seen.get(), 400);
    }

    #[test]
    fn test_blocked_spawn_fires_game_over_once() {
        let fired = Rc::new(Cell::new(0u32));
        let sink = fired.clone();
        let callbacks = GameCallbacks::new().on_game_over(move |_| sink.set(sink.get() + 1));
        let mut state = GameState::from_config(&GameConfig::seeded(3), callbacks).unwrap();

        for x in 0..10 {
            state.board_mut().set(x, 0, Some(PieceKind::O));
            state.board_mut().set(x, 1, Some(PieceKind::O));
        }
        let queued_before = state.queue().len();

        assert!(!state.spawn_piece(None));
        assert!(state.game_over_flag());
        // The blocked piece came out of the queue and was not replaced
        assert_eq!(state.queue().len(), queued_before - 1);

        for _ in 0..5 {
            assert!(state.is_game_over());
        }
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn test_top_row_detection_is_idempotent() {
        let fired = Rc::new(Cell::new(0u32));
        let sink = fired.clone();
        let callbacks = GameCallbacks::new().on_game_over(move |_| sink.set(sink.get() + 1));
        let mut state = GameState::from_config(&GameConfig::seeded(3), callbacks).unwrap();

        assert!(!state.is_game_over());
        state.board_mut().set(9, 0, Some(PieceKind::I));
        assert!(state.is_game_over());
        assert!(state.is_game_over());
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn test_drop_interval_is_clamped() {
        let seen = Rc::new(Cell::new(0));
        let sink = seen.clone();
        let callbacks = GameCallbacks::new().on_drop_interval_change(move |ms| sink.set(ms));
        let mut state = GameState::from_config(&GameConfig::seeded(1), callbacks).unwrap();

        state.set_drop_interval(10);
        assert_eq!(state.drop_interval(), 100);
        assert_eq!(seen.get(), 100);

        state.set_drop_interval(99_999);
        assert_eq!(state.drop_interval(), 2000);

        state.set_drop_interval(450);
        assert_eq!(state.drop_interval(), 450);
    }

    #[test]
    fn test_reset_clears_everything_but_interval() {
        let mut state = seeded_state(5);
        state.update_score(4);
        state.set_drop_interval(300);
        state.board_mut().set(0, 0, Some(PieceKind::T));
        assert!(state.is_game_over());

        state.reset();
        assert_eq!(state.score(), 0);
        assert!(!state.is_game_over());
        assert!(state.board().current_piece().is_some());
        assert_eq!(state.drop_interval(), 300);
        assert_eq!(state.next_pieces().count(), 3);
    }

    #[test]
    fn test_lock_current_piece_spawns_next() {
        let mut state = seeded_state(11);
        let before = state.piece_id();

        while state.board_mut().move_current_piece_down() {}
        let lines = state.lock_current_piece();
        assert_eq!(lines, 0);
        assert_eq!(state.piece_id(), before + 1);
        assert!(state.board().current_piece().is_some());
    }

    #[test]
    fn test_short_lookahead_config_keeps_preview_across_reset() {
        let mut config = GameConfig::seeded(12);
        config.lookahead = 1;
        let mut state = GameState::from_config(&config, GameCallbacks::new()).unwrap();
        let before = state.next_pieces().count();

        state.reset();
        assert_eq!(before, 3);
        assert_eq!(state.next_pieces().count(), before);
    }

    #[test]
    fn test_new_uses_centered_spawn() {
        let board = Board::new(6, 8).unwrap();
        let queue = PieceQueue::seeded(Randomizer::Uniform, 2);
        let state = GameState::new(board, queue, GameCallbacks::new());
        assert_eq!(state.spawn_position(), (1, 0));
    }
}
