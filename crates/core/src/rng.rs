//! RNG module - random piece generation and the lookahead queue
//!
//! Two draw policies are available:
//!
//! - **Uniform** (default): every draw picks one of the 7 kinds with equal
//!   probability. Repeats and droughts are possible.
//! - **SevenBag**: each bag contains one of each kind, shuffled; draws empty
//!   the bag before a new one is generated.
//!
//! The queue keeps a small buffer of already-drawn pieces so that the next
//! few spawns can be previewed. The RNG is seedable for deterministic tests.

use std::collections::VecDeque;

use arrayvec::ArrayVec;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::tetromino::Tetromino;
use crate::types::{PieceKind, DEFAULT_LOOKAHEAD};

/// Piece draw policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Randomizer {
    #[default]
    Uniform,
    SevenBag,
}

impl Randomizer {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "uniform" => Some(Randomizer::Uniform),
            "seven_bag" | "7bag" | "bag" => Some(Randomizer::SevenBag),
            _ => None,
        }
    }
}

/// Piece generator plus lookahead buffer
#[derive(Debug, Clone)]
pub struct PieceQueue {
    /// Drawn but not yet spawned pieces, front = next spawn
    pending: VecDeque<Tetromino>,
    /// Remaining kinds of the current bag (SevenBag only)
    bag: ArrayVec<PieceKind, 7>,
    lookahead: usize,
    randomizer: Randomizer,
    rng: StdRng,
}

impl PieceQueue {
    /// Create a queue seeded from OS entropy
    pub fn new(randomizer: Randomizer) -> Self {
        Self::with_rng(randomizer, StdRng::from_entropy())
    }

    /// Create a deterministic queue
    pub fn seeded(randomizer: Randomizer, seed: u64) -> Self {
        Self::with_rng(randomizer, StdRng::seed_from_u64(seed))
    }

    fn with_rng(randomizer: Randomizer, rng: StdRng) -> Self {
        let mut queue = Self {
            pending: VecDeque::with_capacity(DEFAULT_LOOKAHEAD + 1),
            bag: ArrayVec::new(),
            lookahead: DEFAULT_LOOKAHEAD,
            randomizer,
            rng,
        };
        queue.refill();
        queue
    }

    /// Change the lookahead size and top up the buffer.
    ///
    /// Sizes below [`DEFAULT_LOOKAHEAD`] are raised to it.
    pub fn with_lookahead(mut self, lookahead: usize) -> Self {
        self.lookahead = lookahead.max(DEFAULT_LOOKAHEAD);
        self.refill();
        self
    }

    pub fn lookahead(&self) -> usize {
        self.lookahead
    }

    pub fn randomizer(&self) -> Randomizer {
        self.randomizer
    }

    /// Draw a fresh piece from the generator (bypasses the buffer)
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Tetromino {
        Tetromino::new(self.draw_kind())
    }

    /// Draw `n` fresh pieces eagerly
    pub fn fill(&mut self, n: usize) -> Vec<Tetromino> {
        (0..n).map(|_| self.next()).collect()
    }

    fn draw_kind(&mut self) -> PieceKind {
        match self.randomizer {
            Randomizer::Uniform => PieceKind::ALL[self.rng.gen_range(0..PieceKind::ALL.len())],
            Randomizer::SevenBag => {
                if self.bag.is_empty() {
                    self.refill_bag();
                }
                // refill_bag always leaves 7 kinds behind
                self.bag.pop().unwrap_or(PieceKind::I)
            }
        }
    }

    /// Generate a new shuffled bag
    fn refill_bag(&mut self) {
        self.bag.clear();
        self.bag.extend(PieceKind::ALL);
        self.bag.shuffle(&mut self.rng);
    }

    /// Top the buffer back up to the lookahead size
    fn refill(&mut self) {
        while self.pending.len() < self.lookahead {
            let piece = self.next();
            self.pending.push_back(piece);
        }
    }

    /// Remove the next piece from the buffer.
    ///
    /// The buffer is not topped up; call [`PieceQueue::push_random`] once
    /// the piece has actually spawned. An empty buffer is refilled first.
    pub fn take_next(&mut self) -> Tetromino {
        if self.pending.is_empty() {
            self.refill();
        }
        match self.pending.pop_front() {
            Some(piece) => piece,
            None => self.next(),
        }
    }

    /// Append one freshly drawn piece to the buffer
    pub fn push_random(&mut self) {
        let piece = self.next();
        self.pending.push_back(piece);
    }

    /// Upcoming pieces, next spawn first
    pub fn upcoming(&self) -> impl Iterator<Item = &Tetromino> + '_ {
        self.pending.iter()
    }

    pub fn peek(&self) -> Option<&Tetromino> {
        self.pending.front()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Drop the buffer and draw a fresh one
    pub fn reset(&mut self) {
        self.pending.clear();
        self.bag.clear();
        self.refill();
    }
}

impl Default for PieceQueue {
    fn default() -> Self {
        Self::new(Randomizer::Uniform)
    }
}
