//! Injectable randomness for decisions.
//!
//! Every decision instant gets its own [`Dice`]. The seeded source derives
//! that dice from (base seed, round, table step, seat), so asking twice
//! about the same state gives the same rolls.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::seed_derivation::derive_decision_seed;
use crate::domain::state::{GameState, PlayerId};

/// Random rolls for one decision.
#[derive(Debug, Clone)]
pub struct Dice {
    rng: StdRng,
}

impl Dice {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// True with probability `p` (clamped to 0..=1).
    pub fn chance(&mut self, p: f64) -> bool {
        let p = if p.is_finite() { p.clamp(0.0, 1.0) } else { 0.0 };
        self.rng.random_bool(p)
    }

    /// Uniform in `lo..=hi`; returns `lo` when the range is empty.
    pub fn pick_inclusive(&mut self, lo: u8, hi: u8) -> u8 {
        if hi <= lo {
            return lo;
        }
        self.rng.random_range(lo..=hi)
    }

    /// Uniform index below `len`; 0 for empty collections.
    pub fn index(&mut self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        self.rng.random_range(0..len)
    }

    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }
}

/// Source of [`Dice`] for decision instants.
pub trait RandomSource: Send + Sync {
    fn dice(&self, state: &GameState, player: PlayerId) -> Dice;
}

/// Reproducible rolls keyed on the decision instant.
#[derive(Debug, Clone, Copy)]
pub struct SeededRandom {
    base_seed: u64,
}

impl SeededRandom {
    pub const fn new(base_seed: u64) -> Self {
        Self { base_seed }
    }
}

impl RandomSource for SeededRandom {
    fn dice(&self, state: &GameState, player: PlayerId) -> Dice {
        Dice::from_seed(derive_decision_seed(
            self.base_seed,
            state.round_no,
            state.step,
            player,
        ))
    }
}

/// Fresh system entropy on every roll.
#[derive(Debug, Clone, Copy, Default)]
pub struct EntropyRandom;

impl RandomSource for EntropyRandom {
    fn dice(&self, _state: &GameState, _player: PlayerId) -> Dice {
        Dice::from_seed(rand::random())
    }
}
