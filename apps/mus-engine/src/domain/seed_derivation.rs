//! RNG seed derivation utilities for deterministic game behavior.
//!
//! Provides functions to derive unique-but-deterministic seeds for different
//! contexts (dealing, reshuffling, AI decisions) from a base game seed.

/// Derive the shuffle seed for a round's deal.
pub fn derive_dealing_seed(game_seed: u64, round_no: u32) -> u64 {
    game_seed
        .wrapping_add((round_no as u64).wrapping_mul(1_000_000))
        .wrapping_add(2)
}

/// Derive the seed used when the discard pile is shuffled back into the deck.
///
/// `mus_round` distinguishes repeated reshuffles within one round.
pub fn derive_reshuffle_seed(game_seed: u64, round_no: u32, mus_round: u32) -> u64 {
    derive_dealing_seed(game_seed, round_no)
        .wrapping_add((mus_round as u64).wrapping_mul(10_000))
        .wrapping_add(3)
}

/// Derive the seed for one AI decision instant.
///
/// Same base + round + step + seat = same seed, so a decision can be replayed.
pub fn derive_decision_seed(base_seed: u64, round_no: u32, step: usize, seat: u8) -> u64 {
    base_seed
        .wrapping_add((round_no as u64).wrapping_mul(10_000_000))
        .wrapping_add((step as u64).wrapping_mul(100))
        .wrapping_add(seat as u64)
        .wrapping_add(1)
}
