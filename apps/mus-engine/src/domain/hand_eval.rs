//! Pure hand evaluation: extreme cards, pair category and game total.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::domain::rules::JUEGO_MIN;
use crate::domain::{Card, Rank};

/// Pairing category of a four-card hand.
///
/// Ordered by `strength()`, never by rank value: any `TwoPair` beats any
/// `ThreeOfKind`, which beats any `Pair`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PairCategory {
    NoPairs,
    Pair(Rank),
    ThreeOfKind(Rank),
    TwoPair { high: Rank, low: Rank },
}

impl PairCategory {
    /// Ordinal used for cross-player comparison (0..=3).
    pub const fn strength(self) -> u8 {
        match self {
            PairCategory::NoPairs => 0,
            PairCategory::Pair(_) => 1,
            PairCategory::ThreeOfKind(_) => 2,
            PairCategory::TwoPair { .. } => 3,
        }
    }

    pub const fn is_some(self) -> bool {
        self.strength() > 0
    }

    /// Compare two categories: strength first, then the category's ranks by value.
    pub fn compare(self, other: Self) -> Ordering {
        match self.strength().cmp(&other.strength()) {
            Ordering::Equal => {}
            ord => return ord,
        }
        match (self, other) {
            (
                PairCategory::TwoPair { high: h1, low: l1 },
                PairCategory::TwoPair { high: h2, low: l2 },
            ) => h1
                .value()
                .cmp(&h2.value())
                .then_with(|| l1.value().cmp(&l2.value())),
            (PairCategory::ThreeOfKind(a), PairCategory::ThreeOfKind(b))
            | (PairCategory::Pair(a), PairCategory::Pair(b)) => a.value().cmp(&b.value()),
            _ => Ordering::Equal,
        }
    }
}

/// Highest card by rank value; the earliest card wins value ties.
pub fn highest_card(hand: &[Card]) -> Option<Card> {
    hand.iter()
        .copied()
        .reduce(|best, c| if c.value() > best.value() { c } else { best })
}

/// Lowest card by rank value; the earliest card wins value ties.
pub fn lowest_card(hand: &[Card]) -> Option<Card> {
    hand.iter()
        .copied()
        .reduce(|best, c| if c.value() < best.value() { c } else { best })
}

/// Rank occurrence counts, in first-seen order.
fn rank_counts(hand: &[Card]) -> Vec<(Rank, usize)> {
    let mut counts: Vec<(Rank, usize)> = Vec::with_capacity(hand.len());
    for card in hand {
        match counts.iter_mut().find(|(r, _)| *r == card.rank) {
            Some((_, n)) => *n += 1,
            None => counts.push((card.rank, 1)),
        }
    }
    counts
}

/// Classify a hand by grouping cards of the same rank.
pub fn pair_category(hand: &[Card]) -> PairCategory {
    let mut groups: Vec<(Rank, usize)> = rank_counts(hand)
        .into_iter()
        .filter(|&(_, n)| n >= 2)
        .collect();

    if let Some(&(rank, _)) = groups.iter().find(|&&(_, n)| n == 3) {
        return PairCategory::ThreeOfKind(rank);
    }

    match groups.len() {
        0 => PairCategory::NoPairs,
        1 => {
            let (rank, n) = groups[0];
            if n >= 4 {
                PairCategory::TwoPair {
                    high: rank,
                    low: rank,
                }
            } else {
                PairCategory::Pair(rank)
            }
        }
        _ => {
            groups.sort_by(|a, b| b.0.value().cmp(&a.0.value()));
            PairCategory::TwoPair {
                high: groups[0].0,
                low: groups[1].0,
            }
        }
    }
}

/// Sum of game values (juego/punto only).
pub fn game_value(hand: &[Card]) -> u8 {
    hand.iter().map(|c| c.game_value()).sum()
}

pub fn has_pares(hand: &[Card]) -> bool {
    pair_category(hand).is_some()
}

pub fn has_juego(hand: &[Card]) -> bool {
    game_value(hand) >= JUEGO_MIN
}
