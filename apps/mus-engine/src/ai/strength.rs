//! Per-lance hand strength on a 0..=100 scale.

use serde::{Deserialize, Serialize};

use crate::ai::random_source::Dice;
use crate::domain::hand_eval::{game_value, highest_card, lowest_card, pair_category, PairCategory};
use crate::domain::lances::Lance;
use crate::domain::rules::{JUEGO_BEST, JUEGO_SECOND};
use crate::domain::{Card, Rank};

const GRANDE_PER_VALUE: u16 = 6;
const TIER_BONUS: u16 = 12;
const PAIR_BASE: u16 = 35;
const PAIR_CAP: u16 = 70;
const THREE_BASE: u16 = 75;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrengthProfile {
    pub grande: u8,
    pub chica: u8,
    pub pares: u8,
    pub juego: u8,
}

impl StrengthProfile {
    /// Score a hand. `dice` is only consulted for a 32 total.
    pub fn evaluate(hand: &[Card], dice: &mut Dice) -> Self {
        Self {
            grande: grande_strength(hand),
            chica: chica_strength(hand),
            pares: pares_strength(hand),
            juego: juego_strength(game_value(hand), dice),
        }
    }

    /// Strength that drives betting in `lance`. Punto reuses the juego
    /// scale, which rates 28..=30 totals.
    pub const fn for_lance(&self, lance: Lance) -> u8 {
        match lance {
            Lance::Grande => self.grande,
            Lance::Chica => self.chica,
            Lance::Pares => self.pares,
            Lance::Juego | Lance::Punto => self.juego,
        }
    }

    pub fn max(&self) -> u8 {
        self.grande.max(self.chica).max(self.pares).max(self.juego)
    }

    pub fn average(&self) -> u8 {
        let sum = self.grande as u16 + self.chica as u16 + self.pares as u16 + self.juego as u16;
        (sum / 4) as u8
    }
}

fn clamp_100(v: u16) -> u8 {
    v.min(100) as u8
}

pub fn grande_strength(hand: &[Card]) -> u8 {
    let Some(high) = highest_card(hand) else {
        return 0;
    };
    let top = hand.iter().filter(|c| c.rank.is_top_tier()).count() as u16;
    clamp_100(high.value() as u16 * GRANDE_PER_VALUE + top * TIER_BONUS)
}

pub fn chica_strength(hand: &[Card]) -> u8 {
    let Some(low) = lowest_card(hand) else {
        return 0;
    };
    let second = hand.iter().filter(|c| c.rank.is_second_tier()).count() as u16;
    clamp_100((13 - low.value() as u16) * GRANDE_PER_VALUE + second * TIER_BONUS)
}

pub fn pares_strength(hand: &[Card]) -> u8 {
    match pair_category(hand) {
        PairCategory::TwoPair { .. } => 100,
        PairCategory::ThreeOfKind(rank) => clamp_100(THREE_BASE + rank.value() as u16 * 20 / 12),
        PairCategory::Pair(rank) => {
            clamp_100((PAIR_BASE + rank.value() as u16 * 35 / 12).min(PAIR_CAP))
        }
        PairCategory::NoPairs => {
            let has = |r: Rank| hand.iter().any(|c| c.rank == r);
            // Same value under two ranks: a near-pair for the table
            if has(Rank::King) && has(Rank::Three) {
                10
            } else if has(Rank::Ace) && has(Rank::Two) {
                5
            } else {
                0
            }
        }
    }
}

pub fn juego_strength(total: u8, dice: &mut Dice) -> u8 {
    match total {
        JUEGO_BEST => 100,
        JUEGO_SECOND => dice.pick_inclusive(93, 96),
        t if t >= 33 => clamp_100(80 + (t as u16 - 33) * 18 / 7),
        t @ 28..=30 => clamp_100(70 + (t as u16 - 28) * 5),
        _ => 0,
    }
}
