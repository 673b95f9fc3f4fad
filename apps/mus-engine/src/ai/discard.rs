//! Which cards to throw during a discard round.

use crate::ai::random_source::Dice;
use crate::ai::strength::StrengthProfile;
use crate::domain::hand_eval::{game_value, pair_category};
use crate::domain::rules::{discard_range, JUEGO_BEST};
use crate::domain::Card;

const TOP_TIER_KEEP: i32 = 30;
const SECOND_TIER_KEEP: i32 = 20;
const PAIRED_KEEP: i32 = 25;
const FACE_KEEP: i32 = 5;
const MANO_KEEP: i32 = 3;

/// Strength above which the hand is kept as tight as the rules allow.
const STAND_STRENGTH: u8 = 85;
const MODERATE_STRENGTH: u8 = 60;

/// Keep priority of `card` within `hand`; low values are thrown first.
pub fn keep_priority(card: Card, hand: &[Card], is_mano: bool) -> i32 {
    let mut p = if card.rank.is_top_tier() {
        TOP_TIER_KEEP
    } else if card.rank.is_second_tier() {
        SECOND_TIER_KEEP
    } else {
        0
    };
    if hand.iter().filter(|c| c.rank == card.rank).count() >= 2 {
        p += PAIRED_KEEP;
    }
    if card.game_value() == 10 {
        p += FACE_KEEP;
    }
    if is_mano && card.rank.is_top_tier() {
        p += MANO_KEEP;
    }
    p
}

/// How many cards to throw, before the legal minimum is applied.
pub fn discard_count(hand: &[Card], profile: &StrengthProfile, dice: &mut Dice) -> usize {
    if pair_category(hand).is_some() || profile.max() >= STAND_STRENGTH {
        0
    } else if profile.max() >= MODERATE_STRENGTH {
        1
    } else {
        dice.pick_inclusive(2, 4) as usize
    }
}

/// A lone top-tier card may go when nothing else is worth protecting.
fn may_sacrifice_top_tier(hand: &[Card], is_mano: bool) -> bool {
    let top = hand.iter().filter(|c| c.rank.is_top_tier()).count();
    !is_mano && top == 1 && !pair_category(hand).is_some() && game_value(hand) < JUEGO_BEST
}

/// Pick the cards to discard, with a short rationale.
///
/// A hand totalling 31 is never broken up. Every other hand throws at least
/// one card.
pub fn choose_discard(
    hand: &[Card],
    profile: &StrengthProfile,
    is_mano: bool,
    dice: &mut Dice,
) -> (Vec<Card>, String) {
    let total = game_value(hand);
    if total == JUEGO_BEST {
        return (Vec::new(), "holding 31: keep every card".to_string());
    }

    let legal = discard_range(total);
    let wanted = discard_count(hand, profile, dice);
    let count = wanted.clamp(*legal.start(), (*legal.end()).min(hand.len()));

    let mut ranked: Vec<(usize, i32)> = hand
        .iter()
        .enumerate()
        .map(|(i, &c)| (i, keep_priority(c, hand, is_mano)))
        .collect();
    ranked.sort_by_key(|&(i, p)| (p, i));

    let mut chosen: Vec<usize> = ranked.iter().take(count).map(|&(i, _)| i).collect();
    let spare: Vec<usize> = ranked.iter().skip(count).map(|&(i, _)| i).collect();

    // Only a lower-priority card may stand in for a top-tier one. With the
    // current weights the ranking already guarantees that, so this is a guard.
    if !may_sacrifice_top_tier(hand, is_mano) {
        let priority = |i: usize| keep_priority(hand[i], hand, is_mano);
        let mut spare = spare
            .into_iter()
            .filter(|&i| !hand[i].rank.is_top_tier());
        for slot in chosen.iter_mut() {
            if hand[*slot].rank.is_top_tier() {
                let floor = priority(*slot);
                if let Some(replacement) = spare.find(|&i| priority(i) < floor) {
                    *slot = replacement;
                }
            }
        }
    }

    let cards: Vec<Card> = chosen.iter().map(|&i| hand[i]).collect();
    let rationale = format!(
        "wanted {wanted}, throwing {} (max strength {})",
        cards.len(),
        profile.max()
    );
    (cards, rationale)
}
