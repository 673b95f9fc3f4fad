//! Property tests for the hand evaluator and lance resolver.

use proptest::prelude::*;

use crate::domain::hand_eval::{game_value, highest_card, lowest_card, pair_category, PairCategory};
use crate::domain::lances::{chica_winner, grande_winner, juego_winner, pares_winner};
use crate::domain::rules::JUEGO_BEST;
use crate::domain::state::Player;
use crate::domain::test_gens;
use crate::domain::test_prelude;
use crate::domain::Rank;

fn players_from(hands: &[Vec<crate::domain::Card>; 4]) -> Vec<Player> {
    hands
        .iter()
        .enumerate()
        .map(|(i, h)| Player::new(i as u8, format!("P{i}"), h.clone()))
        .collect()
}

/// Independent oracle: count occurrences per rank.
fn max_rank_multiplicity(hand: &[crate::domain::Card]) -> usize {
    Rank::ALL
        .iter()
        .map(|r| hand.iter().filter(|c| c.rank == *r).count())
        .max()
        .unwrap_or(0)
}

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    #[test]
    fn prop_game_value_bounds(hand in test_gens::hand()) {
        let total = game_value(&hand);
        prop_assert!((4..=40).contains(&total));
    }

    #[test]
    fn prop_extremes_are_members(hand in test_gens::hand()) {
        let hi = highest_card(&hand).unwrap();
        let lo = lowest_card(&hand).unwrap();
        prop_assert!(hand.contains(&hi) && hand.contains(&lo));
        prop_assert!(hand.iter().all(|c| c.value() <= hi.value() && c.value() >= lo.value()));
    }

    #[test]
    fn prop_pair_category_matches_multiplicity(hand in test_gens::hand()) {
        let cat = pair_category(&hand);
        match max_rank_multiplicity(&hand) {
            1 => prop_assert_eq!(cat, PairCategory::NoPairs),
            3 => prop_assert!(
                matches!(cat, PairCategory::ThreeOfKind(_)),
                "expected three of a kind, got {:?}",
                cat
            ),
            4 => prop_assert!(
                matches!(cat, PairCategory::TwoPair { .. }),
                "expected four of a kind as two pair, got {:?}",
                cat
            ),
            _ => prop_assert!(
                matches!(cat, PairCategory::Pair(_) | PairCategory::TwoPair { .. }),
                "expected a pair or two pair, got {:?}",
                cat
            ),
        }
        if let PairCategory::TwoPair { high, low } = cat {
            prop_assert!(high.value() >= low.value());
        }
    }

    #[test]
    fn prop_grande_winner_holds_the_best_card_nearest_mano(hands in test_gens::table_hands()) {
        let players = players_from(&hands);
        let refs: Vec<&Player> = players.iter().collect();
        let winner = grande_winner(&refs).unwrap();
        let best = players.iter().map(|p| highest_card(&p.hand).unwrap().value()).max().unwrap();
        let first = players
            .iter()
            .find(|p| highest_card(&p.hand).unwrap().value() == best)
            .unwrap();
        prop_assert_eq!(winner, first.id);
    }

    #[test]
    fn prop_chica_winner_holds_the_lowest_card(hands in test_gens::table_hands()) {
        let players = players_from(&hands);
        let refs: Vec<&Player> = players.iter().collect();
        let winner = chica_winner(&refs).unwrap();
        let worst = players.iter().map(|p| lowest_card(&p.hand).unwrap().value()).min().unwrap();
        prop_assert_eq!(lowest_card(&players[winner as usize].hand).unwrap().value(), worst);
    }

    #[test]
    fn prop_pares_winner_has_top_strength(hands in test_gens::table_hands()) {
        let players = players_from(&hands);
        let refs: Vec<&Player> = players.iter().collect();
        let top = players.iter().map(|p| pair_category(&p.hand).strength()).max().unwrap();
        match pares_winner(&refs) {
            None => prop_assert_eq!(top, 0),
            Some(w) => prop_assert_eq!(pair_category(&players[w as usize].hand).strength(), top),
        }
    }

    #[test]
    fn prop_thirty_one_always_wins_juego(hands in test_gens::table_hands()) {
        let players = players_from(&hands);
        let refs: Vec<&Player> = players.iter().collect();
        let winner = juego_winner(&refs).unwrap();
        if players.iter().any(|p| game_value(&p.hand) == JUEGO_BEST) {
            prop_assert_eq!(game_value(&players[winner as usize].hand), JUEGO_BEST);
        }
    }

    #[test]
    fn prop_resolvers_ignore_rotation_except_for_ties(
        hands in test_gens::table_hands(),
        shift in 0usize..4,
    ) {
        let players = players_from(&hands);
        let mut rotated: Vec<&Player> = players.iter().collect();
        rotated.rotate_left(shift);
        let winner = grande_winner(&rotated).unwrap();
        let best = players.iter().map(|p| highest_card(&p.hand).unwrap().value()).max().unwrap();
        prop_assert_eq!(highest_card(&players[winner as usize].hand).unwrap().value(), best);
        // Mano-first: the first seat in rotation holding the best card wins
        let first = rotated
            .iter()
            .find(|p| highest_card(&p.hand).unwrap().value() == best)
            .unwrap();
        prop_assert_eq!(winner, first.id);
    }
}
