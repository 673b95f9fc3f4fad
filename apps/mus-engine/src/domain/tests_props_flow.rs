//! Property tests for the transition function under random legal play.

use proptest::prelude::*;

use crate::domain::actions::GameAction;
use crate::domain::game_flow::apply_action;
use crate::domain::legals::legal_actions;
use crate::domain::state::{next_player, GameState, Phase};
use crate::domain::test_prelude;
use crate::domain::test_state_helpers::{card_count, materialize};
use crate::errors::domain::ValidationKind;

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Any sequence of advertised actions is accepted and keeps the deck whole.
    #[test]
    fn prop_random_legal_play_never_fails(
        seed in any::<u64>(),
        picks in prop::collection::vec(any::<usize>(), 1..200),
    ) {
        let mut state = GameState::with_default_names(seed, (seed % 4) as u8);
        for pick in picks {
            let kinds = legal_actions(&state);
            prop_assert!(!kinds.is_empty());
            let kind = kinds[pick % kinds.len()];
            let action = materialize(&state, kind);
            let next = apply_action(&state, state.turn, action.clone());
            prop_assert!(next.is_ok(), "{action} in {:?}: {:?}", state.phase, next.err());
            state = next.unwrap();
            if state.phase != Phase::PreRound {
                prop_assert_eq!(card_count(&state), 40);
                prop_assert!(state.players.iter().all(|p| p.hand.len() == 4));
            }
            prop_assert!(state.turn < 4 && state.mano < 4);
        }
    }

    /// The wrong actor is always rejected first, leaving the input untouched.
    #[test]
    fn prop_wrong_actor_is_out_of_turn(
        seed in any::<u64>(),
        steps in 0usize..30,
        offset in 1u8..4,
    ) {
        let mut state = GameState::with_default_names(seed, 0);
        for _ in 0..steps {
            let kind = legal_actions(&state)[0];
            let action = materialize(&state, kind);
            state = apply_action(&state, state.turn, action).unwrap();
        }
        let before = state.clone();
        let mut intruder = state.turn;
        for _ in 0..offset {
            intruder = next_player(intruder);
        }
        let err = apply_action(&state, intruder, GameAction::Pass).unwrap_err();
        prop_assert_eq!(err.kind(), Some(&ValidationKind::OutOfTurn));
        prop_assert_eq!(state, before);
    }
}
