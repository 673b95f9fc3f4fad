use crate::domain::actions::{ActionKind, GameAction};
use crate::domain::game_flow::apply_action;
use crate::domain::lances::Lance;
use crate::domain::legals::legal_actions;
use crate::domain::state::{GameState, LanceOutcome, Phase, Team};
use crate::domain::test_state_helpers::{play, play_all, table_with_hands};
use crate::errors::domain::ValidationKind;

fn grande_table() -> GameState {
    let state = table_with_hands(
        0,
        [
            &["KO", "KC", "7S", "5B"],
            &["AO", "2C", "4S", "6B"],
            &["3O", "NC", "JS", "AB"],
            &["7O", "7C", "6S", "4C"],
        ],
    );
    play(&state, 0, GameAction::StopMus)
}

#[test]
fn bet_amount_is_validated() {
    let state = grande_table();
    for bad in [0u8, 1, 41] {
        let err = apply_action(&state, 0, GameAction::Bet(bad)).unwrap_err();
        assert_eq!(err.kind(), Some(&ValidationKind::InvalidBet), "bet {bad}");
    }
}

#[test]
fn accepted_bet_locks_the_stake() {
    let state = play_all(
        &grande_table(),
        &[(0, GameAction::Bet(2)), (1, GameAction::Accept)],
    );
    assert_eq!(state.outcome(Lance::Grande), Some(LanceOutcome::Accepted { stake: 2 }));
    assert_eq!(state.phase, Phase::Chica);
    assert_eq!(state.turn, 0);
    assert!(state.bet.is_none());
}

#[test]
fn second_opponent_answers_after_a_rejection() {
    let state = play_all(
        &grande_table(),
        &[(0, GameAction::Bet(4)), (1, GameAction::Reject)],
    );
    assert_eq!(state.phase, Phase::Grande);
    assert_eq!(state.turn, 3);
    let state = play(&state, 3, GameAction::Accept);
    assert_eq!(state.outcome(Lance::Grande), Some(LanceOutcome::Accepted { stake: 4 }));
}

#[test]
fn raise_then_double_reject_pays_previous_bet() {
    let state = play_all(
        &grande_table(),
        &[
            (0, GameAction::Bet(2)),
            (1, GameAction::Bet(3)),
            (2, GameAction::Reject),
            (0, GameAction::Reject),
        ],
    );
    assert_eq!(
        state.outcome(Lance::Grande),
        Some(LanceOutcome::Rejected {
            team: Team::B,
            points: 2
        })
    );
    assert_eq!(state.phase, Phase::Chica);
}

#[test]
fn pass_then_bet_still_needs_an_answer() {
    let state = play_all(
        &grande_table(),
        &[(0, GameAction::Pass), (1, GameAction::Bet(2))],
    );
    assert_eq!(state.turn, 2);
    let bet = state.bet.clone().unwrap();
    assert_eq!(bet.proposer, 1);
    assert_eq!(bet.responder, 2);
}

#[test]
fn selector_intents_keep_the_turn() {
    let state = play(&grande_table(), 0, GameAction::ToggleBetSelector);
    assert!(state.bet_selector_open);
    assert_eq!(state.turn, 0);
    assert!(legal_actions(&state).contains(&ActionKind::CancelBetSelector));
    let state = play(&state, 0, GameAction::CancelBetSelector);
    assert!(!state.bet_selector_open);
    assert_eq!(state.phase, Phase::Grande);

    let err = apply_action(&state, 0, GameAction::CancelBetSelector).unwrap_err();
    assert_eq!(err.kind(), Some(&ValidationKind::IllegalAction));
}

#[test]
fn bet_closes_the_selector() {
    let state = play_all(
        &grande_table(),
        &[(0, GameAction::ToggleBetSelector), (0, GameAction::Bet(2))],
    );
    assert!(!state.bet_selector_open);
}

#[test]
fn rejected_ordago_pays_fallback_and_play_continues() {
    let state = play_all(
        &grande_table(),
        &[
            (0, GameAction::Bet(5)),
            (1, GameAction::AllIn),
            (2, GameAction::Reject),
            (0, GameAction::Reject),
        ],
    );
    assert_eq!(
        state.outcome(Lance::Grande),
        Some(LanceOutcome::Rejected {
            team: Team::B,
            points: 5
        })
    );
    assert_eq!(state.phase, Phase::Chica);
}

#[test]
fn contested_pares_only_seats_holders() {
    let state = play_all(
        &grande_table(),
        &[
            (0, GameAction::Pass),
            (1, GameAction::Pass),
            (2, GameAction::Pass),
            (3, GameAction::Pass),
            (0, GameAction::Pass),
            (1, GameAction::Pass),
            (2, GameAction::Pass),
            (3, GameAction::Pass),
            (0, GameAction::DeclareHave),
            (1, GameAction::DeclareNone),
            (2, GameAction::DeclareNone),
            (3, GameAction::DeclareHave),
        ],
    );
    assert_eq!(state.phase, Phase::Pares);
    assert_eq!(state.turn, 0);
    // Seat 0 bets; seat 1 holds no pares so seat 3 answers
    let state = play(&state, 0, GameAction::Bet(2));
    assert_eq!(state.turn, 3);
    let err = apply_action(&state, 1, GameAction::Accept).unwrap_err();
    assert_eq!(err.kind(), Some(&ValidationKind::OutOfTurn));
    let state = play(&state, 3, GameAction::Reject);
    assert_eq!(
        state.outcome(Lance::Pares),
        Some(LanceOutcome::Rejected {
            team: Team::A,
            points: 1
        })
    );
    assert_eq!(state.phase, Phase::JuegoCheck);
}
