use crate::domain::actions::{ActionKind, GameAction};
use crate::domain::game_flow::apply_action;
use crate::domain::lances::Lance;
use crate::domain::legals::legal_actions;
use crate::domain::parse_cards;
use crate::domain::state::{GameState, LanceOutcome, Phase, Team};
use crate::domain::test_state_helpers::{
    card_count, pass_out_round, play, play_all, table_with_hands,
};
use crate::errors::domain::{DomainError, ValidationKind};

fn kind_of(err: DomainError) -> ValidationKind {
    match err {
        DomainError::Validation(kind, _) => kind,
        other => panic!("expected validation error, got {other:?}"),
    }
}

fn no_pairs_table() -> GameState {
    table_with_hands(
        0,
        [
            &["KO", "6C", "7S", "5B"],
            &["AO", "2C", "4S", "6B"],
            &["3O", "JC", "4B", "AB"],
            &["7O", "5C", "NB", "2S"],
        ],
    )
}

#[test]
fn first_continue_deals_round_one() {
    let state = GameState::with_default_names(99, 1);
    let dealt = play(&state, 1, GameAction::Continue);
    assert_eq!(dealt.round_no, 1);
    assert_eq!(dealt.phase, Phase::MusDecision);
    assert_eq!(dealt.mano, 1);
    assert_eq!(dealt.turn, 1);
    assert_eq!(dealt.deck.len(), 24);
    assert!(dealt.players.iter().all(|p| p.hand.len() == 4));
    assert_eq!(card_count(&dealt), 40);
}

#[test]
fn same_seed_deals_same_hands() {
    let a = play(&GameState::with_default_names(5, 0), 0, GameAction::Continue);
    let b = play(&GameState::with_default_names(5, 0), 0, GameAction::Continue);
    assert_eq!(a.players, b.players);
}

#[test]
fn out_of_turn_is_checked_before_legality() {
    let state = no_pairs_table();
    let err = apply_action(&state, 2, GameAction::Accept).unwrap_err();
    assert_eq!(kind_of(err), ValidationKind::OutOfTurn);
}

#[test]
fn unadvertised_action_is_illegal() {
    let state = no_pairs_table();
    let before = state.clone();
    let err = apply_action(&state, 0, GameAction::Pass).unwrap_err();
    assert_eq!(kind_of(err), ValidationKind::IllegalAction);
    assert_eq!(state, before);
}

#[test]
fn four_continues_open_discard() {
    let state = play_all(
        &no_pairs_table(),
        &[
            (0, GameAction::ContinueMus),
            (1, GameAction::ContinueMus),
            (2, GameAction::ContinueMus),
        ],
    );
    assert_eq!(state.phase, Phase::MusDecision);
    assert_eq!(state.turn, 3);
    let state = play(&state, 3, GameAction::ContinueMus);
    assert_eq!(state.phase, Phase::Discard);
    assert_eq!(state.turn, 0);
    assert_eq!(legal_actions(&state), vec![ActionKind::ConfirmDiscard]);
}

#[test]
fn stop_mus_goes_straight_to_grande() {
    let state = play_all(
        &no_pairs_table(),
        &[(0, GameAction::ContinueMus), (1, GameAction::StopMus)],
    );
    assert_eq!(state.phase, Phase::Grande);
    assert_eq!(state.turn, 0);
}

fn discard_table() -> GameState {
    play_all(
        &no_pairs_table(),
        &[
            (0, GameAction::ContinueMus),
            (1, GameAction::ContinueMus),
            (2, GameAction::ContinueMus),
            (3, GameAction::ContinueMus),
        ],
    )
}

#[test]
fn discard_payload_is_validated() {
    let state = discard_table();

    let err = apply_action(&state, 0, GameAction::ConfirmDiscard(vec![])).unwrap_err();
    assert_eq!(kind_of(err), ValidationKind::InvalidDiscard);

    let twice = parse_cards(&["KO", "KO"]).unwrap();
    let err = apply_action(&state, 0, GameAction::ConfirmDiscard(twice)).unwrap_err();
    assert_eq!(kind_of(err), ValidationKind::InvalidDiscard);

    let foreign = parse_cards(&["AO"]).unwrap();
    let err = apply_action(&state, 0, GameAction::ConfirmDiscard(foreign)).unwrap_err();
    assert_eq!(kind_of(err), ValidationKind::CardNotInHand);

    let five = parse_cards(&["KO", "6C", "7S", "5B", "AO"]).unwrap();
    let err = apply_action(&state, 0, GameAction::ConfirmDiscard(five)).unwrap_err();
    assert_eq!(kind_of(err), ValidationKind::InvalidDiscard);
}

#[test]
fn thirty_one_may_keep_every_card() {
    let mut state = discard_table();
    state.players[0].hand = parse_cards(&["KO", "NC", "JS", "AC"]).unwrap();
    let next = play(&state, 0, GameAction::ConfirmDiscard(vec![]));
    assert_eq!(next.turn, 1);
}

#[test]
fn completed_discard_tops_up_and_returns_to_mus() {
    let state = discard_table();
    let script: Vec<_> = (0u8..4)
        .map(|seat| {
            let first = state.players[seat as usize].hand[..1].to_vec();
            (seat, GameAction::ConfirmDiscard(first))
        })
        .collect();
    let next = play_all(&state, &script);

    assert_eq!(next.phase, Phase::MusDecision);
    assert_eq!(next.turn, next.mano);
    assert_eq!(next.mus_rounds, 1);
    assert_eq!(next.deck.len(), 20);
    assert_eq!(next.discard_pile.len(), 4);
    for (seat, p) in next.players.iter().enumerate() {
        assert_eq!(p.hand.len(), 4);
        let thrown = state.players[seat].hand[0];
        assert!(!p.hand.contains(&thrown));
    }
    assert_eq!(card_count(&next), 40);
}

#[test]
fn repeated_discards_reshuffle_the_pile() {
    let mut state = discard_table();
    for _ in 0..4 {
        let script: Vec<_> = (0u8..4)
            .map(|seat| {
                let all = state.players[seat as usize].hand.clone();
                (seat, GameAction::ConfirmDiscard(all))
            })
            .collect();
        state = play_all(&state, &script);
        assert_eq!(card_count(&state), 40);
        assert!(state.players.iter().all(|p| p.hand.len() == 4));
        state = play_all(
            &state,
            &[
                (0, GameAction::ContinueMus),
                (1, GameAction::ContinueMus),
                (2, GameAction::ContinueMus),
                (3, GameAction::ContinueMus),
            ],
        );
    }
    assert_eq!(state.mus_rounds, 4);
}

#[test]
fn nobody_with_pares_or_juego_plays_punto() {
    let state = play(&no_pairs_table(), 0, GameAction::StopMus);
    let state = play_all(
        &state,
        &[
            (0, GameAction::Pass),
            (1, GameAction::Pass),
            (2, GameAction::Pass),
            (3, GameAction::Pass),
        ],
    );
    assert_eq!(state.phase, Phase::Chica);
    let state = play_all(
        &state,
        &[
            (0, GameAction::Pass),
            (1, GameAction::Pass),
            (2, GameAction::Pass),
            (3, GameAction::Pass),
        ],
    );
    assert_eq!(state.phase, Phase::ParesCheck);
    let state = play_all(
        &state,
        &[
            (0, GameAction::DeclareNone),
            (1, GameAction::DeclareNone),
            (2, GameAction::DeclareNone),
            (3, GameAction::DeclareNone),
        ],
    );
    assert_eq!(state.outcome(Lance::Pares), Some(LanceOutcome::Skipped));
    assert_eq!(state.phase, Phase::JuegoCheck);
    let state = play_all(
        &state,
        &[
            (0, GameAction::DeclareNone),
            (1, GameAction::DeclareNone),
            (2, GameAction::DeclareNone),
            (3, GameAction::DeclareNone),
        ],
    );
    assert_eq!(state.phase, Phase::Punto);
    assert_eq!(state.outcome(Lance::Juego), Some(LanceOutcome::Skipped));
}

#[test]
fn false_declaration_is_illegal() {
    let mut state = play(&no_pairs_table(), 0, GameAction::StopMus);
    state.phase = Phase::ParesCheck;
    state.turn = 0;
    let err = apply_action(&state, 0, GameAction::DeclareHave).unwrap_err();
    assert_eq!(kind_of(err), ValidationKind::IllegalAction);
}

#[test]
fn round_over_continue_rotates_mano() {
    let over = pass_out_round(&no_pairs_table());
    assert_eq!(over.phase, Phase::RoundOver);
    assert_eq!(legal_actions(&over), vec![ActionKind::Continue]);
    assert_eq!(over.turn, 0);

    let next = play(&over, 0, GameAction::Continue);
    assert_eq!(next.round_no, 2);
    assert_eq!(next.mano, 1);
    assert_eq!(next.turn, 1);
    assert_eq!(next.phase, Phase::MusDecision);
    assert!(next.outcomes.iter().all(Option::is_none));
    assert_eq!(next.scores, over.scores);
}

#[test]
fn accepted_ordago_ends_the_game() {
    let state = play(&no_pairs_table(), 0, GameAction::StopMus);
    // Grande: seat 0 (K) and seat 2 (3) tie on 12; mano wins
    let state = play_all(&state, &[(0, GameAction::AllIn)]);
    assert_eq!(
        legal_actions(&state),
        vec![ActionKind::Accept, ActionKind::Reject]
    );
    let state = play(&state, 1, GameAction::Accept);
    assert_eq!(state.phase, Phase::GameOver);
    assert_eq!(state.winner, Some(Team::A));
    assert_eq!(state.team_score(Team::A), 40);
    assert_eq!(legal_actions(&state), vec![ActionKind::NewGame]);

    let fresh = play(&state, state.turn, GameAction::NewGame);
    assert_eq!(fresh.phase, Phase::MusDecision);
    assert_eq!(fresh.team_score(Team::A), 0);
    assert_eq!(fresh.winner, None);
    assert_eq!(fresh.mano, 1);
    assert_eq!(fresh.history.len(), 1);
    assert_eq!(fresh.history[0].action, GameAction::NewGame);
    assert_eq!(fresh.step, state.step + 1);
}

#[test]
fn history_restarts_each_round_while_step_keeps_counting() {
    let mut state = no_pairs_table();
    assert_eq!(state.step, 1);
    for round in 1..=2u32 {
        let over = pass_out_round(&state);
        assert_eq!(over.phase, Phase::RoundOver);
        assert!(over.history.iter().all(|r| r.round_no == round));
        assert_eq!(over.step, state.step + over.history.len() - state.history.len());

        state = play(&over, over.turn, GameAction::Continue);
        assert_eq!(state.history.len(), 1);
        assert_eq!(state.history[0].action, GameAction::Continue);
        assert_eq!(state.history[0].round_no, round + 1);
        assert_eq!(state.step, over.step + 1);
    }
}

#[test]
fn history_records_every_accepted_action() {
    let state = play_all(
        &no_pairs_table(),
        &[(0, GameAction::ContinueMus), (1, GameAction::StopMus)],
    );
    let tail: Vec<_> = state.history.iter().rev().take(2).collect();
    assert_eq!(tail[0].action, GameAction::StopMus);
    assert_eq!(tail[0].player, 1);
    assert_eq!(tail[0].phase, Phase::MusDecision);
    assert_eq!(tail[1].action, GameAction::ContinueMus);
}
