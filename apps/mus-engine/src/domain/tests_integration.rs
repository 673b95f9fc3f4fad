use crate::domain::actions::{ActionKind, GameAction};
use crate::domain::game_flow::apply_action;
use crate::domain::lances::Lance;
use crate::domain::legals::legal_actions;
use crate::domain::rules::WINNING_SCORE;
use crate::domain::state::{GameState, LanceOutcome, Phase, Team, TeamScores};
use crate::domain::test_state_helpers::{card_count, materialize, play, play_all, table_with_hands};

#[test]
fn scripted_round_scores_each_lance() {
    let state = table_with_hands(
        0,
        [
            &["KO", "KC", "7S", "5B"],
            &["AO", "2C", "4S", "6B"],
            &["3O", "NC", "JS", "AB"],
            &["7O", "7C", "6S", "4C"],
        ],
    );

    let state = play_all(
        &state,
        &[
            (0, GameAction::StopMus),
            // Grande: seat 0 bets, seat 1 accepts
            (0, GameAction::Bet(2)),
            (1, GameAction::Accept),
            // Chica en paso
            (0, GameAction::Pass),
            (1, GameAction::Pass),
            (2, GameAction::Pass),
            (3, GameAction::Pass),
            // Pares check: seats 0 and 3 hold
            (0, GameAction::DeclareHave),
            (1, GameAction::DeclareNone),
            (2, GameAction::DeclareNone),
            (3, GameAction::DeclareHave),
            (0, GameAction::Pass),
            (3, GameAction::Pass),
            // Juego check: only team A holds
            (0, GameAction::DeclareHave),
            (1, GameAction::DeclareNone),
            (2, GameAction::DeclareHave),
            (3, GameAction::DeclareNone),
        ],
    );

    assert_eq!(state.phase, Phase::RoundOver);
    assert_eq!(state.outcome(Lance::Grande), Some(LanceOutcome::Accepted { stake: 2 }));
    assert_eq!(state.outcome(Lance::Chica), Some(LanceOutcome::EnPaso));
    assert_eq!(state.outcome(Lance::Pares), Some(LanceOutcome::EnPaso));
    assert_eq!(state.outcome(Lance::Juego), Some(LanceOutcome::Uncontested(Team::A)));

    // Grande 2 + pares bonus 1 + juego 3 (31) + 2 (32) for A; chica 1 for B
    assert_eq!(state.scores, TeamScores { a: 8, b: 1 });
    let summary = state.last_summary.clone().unwrap();
    assert_eq!(summary.points_for(Team::A), 8);
    assert_eq!(summary.points_for(Team::B), 1);
    assert_eq!(legal_actions(&state), vec![ActionKind::Continue]);
}

#[test]
fn seeded_round_with_one_accepted_bet() {
    let start = GameState::with_default_names(20_240_501, 0);
    let mut state = play(&start, 0, GameAction::Continue);
    state = play(&state, 0, GameAction::StopMus);

    // Grande: mano bets, seat 1 passes the decision to its partner, who accepts
    state = play(&state, 0, GameAction::Bet(2));
    state = play(&state, 1, GameAction::Reject);
    state = play(&state, 3, GameAction::Accept);
    assert_eq!(state.phase, Phase::Chica);

    let before = state.scores;
    while !matches!(state.phase, Phase::RoundOver | Phase::GameOver) {
        let kinds = legal_actions(&state);
        let kind = if kinds.contains(&ActionKind::Pass) {
            ActionKind::Pass
        } else {
            kinds[0]
        };
        let action = materialize(&state, kind);
        state = apply_action(&state, state.turn, action).unwrap();
    }

    assert_eq!(state.phase, Phase::RoundOver);
    let summary = state.last_summary.clone().unwrap();
    let gained_a = state.scores.a - before.a;
    let gained_b = state.scores.b - before.b;
    assert_eq!(gained_a, summary.points_for(Team::A));
    assert_eq!(gained_b, summary.points_for(Team::B));
    assert!(gained_a + gained_b >= 2 + 1, "grande stake plus at least chica");
    assert!(state.scores.a < WINNING_SCORE && state.scores.b < WINNING_SCORE);
    assert_eq!(legal_actions(&state), vec![ActionKind::Continue]);
    assert_eq!(card_count(&state), 40);
}

#[test]
fn full_game_reaches_game_over() {
    let mut state = play(&GameState::with_default_names(7, 3), 3, GameAction::Continue);
    let mut rounds = 0;
    while state.phase != Phase::GameOver {
        state = match state.phase {
            Phase::RoundOver => {
                rounds += 1;
                play(&state, state.turn, GameAction::Continue)
            }
            Phase::MusDecision => play(&state, state.turn, GameAction::StopMus),
            _ => {
                // Always bet the minimum and always accept
                let kinds = legal_actions(&state);
                let kind = [ActionKind::Accept, ActionKind::Bet]
                    .into_iter()
                    .find(|k| kinds.contains(k))
                    .unwrap_or(kinds[0]);
                play(&state, state.turn, materialize(&state, kind))
            }
        };
        assert!(rounds < 200, "game never finished");
    }
    let winner = state.winner.unwrap();
    assert!(state.team_score(winner) >= WINNING_SCORE);
}
