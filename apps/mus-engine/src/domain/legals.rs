//! Legal action sets per phase.

use std::ops::RangeInclusive;

use crate::domain::actions::ActionKind;
use crate::domain::betting::truthful_declaration;
use crate::domain::hand_eval::game_value;
use crate::domain::lances::Lance;
use crate::domain::rules::{discard_range, valid_bet_range};
use crate::domain::state::{GameState, Phase, PlayerId};

/// Actions the turn holder may take, independent of who asks.
pub fn legal_actions(state: &GameState) -> Vec<ActionKind> {
    let who = state.turn;
    match state.phase {
        Phase::PreRound | Phase::RoundOver => vec![ActionKind::Continue],
        Phase::GameOver => vec![ActionKind::NewGame],
        Phase::MusDecision => vec![ActionKind::ContinueMus, ActionKind::StopMus],
        Phase::Discard => vec![ActionKind::ConfirmDiscard],
        Phase::ParesCheck => vec![declaration(state, Lance::Pares, who)],
        Phase::JuegoCheck => vec![declaration(state, Lance::Juego, who)],
        Phase::Grande | Phase::Chica | Phase::Pares | Phase::Juego | Phase::Punto => {
            betting_actions(state)
        }
    }
}

/// Legal actions for `who`; empty unless it is their turn.
pub fn legal_actions_for(state: &GameState, who: PlayerId) -> Vec<ActionKind> {
    if who != state.turn {
        return Vec::new();
    }
    legal_actions(state)
}

fn declaration(state: &GameState, lance: Lance, who: PlayerId) -> ActionKind {
    if truthful_declaration(state, lance, who) {
        ActionKind::DeclareHave
    } else {
        ActionKind::DeclareNone
    }
}

fn betting_actions(state: &GameState) -> Vec<ActionKind> {
    let mut v = Vec::with_capacity(6);
    match &state.bet {
        Some(bet) if bet.ordago => {
            return vec![ActionKind::Accept, ActionKind::Reject];
        }
        Some(_) => {
            v.push(ActionKind::Accept);
            v.push(ActionKind::Reject);
        }
        None => v.push(ActionKind::Pass),
    }
    if !bet_range(state).is_empty() {
        v.push(ActionKind::Bet);
    }
    v.push(ActionKind::AllIn);
    v.push(ActionKind::ToggleBetSelector);
    if state.bet_selector_open {
        v.push(ActionKind::CancelBetSelector);
    }
    v
}

/// Amounts accepted by `Bet` right now.
pub fn bet_range(state: &GameState) -> RangeInclusive<u8> {
    let outstanding = state.bet.as_ref().map(|b| b.amount).unwrap_or(0);
    valid_bet_range(outstanding)
}

/// Discard sizes accepted from `who`.
pub fn discard_sizes(state: &GameState, who: PlayerId) -> RangeInclusive<usize> {
    discard_range(game_value(state.hand(who)))
}
