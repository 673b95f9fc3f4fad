//! The single transition function of the state machine.

use crate::domain::actions::GameAction;
use crate::domain::betting::{self, truthful_declaration, BettingStep};
use crate::domain::dealing::Deck;
use crate::domain::lances::Lance;
use crate::domain::legals::{bet_range, discard_sizes, legal_actions};
use crate::domain::rules::{HAND_SIZE, PLAYERS};
use crate::domain::scoring::score_round;
use crate::domain::seed_derivation::{derive_dealing_seed, derive_reshuffle_seed};
use crate::domain::state::{
    next_player, require_lance, seats_from, ActionRecord, GameState, Gesture, LanceOutcome,
    Phase, PlayerId, Team, TeamScores,
};
use crate::domain::Card;
use crate::errors::domain::{DomainError, ValidationKind};

/// Validate and apply `action` by `actor`, returning the next state.
///
/// Rejections come back as typed errors in this order: wrong actor
/// (`OutOfTurn`), action not advertised (`IllegalAction`), bad payload
/// (`InvalidBet`, `InvalidDiscard`, `CardNotInHand`). The input is never
/// modified.
pub fn apply_action(
    state: &GameState,
    actor: PlayerId,
    action: GameAction,
) -> Result<GameState, DomainError> {
    validate_action(state, actor, &action)?;

    let mut next = state.clone();
    let phase = state.phase;
    let recorded = action.clone();

    match action {
        GameAction::Continue => match state.phase {
            Phase::PreRound => start_round(&mut next, state.mano)?,
            _ => start_round(&mut next, next_player(state.mano))?,
        },
        GameAction::NewGame => {
            next.scores = TeamScores::default();
            next.winner = None;
            next.last_summary = None;
            start_round(&mut next, next_player(state.mano))?;
        }
        GameAction::ContinueMus => {
            next.mus_votes += 1;
            if next.mus_votes as usize >= PLAYERS {
                next.phase = Phase::Discard;
                next.turn = next.mano;
                next.pending_discards = Default::default();
            } else {
                next.turn = next_player(actor);
            }
        }
        GameAction::StopMus => enter_lance(&mut next, Lance::Grande),
        GameAction::ConfirmDiscard(cards) => {
            next.pending_discards[actor as usize] = Some(cards);
            if next.pending_discards.iter().all(Option::is_some) {
                complete_discard(&mut next)?;
            } else {
                next.turn = next_player(actor);
            }
        }
        GameAction::DeclareHave | GameAction::DeclareNone => {
            declare(&mut next, actor, matches!(action, GameAction::DeclareHave));
        }
        GameAction::Pass => {
            let step = betting::pass(&mut next, actor)?;
            after_betting_step(&mut next, step)?;
        }
        GameAction::Bet(raise) => {
            let step = betting::place_bet(&mut next, actor, raise, false)?;
            after_betting_step(&mut next, step)?;
        }
        GameAction::AllIn => {
            let step = betting::place_bet(&mut next, actor, 0, true)?;
            after_betting_step(&mut next, step)?;
        }
        GameAction::Accept => {
            let step = betting::accept(&mut next)?;
            after_betting_step(&mut next, step)?;
        }
        GameAction::Reject => {
            let step = betting::reject(&mut next, actor)?;
            after_betting_step(&mut next, step)?;
        }
        GameAction::ToggleBetSelector => next.bet_selector_open = !next.bet_selector_open,
        GameAction::CancelBetSelector => next.bet_selector_open = false,
    }

    next.history.push(ActionRecord {
        round_no: next.round_no,
        phase,
        player: actor,
        action: recorded,
    });
    next.step += 1;
    Ok(next)
}

fn validate_action(
    state: &GameState,
    actor: PlayerId,
    action: &GameAction,
) -> Result<(), DomainError> {
    if actor != state.turn {
        return Err(DomainError::validation(
            ValidationKind::OutOfTurn,
            format!("Player {actor} acted but it is player {}'s turn", state.turn),
        ));
    }

    let kind = action.kind();
    if !legal_actions(state).contains(&kind) {
        return Err(DomainError::validation(
            ValidationKind::IllegalAction,
            format!("{kind:?} is not legal in {:?}", state.phase),
        ));
    }

    match action {
        GameAction::Bet(raise) => {
            let range = bet_range(state);
            if !range.contains(raise) {
                return Err(DomainError::validation(
                    ValidationKind::InvalidBet,
                    format!(
                        "Bet {raise} outside {}..={}",
                        range.start(),
                        range.end()
                    ),
                ));
            }
        }
        GameAction::ConfirmDiscard(cards) => validate_discard(state, actor, cards)?,
        _ => {}
    }
    Ok(())
}

fn validate_discard(
    state: &GameState,
    actor: PlayerId,
    cards: &[Card],
) -> Result<(), DomainError> {
    let sizes = discard_sizes(state, actor);
    if !sizes.contains(&cards.len()) {
        return Err(DomainError::validation(
            ValidationKind::InvalidDiscard,
            format!(
                "Discard of {} cards outside {}..={}",
                cards.len(),
                sizes.start(),
                sizes.end()
            ),
        ));
    }
    for (i, card) in cards.iter().enumerate() {
        if cards[..i].contains(card) {
            return Err(DomainError::validation(
                ValidationKind::InvalidDiscard,
                format!("Card {card} discarded twice"),
            ));
        }
    }
    let hand = state.hand(actor);
    if let Some(missing) = cards.iter().find(|c| !hand.contains(c)) {
        return Err(DomainError::validation(
            ValidationKind::CardNotInHand,
            format!("Card {missing} is not in player {actor}'s hand"),
        ));
    }
    Ok(())
}

/// Deal a fresh round with `mano` leading.
fn start_round(state: &mut GameState, mano: PlayerId) -> Result<(), DomainError> {
    state.round_no += 1;
    state.mano = mano;
    state.deck = Deck::shuffled(derive_dealing_seed(state.game_seed, state.round_no));
    let hands = state.deck.deal(PLAYERS)?;
    let order = seats_from(mano);
    for (seat, hand) in order.into_iter().zip(hands) {
        state.players[seat as usize].hand = hand;
    }

    state.discard_pile.clear();
    state.history.clear();
    state.phase = Phase::MusDecision;
    state.turn = mano;
    state.bet = None;
    state.passed.clear();
    state.mus_votes = 0;
    state.mus_rounds = 0;
    state.pending_discards = Default::default();
    state.pares_declared = [None; PLAYERS];
    state.juego_declared = [None; PLAYERS];
    state.gestures = [None; PLAYERS];
    state.outcomes = [None; 5];
    state.bet_selector_open = false;
    Ok(())
}

/// Swap confirmed discards for fresh cards and return to the mus decision.
fn complete_discard(state: &mut GameState) -> Result<(), DomainError> {
    let order = seats_from(state.mano);
    let mut fresh = Vec::new();
    for seat in order {
        let cards = state.pending_discards[seat as usize]
            .take()
            .unwrap_or_default();
        state.players[seat as usize]
            .hand
            .retain(|c| !cards.contains(c));
        fresh.extend(cards);
    }

    for seat in order {
        let need = HAND_SIZE.saturating_sub(state.players[seat as usize].hand.len());
        if state.deck.len() < need {
            let pile = std::mem::take(&mut state.discard_pile);
            let seed = derive_reshuffle_seed(state.game_seed, state.round_no, state.mus_rounds);
            state.deck.refill(pile, seed);
        }
        let drawn = state.deck.draw(need);
        if drawn.len() < need {
            return Err(DomainError::validation_other(format!(
                "Invariant violated: deck exhausted topping up player {seat}"
            )));
        }
        state.players[seat as usize].hand.extend(drawn);
    }

    state.discard_pile.extend(fresh);
    state.mus_rounds += 1;
    state.mus_votes = 0;
    state.phase = Phase::MusDecision;
    state.turn = state.mano;
    Ok(())
}

fn enter_lance(state: &mut GameState, lance: Lance) {
    state.phase = match lance {
        Lance::Grande => Phase::Grande,
        Lance::Chica => Phase::Chica,
        Lance::Pares => Phase::Pares,
        Lance::Juego => Phase::Juego,
        Lance::Punto => Phase::Punto,
    };
    state.bet = None;
    state.passed.clear();
    state.bet_selector_open = false;
    state.turn = betting::eligible_players(state, lance)
        .first()
        .copied()
        .unwrap_or(state.mano);
}

fn enter_check(state: &mut GameState, phase: Phase) {
    state.phase = phase;
    state.bet = None;
    state.passed.clear();
    state.bet_selector_open = false;
    state.turn = state.mano;
}

fn declare(state: &mut GameState, actor: PlayerId, has: bool) {
    let idx = actor as usize;
    let lance = if state.phase == Phase::ParesCheck {
        state.pares_declared[idx] = Some(has);
        state.gestures[idx] = Some(if has { Gesture::HasPares } else { Gesture::NoPares });
        Lance::Pares
    } else {
        state.juego_declared[idx] = Some(has);
        state.gestures[idx] = Some(if has { Gesture::HasJuego } else { Gesture::NoJuego });
        Lance::Juego
    };
    debug_assert_eq!(has, truthful_declaration(state, lance, actor));

    let declared = match lance {
        Lance::Pares => state.pares_declared,
        _ => state.juego_declared,
    };
    if declared.iter().any(Option::is_none) {
        state.turn = next_player(actor);
        return;
    }

    let holds = |team: Team| team.seats().iter().any(|&s| declared[s as usize] == Some(true));
    let contested = match (holds(Team::A), holds(Team::B)) {
        (true, true) => None,
        (true, false) => Some(LanceOutcome::Uncontested(Team::A)),
        (false, true) => Some(LanceOutcome::Uncontested(Team::B)),
        (false, false) => Some(LanceOutcome::Skipped),
    };

    match (lance, contested) {
        (_, None) => enter_lance(state, lance),
        (Lance::Pares, Some(outcome)) => {
            state.set_outcome(Lance::Pares, outcome);
            enter_check(state, Phase::JuegoCheck);
        }
        (_, Some(LanceOutcome::Skipped)) => {
            state.set_outcome(Lance::Juego, LanceOutcome::Skipped);
            enter_lance(state, Lance::Punto);
        }
        (_, Some(outcome)) => {
            state.set_outcome(Lance::Juego, outcome);
            finish_round(state);
        }
    }
}

fn after_betting_step(state: &mut GameState, step: BettingStep) -> Result<(), DomainError> {
    let BettingStep::Settled(outcome) = step else {
        return Ok(());
    };
    let lance = require_lance(state, "after_betting_step")?;
    state.set_outcome(lance, outcome);
    state.bet = None;
    state.passed.clear();

    if matches!(outcome, LanceOutcome::Ordago { .. }) {
        finish_round(state);
        return Ok(());
    }
    match lance {
        Lance::Grande => enter_lance(state, Lance::Chica),
        Lance::Chica => enter_check(state, Phase::ParesCheck),
        Lance::Pares => enter_check(state, Phase::JuegoCheck),
        Lance::Juego | Lance::Punto => finish_round(state),
    }
    Ok(())
}

/// Score the round and stop at `RoundOver` or `GameOver`.
fn finish_round(state: &mut GameState) {
    let summary = score_round(state);
    state.scores = summary.scores_after;
    state.last_summary = Some(summary);
    state.bet = None;
    state.bet_selector_open = false;
    state.turn = state.mano;
    match state.scores.leader_at_target() {
        Some(team) => {
            state.winner = Some(team);
            state.phase = Phase::GameOver;
        }
        None => state.phase = Phase::RoundOver,
    }
}
