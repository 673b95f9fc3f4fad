//! Betting within one lance: passes, bets, raises, ordago and responses.

use crate::domain::hand_eval::{has_juego, has_pares};
use crate::domain::lances::{resolve, Lance};
use crate::domain::rules::{FIRST_BET_FALLBACK, PLAYERS, WINNING_SCORE};
use crate::domain::state::{
    next_player, require_bet, require_lance, seats_from, BetInfo, GameState, LanceOutcome,
    PlayerId, Team,
};
use crate::errors::domain::DomainError;

/// Whether a betting step closed the lance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BettingStep {
    /// Someone still has to act in this lance.
    Open,
    Settled(LanceOutcome),
}

/// Whether `who` takes part in betting for `lance`.
pub fn is_eligible(state: &GameState, lance: Lance, who: PlayerId) -> bool {
    let idx = who as usize;
    match lance {
        Lance::Grande | Lance::Chica | Lance::Punto => idx < PLAYERS,
        Lance::Pares => state.pares_declared.get(idx).copied().flatten() == Some(true),
        Lance::Juego => state.juego_declared.get(idx).copied().flatten() == Some(true),
    }
}

/// Eligible players for `lance`, mano first.
pub fn eligible_players(state: &GameState, lance: Lance) -> Vec<PlayerId> {
    seats_from(state.mano)
        .into_iter()
        .filter(|&p| is_eligible(state, lance, p))
        .collect()
}

/// Whether `who` really holds the category asked in a check phase.
pub fn truthful_declaration(state: &GameState, lance: Lance, who: PlayerId) -> bool {
    let hand = state.hand(who);
    match lance {
        Lance::Pares => has_pares(hand),
        Lance::Juego => has_juego(hand),
        _ => false,
    }
}

/// First eligible seat clockwise after `from` that satisfies `pred`.
fn next_eligible_after<F>(
    state: &GameState,
    lance: Lance,
    from: PlayerId,
    pred: F,
) -> Option<PlayerId>
where
    F: Fn(PlayerId) -> bool,
{
    let mut seat = from;
    for _ in 1..PLAYERS {
        seat = next_player(seat);
        if is_eligible(state, lance, seat) && pred(seat) {
            return Some(seat);
        }
    }
    None
}

/// Next eligible opponent of `who` who has not already declined.
fn next_responder(
    state: &GameState,
    lance: Lance,
    who: PlayerId,
    declined: &[PlayerId],
) -> Option<PlayerId> {
    let team = Team::of(who);
    next_eligible_after(state, lance, who, |p| {
        Team::of(p) != team && !declined.contains(&p)
    })
}

pub fn pass(state: &mut GameState, who: PlayerId) -> Result<BettingStep, DomainError> {
    let lance = require_lance(state, "pass")?;
    if !state.passed.contains(&who) {
        state.passed.push(who);
    }
    let passed = state.passed.clone();
    match next_eligible_after(state, lance, who, |p| !passed.contains(&p)) {
        Some(next) => {
            state.turn = next;
            Ok(BettingStep::Open)
        }
        None => Ok(BettingStep::Settled(LanceOutcome::EnPaso)),
    }
}

/// Open a bet or raise the outstanding one. `ordago` ignores `raise`.
pub fn place_bet(
    state: &mut GameState,
    who: PlayerId,
    raise: u8,
    ordago: bool,
) -> Result<BettingStep, DomainError> {
    let lance = require_lance(state, "place_bet")?;
    let (amount, fallback) = match &state.bet {
        Some(prev) => (prev.amount.saturating_add(raise), prev.amount),
        None => (raise, FIRST_BET_FALLBACK),
    };
    let amount = if ordago { WINNING_SCORE as u8 } else { amount };
    let responder = next_responder(state, lance, who, &[]).ok_or_else(|| {
        DomainError::validation_other(format!(
            "Invariant violated: no eligible opponent for {who} in {lance:?}"
        ))
    })?;
    state.bet = Some(BetInfo {
        amount,
        fallback,
        proposer: who,
        responder,
        ordago,
        declined: Vec::new(),
    });
    state.turn = responder;
    state.bet_selector_open = false;
    Ok(BettingStep::Open)
}

pub fn accept(state: &mut GameState) -> Result<BettingStep, DomainError> {
    let lance = require_lance(state, "accept")?;
    let bet = require_bet(state, "accept")?.clone();
    state.bet = None;
    if !bet.ordago {
        return Ok(BettingStep::Settled(LanceOutcome::Accepted { stake: bet.amount }));
    }
    let winner = resolve(lance, &state.mano_order()).ok_or_else(|| {
        DomainError::validation_other(format!(
            "Invariant violated: ordago on {lance:?} has no winner"
        ))
    })?;
    Ok(BettingStep::Settled(LanceOutcome::Ordago {
        winner: Team::of(winner),
    }))
}

pub fn reject(state: &mut GameState, who: PlayerId) -> Result<BettingStep, DomainError> {
    let lance = require_lance(state, "reject")?;
    let mut bet = require_bet(state, "reject")?.clone();
    bet.declined.push(who);
    match next_responder(state, lance, bet.proposer, &bet.declined) {
        Some(next) => {
            bet.responder = next;
            state.turn = next;
            state.bet = Some(bet);
            Ok(BettingStep::Open)
        }
        None => {
            state.bet = None;
            Ok(BettingStep::Settled(LanceOutcome::Rejected {
                team: Team::of(bet.proposer),
                points: bet.fallback,
            }))
        }
    }
}
