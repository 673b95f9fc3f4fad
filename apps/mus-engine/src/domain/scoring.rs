//! Round scoring: turns settled lance outcomes into team points.

use serde::{Deserialize, Serialize};

use crate::domain::hand_eval::{game_value, pair_category, PairCategory};
use crate::domain::lances::{resolve, Lance};
use crate::domain::rules::{EN_PASO_POINTS, JUEGO_BEST, JUEGO_MIN, PUNTO_BONUS, WINNING_SCORE};
use crate::domain::state::{GameState, LanceOutcome, Team, TeamScores};
use crate::domain::Card;

/// Points credited for one lance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanceScore {
    pub lance: Lance,
    pub team: Team,
    pub points: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub round_no: u32,
    /// Awards in the order they were applied.
    pub awards: Vec<LanceScore>,
    pub scores_after: TeamScores,
}

impl RoundSummary {
    pub fn points_for(&self, team: Team) -> u16 {
        self.awards
            .iter()
            .filter(|a| a.team == team)
            .map(|a| a.points)
            .sum()
    }
}

pub fn pares_bonus(hand: &[Card]) -> u16 {
    match pair_category(hand) {
        PairCategory::NoPairs => 0,
        PairCategory::Pair(_) => 1,
        PairCategory::ThreeOfKind(_) => 2,
        PairCategory::TwoPair { .. } => 3,
    }
}

pub fn juego_bonus(hand: &[Card]) -> u16 {
    match game_value(hand) {
        JUEGO_BEST => 3,
        v if v >= JUEGO_MIN => 2,
        _ => 0,
    }
}

fn team_bonus(state: &GameState, team: Team, bonus: fn(&[Card]) -> u16) -> u16 {
    team.seats().iter().map(|&s| bonus(state.hand(s))).sum()
}

fn winning_team(state: &GameState, lance: Lance) -> Option<Team> {
    resolve(lance, &state.mano_order()).map(Team::of)
}

/// Team and points for one lance, or `None` when nothing is owed.
fn lance_award(state: &GameState, lance: Lance) -> Option<(Team, u16)> {
    let outcome = state.outcome(lance)?;
    let bonus: Option<fn(&[Card]) -> u16> = match lance {
        Lance::Pares => Some(pares_bonus),
        Lance::Juego => Some(juego_bonus),
        _ => None,
    };
    let extra = |team: Team| match (lance, bonus) {
        (_, Some(b)) => team_bonus(state, team, b),
        (Lance::Punto, None) => PUNTO_BONUS,
        _ => 0,
    };

    match outcome {
        LanceOutcome::Skipped | LanceOutcome::Ordago { .. } => None,
        LanceOutcome::Rejected { team, points } => Some((team, points as u16 + extra(team))),
        LanceOutcome::EnPaso | LanceOutcome::Uncontested(_) => {
            let team = winning_team(state, lance)?;
            let base = match lance {
                Lance::Grande | Lance::Chica | Lance::Punto => EN_PASO_POINTS,
                Lance::Pares | Lance::Juego => 0,
            };
            let points = match lance {
                Lance::Punto => base,
                _ => base + extra(team),
            };
            (points > 0).then_some((team, points))
        }
        LanceOutcome::Accepted { stake } => {
            let team = winning_team(state, lance)?;
            Some((team, stake as u16 + extra(team)))
        }
    }
}

/// Score the round from the settled outcomes without touching `state`.
///
/// Lances are applied in play order and scoring stops as soon as a team
/// reaches the winning score. An accepted ordago overrides everything else.
pub fn score_round(state: &GameState) -> RoundSummary {
    let mut scores = state.scores;
    let mut awards = Vec::new();

    let ordago = Lance::ALL.iter().find_map(|&l| match state.outcome(l) {
        Some(LanceOutcome::Ordago { winner }) => Some((l, winner)),
        _ => None,
    });

    if let Some((lance, team)) = ordago {
        let points = WINNING_SCORE.saturating_sub(scores.get(team));
        scores.add(team, points);
        awards.push(LanceScore {
            lance,
            team,
            points,
        });
    } else {
        for lance in Lance::ALL {
            if scores.leader_at_target().is_some() {
                break;
            }
            if let Some((team, points)) = lance_award(state, lance) {
                scores.add(team, points);
                awards.push(LanceScore {
                    lance,
                    team,
                    points,
                });
            }
        }
    }

    RoundSummary {
        round_no: state.round_no,
        awards,
        scores_after: scores,
    }
}
