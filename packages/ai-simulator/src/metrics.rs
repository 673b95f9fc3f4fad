//! Metrics collection and output for AI simulation results.

use std::collections::HashMap;

use mus_engine::domain::state::{PlayerId, Team};
use mus_engine::domain::{GameAction, RoundSummary};
use serde::Serialize;
use serde_json::Value;

use crate::simulator::GameResult;
use crate::types::MetricsLevel;

/// Complete game metrics for output.
#[derive(Debug, Clone, Serialize)]
pub struct GameMetrics {
    pub game_id: u32,
    pub seed: u64,
    pub timestamp: String,
    pub config: GameConfig,
    pub result: GameResultMetrics,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rounds: Vec<RoundMetrics>,
    pub player_metrics: Vec<PlayerMetrics>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GameConfig {
    pub ai_types: [String; 4],
    pub total_games: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct GameResultMetrics {
    pub team_a: u16,
    pub team_b: u16,
    pub winner: Team,
    pub rounds_played: u32,
    pub actions: usize,
    pub duration_ms: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RoundMetrics {
    pub round_no: u32,
    pub mano: PlayerId,
    pub awards: Vec<AwardMetrics>,
    pub scores_after: [u16; 2],
}

#[derive(Debug, Clone, Serialize)]
pub struct AwardMetrics {
    pub lance: String,
    pub team: Team,
    pub points: u16,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerMetrics {
    pub seat: PlayerId,
    pub ai_type: String,
    pub team: Team,
    pub decisions: u32,
    pub mus_calls: u32,
    pub cards_discarded: u32,
    pub bets: u32,
    pub all_ins: u32,
    pub accepts: u32,
    pub rejects: u32,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub custom_metrics: HashMap<String, Value>,
}

/// One row of the summary CSV.
#[derive(Debug, Clone, Serialize)]
pub struct CsvSummaryRow {
    pub game_id: u32,
    pub seed: u64,
    pub winner: String,
    pub team_a_score: u16,
    pub team_b_score: u16,
    pub rounds: u32,
    pub seat0_ai: String,
    pub seat1_ai: String,
    pub seat2_ai: String,
    pub seat3_ai: String,
}

impl From<&GameMetrics> for CsvSummaryRow {
    fn from(m: &GameMetrics) -> Self {
        let [seat0_ai, seat1_ai, seat2_ai, seat3_ai] = m.config.ai_types.clone();
        Self {
            game_id: m.game_id,
            seed: m.seed,
            winner: format!("{:?}", m.result.winner),
            team_a_score: m.result.team_a,
            team_b_score: m.result.team_b,
            rounds: m.result.rounds_played,
            seat0_ai,
            seat1_ai,
            seat2_ai,
            seat3_ai,
        }
    }
}

/// Build metrics from a finished game.
pub fn build_game_metrics(
    game_id: u32,
    seed: u64,
    ai_types: [String; 4],
    total_games: u32,
    level: &MetricsLevel,
    result: &GameResult,
    duration_ms: f64,
) -> GameMetrics {
    let timestamp = time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| String::from("unknown"));

    let rounds = match level {
        MetricsLevel::Basic => Vec::new(),
        MetricsLevel::Detailed => result.rounds.iter().map(build_round_metrics).collect(),
    };

    let player_metrics = (0..4u8)
        .map(|seat| build_player_metrics(seat, &ai_types[seat as usize], result))
        .collect();

    GameMetrics {
        game_id,
        seed,
        timestamp,
        config: GameConfig {
            ai_types,
            total_games,
        },
        result: GameResultMetrics {
            team_a: result.final_scores.a,
            team_b: result.final_scores.b,
            winner: result.winner,
            rounds_played: result.rounds_played(),
            actions: result.actions,
            duration_ms,
        },
        rounds,
        player_metrics,
    }
}

fn build_round_metrics((mano, summary): &(PlayerId, RoundSummary)) -> RoundMetrics {
    RoundMetrics {
        round_no: summary.round_no,
        mano: *mano,
        awards: summary
            .awards
            .iter()
            .map(|a| AwardMetrics {
                lance: format!("{:?}", a.lance),
                team: a.team,
                points: a.points,
            })
            .collect(),
        scores_after: [summary.scores_after.a, summary.scores_after.b],
    }
}

fn build_player_metrics(seat: PlayerId, ai_type: &str, result: &GameResult) -> PlayerMetrics {
    let mut m = PlayerMetrics {
        seat,
        ai_type: ai_type.to_string(),
        team: Team::of(seat),
        decisions: 0,
        mus_calls: 0,
        cards_discarded: 0,
        bets: 0,
        all_ins: 0,
        accepts: 0,
        rejects: 0,
        custom_metrics: HashMap::new(),
    };

    for log in result.decisions.iter().filter(|d| d.player == seat) {
        m.decisions += 1;
        match &log.action {
            GameAction::ContinueMus => m.mus_calls += 1,
            GameAction::ConfirmDiscard(cards) => m.cards_discarded += cards.len() as u32,
            GameAction::Bet(_) => m.bets += 1,
            GameAction::AllIn => m.all_ins += 1,
            GameAction::Accept => m.accepts += 1,
            GameAction::Reject => m.rejects += 1,
            _ => {}
        }
    }

    let points: u32 = result
        .rounds
        .iter()
        .map(|(_, s)| s.points_for(m.team) as u32)
        .sum();
    m.custom_metrics
        .insert("team_points_awarded".to_string(), Value::from(points));
    m
}
