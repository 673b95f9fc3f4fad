//! In-memory game simulator for AI evaluation.
//!
//! Runs whole games through the real transition function, so every AI
//! action is validated exactly as it would be at a live table.

use mus_engine::ai::{AiError, AiPlayer, DecisionLog};
use mus_engine::domain::state::{GameState, Phase, PlayerId, Team, TeamScores};
use mus_engine::domain::{apply_action, RoundSummary};
use mus_engine::DomainError;

/// Upper bound on actions per game; a heuristic game needs a few hundred.
const MAX_STEPS: usize = 100_000;

/// Result of simulating a complete game.
#[derive(Debug, Clone)]
pub struct GameResult {
    pub final_scores: TeamScores,
    pub winner: Team,
    /// Round summaries in play order, with the seat that was mano.
    pub rounds: Vec<(PlayerId, RoundSummary)>,
    /// Every decision taken, in order.
    pub decisions: Vec<DecisionLog>,
    pub actions: usize,
}

impl GameResult {
    pub fn rounds_played(&self) -> u32 {
        self.rounds.len() as u32
    }
}

pub struct Simulator {
    state: GameState,
}

impl Simulator {
    pub fn new(game_seed: u64, first_mano: PlayerId) -> Self {
        Self {
            state: GameState::with_default_names(game_seed, first_mano),
        }
    }

    /// Play until one team reaches the winning score.
    pub fn simulate_game(
        mut self,
        ais: &[Box<dyn AiPlayer>; 4],
    ) -> Result<GameResult, SimulatorError> {
        let mut rounds = Vec::new();
        let mut decisions = Vec::new();

        for step in 0..MAX_STEPS {
            let finished = self.state.phase == Phase::GameOver;
            if let Some(winner) = self.state.winner.filter(|_| finished) {
                return Ok(GameResult {
                    final_scores: self.state.scores,
                    winner,
                    rounds,
                    decisions,
                    actions: step,
                });
            }

            let seat = self.state.turn;
            let ai = &ais[seat as usize];
            let decision = ai
                .choose_action(&self.state, seat)
                .map_err(|e| SimulatorError::AiError(seat, ai.name(), e))?;
            let before = self.state.phase;
            let next = apply_action(&self.state, seat, decision.action.clone())
                .map_err(|e| SimulatorError::DomainError(seat, e))?;

            let scored = matches!(next.phase, Phase::RoundOver | Phase::GameOver);
            if scored && before != next.phase {
                let summary = next.last_summary.clone().ok_or_else(|| {
                    SimulatorError::InvalidState(format!(
                        "round {} scored without summary",
                        next.round_no
                    ))
                })?;
                rounds.push((next.mano, summary));
            }
            decisions.push(decision.log);
            self.state = next;
        }

        Err(SimulatorError::InvalidState(format!(
            "game did not finish within {MAX_STEPS} actions"
        )))
    }
}

/// Errors that can occur during simulation.
#[derive(Debug)]
pub enum SimulatorError {
    /// AI returned an error
    AiError(PlayerId, &'static str, AiError),
    /// The engine refused an AI action
    DomainError(PlayerId, DomainError),
    /// Invalid game state
    InvalidState(String),
}

impl std::fmt::Display for SimulatorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimulatorError::AiError(seat, name, err) => {
                write!(f, "AI error (seat {seat}, {name}): {err}")
            }
            SimulatorError::DomainError(seat, err) => {
                write!(f, "Rejected action (seat {seat}): {err}")
            }
            SimulatorError::InvalidState(msg) => write!(f, "Invalid state: {msg}"),
        }
    }
}

impl std::error::Error for SimulatorError {}
