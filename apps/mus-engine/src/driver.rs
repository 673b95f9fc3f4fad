//! Drives simulated seats until a human has to act.
//!
//! `step_ai` and `run_ai_turns` share [`TableDriver::step_once`]; the async
//! variant only adds the pacing delay before each simulated turn.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::ai::{AiError, AiFailureMode, AiPlayer, Decision, RandomPlayer};
use crate::domain::actions::GameAction;
use crate::domain::rules::PLAYERS;
use crate::domain::state::{GameState, Phase, PlayerId};
use crate::error::EngineError;
use crate::persistence::{SaveRecord, SaveStore};
use crate::store::GameStore;

/// Who answers for a seat.
pub enum SeatController {
    Human,
    Ai(Box<dyn AiPlayer>),
}

impl SeatController {
    pub fn is_human(&self) -> bool {
        matches!(self, SeatController::Human)
    }
}

/// Result of one driver step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Acted { seat: PlayerId, action: GameAction },
    HumanTurn(PlayerId),
    GameOver,
}

pub struct TableDriver {
    store: Arc<GameStore>,
    seats: [SeatController; PLAYERS],
    pace: Duration,
    failure_mode: AiFailureMode,
    fallback: RandomPlayer,
    saves: Option<Arc<dyn SaveStore>>,
}

impl TableDriver {
    pub fn new(store: Arc<GameStore>, seats: [SeatController; PLAYERS]) -> Self {
        Self {
            store,
            seats,
            pace: Duration::ZERO,
            failure_mode: AiFailureMode::default(),
            fallback: RandomPlayer::new(None),
            saves: None,
        }
    }

    pub fn with_pace(mut self, pace: Duration) -> Self {
        self.pace = pace;
        self
    }

    pub fn with_failure_mode(mut self, mode: AiFailureMode) -> Self {
        self.failure_mode = mode;
        self
    }

    /// Save scores whenever a round is scored or the game ends.
    pub fn with_saves(mut self, saves: Arc<dyn SaveStore>) -> Self {
        self.saves = Some(saves);
        self
    }

    pub fn store(&self) -> &Arc<GameStore> {
        &self.store
    }

    pub fn seat(&self, seat: PlayerId) -> Option<&SeatController> {
        self.seats.get(seat as usize)
    }

    /// Submit an action for `seat` and persist if it ended a round.
    pub fn submit(
        &self,
        seat: PlayerId,
        action: GameAction,
    ) -> Result<Arc<GameState>, EngineError> {
        let before = self.store.snapshot().phase;
        let next = self.store.submit(action, seat)?;
        self.maybe_save(before, &next);
        Ok(next)
    }

    /// Play every simulated turn with no delay.
    pub fn step_ai(&self) -> Result<Vec<StepOutcome>, EngineError> {
        let mut steps = Vec::new();
        loop {
            let outcome = self.step_once()?;
            let done = !matches!(outcome, StepOutcome::Acted { .. });
            steps.push(outcome);
            if done {
                return Ok(steps);
            }
        }
    }

    /// Play every simulated turn, sleeping `pace` before each one.
    pub async fn run_ai_turns(&self) -> Result<Vec<StepOutcome>, EngineError> {
        let mut steps = Vec::new();
        loop {
            if self.pace > Duration::ZERO && self.next_is_ai() {
                tokio::time::sleep(self.pace).await;
            }
            let outcome = self.step_once()?;
            let done = !matches!(outcome, StepOutcome::Acted { .. });
            steps.push(outcome);
            if done {
                return Ok(steps);
            }
        }
    }

    fn next_is_ai(&self) -> bool {
        let state = self.store.snapshot();
        state.phase != Phase::GameOver
            && self.seat(state.turn).is_some_and(|s| !s.is_human())
    }

    /// Take at most one simulated turn.
    pub fn step_once(&self) -> Result<StepOutcome, EngineError> {
        let state = self.store.snapshot();
        if state.phase == Phase::GameOver {
            return Ok(StepOutcome::GameOver);
        }
        let seat = state.turn;
        let ai = match self.seat(seat) {
            Some(SeatController::Ai(ai)) => ai,
            Some(SeatController::Human) => return Ok(StepOutcome::HumanTurn(seat)),
            None => {
                return Err(EngineError::internal(format!("turn on missing seat {seat}")));
            }
        };

        let action = match self.try_ai(ai.as_ref(), &state, seat) {
            Ok(action) => action,
            Err(e) => match self.failure_mode {
                AiFailureMode::Panic => return Err(e),
                AiFailureMode::FallbackRandom => {
                    warn!(
                        player = seat,
                        ai = ai.name(),
                        phase = ?state.phase,
                        error = %e,
                        "AI failed; falling back to random play"
                    );
                    self.try_ai(&self.fallback, &state, seat)?
                }
            },
        };
        Ok(StepOutcome::Acted { seat, action })
    }

    fn try_ai(
        &self,
        ai: &dyn AiPlayer,
        state: &GameState,
        seat: PlayerId,
    ) -> Result<GameAction, EngineError> {
        let Decision { action, log } = ai.choose_action(state, seat)?;
        debug!(id = %log.id, player = seat, ai = ai.name(), action = %action, "AI chose");
        let next = self
            .store
            .submit(action.clone(), seat)
            .map_err(|e| AiError::InvalidMove(format!("{action} rejected: {e}")))?;
        self.maybe_save(state.phase, &next);
        Ok(action)
    }

    fn maybe_save(&self, before: Phase, next: &GameState) {
        let ended = matches!(next.phase, Phase::RoundOver | Phase::GameOver);
        if !ended || before == next.phase {
            return;
        }
        let Some(saves) = &self.saves else {
            return;
        };
        let record = SaveRecord::from_state(next);
        match saves.save(&record) {
            Ok(()) => info!(
                round_no = next.round_no,
                team_a = record.team_a,
                team_b = record.team_b,
                "scores saved"
            ),
            Err(e) => warn!(round_no = next.round_no, error = %e, "saving scores failed"),
        }
    }
}
