//! Random AI player - picks uniformly among the legal actions.
//!
//! Serves as the baseline opponent in simulations and as the fallback seat
//! when another AI fails.

use std::sync::{Arc, Mutex};

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

use crate::ai::decision_log::{Decision, DecisionLog, DecisionSink};
use crate::ai::random_source::Dice;
use crate::ai::strength::StrengthProfile;
use crate::ai::trait_def::{AiError, AiPlayer};
use crate::domain::actions::{ActionKind, GameAction};
use crate::domain::legals::{bet_range, discard_sizes, legal_actions_for};
use crate::domain::state::{GameState, PlayerId};

/// Largest bet the random player will offer above the minimum.
const BET_SPREAD: u8 = 4;

/// AI that makes random legal moves.
///
/// The RNG sits behind a `Mutex` because [`AiPlayer`] takes `&self`.
pub struct RandomPlayer {
    rng: Mutex<StdRng>,
    sink: Option<Arc<dyn DecisionSink>>,
}

impl RandomPlayer {
    pub const NAME: &'static str = "RandomPlayer";
    pub const VERSION: &'static str = "1.0.0";

    /// `Some(seed)` for reproducible play, `None` for system entropy.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::seed_from_u64(rand::random()),
        };
        Self {
            rng: Mutex::new(rng),
            sink: None,
        }
    }

    pub fn with_sink(mut self, sink: Arc<dyn DecisionSink>) -> Self {
        self.sink = Some(sink);
        self
    }
}

fn materialize(
    state: &GameState,
    seat: PlayerId,
    kind: ActionKind,
    rng: &mut StdRng,
) -> GameAction {
    match kind {
        ActionKind::ContinueMus => GameAction::ContinueMus,
        ActionKind::StopMus => GameAction::StopMus,
        ActionKind::Pass => GameAction::Pass,
        ActionKind::Accept => GameAction::Accept,
        ActionKind::Reject => GameAction::Reject,
        ActionKind::AllIn => GameAction::AllIn,
        ActionKind::DeclareHave => GameAction::DeclareHave,
        ActionKind::DeclareNone => GameAction::DeclareNone,
        ActionKind::Continue => GameAction::Continue,
        ActionKind::NewGame => GameAction::NewGame,
        ActionKind::ToggleBetSelector => GameAction::ToggleBetSelector,
        ActionKind::CancelBetSelector => GameAction::CancelBetSelector,
        ActionKind::Bet => {
            let range = bet_range(state);
            let hi = (*range.end()).min(range.start().saturating_add(BET_SPREAD));
            GameAction::Bet(rng.random_range(*range.start()..=hi))
        }
        ActionKind::ConfirmDiscard => {
            let hand = state.hand(seat);
            let sizes = discard_sizes(state, seat);
            let hi = (*sizes.end()).min(hand.len());
            let n = rng.random_range((*sizes.start()).min(hi)..=hi);
            GameAction::ConfirmDiscard(hand.choose_multiple(rng, n).copied().collect())
        }
    }
}

impl AiPlayer for RandomPlayer {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn choose_action(&self, state: &GameState, seat: PlayerId) -> Result<Decision, AiError> {
        let kinds: Vec<ActionKind> = legal_actions_for(state, seat)
            .into_iter()
            .filter(|k| !k.is_ui_intent())
            .collect();
        if kinds.is_empty() {
            return Err(AiError::InvalidMove(format!(
                "No legal actions for seat {seat} in {:?}",
                state.phase
            )));
        }

        let mut rng = self
            .rng
            .lock()
            .map_err(|e| AiError::Internal(format!("RNG lock poisoned: {e}")))?;

        let kind = *kinds
            .choose(&mut *rng)
            .ok_or_else(|| AiError::Internal("Failed to choose random action".into()))?;
        let action = materialize(state, seat, kind, &mut rng);
        let hand = state.hand(seat).to_vec();
        let strengths = StrengthProfile::evaluate(&hand, &mut Dice::from_seed(rng.random()));
        drop(rng);

        let step = state.step;
        let log = DecisionLog {
            id: DecisionLog::make_id(state.round_no, step, seat),
            round_no: state.round_no,
            step,
            player: seat,
            player_name: state
                .player(seat)
                .map(|p| p.name.clone())
                .unwrap_or_default(),
            phase: state.phase,
            hand,
            strengths,
            action: action.clone(),
            rationale: format!("random pick among {} kinds", kinds.len()),
        };
        if let Some(sink) = &self.sink {
            sink.record(&log);
        }
        Ok(Decision { action, log })
    }
}
