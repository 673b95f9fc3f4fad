//! Heuristic decision engine.
//!
//! `decide` is total: every reachable state maps to an action, and the
//! action is checked against the advertised legal set before it is returned.
//! The engine never mutates state; all randomness comes from the injected
//! [`RandomSource`].

use std::sync::Arc;

use crate::ai::config::AiConfig;
use crate::ai::decision_log::{Decision, DecisionLog, DecisionSink, TracingSink};
use crate::ai::discard::choose_discard;
use crate::ai::random_source::{Dice, EntropyRandom, RandomSource, SeededRandom};
use crate::ai::strength::StrengthProfile;
use crate::ai::trait_def::{AiError, AiPlayer};
use crate::domain::actions::{ActionKind, GameAction};
use crate::domain::betting::truthful_declaration;
use crate::domain::lances::Lance;
use crate::domain::legals::{bet_range, discard_sizes, legal_actions};
use crate::domain::rules::MIN_BET;
use crate::domain::state::{BetInfo, GameState, Phase, PlayerId, Team};

// Facing a bet
const ORDAGO_CALL: u8 = 85;
const RAISE_AT: u8 = 85;
const ACCEPT_AT: u8 = 70;
const BLUFF_FLOOR: u8 = 45;

// Own turn, no bet outstanding
const ALL_IN_AT: u8 = 98;
const ALL_IN_OPPONENT_SCORE: u16 = 30;
const OPEN_AT: u8 = 75;
const LOOSE_OPEN_AT: u8 = 55;

// Mus decision
const STOP_PARES: u8 = 70;
const STOP_JUEGO: u8 = 93;
const STOP_GRANDE: u8 = 84;
const STOP_GRANDE_WITH_PARES: u8 = 35;
const STOP_AVERAGE: u8 = 60;

pub struct HeuristicEngine {
    random: Arc<dyn RandomSource>,
    sink: Arc<dyn DecisionSink>,
    config: AiConfig,
}

impl HeuristicEngine {
    pub const NAME: &'static str = "Heuristic";
    pub const VERSION: &'static str = "1.0.0";

    pub fn new(random: Arc<dyn RandomSource>, sink: Arc<dyn DecisionSink>) -> Self {
        Self {
            random,
            sink,
            config: AiConfig::empty(),
        }
    }

    /// Reproducible engine that logs through `tracing`.
    pub fn seeded(seed: u64) -> Self {
        Self::new(Arc::new(SeededRandom::new(seed)), Arc::new(TracingSink))
    }

    /// Seeded when the config carries a seed, entropy-driven otherwise.
    pub fn from_config(config: AiConfig) -> Self {
        let random: Arc<dyn RandomSource> = match config.seed() {
            Some(seed) => Arc::new(SeededRandom::new(seed)),
            None => Arc::new(EntropyRandom),
        };
        Self {
            random,
            sink: Arc::new(TracingSink),
            config,
        }
    }

    pub fn with_sink(mut self, sink: Arc<dyn DecisionSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn with_config(mut self, config: AiConfig) -> Self {
        self.config = config;
        self
    }

    /// Choose an action for `player` and emit its decision record.
    pub fn decide(&self, state: &GameState, player: PlayerId) -> Decision {
        let mut dice = self.random.dice(state, player);
        let hand = state.hand(player).to_vec();
        let profile = StrengthProfile::evaluate(&hand, &mut dice);

        let (action, rationale) = if player == state.turn {
            self.choose(state, player, &profile, &mut dice)
        } else {
            (fallback_action(state), format!("seat {player} is not on turn"))
        };
        let (action, rationale) = ensure_legal(state, action, rationale);

        let step = state.step;
        let log = DecisionLog {
            id: DecisionLog::make_id(state.round_no, step, player),
            round_no: state.round_no,
            step,
            player,
            player_name: state
                .player(player)
                .map(|p| p.name.clone())
                .unwrap_or_default(),
            phase: state.phase,
            hand,
            strengths: profile,
            action: action.clone(),
            rationale,
        };
        self.sink.record(&log);
        Decision { action, log }
    }

    fn choose(
        &self,
        state: &GameState,
        player: PlayerId,
        profile: &StrengthProfile,
        dice: &mut Dice,
    ) -> (GameAction, String) {
        match state.phase {
            Phase::PreRound | Phase::RoundOver => {
                (GameAction::Continue, "deal the next round".to_string())
            }
            Phase::GameOver => (GameAction::NewGame, "start a new game".to_string()),
            Phase::MusDecision => mus_decision(profile),
            Phase::Discard => {
                let (cards, why) =
                    choose_discard(state.hand(player), profile, player == state.mano, dice);
                (GameAction::ConfirmDiscard(cards), why)
            }
            Phase::ParesCheck => declare(state, Lance::Pares, player),
            Phase::JuegoCheck => declare(state, Lance::Juego, player),
            Phase::Grande | Phase::Chica | Phase::Pares | Phase::Juego | Phase::Punto => {
                let Some(lance) = state.phase.lance() else {
                    return (fallback_action(state), "no lance".to_string());
                };
                let strength = profile.for_lance(lance);
                match &state.bet {
                    Some(bet) => self.respond(state, bet, lance, strength, dice),
                    None => self.open(state, player, lance, strength, dice),
                }
            }
        }
    }

    fn respond(
        &self,
        state: &GameState,
        bet: &BetInfo,
        lance: Lance,
        strength: u8,
        dice: &mut Dice,
    ) -> (GameAction, String) {
        if bet.ordago {
            return if strength >= ORDAGO_CALL {
                (
                    GameAction::Accept,
                    format!("{lance:?} {strength} >= {ORDAGO_CALL}: call the ordago"),
                )
            } else {
                (
                    GameAction::Reject,
                    format!("{lance:?} {strength} < {ORDAGO_CALL}: fold to the ordago"),
                )
            };
        }

        if strength >= RAISE_AT && !bet_range(state).is_empty() {
            return (
                GameAction::Bet(MIN_BET),
                format!("{lance:?} {strength} >= {RAISE_AT}: raise {MIN_BET} over {}", bet.amount),
            );
        }
        if strength >= ACCEPT_AT {
            return (
                GameAction::Accept,
                format!("{lance:?} {strength} >= {ACCEPT_AT}: accept {}", bet.amount),
            );
        }
        if strength >= BLUFF_FLOOR && dice.chance(self.config.bluff_rate()) {
            return (
                GameAction::Accept,
                format!("{lance:?} {strength}: bluff call of {}", bet.amount),
            );
        }
        (
            GameAction::Reject,
            format!("{lance:?} {strength} too weak for {}", bet.amount),
        )
    }

    fn open(
        &self,
        state: &GameState,
        player: PlayerId,
        lance: Lance,
        strength: u8,
        dice: &mut Dice,
    ) -> (GameAction, String) {
        let opponents = state.team_score(Team::of(player).other());
        if strength >= ALL_IN_AT && opponents >= ALL_IN_OPPONENT_SCORE {
            return (
                GameAction::AllIn,
                format!("{lance:?} {strength} with opponents on {opponents}: ordago"),
            );
        }
        if strength >= OPEN_AT {
            return (
                GameAction::Bet(MIN_BET),
                format!("{lance:?} {strength} >= {OPEN_AT}: open {MIN_BET}"),
            );
        }
        if strength >= LOOSE_OPEN_AT && dice.chance(self.config.loose_bet_rate()) {
            return (
                GameAction::Bet(MIN_BET),
                format!("{lance:?} {strength}: loose open {MIN_BET}"),
            );
        }
        (GameAction::Pass, format!("{lance:?} {strength}: pass"))
    }
}

fn mus_decision(profile: &StrengthProfile) -> (GameAction, String) {
    let stop = profile.pares >= STOP_PARES
        || profile.juego >= STOP_JUEGO
        || (profile.grande >= STOP_GRANDE && profile.pares >= STOP_GRANDE_WITH_PARES)
        || profile.average() >= STOP_AVERAGE;
    if stop {
        (
            GameAction::StopMus,
            format!("strong hand (max {}, avg {}): no mus", profile.max(), profile.average()),
        )
    } else {
        (
            GameAction::ContinueMus,
            format!("weak hand (max {}, avg {}): mus", profile.max(), profile.average()),
        )
    }
}

fn declare(state: &GameState, lance: Lance, player: PlayerId) -> (GameAction, String) {
    if truthful_declaration(state, lance, player) {
        (GameAction::DeclareHave, format!("holds {lance:?}"))
    } else {
        (GameAction::DeclareNone, format!("no {lance:?}"))
    }
}

/// Pass-equivalent for the turn holder, legal in every phase.
pub fn fallback_action(state: &GameState) -> GameAction {
    const PREFERENCE: [ActionKind; 8] = [
        ActionKind::Pass,
        ActionKind::Reject,
        ActionKind::ContinueMus,
        ActionKind::DeclareHave,
        ActionKind::DeclareNone,
        ActionKind::Continue,
        ActionKind::NewGame,
        ActionKind::ConfirmDiscard,
    ];
    let kinds = legal_actions(state);
    match PREFERENCE.iter().find(|k| kinds.contains(k)) {
        Some(ActionKind::Reject) => GameAction::Reject,
        Some(ActionKind::ContinueMus) => GameAction::ContinueMus,
        Some(ActionKind::DeclareHave) => GameAction::DeclareHave,
        Some(ActionKind::DeclareNone) => GameAction::DeclareNone,
        Some(ActionKind::Continue) => GameAction::Continue,
        Some(ActionKind::NewGame) => GameAction::NewGame,
        Some(ActionKind::ConfirmDiscard) => {
            let hand = state.hand(state.turn);
            let n = (*discard_sizes(state, state.turn).start()).min(hand.len());
            GameAction::ConfirmDiscard(hand[..n].to_vec())
        }
        _ => GameAction::Pass,
    }
}

fn ensure_legal(state: &GameState, action: GameAction, rationale: String) -> (GameAction, String) {
    let kind_ok = legal_actions(state).contains(&action.kind());
    let payload_ok = match &action {
        GameAction::Bet(n) => bet_range(state).contains(n),
        GameAction::ConfirmDiscard(cards) => {
            discard_sizes(state, state.turn).contains(&cards.len())
        }
        _ => true,
    };
    if kind_ok && payload_ok {
        (action, rationale)
    } else {
        let fallback = fallback_action(state);
        let why = format!("{rationale}; {action} not legal, using {fallback}");
        (fallback, why)
    }
}

impl AiPlayer for HeuristicEngine {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn choose_action(&self, state: &GameState, seat: PlayerId) -> Result<Decision, AiError> {
        Ok(self.decide(state, seat))
    }
}
