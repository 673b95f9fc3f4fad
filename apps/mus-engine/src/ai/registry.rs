//! Named AI factories.
//!
//! Keep names and ordering stable; simulators and saved configs refer to
//! AIs by name. Constructors must not have side effects.

use crate::ai::config::AiConfig;
use crate::ai::{AiPlayer, HeuristicEngine, RandomPlayer};

/// Factory definition for constructing AI implementations.
pub struct AiFactory {
    pub name: &'static str,
    pub version: &'static str,
    pub make: fn(config: &AiConfig) -> Box<dyn AiPlayer>,
}

static AI_FACTORIES: &[AiFactory] = &[
    AiFactory {
        name: RandomPlayer::NAME,
        version: RandomPlayer::VERSION,
        make: make_random_player,
    },
    AiFactory {
        name: HeuristicEngine::NAME,
        version: HeuristicEngine::VERSION,
        make: make_heuristic,
    },
];

pub fn registered_ais() -> &'static [AiFactory] {
    AI_FACTORIES
}

/// Case-insensitive lookup by registered name.
pub fn by_name(name: &str) -> Option<&'static AiFactory> {
    registered_ais()
        .iter()
        .find(|factory| factory.name.eq_ignore_ascii_case(name))
}

fn make_random_player(config: &AiConfig) -> Box<dyn AiPlayer> {
    Box::new(RandomPlayer::new(config.seed()))
}

fn make_heuristic(config: &AiConfig) -> Box<dyn AiPlayer> {
    Box::new(HeuristicEngine::from_config(config.clone()))
}
