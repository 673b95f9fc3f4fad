//! AI players for unattended seats.
//!
//! - [`HeuristicEngine`]: rule-of-thumb play driven by per-lance strength
//! - [`RandomPlayer`]: uniform legal play, used as baseline and fallback
//! - decision records and the sinks that receive them

pub mod config;
pub mod decision_log;
pub mod discard;
pub mod heuristic;
mod random;
pub mod random_source;
pub mod registry;
pub mod strength;
mod trait_def;

pub use config::AiConfig;
pub use decision_log::{ChannelSink, Decision, DecisionLog, DecisionSink, MemorySink, TracingSink};
pub use heuristic::HeuristicEngine;
pub use random::RandomPlayer;
pub use random_source::{Dice, EntropyRandom, RandomSource, SeededRandom};
use serde_json::Value as JsonValue;
pub use strength::StrengthProfile;
pub use trait_def::{AiError, AiPlayer};

/// AI failure mode - how to handle AI errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AiFailureMode {
    /// Surface the error (for tests)
    Panic,
    /// Fall back to random play (for live tables)
    #[default]
    FallbackRandom,
}

/// Create an AI player from a type name and optional JSON config.
///
/// Accepts the registered names case-insensitively plus the short aliases
/// `"random"` and `"heuristic"`. Returns `None` for anything else.
pub fn create_ai(ai_type: &str, config: Option<&JsonValue>) -> Option<Box<dyn AiPlayer>> {
    let config = AiConfig::from_json(config);
    let factory = match ai_type.to_ascii_lowercase().as_str() {
        "random" => registry::by_name(RandomPlayer::NAME),
        other => registry::by_name(other),
    }?;
    Some((factory.make)(&config))
}
