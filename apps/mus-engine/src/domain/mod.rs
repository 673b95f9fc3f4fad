//! Domain layer: pure game logic types and helpers.

pub mod actions;
pub mod betting;
pub mod cards_parsing;
pub mod cards_types;
pub mod dealing;
pub mod game_flow;
pub mod hand_eval;
pub mod lances;
pub mod legals;
pub mod rules;
pub mod scoring;
pub mod seed_derivation;
pub mod state;

#[cfg(test)]
pub(crate) mod test_prelude;
#[cfg(test)]
pub(crate) mod test_state_helpers;
#[cfg(test)]
mod tests_betting;
#[cfg(test)]
mod tests_game_flow;
#[cfg(test)]
mod tests_integration;
#[cfg(test)]
mod tests_props_evaluator;
#[cfg(test)]
mod tests_props_flow;

// Re-exports for ergonomics
pub use actions::{ActionKind, GameAction};
pub use cards_parsing::{format_hand, parse_cards};
pub use cards_types::{Card, Rank, Suit};
pub use dealing::{full_deck, Deck};
pub use game_flow::apply_action;
pub use hand_eval::{game_value, highest_card, lowest_card, pair_category, PairCategory};
pub use lances::Lance;
pub use legals::{legal_actions, legal_actions_for};
pub use scoring::{LanceScore, RoundSummary};
pub use state::{
    BetInfo, GameState, Gesture, LanceOutcome, Phase, Player, PlayerId, Team, TeamScores,
};
