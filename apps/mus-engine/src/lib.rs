#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod ai;
pub mod config;
pub mod domain;
pub mod driver;
pub mod error;
pub mod errors;
pub mod persistence;
pub mod store;
pub mod telemetry;

#[cfg(test)]
pub mod test_bootstrap;

// Re-exports for public API
pub use ai::{create_ai, AiConfig, AiError, AiFailureMode, AiPlayer, Decision, DecisionLog};
pub use ai::{HeuristicEngine, RandomPlayer};
pub use config::EngineConfig;
pub use domain::{apply_action, legal_actions, legal_actions_for, GameAction, GameState, Phase};
pub use driver::{SeatController, TableDriver};
pub use error::EngineError;
pub use errors::{DomainError, ErrorCode, ValidationKind};
pub use persistence::{FileSaveStore, MemorySaveStore, SaveRecord, SaveStore};
pub use store::GameStore;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
