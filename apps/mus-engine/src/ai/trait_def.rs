//! AI player trait definition.

use std::fmt;

use crate::ai::decision_log::Decision;
use crate::domain::state::{GameState, PlayerId};

/// Errors that can occur while an AI seat is being driven.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AiError {
    /// AI encountered an internal error
    Internal(String),
    /// AI produced an action the engine rejected
    InvalidMove(String),
    /// No AI registered under this name
    UnknownAi(String),
}

impl fmt::Display for AiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AiError::Internal(msg) => write!(f, "AI internal error: {msg}"),
            AiError::InvalidMove(msg) => write!(f, "AI invalid move: {msg}"),
            AiError::UnknownAi(name) => write!(f, "unknown AI: {name}"),
        }
    }
}

impl std::error::Error for AiError {}

/// Trait for AI players.
///
/// Implementations read the full state but must only use `seat`'s own hand,
/// and must return one of the actions advertised for the turn holder.
pub trait AiPlayer: Send + Sync {
    fn name(&self) -> &'static str;

    fn choose_action(&self, state: &GameState, seat: PlayerId) -> Result<Decision, AiError>;
}
