//! Domain-level error type used across the rule engine, store and driver.
//!
//! This error type is I/O-agnostic. Outer surfaces return
//! `Result<T, crate::error::EngineError>` and convert from `DomainError`
//! using the provided `From<DomainError> for EngineError` implementation.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Why an action or input was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    /// Dealing requires exactly four players.
    InvalidPlayerCount,
    /// The acting player does not hold the turn.
    OutOfTurn,
    /// The operation does not apply to the current phase.
    PhaseMismatch,
    /// The action kind is not in the advertised legal set.
    IllegalAction,
    /// Bet amount outside the allowed range.
    InvalidBet,
    /// Discard selection has the wrong size or repeats a card.
    InvalidDiscard,
    /// A referenced card is not in the player's hand.
    CardNotInHand,
    /// A card token could not be parsed.
    ParseCard,
    Other(String),
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Rule violation or malformed input
    Validation(ValidationKind, String),
    /// Save record could not be read or written
    Persistence(String),
    /// Invalid configuration value
    Config(String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(kind, d) => write!(f, "validation error {kind:?}: {d}"),
            DomainError::Persistence(d) => write!(f, "persistence error: {d}"),
            DomainError::Config(d) => write!(f, "config error: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }

    pub fn validation_other(detail: impl Into<String>) -> Self {
        let detail = detail.into();
        Self::Validation(ValidationKind::Other(detail.clone()), detail)
    }

    pub fn persistence(detail: impl Into<String>) -> Self {
        Self::Persistence(detail.into())
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config(detail.into())
    }

    /// Validation kind, if this is a rule rejection.
    pub fn kind(&self) -> Option<&ValidationKind> {
        match self {
            DomainError::Validation(kind, _) => Some(kind),
            _ => None,
        }
    }
}
