//! Error codes for the Mus engine.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All error codes are SCREAMING_SNAKE_CASE and are what hosts show or log.

use core::fmt;

use super::domain::{DomainError, ValidationKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Rule validation
    InvalidPlayerCount,
    OutOfTurn,
    PhaseMismatch,
    IllegalAction,
    InvalidBet,
    InvalidDiscard,
    CardNotInHand,
    ParseCard,
    ValidationError,

    // Surfaces
    PersistenceError,
    ConfigError,
    AiError,
    InternalError,
}

impl ErrorCode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidPlayerCount => "INVALID_PLAYER_COUNT",
            Self::OutOfTurn => "OUT_OF_TURN",
            Self::PhaseMismatch => "PHASE_MISMATCH",
            Self::IllegalAction => "ILLEGAL_ACTION",
            Self::InvalidBet => "INVALID_BET",
            Self::InvalidDiscard => "INVALID_DISCARD",
            Self::CardNotInHand => "CARD_NOT_IN_HAND",
            Self::ParseCard => "PARSE_CARD",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::PersistenceError => "PERSISTENCE_ERROR",
            Self::ConfigError => "CONFIG_ERROR",
            Self::AiError => "AI_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&ValidationKind> for ErrorCode {
    fn from(kind: &ValidationKind) -> Self {
        match kind {
            ValidationKind::InvalidPlayerCount => Self::InvalidPlayerCount,
            ValidationKind::OutOfTurn => Self::OutOfTurn,
            ValidationKind::PhaseMismatch => Self::PhaseMismatch,
            ValidationKind::IllegalAction => Self::IllegalAction,
            ValidationKind::InvalidBet => Self::InvalidBet,
            ValidationKind::InvalidDiscard => Self::InvalidDiscard,
            ValidationKind::CardNotInHand => Self::CardNotInHand,
            ValidationKind::ParseCard => Self::ParseCard,
            ValidationKind::Other(_) => Self::ValidationError,
        }
    }
}

impl From<&DomainError> for ErrorCode {
    fn from(err: &DomainError) -> Self {
        match err {
            DomainError::Validation(kind, _) => kind.into(),
            DomainError::Persistence(_) => Self::PersistenceError,
            DomainError::Config(_) => Self::ConfigError,
        }
    }
}
