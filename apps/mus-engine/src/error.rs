use thiserror::Error;

use crate::ai::AiError;
use crate::errors::{DomainError, ErrorCode};

/// Error type for the outer surfaces: store, driver, config and save files.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Rejected ({code}): {detail}")]
    Rejected { code: ErrorCode, detail: String },
    #[error("Persistence error: {detail}")]
    Persistence { detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
    #[error(transparent)]
    Ai(#[from] AiError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Internal error: {detail}")]
    Internal { detail: String },
}

impl EngineError {
    pub fn code(&self) -> ErrorCode {
        match self {
            EngineError::Rejected { code, .. } => *code,
            EngineError::Persistence { .. } | EngineError::Io(_) | EngineError::Serde(_) => {
                ErrorCode::PersistenceError
            }
            EngineError::Config { .. } => ErrorCode::ConfigError,
            EngineError::Ai(_) => ErrorCode::AiError,
            EngineError::Internal { .. } => ErrorCode::InternalError,
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            detail: detail.into(),
        }
    }
}

impl From<DomainError> for EngineError {
    fn from(err: DomainError) -> Self {
        let code = ErrorCode::from(&err);
        match err {
            DomainError::Validation(_, detail) => EngineError::Rejected { code, detail },
            DomainError::Persistence(detail) => EngineError::Persistence { detail },
            DomainError::Config(detail) => EngineError::Config { detail },
        }
    }
}
