//! Engine configuration from the environment.
//!
//! | Variable           | Meaning                                  | Default      |
//! |--------------------|------------------------------------------|--------------|
//! | `MUS_SEED`         | game seed (u64)                          | random       |
//! | `MUS_AI_PACE_MS`   | delay before each simulated turn         | 600          |
//! | `MUS_SAVE_PATH`    | JSON save file                           | none         |
//! | `MUS_FIRST_MANO`   | seat 0..=3 that leads the first round    | 0            |
//! | `MUS_PLAYER_NAMES` | four comma-separated display names       | `Player 1..4`|

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::domain::rules::PLAYERS;
use crate::domain::state::{default_names, PlayerId};
use crate::errors::DomainError;

pub const DEFAULT_AI_PACE_MS: u64 = 600;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub seed: u64,
    pub ai_pace: Duration,
    pub save_path: Option<PathBuf>,
    pub first_mano: PlayerId,
    pub player_names: [String; PLAYERS],
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: rand::random(),
            ai_pace: Duration::from_millis(DEFAULT_AI_PACE_MS),
            save_path: None,
            first_mano: 0,
            player_names: default_names(),
        }
    }
}

impl EngineConfig {
    /// Read every `MUS_*` variable, falling back to defaults for unset ones.
    pub fn from_env() -> Result<Self, DomainError> {
        let defaults = Self::default();
        Ok(Self {
            seed: parse_var("MUS_SEED")?.unwrap_or(defaults.seed),
            ai_pace: parse_var::<u64>("MUS_AI_PACE_MS")?
                .map(Duration::from_millis)
                .unwrap_or(defaults.ai_pace),
            save_path: opt_var("MUS_SAVE_PATH").map(PathBuf::from),
            first_mano: first_mano()?.unwrap_or(defaults.first_mano),
            player_names: player_names()?.unwrap_or(defaults.player_names),
        })
    }
}

/// Unset and blank are both "not configured".
fn opt_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Result<Option<T>, DomainError> {
    opt_var(name)
        .map(|raw| {
            raw.parse::<T>()
                .map_err(|_| DomainError::config(format!("{name}='{raw}' is not a valid number")))
        })
        .transpose()
}

fn first_mano() -> Result<Option<PlayerId>, DomainError> {
    match parse_var::<PlayerId>("MUS_FIRST_MANO")? {
        Some(seat) if seat as usize >= PLAYERS => Err(DomainError::config(format!(
            "MUS_FIRST_MANO must be 0..={}, got {seat}",
            PLAYERS - 1
        ))),
        other => Ok(other),
    }
}

fn player_names() -> Result<Option<[String; PLAYERS]>, DomainError> {
    let Some(raw) = opt_var("MUS_PLAYER_NAMES") else {
        return Ok(None);
    };
    let names: Vec<String> = raw.split(',').map(|n| n.trim().to_string()).collect();
    if names.iter().any(String::is_empty) {
        return Err(DomainError::config("MUS_PLAYER_NAMES contains an empty name"));
    }
    names.try_into().map(Some).map_err(|v: Vec<String>| {
        DomainError::config(format!(
            "MUS_PLAYER_NAMES needs {PLAYERS} names, got {}",
            v.len()
        ))
    })
}
