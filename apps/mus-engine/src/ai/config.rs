//! AI configuration handling.
//!
//! Extracts the standard tuning fields from a JSON profile while keeping any
//! implementation-specific fields in `custom`.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Chance of calling a bet with a middling hand.
pub const DEFAULT_BLUFF_RATE: f64 = 0.2;
/// Chance of opening with a hand just under the betting threshold.
pub const DEFAULT_LOOSE_BET_RATE: f64 = 0.15;

/// Standard configuration for AI players.
///
/// ```json
/// {"seed": 12345, "bluff_rate": 0.1, "style": "cautious"}
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    /// RNG seed for reproducible decisions. Absent means system entropy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    /// Probability (0..=1) of a bluff-call when facing a bet.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bluff_rate: Option<f64>,

    /// Probability (0..=1) of opening a bet with a moderate hand.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loose_bet_rate: Option<f64>,

    #[serde(flatten)]
    pub custom: JsonValue,
}

impl AiConfig {
    /// Build from optional JSON, falling back to an empty config when the
    /// input is missing or malformed.
    pub fn from_json(config: Option<&JsonValue>) -> Self {
        config
            .and_then(|json| serde_json::from_value(json.clone()).ok())
            .unwrap_or_else(Self::empty)
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn bluff_rate(&self) -> f64 {
        rate_or(self.bluff_rate, DEFAULT_BLUFF_RATE)
    }

    pub fn loose_bet_rate(&self) -> f64 {
        rate_or(self.loose_bet_rate, DEFAULT_LOOSE_BET_RATE)
    }

    pub fn get_custom(&self, key: &str) -> Option<&JsonValue> {
        self.custom.get(key)
    }

    pub fn empty() -> Self {
        Self {
            seed: None,
            bluff_rate: None,
            loose_bet_rate: None,
            custom: JsonValue::Object(serde_json::Map::new()),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::empty()
        }
    }
}

fn rate_or(value: Option<f64>, default: f64) -> f64 {
    match value {
        Some(v) if v.is_finite() => v.clamp(0.0, 1.0),
        _ => default,
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self::empty()
    }
}
