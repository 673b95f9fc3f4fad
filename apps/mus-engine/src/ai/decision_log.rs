//! Audit records for AI decisions and the sinks that receive them.
//!
//! Sinks are fire-and-forget: `record` never fails and never blocks on a
//! consumer.

use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::debug;

use crate::ai::strength::StrengthProfile;
use crate::domain::actions::GameAction;
use crate::domain::cards_parsing::format_hand;
use crate::domain::state::{Phase, PlayerId};
use crate::domain::Card;

/// One decision instant, written once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionLog {
    /// `r{round}-s{step}-p{seat}`; unique within a game.
    pub id: String,
    pub round_no: u32,
    /// History length when the decision was taken.
    pub step: usize,
    pub player: PlayerId,
    pub player_name: String,
    pub phase: Phase,
    pub hand: Vec<Card>,
    pub strengths: StrengthProfile,
    pub action: GameAction,
    pub rationale: String,
}

impl DecisionLog {
    pub fn make_id(round_no: u32, step: usize, player: PlayerId) -> String {
        format!("r{round_no}-s{step}-p{player}")
    }
}

/// Chosen action plus its audit record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub action: GameAction,
    pub log: DecisionLog,
}

pub trait DecisionSink: Send + Sync {
    fn record(&self, log: &DecisionLog);
}

/// Emits each decision as a structured `debug!` event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DecisionSink for TracingSink {
    fn record(&self, log: &DecisionLog) {
        debug!(
            id = %log.id,
            round_no = log.round_no,
            player = log.player,
            phase = ?log.phase,
            hand = %format_hand(&log.hand),
            grande = log.strengths.grande,
            chica = log.strengths.chica,
            pares = log.strengths.pares,
            juego = log.strengths.juego,
            action = %log.action,
            rationale = %log.rationale,
            "ai decision"
        );
    }
}

/// Keeps every record in memory, for tests and debug views.
#[derive(Debug, Default)]
pub struct MemorySink {
    entries: Mutex<Vec<DecisionLog>>,
}

impl MemorySink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn entries(&self) -> Vec<DecisionLog> {
        self.entries.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

impl DecisionSink for MemorySink {
    fn record(&self, log: &DecisionLog) {
        self.entries.lock().push(log.clone());
    }
}

/// Forwards records to an unbounded channel. A closed receiver drops them.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<DecisionLog>,
}

impl ChannelSink {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<DecisionLog>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl DecisionSink for ChannelSink {
    fn record(&self, log: &DecisionLog) {
        let _ = self.tx.send(log.clone());
    }
}
