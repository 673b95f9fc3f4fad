//! Authoritative game state holder.
//!
//! The store owns one `Arc<GameState>`. Every accepted action produces a new
//! snapshot that replaces the old one in a single `watch` send, so readers
//! never observe a half-applied transition.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::watch;
use tracing::{debug, info};

use crate::domain::actions::GameAction;
use crate::domain::game_flow::apply_action;
use crate::domain::state::{GameState, Phase, PlayerId};
use crate::errors::DomainError;

pub struct GameStore {
    tx: watch::Sender<Arc<GameState>>,
    /// Serializes submits so two writers cannot both apply to the same base.
    write: Mutex<()>,
}

impl GameStore {
    pub fn new(initial: GameState) -> Self {
        let (tx, _rx) = watch::channel(Arc::new(initial));
        Self {
            tx,
            write: Mutex::new(()),
        }
    }

    pub fn snapshot(&self) -> Arc<GameState> {
        self.tx.borrow().clone()
    }

    /// Receiver that sees every snapshot published after this call.
    pub fn subscribe(&self) -> watch::Receiver<Arc<GameState>> {
        self.tx.subscribe()
    }

    /// Validate and apply `action` for `actor`. On rejection the current
    /// snapshot is left untouched and nothing is published.
    pub fn submit(
        &self,
        action: GameAction,
        actor: PlayerId,
    ) -> Result<Arc<GameState>, DomainError> {
        let _guard = self.write.lock();
        let current = self.snapshot();
        let next = match apply_action(&current, actor, action.clone()) {
            Ok(next) => Arc::new(next),
            Err(e) => {
                debug!(
                    player = actor,
                    phase = ?current.phase,
                    action = %action,
                    error = %e,
                    "action rejected"
                );
                return Err(e);
            }
        };

        debug!(
            round_no = next.round_no,
            player = actor,
            phase = ?current.phase,
            action = %action,
            "action applied"
        );
        if next.phase != current.phase {
            match next.phase {
                Phase::RoundOver => info!(
                    round_no = next.round_no,
                    team_a = next.scores.a,
                    team_b = next.scores.b,
                    "round scored"
                ),
                Phase::GameOver => info!(
                    round_no = next.round_no,
                    winner = ?next.winner,
                    team_a = next.scores.a,
                    team_b = next.scores.b,
                    "game over"
                ),
                _ => {}
            }
        }

        self.tx.send_replace(next.clone());
        Ok(next)
    }

    /// Swap in a whole new state, e.g. after loading a save.
    pub fn replace(&self, state: GameState) -> Arc<GameState> {
        let _guard = self.write.lock();
        let next = Arc::new(state);
        self.tx.send_replace(next.clone());
        next
    }
}
