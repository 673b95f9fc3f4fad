//! Match persistence between sessions.
//!
//! Only the team scores and the last mano are saved. A missing or unreadable
//! save is never fatal: loading reports it with `warn!` and yields `None`,
//! and the caller starts a fresh game.

use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use fs4::fs_std::FileExt;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::rules::{PLAYERS, WINNING_SCORE};
use crate::domain::state::{GameState, Phase, PlayerId, TeamScores};
use crate::error::EngineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveRecord {
    pub team_a: u16,
    pub team_b: u16,
    pub last_mano: PlayerId,
}

impl SaveRecord {
    /// Record for `state`. A finished game saves zeroed scores so the next
    /// session starts a new match.
    pub fn from_state(state: &GameState) -> Self {
        let (team_a, team_b) = if state.phase == Phase::GameOver {
            (0, 0)
        } else {
            (state.scores.a, state.scores.b)
        };
        Self {
            team_a,
            team_b,
            last_mano: state.mano,
        }
    }

    fn check(self) -> Result<Self, String> {
        if self.last_mano as usize >= PLAYERS {
            return Err(format!("last_mano {} out of range", self.last_mano));
        }
        if self.team_a >= WINNING_SCORE || self.team_b >= WINNING_SCORE {
            return Err(format!(
                "scores {}-{} already finished a game",
                self.team_a, self.team_b
            ));
        }
        Ok(self)
    }

    pub fn scores(&self) -> TeamScores {
        TeamScores {
            a: self.team_a,
            b: self.team_b,
        }
    }
}

pub trait SaveStore: Send + Sync {
    fn load(&self) -> Option<SaveRecord>;
    fn save(&self, record: &SaveRecord) -> Result<(), EngineError>;
}

/// JSON save file, written under an exclusive OS lock.
#[derive(Debug, Clone)]
pub struct FileSaveStore {
    path: PathBuf,
}

impl FileSaveStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SaveStore for FileSaveStore {
    fn load(&self) -> Option<SaveRecord> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no save file");
                return None;
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "save file unreadable");
                return None;
            }
        };
        match serde_json::from_str::<SaveRecord>(&raw)
            .map_err(|e| e.to_string())
            .and_then(SaveRecord::check)
        {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "save file corrupt; ignoring");
                None
            }
        }
    }

    fn save(&self, record: &SaveRecord) -> Result<(), EngineError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&self.path)?;
        file.lock_exclusive()?;

        let json = serde_json::to_vec_pretty(record)?;
        let written = overwrite(&mut file, &json);
        FileExt::unlock(&file)?;
        written?;

        debug!(
            path = %self.path.display(),
            team_a = record.team_a,
            team_b = record.team_b,
            last_mano = record.last_mano,
            "game saved"
        );
        Ok(())
    }
}

fn overwrite(file: &mut File, bytes: &[u8]) -> std::io::Result<()> {
    file.set_len(0)?;
    file.write_all(bytes)?;
    file.sync_all()
}

/// In-process save slot for tests and embedders without a filesystem.
#[derive(Debug, Default)]
pub struct MemorySaveStore {
    slot: Mutex<Option<SaveRecord>>,
}

impl MemorySaveStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SaveStore for MemorySaveStore {
    fn load(&self) -> Option<SaveRecord> {
        *self.slot.lock()
    }

    fn save(&self, record: &SaveRecord) -> Result<(), EngineError> {
        *self.slot.lock() = Some(*record);
        Ok(())
    }
}

/// Fresh table, resumed from `store` when it holds a usable record.
pub fn resume_or_new(
    store: &dyn SaveStore,
    seed: u64,
    first_mano: PlayerId,
    names: [String; PLAYERS],
) -> GameState {
    match store.load() {
        Some(record) => GameState::resumed(seed, names, record.scores(), record.last_mano),
        None => GameState::new(seed, first_mano, names),
    }
}
