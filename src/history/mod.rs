//! Game history
//!
//! Append-only record of finished games. The service writes one
//! [`GameRecord`] when a session reaches a terminal status; players can read
//! their own records back, newest first.

use crate::core::{Feedback, Mode};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;

/// Errors from reading or writing the game log
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("game log {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("game log {path} line {line}: {source}")]
    Json {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("game log lock poisoned")]
    LockPoisoned,
}

/// One turn as stored in a record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedTurn {
    pub guess: String,
    pub feedback: Feedback,
}

/// A finished game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub user: String,
    pub mode: Mode,
    pub answer: String,
    pub turns: usize,
    /// 1 for a win, 0 for a loss
    pub won: u8,
    pub history: Vec<RecordedTurn>,
}

impl GameRecord {
    #[must_use]
    pub const fn is_win(&self) -> bool {
        self.won == 1
    }
}

/// Append-only store of finished games
pub trait GameLog: Send + Sync {
    /// Persist one finished game
    ///
    /// # Errors
    /// Returns `HistoryError` if the record could not be stored.
    fn append(&self, record: &GameRecord) -> Result<(), HistoryError>;

    /// Every record of `user`, newest first
    ///
    /// # Errors
    /// Returns `HistoryError` if the store cannot be read.
    fn games_for(&self, user: &str) -> Result<Vec<GameRecord>, HistoryError>;
}

/// Game log kept in a JSON-lines file, one record per line
#[derive(Debug)]
pub struct JsonlGameLog {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonlGameLog {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> HistoryError {
        HistoryError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl GameLog for JsonlGameLog {
    fn append(&self, record: &GameRecord) -> Result<(), HistoryError> {
        let mut line = serde_json::to_string(record).map_err(|source| HistoryError::Json {
            path: self.path.clone(),
            line: 0,
            source,
        })?;
        line.push('\n');

        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| HistoryError::LockPoisoned)?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.io_error(e))?;
        file.write_all(line.as_bytes())
            .map_err(|e| self.io_error(e))
    }

    fn games_for(&self, user: &str) -> Result<Vec<GameRecord>, HistoryError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(self.io_error(e)),
        };

        let mut games = Vec::new();
        for (index, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let record: GameRecord =
                serde_json::from_str(line).map_err(|source| HistoryError::Json {
                    path: self.path.clone(),
                    line: index + 1,
                    source,
                })?;
            if record.user == user {
                games.push(record);
            }
        }

        games.reverse();
        Ok(games)
    }
}

/// Game log held in memory, for tests and throwaway runs
#[derive(Debug, Default)]
pub struct MemoryGameLog {
    records: Mutex<Vec<GameRecord>>,
}

impl MemoryGameLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every stored record in insertion order
    ///
    /// # Errors
    /// Returns `HistoryError::LockPoisoned` if a writer panicked.
    pub fn records(&self) -> Result<Vec<GameRecord>, HistoryError> {
        self.records
            .lock()
            .map(|records| records.clone())
            .map_err(|_| HistoryError::LockPoisoned)
    }
}

impl GameLog for MemoryGameLog {
    fn append(&self, record: &GameRecord) -> Result<(), HistoryError> {
        self.records
            .lock()
            .map_err(|_| HistoryError::LockPoisoned)?
            .push(record.clone());
        Ok(())
    }

    fn games_for(&self, user: &str) -> Result<Vec<GameRecord>, HistoryError> {
        let records = self
            .records
            .lock()
            .map_err(|_| HistoryError::LockPoisoned)?;
        Ok(records
            .iter()
            .rev()
            .filter(|record| record.user == user)
            .cloned()
            .collect())
    }
}

impl<L: GameLog + ?Sized> GameLog for std::sync::Arc<L> {
    fn append(&self, record: &GameRecord) -> Result<(), HistoryError> {
        (**self).append(record)
    }

    fn games_for(&self, user: &str) -> Result<Vec<GameRecord>, HistoryError> {
        (**self).games_for(user)
    }
}
