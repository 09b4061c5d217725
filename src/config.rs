//! Runtime configuration
//!
//! Values are layered: built-in defaults, then an optional TOML file, then
//! `WORDLE_ARENA_*` environment variables. The binary applies command-line
//! flags last.

use crate::game::SessionSettings;
use crate::pools::{EquationGenerator, PoolSource, WordPool};
use crate::solver::StrategyType;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Prefix of every environment override
pub const ENV_PREFIX: &str = "WORDLE_ARENA_";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid value {value:?} for WORDLE_ARENA_{key}")]
    InvalidOverride { key: &'static str, value: String },
}

/// Service and front-end settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Guesses per game
    pub turn_limit: usize,
    /// Word list file; the embedded list when absent
    pub word_list: Option<PathBuf>,
    /// JSON-lines file of finished games
    pub game_log: PathBuf,
    /// Master seed; sessions are reproducible when set
    pub seed: Option<u64>,
    /// Guess ranking: partition, entropy or minimax
    pub strategy: String,
    /// Candidate count from which the opening guess is random
    pub opening_random_min: usize,
    pub min_words_per_length: usize,
    pub equation_pool_size: usize,
    pub equation_pool_attempts: usize,
    pub equation_max_attempts: usize,
    /// Default `tracing` filter; `RUST_LOG` takes precedence
    pub log_filter: String,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            turn_limit: 6,
            word_list: None,
            game_log: PathBuf::from("games.jsonl"),
            seed: None,
            strategy: "partition".to_string(),
            opening_random_min: 10,
            min_words_per_length: 5,
            equation_pool_size: 100,
            equation_pool_attempts: 500,
            equation_max_attempts: 1000,
            log_filter: "info".to_string(),
        }
    }
}

impl ArenaConfig {
    /// Defaults overridden by a TOML file
    ///
    /// # Errors
    /// Returns `ConfigError` if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load the full layered configuration
    ///
    /// # Errors
    /// Returns `ConfigError` if `path` is given and cannot be loaded, or an
    /// environment override does not parse.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env()
    }

    /// Apply `WORDLE_ARENA_*` environment variables
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidOverride` for a value that does not parse.
    pub fn apply_env(self) -> Result<Self, ConfigError> {
        self.apply_overrides(|key| std::env::var(format!("{ENV_PREFIX}{key}")).ok())
    }

    /// Apply overrides from any key lookup
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidOverride` for a value that does not parse.
    pub fn apply_overrides<F>(self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base = self;
        Ok(Self {
            turn_limit: parsed(&lookup, "TURN_LIMIT")?.unwrap_or(base.turn_limit),
            word_list: lookup("WORD_LIST").map(PathBuf::from).or(base.word_list),
            game_log: lookup("GAME_LOG").map_or(base.game_log, PathBuf::from),
            seed: parsed(&lookup, "SEED")?.or(base.seed),
            strategy: lookup("STRATEGY").unwrap_or(base.strategy),
            opening_random_min: parsed(&lookup, "OPENING_RANDOM_MIN")?
                .unwrap_or(base.opening_random_min),
            min_words_per_length: parsed(&lookup, "MIN_WORDS_PER_LENGTH")?
                .unwrap_or(base.min_words_per_length),
            equation_pool_size: parsed(&lookup, "EQUATION_POOL_SIZE")?
                .unwrap_or(base.equation_pool_size),
            equation_pool_attempts: parsed(&lookup, "EQUATION_POOL_ATTEMPTS")?
                .unwrap_or(base.equation_pool_attempts),
            equation_max_attempts: parsed(&lookup, "EQUATION_MAX_ATTEMPTS")?
                .unwrap_or(base.equation_max_attempts),
            log_filter: lookup("LOG").unwrap_or(base.log_filter),
        })
    }

    /// Session tuning derived from this configuration
    #[must_use]
    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            turn_limit: self.turn_limit,
            strategy: StrategyType::from_name(&self.strategy),
            opening_random_min: self.opening_random_min,
        }
    }

    /// Word pool and equation generator for this configuration
    ///
    /// An unusable `word_list` falls back to the embedded vocabulary.
    #[must_use]
    pub fn pool_source(&self) -> PoolSource {
        let words = WordPool::load_or_embedded(self.word_list.as_deref())
            .with_min_words_per_length(self.min_words_per_length);
        PoolSource::new(words, self.equation_generator())
    }

    #[must_use]
    pub const fn equation_generator(&self) -> EquationGenerator {
        EquationGenerator::new(
            self.equation_max_attempts,
            self.equation_pool_size,
            self.equation_pool_attempts,
        )
    }
}

fn parsed<F, T>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    lookup(key)
        .map(|value| {
            value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidOverride { key, value })
        })
        .transpose()
}
