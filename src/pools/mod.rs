//! Answer pools
//!
//! Sources of hidden answers and the candidate pools the solver starts from:
//! a word list grouped by length for word mode, and a random equation
//! generator for equation mode.

mod embedded;
pub mod equation;
pub mod words;

pub use embedded::{DEFAULT_WORDS, DEFAULT_WORDS_COUNT};
pub use equation::EquationGenerator;
pub use words::WordPool;

use crate::core::{Mode, Word};
use rand::Rng;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or drawing from a pool
#[derive(Debug, Error)]
pub enum PoolError {
    #[error("word pool is empty")]
    Empty,
    #[error("equations need at least 5 tokens, requested {0}")]
    UnsupportedLength(usize),
    #[error("could not generate a {length}-token equation in {attempts} attempts")]
    GenerationFailed { length: usize, attempts: usize },
    #[error("failed to read word list {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("word list {path} is not a JSON array of strings: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// A sampled answer together with the solver's starting candidates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerPool {
    answer: Word,
    candidates: Vec<Word>,
}

impl AnswerPool {
    /// Pair an answer with its candidate pool
    ///
    /// The answer is appended to the candidates when missing, so a solver
    /// starting from this pool can always reach it.
    #[must_use]
    pub fn new(answer: Word, mut candidates: Vec<Word>) -> Self {
        if !candidates.contains(&answer) {
            candidates.push(answer.clone());
        }
        Self { answer, candidates }
    }

    #[must_use]
    pub const fn answer(&self) -> &Word {
        &self.answer
    }

    #[must_use]
    pub fn candidates(&self) -> &[Word] {
        &self.candidates
    }

    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.answer.mode()
    }

    /// Split into answer and candidates
    #[must_use]
    pub fn into_parts(self) -> (Word, Vec<Word>) {
        (self.answer, self.candidates)
    }
}

/// Mode-aware pool source used when a session starts
#[derive(Debug, Clone)]
pub struct PoolSource {
    words: WordPool,
    equations: EquationGenerator,
}

impl PoolSource {
    #[must_use]
    pub const fn new(words: WordPool, equations: EquationGenerator) -> Self {
        Self { words, equations }
    }

    /// Draw an answer and candidate pool for `mode`
    ///
    /// # Errors
    /// Returns `PoolError` if the word pool is empty or equation generation
    /// keeps failing.
    pub fn draw<R: Rng + ?Sized>(&self, mode: Mode, rng: &mut R) -> Result<AnswerPool, PoolError> {
        match mode {
            Mode::Word => self.words.draw(rng),
            Mode::Equation => self.equations.draw(rng),
        }
    }

    #[must_use]
    pub const fn words(&self) -> &WordPool {
        &self.words
    }
}
