//! Core domain types for the guessing game
//!
//! This module contains the fundamental domain types: the two token alphabets,
//! validated words, per-token feedback and the hard-mode legality check.
//! All types here are pure, testable, and have clear mathematical properties.

mod feedback;
mod mode;
pub mod strict;
mod word;

pub use feedback::{EvaluationError, Feedback, Mark, evaluate};
pub use mode::{EQUATION_SYMBOLS, Mode, ModeParseError};
pub use strict::StrictViolation;
pub use word::{Word, WordError};
