//! Command implementations

pub mod auto;
pub mod benchmark;
pub mod history;
pub mod play;

pub use auto::{AutoSummary, run_auto};
pub use benchmark::{BenchmarkResult, run_benchmark};
pub use history::run_history;
pub use play::{PlayOptions, run_play};

use crate::error::ArenaError;
use std::io;
use thiserror::Error;

/// Failure of a terminal command
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Arena(#[from] ArenaError),
}
