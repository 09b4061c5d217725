//! Library error type
//!
//! Every fallible service call returns [`ArenaError`], which wraps the error
//! of the layer that failed.

use crate::core::{EvaluationError, Mode, StrictViolation, WordError};
use crate::game::SessionId;
use crate::history::HistoryError;
use crate::pools::PoolError;
use thiserror::Error;

/// Errors returned by [`GameService`](crate::game::GameService) and sessions
#[derive(Debug, Error)]
pub enum ArenaError {
    #[error("unknown session {0}")]
    UnknownSession(SessionId),
    #[error("session is already finished")]
    SessionFinished,
    #[error("invalid guess: {0}")]
    InvalidGuess(#[from] WordError),
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
    #[error("strict mode: {0}")]
    StrictViolation(#[from] StrictViolation),
    #[error("solver has no candidates left")]
    SolverExhausted,
    #[error("pool {found} does not match session mode {expected}")]
    PoolModeMismatch { expected: Mode, found: Mode },
    #[error(transparent)]
    Pool(#[from] PoolError),
    #[error(transparent)]
    History(#[from] HistoryError),
    #[error("session lock poisoned")]
    LockPoisoned,
}

impl ArenaError {
    /// Whether the caller caused the error
    ///
    /// Client errors leave the session untouched and can be retried with
    /// different input; the rest are internal failures.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownSession(_)
                | Self::SessionFinished
                | Self::InvalidGuess(_)
                | Self::Evaluation(_)
                | Self::StrictViolation(_)
                | Self::PoolModeMismatch { .. }
        )
    }
}
