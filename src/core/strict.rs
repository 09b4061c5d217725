//! Hard-mode legality check
//!
//! In a strict session every guess after the first must reuse what the
//! previous turn revealed: exact tokens stay in place and every token marked
//! present appears somewhere in the new guess. Marking itself never changes.

use super::{Feedback, Mark, Word};
use thiserror::Error;

/// A revealed constraint the new guess failed to honour
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StrictViolation {
    #[error("position {} must be '{token}'", .position + 1)]
    MissingExact { token: char, position: usize },
    #[error("guess must contain '{token}'")]
    MissingPresent { token: char },
}

/// Check `guess` against the previous turn's guess and feedback
///
/// Exact marks are checked first, left to right, then present tokens in
/// order of first appearance; the first unmet constraint is reported.
///
/// # Errors
/// Returns the first `StrictViolation` found.
///
/// # Examples
/// ```
/// use wordle_arena::core::{Feedback, Mode, Word, strict};
///
/// let answer = Word::new("earth", Mode::Word).unwrap();
/// let first = Word::new("ratio", Mode::Word).unwrap();
/// let feedback = Feedback::calculate(&first, &answer);
///
/// let lazy = Word::new("trick", Mode::Word).unwrap();
/// assert!(strict::check_guess(&first, &feedback, &lazy).is_err());
///
/// let careful = Word::new("earth", Mode::Word).unwrap();
/// assert!(strict::check_guess(&first, &feedback, &careful).is_ok());
/// ```
pub fn check_guess(
    previous: &Word,
    feedback: &Feedback,
    guess: &Word,
) -> Result<(), StrictViolation> {
    let revealed = previous.tokens().iter().zip(feedback.marks());

    for (position, (&token, &mark)) in revealed.clone().enumerate() {
        if mark == Mark::Exact && guess.tokens().get(position) != Some(&token) {
            return Err(StrictViolation::MissingExact { token, position });
        }
    }

    let mut checked: Vec<char> = Vec::new();
    for (&token, &mark) in revealed {
        if mark != Mark::Present || checked.contains(&token) {
            continue;
        }
        if !guess.has_token(token) {
            return Err(StrictViolation::MissingPresent { token });
        }
        checked.push(token);
    }

    Ok(())
}
