//! Feedback calculation and representation
//!
//! Feedback is one mark per guess position:
//! - Absent (token not in the answer, or all its occurrences already claimed)
//! - Present (token in the answer at another position)
//! - Exact (token in the correct position)
//!
//! Unlike a fixed five-letter board, words here have data-driven lengths and
//! equations are 5-8 tokens long, so marks are kept as a vector.

use super::{Mode, Word};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Mark for a single guess position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mark {
    Absent,
    Present,
    Exact,
}

impl Mark {
    /// Single-character form used in text input and logs
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Exact => 'G',
            Self::Present => 'Y',
            Self::Absent => '-',
        }
    }

    /// Square emoji for the mark
    #[must_use]
    pub const fn emoji(self) -> char {
        match self {
            Self::Exact => '🟩',
            Self::Present => '🟨',
            Self::Absent => '⬜',
        }
    }

    fn from_symbol(ch: char) -> Option<Self> {
        match ch {
            'G' | 'g' | '🟩' => Some(Self::Exact),
            'Y' | 'y' | '🟨' => Some(Self::Present),
            '-' | '_' | '⬜' => Some(Self::Absent),
            _ => None,
        }
    }
}

/// Feedback sequence for one guess
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Feedback(Vec<Mark>);

/// Reasons a guess cannot be evaluated against an answer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvaluationError {
    #[error("guess must be {expected} tokens long, got {found}")]
    LengthMismatch { expected: usize, found: usize },
    #[error("cannot compare a {found} guess with a {expected} answer")]
    ModeMismatch { expected: Mode, found: Mode },
}

/// Evaluate `guess` against `answer`, rejecting incomparable inputs
///
/// # Errors
/// Returns `EvaluationError` if the modes differ or the lengths differ. A
/// rejected guess is never scored.
///
/// # Examples
/// ```
/// use wordle_arena::core::{Mode, Word, evaluate};
///
/// let answer = Word::new("apple", Mode::Word).unwrap();
/// let guess = Word::new("paper", Mode::Word).unwrap();
/// assert_eq!(evaluate(&answer, &guess).unwrap().to_string(), "YYGY-");
///
/// let short = Word::new("pap", Mode::Word).unwrap();
/// assert!(evaluate(&answer, &short).is_err());
/// ```
pub fn evaluate(answer: &Word, guess: &Word) -> Result<Feedback, EvaluationError> {
    if answer.mode() != guess.mode() {
        return Err(EvaluationError::ModeMismatch {
            expected: answer.mode(),
            found: guess.mode(),
        });
    }
    if answer.len() != guess.len() {
        return Err(EvaluationError::LengthMismatch {
            expected: answer.len(),
            found: guess.len(),
        });
    }
    Ok(Feedback::calculate(guess, answer))
}

impl Feedback {
    /// Build feedback from explicit marks
    #[must_use]
    pub const fn from_marks(marks: Vec<Mark>) -> Self {
        Self(marks)
    }

    /// All-exact feedback of the given length
    #[must_use]
    pub fn solved(len: usize) -> Self {
        Self(vec![Mark::Exact; len])
    }

    /// Calculate the feedback when `guess` is played against `answer`
    ///
    /// Callers must pass words of equal length; [`evaluate`] checks that.
    ///
    /// # Algorithm
    /// 1. First pass: mark exact matches and remove them from the answer's
    ///    remaining token counts
    /// 2. Second pass, left to right: mark present while the token still has
    ///    remaining count, otherwise absent
    ///
    /// The left-to-right second pass means that when a guess repeats a token
    /// more often than the answer holds it, the lowest positions get `Present`.
    ///
    /// # Examples
    /// ```
    /// use wordle_arena::core::{Feedback, Mark, Mode, Word};
    ///
    /// let guess = Word::new("crane", Mode::Word).unwrap();
    /// let answer = Word::new("slate", Mode::Word).unwrap();
    /// let feedback = Feedback::calculate(&guess, &answer);
    ///
    /// // C(absent) R(absent) A(exact) N(absent) E(exact)
    /// assert_eq!(feedback.marks()[2], Mark::Exact);
    /// assert_eq!(feedback.to_string(), "--G-G");
    /// ```
    #[must_use]
    pub fn calculate(guess: &Word, answer: &Word) -> Self {
        debug_assert_eq!(guess.len(), answer.len(), "feedback needs equal lengths");

        let mut result = vec![Mark::Absent; guess.len()];
        let mut answer_available = answer.token_counts();

        // First pass: exact position matches
        for (i, (g, a)) in guess.tokens().iter().zip(answer.tokens()).enumerate() {
            if g == a {
                result[i] = Mark::Exact;
                if let Some(count) = answer_available.get_mut(g) {
                    *count = count.saturating_sub(1);
                }
            }
        }

        // Second pass: present elsewhere, claimed left to right
        for (i, token) in guess.tokens().iter().enumerate() {
            if result[i] == Mark::Exact {
                continue;
            }
            if let Some(count) = answer_available.get_mut(token)
                && *count > 0
            {
                result[i] = Mark::Present;
                *count -= 1;
            }
        }

        Self(result)
    }

    /// The marks in guess order
    #[inline]
    #[must_use]
    pub fn marks(&self) -> &[Mark] {
        &self.0
    }

    /// Number of positions
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check if every position is exact
    #[must_use]
    pub fn is_solved(&self) -> bool {
        !self.0.is_empty() && self.0.iter().all(|&m| m == Mark::Exact)
    }

    /// Count the number of exact marks
    #[must_use]
    pub fn count_exact(&self) -> usize {
        self.0.iter().filter(|&&m| m == Mark::Exact).count()
    }

    /// Count the number of present marks
    #[must_use]
    pub fn count_present(&self) -> usize {
        self.0.iter().filter(|&&m| m == Mark::Present).count()
    }

    /// Parse feedback from a string like "GY-GY" or "🟩🟨⬜🟩🟨"
    ///
    /// Accepts:
    /// - 'G'/'g'/🟩 for exact
    /// - 'Y'/'y'/🟨 for present
    /// - '-'/'_'/⬜ for absent
    ///
    /// # Examples
    /// ```
    /// use wordle_arena::core::Feedback;
    ///
    /// let f1 = Feedback::parse("GY-GY").unwrap();
    /// let f2 = Feedback::parse("🟩🟨⬜🟩🟨").unwrap();
    /// assert_eq!(f1, f2);
    /// assert!(Feedback::parse("GXG").is_none());
    /// ```
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        if s.is_empty() {
            return None;
        }
        s.chars()
            .map(Mark::from_symbol)
            .collect::<Option<Vec<_>>>()
            .map(Self)
    }

    /// Convert feedback to an emoji string
    #[must_use]
    pub fn to_emoji(&self) -> String {
        self.0.iter().map(|m| m.emoji()).collect()
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for mark in &self.0 {
            write!(f, "{}", mark.symbol())?;
        }
        Ok(())
    }
}

impl std::str::FromStr for Feedback {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid feedback string: {s}"))
    }
}
