//! Word representation
//!
//! A Word is a validated sequence of tokens for one [`Mode`]. Answers, player
//! guesses and solver candidates are all Words.

use super::Mode;
use rustc_hash::FxHashMap;
use std::fmt;
use thiserror::Error;

/// An immutable token sequence valid for a single mode
///
/// Tokens are Unicode scalar values. Precomposed letters such as `ạ` are one
/// opaque token and are never split into base letter and combining mark.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Word {
    text: String,
    tokens: Vec<char>,
    mode: Mode,
}

/// Error type for invalid words
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WordError {
    #[error("guess is empty")]
    Empty,
    #[error("'{token}' at position {} is not a valid {mode} token", .position + 1)]
    InvalidToken {
        token: char,
        position: usize,
        mode: Mode,
    },
}

impl Word {
    /// Create a new Word from raw text
    ///
    /// The text is normalised for the mode first (whitespace removed, word
    /// mode lowercased), then every token is checked against the alphabet.
    ///
    /// # Errors
    /// Returns `WordError` if:
    /// - Nothing remains after normalisation
    /// - Any token is outside the mode's alphabet
    ///
    /// # Examples
    /// ```
    /// use wordle_arena::core::{Mode, Word};
    ///
    /// let word = Word::new("Hạnh Phúc", Mode::Word).unwrap();
    /// assert_eq!(word.text(), "hạnhphúc");
    /// assert_eq!(word.len(), 8);
    ///
    /// assert!(Word::new("sh0rt", Mode::Word).is_err());
    /// assert!(Word::new("1+2=3", Mode::Equation).is_ok());
    /// ```
    pub fn new(text: impl AsRef<str>, mode: Mode) -> Result<Self, WordError> {
        let text = mode.normalize(text.as_ref());

        if text.is_empty() {
            return Err(WordError::Empty);
        }

        let tokens: Vec<char> = text.chars().collect();
        if let Some((position, &token)) = tokens
            .iter()
            .enumerate()
            .find(|&(_, &token)| !mode.accepts(token))
        {
            return Err(WordError::InvalidToken {
                token,
                position,
                mode,
            });
        }

        Ok(Self { text, tokens, mode })
    }

    /// Get the word as a string slice
    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get the word's tokens
    #[inline]
    #[must_use]
    pub fn tokens(&self) -> &[char] {
        &self.tokens
    }

    /// Number of tokens (not bytes)
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Always false for a constructed Word; provided for API symmetry
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The mode this word was validated for
    #[inline]
    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// Get the token at a specific position
    ///
    /// # Panics
    /// Panics if position >= `len()`
    #[inline]
    #[must_use]
    pub fn token_at(&self, position: usize) -> char {
        self.tokens[position]
    }

    /// Check if the word contains a specific token
    #[inline]
    #[must_use]
    pub fn has_token(&self, token: char) -> bool {
        self.tokens.contains(&token)
    }

    /// Distinct tokens in order of first appearance
    #[must_use]
    pub fn distinct_tokens(&self) -> Vec<char> {
        let mut seen = Vec::with_capacity(self.tokens.len());
        for &token in &self.tokens {
            if !seen.contains(&token) {
                seen.push(token);
            }
        }
        seen
    }

    /// Get the count of each token in the word
    ///
    /// Used for feedback calculation with duplicate tokens.
    #[inline]
    pub(crate) fn token_counts(&self) -> FxHashMap<char, usize> {
        let mut counts = FxHashMap::default();
        for &token in &self.tokens {
            *counts.entry(token).or_insert(0) += 1;
        }
        counts
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}
