//! Candidate answer set
//!
//! Holds every answer still consistent with the feedback seen so far.

use crate::core::{Feedback, Word};
use rustc_hash::FxHashSet;

/// Still-possible answers for one session, in pool order
///
/// The set only ever shrinks: [`CandidateSet::update`] is the sole mutator
/// and it only removes words.
#[derive(Debug, Clone, Default)]
pub struct CandidateSet {
    words: Vec<Word>,
}

impl CandidateSet {
    /// Build a candidate set from a pool, keeping words of `length` tokens
    ///
    /// Duplicates are dropped; the first occurrence keeps its position.
    pub fn new(pool: impl IntoIterator<Item = Word>, length: usize) -> Self {
        let mut seen = FxHashSet::default();
        let words = pool
            .into_iter()
            .filter(|w| w.len() == length)
            .filter(|w| seen.insert(w.text().to_string()))
            .collect();
        Self { words }
    }

    /// Keep only candidates that would have produced `feedback` for `guess`
    ///
    /// Returns how many candidates were removed.
    pub fn update(&mut self, guess: &Word, feedback: &Feedback) -> usize {
        let before = self.words.len();
        self.words.retain(|candidate| {
            candidate.len() == guess.len() && Feedback::calculate(guess, candidate) == *feedback
        });
        before - self.words.len()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Check whether `word` is still a candidate
    #[must_use]
    pub fn contains(&self, word: &Word) -> bool {
        self.words.iter().any(|w| w == word)
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[Word] {
        &self.words
    }

    pub fn iter(&self) -> impl Iterator<Item = &Word> {
        self.words.iter()
    }
}
