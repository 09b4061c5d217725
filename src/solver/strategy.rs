//! Guess selection strategies
//!
//! Defines the Strategy trait and concrete implementations. Every strategy
//! scores each word of the guess pool against the current candidates and
//! breaks ties by the lowest pool index, so results never depend on how the
//! parallel scoring was scheduled.

use super::partition::{calculate_entropy, calculate_max_remaining, count_outcomes};
use crate::core::Word;
use rayon::prelude::*;
use std::cmp::Ordering;

/// A strategy for selecting the best guess from a pool of candidates
pub trait Strategy {
    /// Select the best guess from the guess pool given the current candidates
    ///
    /// Returns the best guess, or `None` if the guess pool is empty.
    fn select_guess<'a>(&self, guess_pool: &'a [Word], candidates: &[Word]) -> Option<&'a Word>;
}

/// Enum wrapper for all strategy types
///
/// Allows runtime selection of strategy while maintaining static dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyType {
    /// Most distinct feedback outcomes (default)
    Partition(PartitionStrategy),
    /// Pure entropy maximization
    Entropy(EntropyStrategy),
    /// Pure minimax optimization
    Minimax(MinimaxStrategy),
}

impl Strategy for StrategyType {
    fn select_guess<'a>(&self, guess_pool: &'a [Word], candidates: &[Word]) -> Option<&'a Word> {
        match self {
            Self::Partition(s) => s.select_guess(guess_pool, candidates),
            Self::Entropy(s) => s.select_guess(guess_pool, candidates),
            Self::Minimax(s) => s.select_guess(guess_pool, candidates),
        }
    }
}

impl StrategyType {
    /// Create strategy from name string
    ///
    /// Supported names: "partition", "entropy", "minimax".
    /// Defaults to partition if name is unrecognized.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "entropy" | "pure-entropy" => Self::Entropy(EntropyStrategy),
            "minimax" => Self::Minimax(MinimaxStrategy),
            _ => Self::Partition(PartitionStrategy),
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Partition(_) => "partition",
            Self::Entropy(_) => "entropy",
            Self::Minimax(_) => "minimax",
        }
    }
}

impl Default for StrategyType {
    fn default() -> Self {
        Self::Partition(PartitionStrategy)
    }
}

/// Pick the highest-scoring guess; equal scores go to the lowest index
fn select_max_by<'a, T, F, C>(guess_pool: &'a [Word], score: F, compare: C) -> Option<&'a Word>
where
    T: Send,
    F: Fn(&Word) -> T + Sync + Send,
    C: Fn(&T, &T) -> Ordering + Sync + Send,
{
    guess_pool
        .par_iter()
        .enumerate()
        .map(|(index, guess)| (index, score(guess)))
        .max_by(|(i1, s1), (i2, s2)| compare(s1, s2).then_with(|| i2.cmp(i1)))
        .map(|(index, _)| &guess_pool[index])
}

/// Distinct-outcome strategy
///
/// Selects the guess that splits the candidates into the most distinct
/// feedback groups, a greedy proxy for expected information gain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PartitionStrategy;

impl Strategy for PartitionStrategy {
    fn select_guess<'a>(&self, guess_pool: &'a [Word], candidates: &[Word]) -> Option<&'a Word> {
        select_max_by(
            guess_pool,
            |guess| count_outcomes(guess, candidates),
            usize::cmp,
        )
    }
}

/// Pure entropy maximization strategy
///
/// Always selects the guess with the highest Shannon entropy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EntropyStrategy;

impl Strategy for EntropyStrategy {
    fn select_guess<'a>(&self, guess_pool: &'a [Word], candidates: &[Word]) -> Option<&'a Word> {
        select_max_by(
            guess_pool,
            |guess| calculate_entropy(guess, candidates),
            f64::total_cmp,
        )
    }
}

/// Pure minimax strategy
///
/// Always selects the guess that minimizes worst-case remaining candidates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MinimaxStrategy;

impl Strategy for MinimaxStrategy {
    fn select_guess<'a>(&self, guess_pool: &'a [Word], candidates: &[Word]) -> Option<&'a Word> {
        select_max_by(
            guess_pool,
            |guess| calculate_max_remaining(guess, candidates),
            |a: &usize, b: &usize| b.cmp(a),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Mode;

    fn words(texts: &[&str]) -> Vec<Word> {
        texts
            .iter()
            .map(|t| Word::new(t, Mode::Word).unwrap())
            .collect()
    }

    #[test]
    fn partition_prefers_most_outcomes() {
        // zzzzz: 2 outcomes; each abcd? word: 3 outcomes
        let pool = words(&["zzzzz", "abcde", "abcdf", "abcdg"]);
        let best = PartitionStrategy.select_guess(&pool, &pool).unwrap();
        assert_eq!(best.text(), "abcde");
    }

    #[test]
    fn partition_ties_go_to_lowest_index() {
        let pool = words(&["bbbbb", "aaaaa"]);
        for _ in 0..10 {
            let best = PartitionStrategy.select_guess(&pool, &pool).unwrap();
            assert_eq!(best.text(), "bbbbb");
        }
    }

    #[test]
    fn entropy_strategy_selects_highest_entropy() {
        let guesses = words(&["aaaaa", "aeros"]);
        let candidates = words(&["slate", "irate", "crate", "grate"]);
        let best = EntropyStrategy.select_guess(&guesses, &candidates).unwrap();
        assert_eq!(best.text(), "aeros");
    }

    #[test]
    fn minimax_strategy_selects_smallest_worst_case() {
        let guesses = words(&["zzzzz", "crane"]);
        let candidates = words(&["slate", "irate", "crate", "grate"]);
        let best = MinimaxStrategy.select_guess(&guesses, &candidates).unwrap();
        assert_eq!(best.text(), "crane");
    }

    #[test]
    fn minimax_ties_go_to_lowest_index() {
        let guesses = words(&["aaaaa", "bbbbb"]);
        let candidates = words(&["ccccc"]);
        let best = MinimaxStrategy.select_guess(&guesses, &candidates).unwrap();
        assert_eq!(best.text(), "aaaaa");
    }

    #[test]
    fn empty_pool_returns_none() {
        let candidates = words(&["slate"]);
        assert!(PartitionStrategy.select_guess(&[], &candidates).is_none());
        assert!(EntropyStrategy.select_guess(&[], &candidates).is_none());
        assert!(MinimaxStrategy.select_guess(&[], &candidates).is_none());
    }

    #[test]
    fn from_name_defaults_to_partition() {
        assert_eq!(StrategyType::from_name("entropy").name(), "entropy");
        assert_eq!(StrategyType::from_name("minimax").name(), "minimax");
        assert_eq!(StrategyType::from_name("whatever").name(), "partition");
        assert_eq!(StrategyType::default(), StrategyType::from_name("partition"));
    }
}
