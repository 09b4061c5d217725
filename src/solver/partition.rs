//! Feedback partition metrics
//!
//! A guess splits the remaining candidates into groups that would produce the
//! same feedback. Every ranking the solver uses is computed from those groups:
//! the number of distinct outcomes, their Shannon entropy, and the largest group.

use crate::core::{Feedback, Word};
use rustc_hash::FxHashMap;

/// Comprehensive metrics for evaluating a guess
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuessMetrics {
    /// Number of distinct feedback outcomes over the candidates
    pub outcomes: usize,
    /// Shannon entropy (expected information gain in bits)
    pub entropy: f64,
    /// Expected number of remaining candidates after this guess
    pub expected_remaining: f64,
    /// Maximum partition size (worst-case remaining candidates)
    pub max_partition: usize,
}

/// Group candidates by the feedback they produce with the guess
pub fn group_by_feedback(guess: &Word, candidates: &[Word]) -> FxHashMap<Feedback, usize> {
    let mut counts = FxHashMap::default();

    for candidate in candidates.iter().filter(|c| c.len() == guess.len()) {
        let feedback = Feedback::calculate(guess, candidate);
        *counts.entry(feedback).or_insert(0) += 1;
    }

    counts
}

/// Count the distinct feedback outcomes a guess would produce
///
/// # Examples
/// ```
/// use wordle_arena::core::{Mode, Word};
/// use wordle_arena::solver::partition::count_outcomes;
///
/// let guess = Word::new("abcde", Mode::Word).unwrap();
/// let candidates: Vec<Word> = ["zzzzz", "abcde", "abcdf", "abcdg"]
///     .iter()
///     .map(|t| Word::new(t, Mode::Word).unwrap())
///     .collect();
///
/// // ----- for zzzzz, GGGGG for abcde, GGGG- for both others
/// assert_eq!(count_outcomes(&guess, &candidates), 3);
/// ```
#[must_use]
pub fn count_outcomes(guess: &Word, candidates: &[Word]) -> usize {
    group_by_feedback(guess, candidates).len()
}

/// Calculate Shannon entropy for a guess against candidates
///
/// # Formula
/// H(X) = -Σ p(x) * log₂(p(x))
///
/// where p(x) is the probability of observing feedback x.
#[must_use]
pub fn calculate_entropy(guess: &Word, candidates: &[Word]) -> f64 {
    if candidates.is_empty() {
        return 0.0;
    }
    shannon_entropy(&group_by_feedback(guess, candidates))
}

/// Calculate the maximum remaining candidates for a guess
///
/// Returns the worst-case number of remaining candidates after this guess.
#[must_use]
pub fn calculate_max_remaining(guess: &Word, candidates: &[Word]) -> usize {
    group_by_feedback(guess, candidates)
        .values()
        .max()
        .copied()
        .unwrap_or(0)
}

/// Calculate Shannon entropy from a feedback distribution
///
/// # Properties
/// - Returns 0.0 for certain outcome (one group with p=1)
/// - Maximized for uniform distribution
/// - Always in range [0, log₂(n)] for n groups
#[must_use]
pub fn shannon_entropy<S>(groups: &std::collections::HashMap<Feedback, usize, S>) -> f64
where
    S: std::hash::BuildHasher,
{
    let total = groups.values().sum::<usize>() as f64;

    if total == 0.0 {
        return 0.0;
    }

    groups
        .values()
        .filter(|&&count| count > 0)
        .map(|&count| {
            let p = count as f64 / total;
            -p * p.log2()
        })
        .sum()
}

/// Calculate comprehensive metrics for a guess
///
/// Returns outcome count, entropy, expected remaining candidates, and max
/// partition size in one pass over the candidates.
#[must_use]
pub fn calculate_metrics(guess: &Word, candidates: &[Word]) -> GuessMetrics {
    let groups = group_by_feedback(guess, candidates);
    let total = groups.values().sum::<usize>();

    if total == 0 {
        return GuessMetrics {
            outcomes: 0,
            entropy: 0.0,
            expected_remaining: 0.0,
            max_partition: 0,
        };
    }

    // E[remaining] = Σ p(x) * |group x| = Σ |group|² / total
    let expected_remaining = groups
        .values()
        .map(|&size| (size * size) as f64)
        .sum::<f64>()
        / total as f64;

    GuessMetrics {
        outcomes: groups.len(),
        entropy: shannon_entropy(&groups),
        expected_remaining,
        max_partition: groups.values().max().copied().unwrap_or(0),
    }
}
