//! Equation-mode answer pool
//!
//! Generates random `a op b = c` equations over non-negative integers, written
//! without spaces or leading zeros, with a fixed total token length.

use super::{AnswerPool, PoolError};
use crate::core::{Mode, Word};
use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};
use rustc_hash::FxHashSet;
use std::ops::RangeInclusive;

/// Shortest equation the generator can produce (`1+2=3`)
pub const MIN_EQUATION_LENGTH: usize = 5;

/// Answer lengths drawn for a new session
pub const DRAW_LENGTHS: RangeInclusive<usize> = 5..=8;

const OPERATORS: [char; 4] = ['+', '-', '*', '/'];

/// Random equation source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EquationGenerator {
    max_attempts: usize,
    pool_size: usize,
    pool_attempts: usize,
}

impl Default for EquationGenerator {
    fn default() -> Self {
        Self {
            max_attempts: 1000,
            pool_size: 100,
            pool_attempts: 500,
        }
    }
}

impl EquationGenerator {
    /// Create a generator
    ///
    /// # Parameters
    /// - `max_attempts`: Tries per equation before giving up
    /// - `pool_size`: Target number of distinct candidates per session
    /// - `pool_attempts`: Generation calls spent filling the candidate pool
    #[must_use]
    pub const fn new(max_attempts: usize, pool_size: usize, pool_attempts: usize) -> Self {
        Self {
            max_attempts,
            pool_size,
            pool_attempts,
        }
    }

    /// Generate one equation of exactly `length` tokens
    ///
    /// # Errors
    /// Returns `PoolError::UnsupportedLength` below [`MIN_EQUATION_LENGTH`] and
    /// `PoolError::GenerationFailed` when no equation was found in
    /// `max_attempts` tries.
    pub fn generate<R: Rng + ?Sized>(&self, length: usize, rng: &mut R) -> Result<Word, PoolError> {
        if length < MIN_EQUATION_LENGTH {
            return Err(PoolError::UnsupportedLength(length));
        }

        for _ in 0..self.max_attempts {
            if let Some(text) = try_equation(length, rng)
                && let Ok(word) = Word::new(&text, Mode::Equation)
            {
                return Ok(word);
            }
        }

        Err(PoolError::GenerationFailed {
            length,
            attempts: self.max_attempts,
        })
    }

    /// Draw an answer of random length plus a shuffled pool of equations of
    /// the same length
    ///
    /// # Errors
    /// Returns `PoolError::GenerationFailed` if the answer itself could not be
    /// generated. Failures while filling the pool only make it smaller.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<AnswerPool, PoolError> {
        let length = rng.random_range(DRAW_LENGTHS);
        let answer = self.generate(length, rng)?;

        let mut seen = FxHashSet::default();
        seen.insert(answer.text().to_string());
        let mut candidates = vec![answer.clone()];

        for _ in 0..self.pool_attempts {
            if candidates.len() >= self.pool_size {
                break;
            }
            if let Ok(word) = self.generate(length, rng)
                && seen.insert(word.text().to_string())
            {
                candidates.push(word);
            }
        }

        candidates.shuffle(rng);
        Ok(AnswerPool::new(answer, candidates))
    }
}

/// One random attempt at an equation of `length` tokens
///
/// Splits the digit budget between the two operands and the result, then
/// checks the computed result fits its share.
fn try_equation<R: Rng + ?Sized>(length: usize, rng: &mut R) -> Option<String> {
    // Two operands, one result, plus the operator and '='
    let digits = length - 2;
    let left_len = rng.random_range(1..=digits - 2);
    let right_len = rng.random_range(1..=digits - left_len - 1);
    let result_len = digits - left_len - right_len;
    let op = *OPERATORS.choose(rng)?;

    let (left, right, result) = if op == '/' {
        let divisor = random_number(right_len, rng)?;
        let quotient = random_number(result_len, rng)?;
        if divisor == 0 {
            return None;
        }
        (divisor.checked_mul(quotient)?, divisor, quotient)
    } else {
        let left = random_number(left_len, rng)?;
        let right = random_number(right_len, rng)?;
        let result = match op {
            '+' => left.checked_add(right)?,
            '-' => left.checked_sub(right)?,
            _ => left.checked_mul(right)?,
        };
        (left, right, result)
    };

    let text = format!("{left}{op}{right}={result}");
    (text.chars().count() == length).then_some(text)
}

/// Uniform number with exactly `digits` decimal digits and no leading zero
fn random_number<R: Rng + ?Sized>(digits: usize, rng: &mut R) -> Option<u64> {
    if digits == 1 {
        return Some(rng.random_range(0..=9));
    }
    let low = 10u64.checked_pow(u32::try_from(digits - 1).ok()?)?;
    let high = low.checked_mul(10)?;
    Some(rng.random_range(low..high))
}
