//! Benchmark command
//!
//! Plays solver-only games over freshly drawn pools and aggregates how many
//! turns the solver needs.

use crate::core::{Feedback, Mode};
use crate::game::SessionSettings;
use crate::pools::{AnswerPool, PoolError, PoolSource};
use crate::solver::{CandidateSet, Solver};
use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

/// Result of a benchmark run
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkResult {
    pub mode: Mode,
    pub total_games: usize,
    pub solved: usize,
    pub failed: usize,
    /// Games where the solver had no candidate left
    pub exhausted: usize,
    /// Guesses over solved games
    pub total_guesses: usize,
    pub average_guesses: f64,
    pub min_guesses: usize,
    pub max_guesses: usize,
    /// Solved games by number of guesses
    pub distribution: BTreeMap<usize, usize>,
    pub duration: Duration,
    pub games_per_second: f64,
}

impl BenchmarkResult {
    /// Share of solved games in percent
    #[must_use]
    pub fn win_rate(&self) -> f64 {
        crate::output::formatters::percent(self.solved, self.total_games)
    }
}

enum GameResult {
    Solved(usize),
    Failed,
    Exhausted,
}

/// Run `games` solver-only games
///
/// Each game draws a new answer pool from `pools`; the solver sees only the
/// feedback. With a `seed`, the run is reproducible.
///
/// # Errors
///
/// Returns `PoolError` if a pool cannot be drawn.
pub fn run_benchmark(
    pools: &PoolSource,
    mode: Mode,
    settings: &SessionSettings,
    games: usize,
    seed: Option<u64>,
    show_progress: bool,
) -> Result<BenchmarkResult, PoolError> {
    let mut rng = seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);

    let pb = if show_progress {
        ProgressBar::new(games as u64)
    } else {
        ProgressBar::hidden()
    };
    pb.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) | {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▓▒░"),
    );

    let start = Instant::now();
    let mut solved = 0;
    let mut failed = 0;
    let mut exhausted = 0;
    let mut total_guesses = 0;
    let mut min_guesses = usize::MAX;
    let mut max_guesses = 0;
    let mut distribution: BTreeMap<usize, usize> = BTreeMap::new();

    for _ in 0..games {
        let pool = pools.draw(mode, &mut rng)?;
        let solver_seed = rng.random();

        match play_one(pool, settings, solver_seed) {
            GameResult::Solved(guesses) => {
                solved += 1;
                total_guesses += guesses;
                min_guesses = min_guesses.min(guesses);
                max_guesses = max_guesses.max(guesses);
                *distribution.entry(guesses).or_insert(0) += 1;
            }
            GameResult::Failed => failed += 1,
            GameResult::Exhausted => exhausted += 1,
        }

        pb.set_message(format!("{solved} solved"));
        pb.inc(1);
    }

    pb.finish_and_clear();
    let duration = start.elapsed();

    Ok(BenchmarkResult {
        mode,
        total_games: games,
        solved,
        failed,
        exhausted,
        total_guesses,
        average_guesses: if solved == 0 {
            0.0
        } else {
            total_guesses as f64 / solved as f64
        },
        min_guesses: if solved == 0 { 0 } else { min_guesses },
        max_guesses,
        distribution,
        duration,
        games_per_second: games as f64 / duration.as_secs_f64().max(f64::EPSILON),
    })
}

fn play_one(pool: AnswerPool, settings: &SessionSettings, seed: u64) -> GameResult {
    let (answer, candidates) = pool.into_parts();
    let candidates = CandidateSet::new(candidates, answer.len());
    let mut solver = Solver::new(candidates, settings.strategy, StdRng::seed_from_u64(seed))
        .with_opening_random_min(settings.opening_random_min);

    for turn in 0..settings.turn_limit {
        let Some(guess) = solver.choose_guess(turn) else {
            return GameResult::Exhausted;
        };
        let feedback = Feedback::calculate(&guess, &answer);
        if feedback.is_solved() {
            return GameResult::Solved(turn + 1);
        }
        solver.update(&guess, &feedback);
    }

    GameResult::Failed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pools::{EquationGenerator, WordPool};

    fn pools() -> PoolSource {
        PoolSource::new(WordPool::embedded(), EquationGenerator::default())
    }

    #[test]
    fn benchmark_runs() {
        let result =
            run_benchmark(&pools(), Mode::Word, &SessionSettings::default(), 10, Some(1), false)
                .unwrap();

        assert_eq!(result.total_games, 10);
        assert_eq!(result.solved + result.failed + result.exhausted, 10);
        assert_eq!(result.exhausted, 0);
        assert!(result.max_guesses <= 6);
    }

    #[test]
    fn benchmark_distribution_sums_correctly() {
        let result =
            run_benchmark(&pools(), Mode::Word, &SessionSettings::default(), 10, Some(2), false)
                .unwrap();

        let distribution_sum: usize = result.distribution.values().sum();
        assert_eq!(distribution_sum, result.solved);
        for &guess_count in result.distribution.keys() {
            assert!((1..=6).contains(&guess_count));
        }
    }

    #[test]
    fn benchmark_is_reproducible() {
        let settings = SessionSettings::default();
        let a = run_benchmark(&pools(), Mode::Equation, &settings, 3, Some(5), false).unwrap();
        let b = run_benchmark(&pools(), Mode::Equation, &settings, 3, Some(5), false).unwrap();
        assert_eq!(a.distribution, b.distribution);
        assert_eq!(a.failed, b.failed);
    }

    #[test]
    fn benchmark_zero_games() {
        let result =
            run_benchmark(&pools(), Mode::Word, &SessionSettings::default(), 0, Some(1), false)
                .unwrap();

        assert_eq!(result.total_games, 0);
        assert_eq!(result.total_guesses, 0);
        assert!(result.win_rate().abs() < f64::EPSILON);
    }

    #[test]
    fn benchmark_metrics_consistency() {
        let result =
            run_benchmark(&pools(), Mode::Word, &SessionSettings::default(), 10, Some(3), false)
                .unwrap();

        if result.solved > 0 {
            assert!(result.average_guesses >= result.min_guesses as f64);
            assert!(result.average_guesses <= result.max_guesses as f64);
        }
    }
}
