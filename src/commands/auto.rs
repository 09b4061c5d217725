//! Automated games through the service
//!
//! The solver plays whole sessions end to end, exactly as a client calling
//! the automated-guess endpoint would, and every finished game is recorded.

use super::CommandError;
use super::play::PlayOptions;
use crate::error::ArenaError;
use crate::game::{GameService, Status};
use crate::history::GameLog;
use crate::output::formatters::tile_row;
use colored::Colorize;
use std::io::Write;

/// Totals over a run of automated games
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AutoSummary {
    pub games: usize,
    pub won: usize,
    pub lost: usize,
    /// Games abandoned because the solver ran out of candidates
    pub exhausted: usize,
    /// Turns over won games
    pub winning_turns: usize,
}

impl AutoSummary {
    #[must_use]
    pub fn average_winning_turns(&self) -> f64 {
        if self.won == 0 {
            0.0
        } else {
            self.winning_turns as f64 / self.won as f64
        }
    }
}

/// Let the solver play `games` sessions, printing every turn
///
/// # Errors
///
/// Returns `CommandError` on I/O failure or when the service fails.
pub fn run_auto<L: GameLog, W: Write>(
    service: &GameService<L>,
    options: &PlayOptions,
    games: usize,
    output: &mut W,
) -> Result<AutoSummary, CommandError> {
    let mut summary = AutoSummary::default();

    for game in 1..=games {
        let info = service.start_session(&options.user, options.mode, options.strict)?;
        writeln!(
            output,
            "\n{} {game}/{games} ({} game, {} tokens)",
            "Game".bright_cyan().bold(),
            info.mode,
            info.answer_length
        )?;

        loop {
            let outcome = match service.request_automated_guess(info.id) {
                Ok(outcome) => outcome,
                Err(ArenaError::SolverExhausted) => {
                    writeln!(output, "  {}", "solver ran out of candidates".red())?;
                    summary.exhausted += 1;
                    break;
                }
                Err(err) => return Err(err.into()),
            };

            writeln!(
                output,
                "  Turn {}: {} {}  ({} left)",
                outcome.turn,
                tile_row(&outcome.guess, &outcome.feedback),
                outcome.feedback.to_emoji(),
                outcome.remaining_candidates
            )?;

            match outcome.status {
                Status::Active => {}
                Status::Won => {
                    writeln!(output, "  {}", format!("✅ solved in {}", outcome.turn).green())?;
                    summary.won += 1;
                    summary.winning_turns += outcome.turn;
                    break;
                }
                Status::Lost => {
                    let answer = outcome.revealed_answer.unwrap_or_default();
                    writeln!(output, "  {}", format!("❌ lost, answer was {answer}").red())?;
                    summary.lost += 1;
                    break;
                }
            }
        }

        summary.games += 1;
        service.end_session(info.id)?;
    }

    Ok(summary)
}
