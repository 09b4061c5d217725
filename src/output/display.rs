//! Result reports for the `benchmark` and `auto` commands

use super::formatters::{create_progress_bar, percent};
use crate::commands::{AutoSummary, BenchmarkResult};
use colored::Colorize;
use std::io::{self, Write};

const RULE_WIDTH: usize = 60;
const BAR_WIDTH: usize = 40;

/// Write a benchmark report: headline numbers, then the turn distribution
///
/// # Errors
/// Returns any error from `out`.
pub fn write_benchmark_result(out: &mut impl Write, result: &BenchmarkResult) -> io::Result<()> {
    let rule = "═".repeat(RULE_WIDTH);
    writeln!(out, "\n{}", rule.cyan())?;
    writeln!(
        out,
        " {} {}",
        "BENCHMARK".bright_cyan().bold(),
        format!("{} games, {} mode", result.total_games, result.mode).bright_black()
    )?;
    writeln!(out, "{}", rule.cyan())?;

    let rows = [
        ("Solved", format!("{} ({:.1}%)", result.solved, result.win_rate())),
        ("Out of turns", result.failed.to_string()),
        ("Exhausted", result.exhausted.to_string()),
        ("Average turns", format!("{:.2}", result.average_guesses)),
        ("Fewest / most", format!("{} / {}", result.min_guesses, result.max_guesses)),
        ("Elapsed", format!("{:.2}s", result.duration.as_secs_f64())),
        ("Games/second", format!("{:.1}", result.games_per_second)),
    ];
    for (label, value) in rows {
        writeln!(out, "   {label:<14} {}", value.bright_yellow())?;
    }

    writeln!(out, "\n   {}", "Turns to solve".bright_cyan().bold())?;
    for (&turns, &count) in &result.distribution {
        let pct = percent(count, result.total_games);
        let bar = create_progress_bar(pct, 100.0, BAR_WIDTH);
        writeln!(out, "   {turns:>2} {} {count:>5} {pct:5.1}%", bar.green())?;
    }
    let unsolved = result.failed + result.exhausted;
    if unsolved > 0 {
        let pct = percent(unsolved, result.total_games);
        let bar = create_progress_bar(pct, 100.0, BAR_WIDTH);
        writeln!(out, "    X {} {unsolved:>5} {pct:5.1}%", bar.red())?;
    }
    Ok(())
}

/// Write the totals of an automated run
///
/// # Errors
/// Returns any error from `out`.
pub fn write_auto_summary(out: &mut impl Write, summary: &AutoSummary) -> io::Result<()> {
    writeln!(out, "\n{}", "─".repeat(RULE_WIDTH).cyan())?;
    writeln!(
        out,
        "{} games: {} won, {} lost, {} exhausted",
        summary.games,
        summary.won.to_string().green().bold(),
        summary.lost.to_string().red(),
        summary.exhausted
    )?;
    if summary.won > 0 {
        writeln!(
            out,
            "Average turns per win: {}",
            format!("{:.2}", summary.average_winning_turns()).bright_yellow()
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Mode;
    use std::collections::BTreeMap;
    use std::time::Duration;

    fn render<F: FnOnce(&mut Vec<u8>) -> io::Result<()>>(f: F) -> String {
        colored::control::set_override(false);
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn benchmark_report_lists_distribution_and_unsolved() {
        let result = BenchmarkResult {
            mode: Mode::Word,
            total_games: 4,
            solved: 3,
            failed: 1,
            exhausted: 0,
            total_guesses: 9,
            average_guesses: 3.0,
            min_guesses: 2,
            max_guesses: 4,
            distribution: BTreeMap::from([(2, 1), (3, 1), (4, 1)]),
            duration: Duration::from_millis(500),
            games_per_second: 8.0,
        };
        let text = render(|out| write_benchmark_result(out, &result));

        assert!(text.contains("4 games, word mode"));
        assert!(text.contains("3 (75.0%)"));
        assert!(text.contains("    X "));
        assert!(text.contains(" 25.0%"));
    }

    #[test]
    fn auto_summary_skips_average_without_wins() {
        let summary = AutoSummary {
            games: 2,
            won: 0,
            lost: 2,
            exhausted: 0,
            winning_turns: 0,
        };
        let text = render(|out| write_auto_summary(out, &summary));
        assert!(text.contains("2 games: 0 won, 2 lost, 0 exhausted"));
        assert!(!text.contains("Average"));
    }
}
