//! Formatting utilities for terminal output

use crate::core::{Feedback, Mark};
use colored::{ColoredString, Colorize};

/// Color one token as a game tile
#[must_use]
pub fn tile(token: char, mark: Mark) -> ColoredString {
    let face = format!(" {} ", token.to_uppercase());
    match mark {
        Mark::Exact => face.black().on_green().bold(),
        Mark::Present => face.black().on_yellow().bold(),
        Mark::Absent => face.white().on_bright_black(),
    }
}

/// Render a guess as a row of colored tiles
///
/// Tokens beyond the feedback length are shown as absent.
#[must_use]
pub fn tile_row(guess: &str, feedback: &Feedback) -> String {
    guess
        .chars()
        .enumerate()
        .map(|(i, token)| {
            let mark = feedback.marks().get(i).copied().unwrap_or(Mark::Absent);
            tile(token, mark).to_string()
        })
        .collect()
}

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 {
        return "░".repeat(width);
    }
    // Cast is safe: values are clamped to [0, width]
    let filled = ((value / max) * width as f64).max(0.0) as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Share of `part` in `total` as a percentage
#[must_use]
pub fn percent(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}
