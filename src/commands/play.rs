//! Interactive terminal game
//!
//! Line-based: each input line is a guess or one of the commands `:hint`,
//! `:ai`, `:new` and `:quit`. The `:` prefix is outside both alphabets, so
//! every pool word stays guessable.

use super::CommandError;
use crate::core::Mode;
use crate::error::ArenaError;
use crate::game::{GameService, SessionInfo, Status, TurnOutcome};
use crate::history::GameLog;
use crate::output::formatters::tile_row;
use colored::Colorize;
use std::io::{BufRead, Write};

/// Who is playing and what
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayOptions {
    pub user: String,
    pub mode: Mode,
    pub strict: bool,
}

enum Command<'a> {
    Quit,
    New,
    Hint,
    Automated,
    Guess(&'a str),
}

impl<'a> Command<'a> {
    fn parse(line: &'a str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        let Some(name) = line.strip_prefix(':') else {
            return Some(Self::Guess(line));
        };
        Some(match name.trim().to_lowercase().as_str() {
            "quit" | "q" | "exit" => Self::Quit,
            "new" | "n" => Self::New,
            "hint" | "h" | "?" => Self::Hint,
            "ai" | "auto" => Self::Automated,
            _ => Self::Guess(line),
        })
    }
}

/// Run the interactive game until `:quit` or end of input
///
/// Rejected input is reported and the game continues; only terminal I/O
/// failures and internal service errors end the loop. Returns the number of
/// games started.
///
/// # Errors
///
/// Returns `CommandError` on I/O failure or a non-recoverable service error.
pub fn run_play<L, I, W>(
    service: &GameService<L>,
    options: &PlayOptions,
    input: I,
    output: &mut W,
) -> Result<usize, CommandError>
where
    L: GameLog,
    I: BufRead,
    W: Write,
{
    writeln!(output, "\n╔══════════════════════════════════════════════════════════════╗")?;
    writeln!(output, "║                    Wordle Arena - Play                       ║")?;
    writeln!(output, "╚══════════════════════════════════════════════════════════════╝\n")?;
    writeln!(output, "Type a guess, or one of: :hint, :ai, :new, :quit\n")?;

    let mut info = start(service, options, output)?;
    let mut games = 1;
    let mut lines = input.lines();

    loop {
        write!(output, "> ")?;
        output.flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let Some(command) = Command::parse(&line) else {
            continue;
        };

        let result = match command {
            Command::Quit => break,
            Command::New => {
                service.end_session(info.id)?;
                info = start(service, options, output)?;
                games += 1;
                continue;
            }
            Command::Hint => {
                let hint = service.request_hint(info.id)?;
                writeln!(output, "💡 {}", hint.bright_cyan())?;
                continue;
            }
            Command::Automated => service.request_automated_guess(info.id),
            Command::Guess(text) => service.submit_guess(info.id, text),
        };

        match result {
            Ok(outcome) => show_outcome(&outcome, &info, output)?,
            Err(err) if err.is_client_error() || matches!(err, ArenaError::SolverExhausted) => {
                writeln!(output, "❌ {}", err.to_string().red())?;
            }
            Err(err) => return Err(err.into()),
        }
    }

    service.end_session(info.id)?;
    writeln!(output, "\n👋 Thanks for playing!\n")?;
    Ok(games)
}

fn start<L: GameLog, W: Write>(
    service: &GameService<L>,
    options: &PlayOptions,
    output: &mut W,
) -> Result<SessionInfo, CommandError> {
    let info = service.start_session(&options.user, options.mode, options.strict)?;
    let strict = if info.strict { ", strict" } else { "" };
    writeln!(
        output,
        "🔄 New {} game: {} tokens, {} turns{strict}",
        info.mode,
        info.answer_length.to_string().bright_yellow().bold(),
        info.turn_limit
    )?;
    Ok(info)
}

fn show_outcome<W: Write>(
    outcome: &TurnOutcome,
    info: &SessionInfo,
    output: &mut W,
) -> Result<(), CommandError> {
    writeln!(
        output,
        "{:>2}/{} {}  {}",
        outcome.turn,
        info.turn_limit,
        tile_row(&outcome.guess, &outcome.feedback),
        format!("{} candidates left", outcome.remaining_candidates).bright_black()
    )?;

    match outcome.status {
        Status::Active => {}
        Status::Won => {
            writeln!(output, "\n{}", "═".repeat(60).bright_cyan())?;
            writeln!(
                output,
                "  🎉 {} in {} {}",
                "Solved".bright_green().bold(),
                outcome.turn,
                if outcome.turn == 1 { "guess" } else { "guesses" }
            )?;
            writeln!(output, "{}", "═".repeat(60).bright_cyan())?;
            writeln!(output, "Type ':new' for another game or ':quit' to leave.")?;
        }
        Status::Lost => {
            let answer = outcome.revealed_answer.as_deref().unwrap_or("?");
            writeln!(
                output,
                "\n💀 Out of turns. The answer was {}",
                answer.to_uppercase().bright_yellow().bold()
            )?;
            writeln!(output, "Type ':new' for another game or ':quit' to leave.")?;
        }
    }
    if let Some(err) = &outcome.record_error {
        writeln!(output, "⚠ {}", format!("game not recorded: {err}").yellow())?;
    }
    Ok(())
}
