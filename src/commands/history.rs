//! Game history listing

use super::CommandError;
use crate::game::GameService;
use crate::history::{GameLog, GameRecord};
use crate::output::formatters::tile_row;
use colored::Colorize;
use std::io::Write;

/// Print the recorded games of `user`, newest first
///
/// Returns how many games were listed.
///
/// # Errors
///
/// Returns `CommandError` if the log cannot be read or output fails.
pub fn run_history<L: GameLog, W: Write>(
    service: &GameService<L>,
    user: &str,
    output: &mut W,
) -> Result<usize, CommandError> {
    let games = service.games_for(user)?;

    if games.is_empty() {
        writeln!(output, "No recorded games for {user}.")?;
        return Ok(0);
    }

    let wins = games.iter().filter(|g| g.is_win()).count();
    writeln!(
        output,
        "{} {} games, {} won",
        user.bright_cyan().bold(),
        games.len(),
        wins
    )?;

    for (i, game) in games.iter().enumerate() {
        write_record(i + 1, game, output)?;
    }

    Ok(games.len())
}

fn write_record<W: Write>(index: usize, game: &GameRecord, output: &mut W) -> std::io::Result<()> {
    let result = if game.is_win() {
        "won".green().bold()
    } else {
        "lost".red().bold()
    };
    writeln!(
        output,
        "\n{index:>3}. {} {} in {} turns, answer {}",
        game.mode,
        result,
        game.turns,
        game.answer.to_uppercase().bright_yellow()
    )?;
    for turn in &game.history {
        writeln!(output, "     {}", tile_row(&turn.guess, &turn.feedback))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Mode, Word};
    use crate::game::SessionSettings;
    use crate::history::MemoryGameLog;
    use crate::pools::{AnswerPool, EquationGenerator, PoolSource, WordPool};

    #[test]
    fn lists_games_newest_first() {
        colored::control::set_override(false);
        let pools = PoolSource::new(WordPool::embedded(), EquationGenerator::default());
        let service =
            GameService::new(pools, SessionSettings::default(), MemoryGameLog::new(), Some(3));

        for answer in ["crane", "slate"] {
            let pool = AnswerPool::new(Word::new(answer, Mode::Word).unwrap(), Vec::new());
            let info = service.start_session_with_pool("an", Mode::Word, false, pool).unwrap();
            service.submit_guess(info.id, answer).unwrap();
        }

        let mut output = Vec::new();
        assert_eq!(run_history(&service, "an", &mut output).unwrap(), 2);
        let text = String::from_utf8(output).unwrap();
        let slate = text.find("SLATE").unwrap();
        let crane = text.find("CRANE").unwrap();
        assert!(slate < crane);
        assert!(text.contains("2 games, 2 won"));

        let mut empty = Vec::new();
        assert_eq!(run_history(&service, "nobody", &mut empty).unwrap(), 0);
    }
}
