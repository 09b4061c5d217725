//! Hint composition
//!
//! Hints escalate in three levels. Word mode reveals the length, then a
//! letter the answer contains, then a letter at a position. Equation mode
//! reveals the result, then the operators, then a token at a position.

use crate::core::{EQUATION_SYMBOLS, Mode, Word};
use rand::Rng;
use rand::seq::IndexedRandom;

/// Highest hint level; further hints repeat this level
pub const MAX_HINT_LEVEL: u8 = 2;

/// Compose the hint for `level` about `answer`
///
/// Levels above [`MAX_HINT_LEVEL`] are treated as the maximum. Random picks
/// come from `rng` so hints are reproducible with a seeded session.
pub fn compose<R: Rng + ?Sized>(answer: &Word, level: u8, rng: &mut R) -> String {
    match (answer.mode(), level.min(MAX_HINT_LEVEL)) {
        (Mode::Word, 0) => format!("The word has {} letters.", answer.len()),
        (Mode::Word, 1) => {
            let tokens = answer.distinct_tokens();
            let letter = tokens.choose(rng).copied().unwrap_or('?');
            format!("The word contains '{}'.", letter.to_uppercase())
        }
        (Mode::Equation, 0) => {
            let result = answer
                .text()
                .split_once('=')
                .map_or(answer.text(), |(_, rhs)| rhs);
            format!("The result is {result}.")
        }
        (Mode::Equation, 1) => {
            let lhs = answer
                .text()
                .split_once('=')
                .map_or(answer.text(), |(lhs, _)| lhs);
            let operators: Vec<String> = EQUATION_SYMBOLS
                .iter()
                .filter(|&&symbol| symbol != '=' && lhs.contains(symbol))
                .map(char::to_string)
                .collect();
            format!("The equation uses '{}'.", operators.join(", "))
        }
        (mode, _) => reveal_position(answer, mode, rng),
    }
}

fn reveal_position<R: Rng + ?Sized>(answer: &Word, mode: Mode, rng: &mut R) -> String {
    let position = rng.random_range(0..answer.len());
    let token = answer.token_at(position);
    match mode {
        Mode::Word => format!("Letter {} is '{}'.", position + 1, token.to_uppercase()),
        Mode::Equation => format!("Position {} is '{token}'.", position + 1),
    }
}
