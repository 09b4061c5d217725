//! Puzzle modes and their token alphabets
//!
//! Both modes share the same evaluation algorithm. They differ only in which
//! tokens are legal, how raw input is normalised, and where answers come from.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Operator and equals symbols accepted in equation mode
pub const EQUATION_SYMBOLS: [char; 5] = ['+', '-', '*', '/', '='];

/// Kind of puzzle a session plays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Natural-language words; every letter (diacritics included) is one token
    #[serde(alias = "vi")]
    Word,
    /// Fully reduced arithmetic equations such as `12+34=46`
    #[serde(alias = "math")]
    Equation,
}

/// Error for an unrecognised mode name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown mode '{0}' (expected 'word' or 'equation')")]
pub struct ModeParseError(pub String);

impl Mode {
    /// Canonical lowercase name, as persisted in game records
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Word => "word",
            Self::Equation => "equation",
        }
    }

    /// Check whether a single token belongs to this mode's alphabet
    #[must_use]
    pub fn accepts(self, token: char) -> bool {
        match self {
            Self::Word => token.is_alphabetic(),
            Self::Equation => token.is_ascii_digit() || EQUATION_SYMBOLS.contains(&token),
        }
    }

    /// Normalise raw player input into this mode's canonical text
    ///
    /// Whitespace is dropped in both modes. Word mode also lowercases, which
    /// keeps precomposed letters precomposed (`Ạ` becomes `ạ`, never `a` plus a
    /// combining mark).
    #[must_use]
    pub fn normalize(self, raw: &str) -> String {
        let tokens = raw.chars().filter(|c| !c.is_whitespace());
        match self {
            Self::Word => tokens.flat_map(char::to_lowercase).collect(),
            Self::Equation => tokens.collect(),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Mode {
    type Err = ModeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "word" | "words" | "vi" => Ok(Self::Word),
            "equation" | "math" | "eq" => Ok(Self::Equation),
            other => Err(ModeParseError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_mode_accepts_diacritics() {
        for token in ['a', 'z', 'ạ', 'ư', 'đ', 'ế'] {
            assert!(Mode::Word.accepts(token), "{token} should be a word token");
        }
        for token in ['1', '+', ' ', '-'] {
            assert!(!Mode::Word.accepts(token), "{token} should be rejected");
        }
    }

    #[test]
    fn equation_mode_accepts_digits_and_operators() {
        for token in "0123456789+-*/=".chars() {
            assert!(Mode::Equation.accepts(token));
        }
        assert!(!Mode::Equation.accepts('x'));
        assert!(!Mode::Equation.accepts('('));
    }

    #[test]
    fn normalize_strips_whitespace_and_lowercases_words() {
        assert_eq!(Mode::Word.normalize(" Hạnh Phúc "), "hạnhphúc");
        assert_eq!(Mode::Word.normalize("CRANE"), "crane");
        assert_eq!(Mode::Equation.normalize("12 + 34 = 46"), "12+34=46");
    }

    #[test]
    fn parse_accepts_legacy_names() {
        assert_eq!("vi".parse::<Mode>(), Ok(Mode::Word));
        assert_eq!("math".parse::<Mode>(), Ok(Mode::Equation));
        assert_eq!("Equation".parse::<Mode>(), Ok(Mode::Equation));
        assert!("chess".parse::<Mode>().is_err());
    }

    #[test]
    fn serde_uses_lowercase_names() {
        assert_eq!(serde_json::to_string(&Mode::Word).unwrap(), "\"word\"");
        let parsed: Mode = serde_json::from_str("\"math\"").unwrap();
        assert_eq!(parsed, Mode::Equation);
    }
}
