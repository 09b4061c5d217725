//! Compiles `data/words.txt` into the default vocabulary
//!
//! Words are lowercased with whitespace removed and deduplicated in file
//! order, so the embedded list already matches `Mode::Word` normalisation.

use std::collections::HashSet;
use std::fmt::Write;
use std::path::PathBuf;
use std::{env, fs};

const SOURCE: &str = "data/words.txt";

fn main() {
    println!("cargo:rerun-if-changed={SOURCE}");

    let content =
        fs::read_to_string(SOURCE).unwrap_or_else(|e| panic!("cannot read {SOURCE}: {e}"));

    let mut seen = HashSet::new();
    let words: Vec<String> = content
        .lines()
        .filter(|line| !line.trim_start().starts_with('#'))
        .map(|line| {
            line.chars()
                .filter(|c| !c.is_whitespace())
                .flat_map(char::to_lowercase)
                .collect::<String>()
        })
        .filter(|word| !word.is_empty() && seen.insert(word.clone()))
        .collect();

    let out = PathBuf::from(env::var("OUT_DIR").expect("cargo sets OUT_DIR")).join("words.rs");
    fs::write(&out, render(&words))
        .unwrap_or_else(|e| panic!("cannot write {}: {e}", out.display()));
}

fn render(words: &[String]) -> String {
    let mut src = String::from("// Generated from data/words.txt\n\n");
    src.push_str("/// Default word-mode vocabulary used when no word list is configured\n");
    src.push_str("pub const DEFAULT_WORDS: &[&str] = &[\n");
    for word in words {
        let _ = writeln!(src, "    {word:?},");
    }
    src.push_str("];\n\n/// Number of words in `DEFAULT_WORDS`\n");
    let _ = writeln!(src, "pub const DEFAULT_WORDS_COUNT: usize = {};", words.len());
    src
}
