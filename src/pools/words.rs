//! Word-mode answer pool
//!
//! Loads a vocabulary from a file or the embedded list, cleans it, and groups
//! it by token length so a session can draw an answer together with every
//! word of the same length.

use super::{AnswerPool, DEFAULT_WORDS, PoolError};
use crate::core::{Mode, Word};
use rand::Rng;
use rand::seq::IndexedRandom;
use rustc_hash::FxHashSet;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Shortest word kept in a pool
pub const MIN_WORD_LENGTH: usize = 3;

/// Default number of words a length needs before it is drawn from
pub const DEFAULT_MIN_WORDS_PER_LENGTH: usize = 5;

/// Fallback vocabulary when neither a file nor the embedded list has words
const SAMPLE_WORDS: &[&str] = &["hoa hồng", "bầu trời", "học sinh", "mặt trời", "cà phê"];

/// A cleaned vocabulary grouped by token length
#[derive(Debug, Clone, Default)]
pub struct WordPool {
    by_length: BTreeMap<usize, Vec<Word>>,
    min_words_per_length: usize,
}

impl WordPool {
    /// Build a pool from raw entries
    ///
    /// Entries are normalised like guesses (whitespace removed, lowercased).
    /// Entries shorter than [`MIN_WORD_LENGTH`] tokens, entries that are not
    /// valid word-mode words, and repeats are dropped. Order within a length
    /// follows first appearance.
    #[must_use]
    pub fn from_words<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = FxHashSet::default();
        let mut by_length: BTreeMap<usize, Vec<Word>> = BTreeMap::new();

        for entry in entries {
            let Ok(word) = Word::new(entry.as_ref(), Mode::Word) else {
                continue;
            };
            if word.len() < MIN_WORD_LENGTH || !seen.insert(word.text().to_string()) {
                continue;
            }
            by_length.entry(word.len()).or_default().push(word);
        }

        Self {
            by_length,
            min_words_per_length: DEFAULT_MIN_WORDS_PER_LENGTH,
        }
    }

    /// Pool over the vocabulary compiled into the binary
    #[must_use]
    pub fn embedded() -> Self {
        let pool = Self::from_words(DEFAULT_WORDS);
        if pool.is_empty() {
            warn!("embedded word list is empty, using sample words");
            return Self::from_words(SAMPLE_WORDS);
        }
        pool
    }

    /// Load a word list from a file
    ///
    /// Files ending in `.json` must hold a JSON array of strings; anything
    /// else is read as one entry per line.
    ///
    /// # Errors
    /// Returns `PoolError::Io` if the file cannot be read and
    /// `PoolError::Json` if a `.json` file is malformed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, PoolError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| PoolError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let pool = if is_json {
            let entries: Vec<String> =
                serde_json::from_str(&content).map_err(|source| PoolError::Json {
                    path: path.to_path_buf(),
                    source,
                })?;
            Self::from_words(entries)
        } else {
            Self::from_words(content.lines())
        };

        debug!(path = %path.display(), words = pool.len(), "loaded word list");
        Ok(pool)
    }

    /// Load `path` if given, falling back to the embedded list
    ///
    /// A missing, unreadable, malformed or empty file is logged and replaced
    /// by the embedded vocabulary.
    #[must_use]
    pub fn load_or_embedded(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::embedded();
        };

        match Self::load(path) {
            Ok(pool) if !pool.is_empty() => pool,
            Ok(_) => {
                warn!(path = %path.display(), "word list has no usable words, using embedded list");
                Self::embedded()
            }
            Err(err) => {
                warn!(error = %err, "using embedded word list");
                Self::embedded()
            }
        }
    }

    /// Set how many words a length needs to be eligible for drawing
    #[must_use]
    pub fn with_min_words_per_length(mut self, min_words_per_length: usize) -> Self {
        self.min_words_per_length = min_words_per_length;
        self
    }

    /// Total number of words across all lengths
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_length.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_length.is_empty()
    }

    /// Lengths present in the pool, ascending
    #[must_use]
    pub fn lengths(&self) -> Vec<usize> {
        self.by_length.keys().copied().collect()
    }

    /// Words of one length, in pool order
    #[must_use]
    pub fn words_of_length(&self, length: usize) -> &[Word] {
        self.by_length.get(&length).map_or(&[][..], Vec::as_slice)
    }

    /// Lengths an answer may be drawn from
    ///
    /// Lengths with at least `min_words_per_length` words; every length when
    /// none qualifies.
    #[must_use]
    pub fn eligible_lengths(&self) -> Vec<usize> {
        let eligible: Vec<usize> = self
            .by_length
            .iter()
            .filter(|(_, words)| words.len() >= self.min_words_per_length)
            .map(|(&length, _)| length)
            .collect();

        if eligible.is_empty() {
            self.lengths()
        } else {
            eligible
        }
    }

    /// Draw a random answer and every word of its length as candidates
    ///
    /// # Errors
    /// Returns `PoolError::Empty` if the pool has no words.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<AnswerPool, PoolError> {
        let length = *self
            .eligible_lengths()
            .choose(rng)
            .ok_or(PoolError::Empty)?;
        let words = self.words_of_length(length);
        let answer = words.choose(rng).ok_or(PoolError::Empty)?;

        Ok(AnswerPool::new(answer.clone(), words.to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn from_words_cleans_entries() {
        let pool = WordPool::from_words([" Hoa Hồng ", "hoahồng", "ab", "", "x1yz", "BẦU TRỜI"]);

        assert_eq!(pool.len(), 2);
        let texts: Vec<&str> = pool.words_of_length(7).iter().map(Word::text).collect();
        assert_eq!(texts, vec!["hoahồng", "bầutrời"]);
    }

    #[test]
    fn words_are_grouped_by_length() {
        let pool = WordPool::from_words(["abc", "abcd", "abcde", "bcd"]);
        assert_eq!(pool.lengths(), vec![3, 4, 5]);
        assert_eq!(pool.words_of_length(3).len(), 2);
        assert!(pool.words_of_length(9).is_empty());
    }

    #[test]
    fn eligible_lengths_need_enough_words() {
        let pool =
            WordPool::from_words(["aaa", "bbb", "ccc", "dddd"]).with_min_words_per_length(3);
        assert_eq!(pool.eligible_lengths(), vec![3]);
    }

    #[test]
    fn eligible_lengths_fall_back_to_all() {
        let pool = WordPool::from_words(["aaa", "dddd"]);
        assert_eq!(pool.eligible_lengths(), vec![3, 4]);
    }

    #[test]
    fn draw_returns_answer_within_candidates() {
        let pool = WordPool::embedded();
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..20 {
            let drawn = pool.draw(&mut rng).unwrap();
            let length = drawn.answer().len();
            assert!(drawn.candidates().contains(drawn.answer()));
            assert!(drawn.candidates().iter().all(|w| w.len() == length));
            assert!(pool.words_of_length(length).len() >= DEFAULT_MIN_WORDS_PER_LENGTH);
        }
    }

    #[test]
    fn draw_from_empty_pool_fails() {
        let pool = WordPool::from_words(Vec::<String>::new());
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(pool.draw(&mut rng), Err(PoolError::Empty)));
    }

    #[test]
    fn load_missing_file_falls_back() {
        let missing = Path::new("/nonexistent/words.txt");
        assert!(matches!(WordPool::load(missing), Err(PoolError::Io { .. })));

        let pool = WordPool::load_or_embedded(Some(missing));
        assert!(!pool.is_empty());
    }

    #[test]
    fn load_reads_json_and_lines() {
        let dir = std::env::temp_dir();
        let json = dir.join(format!("wordle_arena_pool_{}.json", std::process::id()));
        let text = dir.join(format!("wordle_arena_pool_{}.txt", std::process::id()));
        fs::write(&json, r#"["crane", "slate", "crane"]"#).unwrap();
        fs::write(&text, "crane\nslate\n\nirate\n").unwrap();

        assert_eq!(WordPool::load(&json).unwrap().len(), 2);
        assert_eq!(WordPool::load(&text).unwrap().len(), 3);

        fs::write(&json, "not json").unwrap();
        assert!(matches!(WordPool::load(&json), Err(PoolError::Json { .. })));

        fs::remove_file(&json).ok();
        fs::remove_file(&text).ok();
    }

    #[test]
    fn embedded_list_is_not_empty() {
        assert_eq!(DEFAULT_WORDS.len(), super::super::DEFAULT_WORDS_COUNT);
        assert!(!WordPool::embedded().is_empty());
    }
}
