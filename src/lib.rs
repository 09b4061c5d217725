//! Wordle Arena
//!
//! A turn-based guessing game engine for word and arithmetic-equation puzzles,
//! with a duplicate-aware feedback evaluator and a candidate-pruning solver.
//!
//! # Quick Start
//!
//! ```rust
//! use wordle_arena::core::{Mode, Word, evaluate};
//!
//! let answer = Word::new("chair", Mode::Word).unwrap();
//! let guess = Word::new("chart", Mode::Word).unwrap();
//!
//! let feedback = evaluate(&answer, &guess).unwrap();
//! assert_eq!(feedback.to_string(), "GGGY-");
//! ```

// Core domain types
pub mod core;

// Solving algorithms
pub mod solver;

// Answer pools
pub mod pools;

// Sessions and the game service
pub mod game;

// Finished-game records
pub mod history;

pub mod config;
pub mod error;
pub mod logging;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;

pub use error::ArenaError;
