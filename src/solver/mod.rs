//! Automated solving
//!
//! Candidate tracking, feedback partition metrics, guess ranking strategies
//! and the solver that ties them together.

mod candidates;
mod engine;
pub mod partition;
pub mod strategy;

pub use candidates::CandidateSet;
pub use engine::{DEFAULT_OPENING_RANDOM_MIN, Solver};
pub use strategy::{EntropyStrategy, MinimaxStrategy, PartitionStrategy, Strategy, StrategyType};
