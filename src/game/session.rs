//! Game session state machine
//!
//! A session starts `active` and moves to `won` or `lost`, both terminal.
//! Rejected guesses never consume a turn.

use super::hint::{self, MAX_HINT_LEVEL};
use crate::core::{Feedback, Mode, Word, evaluate, strict};
use crate::error::ArenaError;
use crate::history::{GameRecord, RecordedTurn};
use crate::pools::AnswerPool;
use crate::solver::{CandidateSet, DEFAULT_OPENING_RANDOM_MIN, Solver, StrategyType};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Default number of guesses per game
pub const DEFAULT_TURN_LIMIT: usize = 6;

/// Opaque session identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Fresh random identifier
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Identifier drawn from `rng`, reproducible with a seeded source
    pub fn from_rng<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(uuid::Builder::from_random_bytes(rng.random()).into_uuid())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SessionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Where a session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Active,
    Won,
    Lost,
}

impl Status {
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Active)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Active => "active",
            Self::Won => "won",
            Self::Lost => "lost",
        };
        f.write_str(name)
    }
}

/// A played guess and the feedback it received
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub guess: Word,
    pub feedback: Feedback,
}

/// Result of one accepted guess
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TurnOutcome {
    pub guess: String,
    pub feedback: Feedback,
    /// Turns played so far, this one included
    pub turn: usize,
    pub status: Status,
    /// The answer, only once the session is lost
    pub revealed_answer: Option<String>,
    /// Solver candidates still consistent with every feedback
    pub remaining_candidates: usize,
    /// Why the finished game could not be written to the game log
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_error: Option<String>,
}

/// Per-session tuning shared by every session of a service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSettings {
    pub turn_limit: usize,
    pub strategy: StrategyType,
    pub opening_random_min: usize,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            turn_limit: DEFAULT_TURN_LIMIT,
            strategy: StrategyType::default(),
            opening_random_min: DEFAULT_OPENING_RANDOM_MIN,
        }
    }
}

/// One game between a player and a hidden answer
pub struct Session {
    id: SessionId,
    user: String,
    mode: Mode,
    strict: bool,
    answer: Word,
    history: Vec<Turn>,
    turn_limit: usize,
    status: Status,
    hint_level: u8,
    solver: Solver,
    rng: StdRng,
}

impl Session {
    /// Start a session over a drawn pool
    ///
    /// `seed` drives both the solver's opening pick and hint randomness.
    #[must_use]
    pub fn new(
        id: SessionId,
        user: impl Into<String>,
        strict: bool,
        pool: AnswerPool,
        settings: &SessionSettings,
        seed: u64,
    ) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let solver_rng = StdRng::seed_from_u64(rng.random());

        let mode = pool.mode();
        let (answer, candidates) = pool.into_parts();
        let candidates = CandidateSet::new(candidates, answer.len());
        let solver = Solver::new(candidates, settings.strategy, solver_rng)
            .with_opening_random_min(settings.opening_random_min);

        Self {
            id,
            user: user.into(),
            mode,
            strict,
            answer,
            history: Vec::new(),
            turn_limit: settings.turn_limit,
            status: Status::Active,
            hint_level: 0,
            solver,
            rng,
        }
    }

    /// Play a guess typed by the player
    ///
    /// # Errors
    /// - `SessionFinished` once the session is won or lost
    /// - `InvalidGuess` for empty input or tokens outside the mode's alphabet
    /// - `Evaluation` when the guess length differs from the answer
    /// - `StrictViolation` when strict mode rejects the guess
    ///
    /// None of these consume a turn.
    pub fn submit_guess(&mut self, text: &str) -> Result<TurnOutcome, ArenaError> {
        self.ensure_active()?;

        let guess = Word::new(text, self.mode)?;
        let feedback = evaluate(&self.answer, &guess)?;

        if self.strict
            && let Some(last) = self.history.last()
        {
            strict::check_guess(&last.guess, &last.feedback, &guess)?;
        }

        Ok(self.apply(guess, feedback))
    }

    /// Let the solver play the next turn
    ///
    /// # Errors
    /// - `SessionFinished` once the session is won or lost
    /// - `SolverExhausted` when no candidate is consistent with the feedback
    pub fn automated_turn(&mut self) -> Result<TurnOutcome, ArenaError> {
        self.ensure_active()?;

        let guess = self
            .solver
            .choose_guess(self.turn())
            .ok_or(ArenaError::SolverExhausted)?;
        let feedback = evaluate(&self.answer, &guess)?;

        Ok(self.apply(guess, feedback))
    }

    /// Next hint; the level advances up to [`MAX_HINT_LEVEL`]
    pub fn hint(&mut self) -> String {
        let text = hint::compose(&self.answer, self.hint_level, &mut self.rng);
        if self.hint_level < MAX_HINT_LEVEL {
            self.hint_level += 1;
        }
        text
    }

    /// The record to persist, once the session is terminal
    #[must_use]
    pub fn record(&self) -> Option<GameRecord> {
        if !self.status.is_terminal() {
            return None;
        }

        Some(GameRecord {
            user: self.user.clone(),
            mode: self.mode,
            answer: self.answer.text().to_string(),
            turns: self.turn(),
            won: u8::from(self.status == Status::Won),
            history: self
                .history
                .iter()
                .map(|turn| RecordedTurn {
                    guess: turn.guess.text().to_string(),
                    feedback: turn.feedback.clone(),
                })
                .collect(),
        })
    }

    fn ensure_active(&self) -> Result<(), ArenaError> {
        if self.status.is_terminal() {
            return Err(ArenaError::SessionFinished);
        }
        Ok(())
    }

    fn apply(&mut self, guess: Word, feedback: Feedback) -> TurnOutcome {
        self.solver.update(&guess, &feedback);

        let solved = feedback.is_solved();
        self.history.push(Turn {
            guess: guess.clone(),
            feedback: feedback.clone(),
        });

        if solved {
            self.status = Status::Won;
        } else if self.turn() >= self.turn_limit {
            self.status = Status::Lost;
        }

        TurnOutcome {
            guess: guess.text().to_string(),
            feedback,
            turn: self.turn(),
            status: self.status,
            revealed_answer: (self.status == Status::Lost).then(|| self.answer.text().to_string()),
            remaining_candidates: self.solver.remaining(),
            record_error: None,
        }
    }

    #[must_use]
    pub const fn id(&self) -> SessionId {
        self.id
    }

    #[must_use]
    pub fn user(&self) -> &str {
        &self.user
    }

    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    #[must_use]
    pub const fn strict(&self) -> bool {
        self.strict
    }

    #[must_use]
    pub const fn answer(&self) -> &Word {
        &self.answer
    }

    #[must_use]
    pub fn answer_length(&self) -> usize {
        self.answer.len()
    }

    #[must_use]
    pub fn history(&self) -> &[Turn] {
        &self.history
    }

    /// Turns played so far
    #[must_use]
    pub fn turn(&self) -> usize {
        self.history.len()
    }

    #[must_use]
    pub const fn turn_limit(&self) -> usize {
        self.turn_limit
    }

    #[must_use]
    pub const fn status(&self) -> Status {
        self.status
    }

    #[must_use]
    pub const fn hint_level(&self) -> u8 {
        self.hint_level
    }

    #[must_use]
    pub fn remaining_candidates(&self) -> usize {
        self.solver.remaining()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Mark, StrictViolation};

    fn word(text: &str) -> Word {
        Word::new(text, Mode::Word).unwrap()
    }

    fn session(answer: &str, pool: &[&str], strict: bool) -> Session {
        let pool = AnswerPool::new(word(answer), pool.iter().map(|t| word(t)).collect());
        Session::new(
            SessionId::new(),
            "an",
            strict,
            pool,
            &SessionSettings::default(),
            7,
        )
    }

    #[test]
    fn correct_guess_wins_at_turn_one() {
        let mut s = session("crane", &[], false);
        let outcome = s.submit_guess("CRANE").unwrap();

        assert_eq!(outcome.status, Status::Won);
        assert_eq!(outcome.turn, 1);
        assert!(outcome.revealed_answer.is_none());
        assert!(outcome.feedback.is_solved());
        assert_eq!(s.record().unwrap().won, 1);
    }

    #[test]
    fn six_misses_lose_and_reveal() {
        let mut s = session("crane", &[], false);
        for turn in 1..=6 {
            let outcome = s.submit_guess("slate").unwrap();
            assert_eq!(outcome.turn, turn);
        }

        assert_eq!(s.status(), Status::Lost);
        let record = s.record().unwrap();
        assert_eq!(record.won, 0);
        assert_eq!(record.turns, 6);
        assert!(matches!(s.submit_guess("crane"), Err(ArenaError::SessionFinished)));
        assert!(matches!(s.automated_turn(), Err(ArenaError::SessionFinished)));
    }

    #[test]
    fn last_turn_reveals_answer() {
        let mut s = session("crane", &[], false);
        for _ in 0..5 {
            assert!(s.submit_guess("slate").unwrap().revealed_answer.is_none());
        }
        let last = s.submit_guess("slate").unwrap();
        assert_eq!(last.revealed_answer.as_deref(), Some("crane"));
    }

    #[test]
    fn rejected_guesses_do_not_consume_turns() {
        let mut s = session("crane", &[], false);

        assert!(matches!(s.submit_guess(""), Err(ArenaError::InvalidGuess(_))));
        assert!(matches!(s.submit_guess("cr4ne"), Err(ArenaError::InvalidGuess(_))));
        assert!(matches!(s.submit_guess("cranes"), Err(ArenaError::Evaluation(_))));
        assert_eq!(s.turn(), 0);
        assert_eq!(s.status(), Status::Active);
        assert!(s.record().is_none());
    }

    #[test]
    fn strict_mode_enforces_previous_feedback() {
        let mut s = session("chair", &[], true);
        let first = s.submit_guess("crane").unwrap();
        assert_eq!(
            first.feedback.marks(),
            &[Mark::Exact, Mark::Present, Mark::Exact, Mark::Absent, Mark::Absent]
        );

        let rejected = s.submit_guess("tiara");
        assert!(matches!(
            rejected,
            Err(ArenaError::StrictViolation(StrictViolation::MissingExact { .. }))
        ));
        assert_eq!(s.turn(), 1);

        assert!(s.submit_guess("crabs").is_ok());
        assert_eq!(s.turn(), 2);
    }

    #[test]
    fn relaxed_mode_accepts_anything_well_formed() {
        let mut s = session("chair", &[], false);
        s.submit_guess("crane").unwrap();
        assert!(s.submit_guess("tiara").is_ok());
    }

    #[test]
    fn hints_escalate_and_cap() {
        let mut s = session("crane", &[], false);
        assert_eq!(s.hint(), "The word has 5 letters.");
        assert_eq!(s.hint_level(), 1);
        assert!(s.hint().starts_with("The word contains"));
        assert!(s.hint().starts_with("Letter "));
        assert!(s.hint().starts_with("Letter "));
        assert_eq!(s.hint_level(), MAX_HINT_LEVEL);
    }

    #[test]
    fn automated_turns_find_the_answer() {
        let pool = ["slate", "irate", "crate", "grate", "trace", "react", "caret"];
        let settings = SessionSettings {
            turn_limit: pool.len(),
            ..SessionSettings::default()
        };
        let drawn = AnswerPool::new(word("caret"), pool.iter().map(|t| word(t)).collect());
        let mut s = Session::new(SessionId::new(), "an", false, drawn, &settings, 3);

        let mut last = s.automated_turn().unwrap();
        while last.status == Status::Active {
            last = s.automated_turn().unwrap();
        }
        assert!(s.history().iter().all(|t| pool.contains(&t.guess.text())));
        assert_eq!(last.status, Status::Won);
    }

    #[test]
    fn player_guesses_prune_solver_candidates() {
        let pool = ["slate", "irate", "crate", "grate", "trace"];
        let mut s = session("crate", &pool, false);
        let before = s.remaining_candidates();
        let outcome = s.submit_guess("slate").unwrap();
        assert!(outcome.remaining_candidates < before);
        assert_eq!(outcome.remaining_candidates, s.remaining_candidates());
    }

    #[test]
    fn session_id_round_trips_through_text() {
        let id = SessionId::new();
        assert_eq!(id.to_string().parse::<SessionId>().unwrap(), id);
        assert!("not-a-uuid".parse::<SessionId>().is_err());
    }
}
