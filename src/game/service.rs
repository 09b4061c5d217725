//! Game service
//!
//! The four player-facing calls (start, guess, automated guess, hint) over a
//! session store, a pool source and a game log.

use super::session::{Session, SessionId, SessionSettings, Status, TurnOutcome};
use super::store::SessionStore;
use crate::config::ArenaConfig;
use crate::core::Mode;
use crate::error::ArenaError;
use crate::history::{GameLog, GameRecord, JsonlGameLog};
use crate::pools::{AnswerPool, PoolSource};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::sync::Mutex;
use tracing::{debug, error, info};

/// What a client needs to know about a new session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionInfo {
    pub id: SessionId,
    pub mode: Mode,
    pub strict: bool,
    pub answer_length: usize,
    pub turn_limit: usize,
}

impl From<&Session> for SessionInfo {
    fn from(session: &Session) -> Self {
        Self {
            id: session.id(),
            mode: session.mode(),
            strict: session.strict(),
            answer_length: session.answer_length(),
            turn_limit: session.turn_limit(),
        }
    }
}

/// Session orchestration for any number of concurrent players
pub struct GameService<L: GameLog = JsonlGameLog> {
    store: SessionStore,
    pools: PoolSource,
    settings: SessionSettings,
    log: L,
    rng: Mutex<StdRng>,
}

impl<L: GameLog> GameService<L> {
    /// Create a service
    ///
    /// With a `seed`, session ids, answers, opening guesses and hints are all
    /// reproducible.
    #[must_use]
    pub fn new(pools: PoolSource, settings: SessionSettings, log: L, seed: Option<u64>) -> Self {
        let rng = seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
        Self {
            store: SessionStore::new(),
            pools,
            settings,
            log,
            rng: Mutex::new(rng),
        }
    }

    /// Start a session with an answer drawn for `mode`
    ///
    /// # Errors
    /// Returns `Pool` if no answer could be drawn.
    pub fn start_session(
        &self,
        user: &str,
        mode: Mode,
        strict: bool,
    ) -> Result<SessionInfo, ArenaError> {
        let pool = {
            let mut rng = self.rng.lock().map_err(|_| ArenaError::LockPoisoned)?;
            self.pools.draw(mode, &mut *rng)?
        };
        self.start_session_with_pool(user, mode, strict, pool)
    }

    /// Start a session over a caller-supplied pool
    ///
    /// # Errors
    /// Returns `PoolModeMismatch` if the pool belongs to another mode.
    pub fn start_session_with_pool(
        &self,
        user: &str,
        mode: Mode,
        strict: bool,
        pool: AnswerPool,
    ) -> Result<SessionInfo, ArenaError> {
        if pool.mode() != mode {
            return Err(ArenaError::PoolModeMismatch {
                expected: mode,
                found: pool.mode(),
            });
        }

        let (id, seed) = {
            let mut rng = self.rng.lock().map_err(|_| ArenaError::LockPoisoned)?;
            (SessionId::from_rng(&mut *rng), rng.random::<u64>())
        };

        let session = Session::new(id, user, strict, pool, &self.settings, seed);
        let info = SessionInfo::from(&session);
        info!(
            session = %id,
            user,
            mode = %mode,
            length = info.answer_length,
            candidates = session.remaining_candidates(),
            "session started"
        );
        debug!(session = %id, answer = %session.answer(), "answer drawn");

        self.store.insert(session)?;
        Ok(info)
    }

    /// Play a guess typed by the player
    ///
    /// # Errors
    /// Returns the session's rejection (`SessionFinished`, `InvalidGuess`,
    /// `Evaluation`, `StrictViolation`) or `UnknownSession`. A game log
    /// failure does not fail the call; it is reported in
    /// [`TurnOutcome::record_error`].
    pub fn submit_guess(&self, id: SessionId, text: &str) -> Result<TurnOutcome, ArenaError> {
        self.play(id, |session| session.submit_guess(text))
    }

    /// Let the solver play the next turn
    ///
    /// # Errors
    /// Returns `SolverExhausted` when no candidate is left, plus the errors of
    /// [`submit_guess`](Self::submit_guess).
    pub fn request_automated_guess(&self, id: SessionId) -> Result<TurnOutcome, ArenaError> {
        self.play(id, Session::automated_turn)
    }

    /// Next hint for a session
    ///
    /// # Errors
    /// Returns `UnknownSession` for unregistered ids.
    pub fn request_hint(&self, id: SessionId) -> Result<String, ArenaError> {
        self.store.with_session(id, |session| {
            let hint = session.hint();
            debug!(session = %id, level = session.hint_level(), "hint given");
            Ok(hint)
        })
    }

    /// Snapshot of a session's public settings
    ///
    /// # Errors
    /// Returns `UnknownSession` for unregistered ids.
    pub fn session_info(&self, id: SessionId) -> Result<SessionInfo, ArenaError> {
        self.store
            .with_session(id, |session| Ok(SessionInfo::from(&*session)))
    }

    /// Forget a session, finished or not
    ///
    /// # Errors
    /// Returns `UnknownSession` for unregistered ids.
    pub fn end_session(&self, id: SessionId) -> Result<(), ArenaError> {
        self.store.remove(id)?;
        debug!(session = %id, "session ended");
        Ok(())
    }

    /// Number of registered sessions
    ///
    /// # Errors
    /// Returns `LockPoisoned` if the store lock is poisoned.
    pub fn session_count(&self) -> Result<usize, ArenaError> {
        self.store.len()
    }

    /// Recorded games of `user`, newest first
    ///
    /// # Errors
    /// Returns `History` if the game log cannot be read.
    pub fn games_for(&self, user: &str) -> Result<Vec<GameRecord>, ArenaError> {
        Ok(self.log.games_for(user)?)
    }

    #[must_use]
    pub const fn log(&self) -> &L {
        &self.log
    }

    /// Run one turn and record the game if it just ended
    fn play<F>(&self, id: SessionId, turn: F) -> Result<TurnOutcome, ArenaError>
    where
        F: FnOnce(&mut Session) -> Result<TurnOutcome, ArenaError>,
    {
        let (mut outcome, record) = self.store.with_session(id, |session| {
            let outcome = turn(session)?;
            debug!(
                session = %id,
                turn = outcome.turn,
                guess = %outcome.guess,
                feedback = %outcome.feedback,
                remaining = outcome.remaining_candidates,
                "turn played"
            );
            Ok((outcome, session.record()))
        })?;

        if outcome.status.is_terminal()
            && let Some(record) = record
        {
            outcome.record_error = self.finish(id, &record);
        }

        Ok(outcome)
    }

    /// Log the finished game; the turn already stands, so a failure is
    /// returned as text instead of an error
    fn finish(&self, id: SessionId, record: &GameRecord) -> Option<String> {
        let result = if record.is_win() { Status::Won } else { Status::Lost };
        info!(
            session = %id,
            user = %record.user,
            result = %result,
            turns = record.turns,
            "session finished"
        );

        self.log.append(record).err().map(|err| {
            error!(session = %id, error = %err, "failed to record game");
            err.to_string()
        })
    }
}

impl GameService<JsonlGameLog> {
    /// Service wired from configuration, logging finished games to
    /// `config.game_log`
    #[must_use]
    pub fn from_config(config: &ArenaConfig) -> Self {
        Self::new(
            config.pool_source(),
            config.session_settings(),
            JsonlGameLog::new(&config.game_log),
            config.seed,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Word;
    use crate::history::{HistoryError, MemoryGameLog};
    use crate::pools::{EquationGenerator, WordPool};

    fn service() -> GameService<MemoryGameLog> {
        let pools = PoolSource::new(WordPool::embedded(), EquationGenerator::default());
        GameService::new(pools, SessionSettings::default(), MemoryGameLog::new(), Some(42))
    }

    fn one_word_pool(text: &str) -> AnswerPool {
        AnswerPool::new(Word::new(text, Mode::Word).unwrap(), Vec::new())
    }

    #[test]
    fn start_session_reports_length() {
        let service = service();
        let info = service.start_session("an", Mode::Word, false).unwrap();
        assert_eq!(info.turn_limit, 6);
        assert!(info.answer_length >= 3);
        assert_eq!(service.session_count().unwrap(), 1);
        assert_eq!(service.session_info(info.id).unwrap(), info);
    }

    #[test]
    fn seeded_services_draw_the_same_sessions() {
        let a = service().start_session("an", Mode::Equation, false).unwrap();
        let b = service().start_session("an", Mode::Equation, false).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn pool_mode_must_match() {
        let result =
            service().start_session_with_pool("an", Mode::Equation, false, one_word_pool("crane"));
        assert!(matches!(result, Err(ArenaError::PoolModeMismatch { .. })));
    }

    #[test]
    fn finished_game_is_recorded_once() {
        let service = service();
        let info = service
            .start_session_with_pool("an", Mode::Word, false, one_word_pool("crane"))
            .unwrap();

        let outcome = service.submit_guess(info.id, "crane").unwrap();
        assert_eq!(outcome.status, Status::Won);
        assert!(matches!(
            service.submit_guess(info.id, "crane"),
            Err(ArenaError::SessionFinished)
        ));

        let games = service.games_for("an").unwrap();
        assert_eq!(games.len(), 1);
        assert_eq!(games[0].answer, "crane");
        assert!(games[0].is_win());
    }

    struct BrokenLog;

    impl GameLog for BrokenLog {
        fn append(&self, _record: &GameRecord) -> Result<(), HistoryError> {
            Err(HistoryError::LockPoisoned)
        }

        fn games_for(&self, _user: &str) -> Result<Vec<GameRecord>, HistoryError> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn log_failure_still_returns_the_final_turn() {
        let pools = PoolSource::new(WordPool::embedded(), EquationGenerator::default());
        let service = GameService::new(pools, SessionSettings::default(), BrokenLog, Some(7));

        let won = service
            .start_session_with_pool("an", Mode::Word, false, one_word_pool("crane"))
            .unwrap();
        let outcome = service.submit_guess(won.id, "crane").unwrap();
        assert_eq!(outcome.status, Status::Won);
        assert!(outcome.record_error.is_some());

        let lost = service
            .start_session_with_pool("an", Mode::Word, false, one_word_pool("crane"))
            .unwrap();
        let mut outcome = service.submit_guess(lost.id, "slate").unwrap();
        assert!(outcome.record_error.is_none());
        while outcome.status == Status::Active {
            outcome = service.submit_guess(lost.id, "slate").unwrap();
        }
        assert_eq!(outcome.status, Status::Lost);
        assert_eq!(outcome.revealed_answer.as_deref(), Some("crane"));
        assert!(outcome.record_error.is_some());
    }

    #[test]
    fn unknown_session_is_rejected() {
        let service = service();
        let id = SessionId::new();
        assert!(matches!(service.submit_guess(id, "crane"), Err(ArenaError::UnknownSession(_))));
        assert!(matches!(service.request_hint(id), Err(ArenaError::UnknownSession(_))));
        assert!(matches!(service.end_session(id), Err(ArenaError::UnknownSession(_))));
    }

    #[test]
    fn end_session_removes_it() {
        let service = service();
        let info = service.start_session("an", Mode::Word, false).unwrap();
        service.end_session(info.id).unwrap();
        assert_eq!(service.session_count().unwrap(), 0);
    }

    #[test]
    fn automated_play_ends_and_records() {
        let service = service();
        let info = service.start_session("bot", Mode::Word, false).unwrap();

        let mut outcome = service.request_automated_guess(info.id).unwrap();
        while outcome.status == Status::Active {
            outcome = service.request_automated_guess(info.id).unwrap();
        }

        let records = service.log().records().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].turns, outcome.turn);
    }
}
