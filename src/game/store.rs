//! Session registry
//!
//! The map itself sits behind a read-write lock that is held only long enough
//! to look up an entry; each session then has its own mutex, so operations on
//! different sessions run independently.

use super::session::{Session, SessionId};
use crate::error::ArenaError;
use rustc_hash::FxHashMap;
use std::sync::{Arc, Mutex, RwLock};

type SharedSession = Arc<Mutex<Session>>;

/// Live sessions keyed by id
#[derive(Default)]
pub struct SessionStore {
    sessions: RwLock<FxHashMap<SessionId, SharedSession>>,
}

impl SessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a session under its own id
    ///
    /// # Errors
    /// Returns `LockPoisoned` if a writer panicked while holding the map.
    pub fn insert(&self, session: Session) -> Result<SessionId, ArenaError> {
        let id = session.id();
        self.sessions
            .write()
            .map_err(|_| ArenaError::LockPoisoned)?
            .insert(id, Arc::new(Mutex::new(session)));
        Ok(id)
    }

    /// Shared handle to a session
    ///
    /// # Errors
    /// Returns `UnknownSession` for ids that were never inserted or were
    /// removed, and `LockPoisoned` if the map lock is poisoned.
    pub fn get(&self, id: SessionId) -> Result<SharedSession, ArenaError> {
        self.sessions
            .read()
            .map_err(|_| ArenaError::LockPoisoned)?
            .get(&id)
            .cloned()
            .ok_or(ArenaError::UnknownSession(id))
    }

    /// Drop a session
    ///
    /// # Errors
    /// Returns `UnknownSession` if the id is not registered.
    pub fn remove(&self, id: SessionId) -> Result<(), ArenaError> {
        self.sessions
            .write()
            .map_err(|_| ArenaError::LockPoisoned)?
            .remove(&id)
            .map(|_| ())
            .ok_or(ArenaError::UnknownSession(id))
    }

    /// Number of registered sessions
    ///
    /// # Errors
    /// Returns `LockPoisoned` if the map lock is poisoned.
    pub fn len(&self) -> Result<usize, ArenaError> {
        self.sessions
            .read()
            .map(|sessions| sessions.len())
            .map_err(|_| ArenaError::LockPoisoned)
    }

    /// Run `f` with exclusive access to one session
    ///
    /// # Errors
    /// Returns the lookup errors of [`get`](Self::get), `LockPoisoned` if a
    /// previous operation on this session panicked, or whatever `f` returns.
    pub fn with_session<T, F>(&self, id: SessionId, f: F) -> Result<T, ArenaError>
    where
        F: FnOnce(&mut Session) -> Result<T, ArenaError>,
    {
        let session = self.get(id)?;
        let mut guard = session.lock().map_err(|_| ArenaError::LockPoisoned)?;
        f(&mut guard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Mode, Word};
    use crate::game::session::SessionSettings;
    use crate::pools::AnswerPool;
    use std::thread;

    fn session() -> Session {
        let answer = Word::new("crane", Mode::Word).unwrap();
        Session::new(
            SessionId::new(),
            "an",
            false,
            AnswerPool::new(answer, Vec::new()),
            &SessionSettings::default(),
            1,
        )
    }

    #[test]
    fn insert_get_remove() {
        let store = SessionStore::new();
        let id = store.insert(session()).unwrap();

        assert_eq!(store.len().unwrap(), 1);
        assert!(store.get(id).is_ok());

        store.remove(id).unwrap();
        assert_eq!(store.len().unwrap(), 0);
        assert!(matches!(store.get(id), Err(ArenaError::UnknownSession(_))));
        assert!(matches!(store.remove(id), Err(ArenaError::UnknownSession(_))));
    }

    #[test]
    fn with_session_mutates_in_place() {
        let store = SessionStore::new();
        let id = store.insert(session()).unwrap();

        store
            .with_session(id, |s| s.submit_guess("slate").map(|_| ()))
            .unwrap();
        let turns = store.with_session(id, |s| Ok(s.turn())).unwrap();
        assert_eq!(turns, 1);
    }

    #[test]
    fn concurrent_guesses_are_serialised_per_session() {
        let store = Arc::new(SessionStore::new());
        let id = store.insert(session()).unwrap();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || store.with_session(id, |s| s.submit_guess("slate")))
            })
            .collect();

        let mut turns: Vec<usize> = handles
            .into_iter()
            .map(|h| h.join().unwrap().unwrap().turn)
            .collect();
        turns.sort_unstable();
        assert_eq!(turns, vec![1, 2, 3, 4]);
    }
}
