//! Game sessions
//!
//! Session state machine, hint composition, the session registry and the
//! service that ties them to pools and the game log.

pub mod hint;
mod service;
mod session;
mod store;

pub use service::{GameService, SessionInfo};
pub use session::{
    DEFAULT_TURN_LIMIT, Session, SessionId, SessionSettings, Status, Turn, TurnOutcome,
};
pub use store::SessionStore;
