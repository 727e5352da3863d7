//! # Session Store Module
//!
//! Key-value storage for dialogue sessions, keyed by user identifier. The
//! state machine only talks to the [`SessionStore`] trait, so the in-memory
//! map used by the bot can be swapped for another backend without touching
//! the dialogue logic.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use crate::dialogue::Session;

/// Telegram chat identifier of the user owning a session
pub type UserId = i64;

/// Storage for per-user sessions
///
/// Implementations must complete each call without yielding; callers read,
/// compute and write a session before their next suspension point.
pub trait SessionStore: Send + Sync {
    /// Current session for the user, if any
    fn get(&self, user: UserId) -> Option<Session>;

    /// Insert or replace the user's session
    fn set(&self, user: UserId, session: Session);

    /// Remove the user's session, returning it if one existed
    fn delete(&self, user: UserId) -> Option<Session>;
}

/// Process-lifetime in-memory session table
#[derive(Debug, Default)]
pub struct InMemSessionStore {
    sessions: Mutex<HashMap<UserId, Session>>,
}

impl InMemSessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live sessions
    pub fn len(&self) -> usize {
        self.sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SessionStore for InMemSessionStore {
    fn get(&self, user: UserId) -> Option<Session> {
        self.sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&user)
            .cloned()
    }

    fn set(&self, user: UserId, session: Session) {
        self.sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(user, session);
    }

    fn delete(&self, user: UserId) -> Option<Session> {
        self.sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&user)
    }
}

impl<S: SessionStore + ?Sized> SessionStore for std::sync::Arc<S> {
    fn get(&self, user: UserId) -> Option<Session> {
        (**self).get(user)
    }

    fn set(&self, user: UserId, session: Session) {
        (**self).set(user, session)
    }

    fn delete(&self, user: UserId) -> Option<Session> {
        (**self).delete(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialogue::FlowKind;

    #[test]
    fn test_sessions_are_isolated_per_user() {
        let store = InMemSessionStore::new();
        store.set(1, Session::start(FlowKind::Names));
        store.set(2, Session::start(FlowKind::FakeData));

        assert_eq!(store.len(), 2);
        assert_eq!(store.get(1).map(|s| s.flow), Some(FlowKind::Names));
        assert_eq!(store.get(2).map(|s| s.flow), Some(FlowKind::FakeData));

        assert!(store.delete(1).is_some());
        assert!(store.get(1).is_none());
        assert!(store.get(2).is_some());
        assert!(store.delete(1).is_none());
    }
}
