//! Session state - who is signed in
//!
//! The session is an explicit handle shared (via `Arc`) with the services
//! that act on behalf of a user. It mirrors itself to the `user` key so a
//! later process starts with the same identity.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::result::Result;
use crate::domain::User;
use crate::ports::{read_json, write_json, KeyValueStore};

/// Storage key for the persisted session
pub const SESSION_KEY: &str = "user";

/// Current authentication state
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Session {
    #[default]
    Anonymous,
    Authenticated(User),
}

impl Session {
    pub fn user(&self) -> Option<&User> {
        match self {
            Session::Authenticated(user) => Some(user),
            Session::Anonymous => None,
        }
    }
}

/// In-memory session slot backed by the store
pub struct SessionState {
    store: Arc<dyn KeyValueStore>,
    current: Mutex<Session>,
}

impl SessionState {
    /// Restore the session persisted in `store`
    ///
    /// A missing or unreadable value yields an anonymous session.
    pub fn hydrate(store: Arc<dyn KeyValueStore>) -> Self {
        let session = match read_json::<User>(store.as_ref(), SESSION_KEY) {
            Ok(Some(user)) => Session::Authenticated(user),
            Ok(None) | Err(_) => Session::Anonymous,
        };

        Self {
            store,
            current: Mutex::new(session),
        }
    }

    fn slot(&self) -> MutexGuard<'_, Session> {
        // The slot holds plain data; a panic elsewhere cannot leave it half-written
        self.current.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn current(&self) -> Session {
        self.slot().clone()
    }

    pub fn user(&self) -> Option<User> {
        self.slot().user().cloned()
    }

    pub fn username(&self) -> Option<String> {
        self.slot().user().map(|u| u.username.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(*self.slot(), Session::Authenticated(_))
    }

    /// Make `user` the active identity and persist it
    pub fn login(&self, user: User) -> Result<()> {
        let mut slot = self.slot();
        write_json(self.store.as_ref(), SESSION_KEY, &user)?;
        *slot = Session::Authenticated(user);
        Ok(())
    }

    /// Drop the active identity; a no-op when already anonymous
    pub fn logout(&self) -> Result<()> {
        let mut slot = self.slot();
        self.store.remove(SESSION_KEY)?;
        *slot = Session::Anonymous;
        Ok(())
    }
}
