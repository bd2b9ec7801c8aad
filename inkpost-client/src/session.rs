//! The one process wide piece of mutable state: who is logged in.
//!
//! Token and identity always move together. Observers are notified through a
//! `watch` channel before `establish` or `logout` return, and UI side effects
//! (the redirect to the login screen) go out on a `broadcast` channel.

use crate::error::{ApiError, ApiResult};
use crate::storage::KeyValueStore;
use inkpost_common::api::AuthResponse;
use inkpost_common::domain::Role;
use std::sync::Mutex;
use tokio::sync::{broadcast, watch};
use tracing::{debug, info, warn};

pub const TOKEN_KEY: &str = "auth_token";
pub const USER_KEY: &str = "auth_user";

pub const SESSION_EXPIRED_NOTICE: &str =
    "Your session has expired or access is denied. Please log in again.";
pub const ACCOUNT_NOT_FOUND_NOTICE: &str = "Your account was not found. Please log in again.";

pub type Session = AuthResponse;

#[derive(Debug, Clone, PartialEq)]
pub enum AuthEvent {
    LoggedIn(Session),
    /// The stored session was cleared. Sent once per actual transition.
    SessionEnded,
    /// The view layer should go back to the login entry point.
    RedirectToLogin { notice: Option<String> },
}

pub struct SessionStore {
    storage: Box<dyn KeyValueStore>,
    current: watch::Sender<Option<Session>>,
    events: broadcast::Sender<AuthEvent>,
    write_lock: Mutex<()>,
}

impl SessionStore {
    /// Reads the persisted session once. Anything partial or inconsistent is
    /// wiped and the store starts anonymous.
    pub fn restore(storage: Box<dyn KeyValueStore>) -> Self {
        let session = match read_persisted(storage.as_ref()) {
            Ok(Some(session)) => {
                debug!(username = %session.username, "restored session");
                Some(session)
            }
            Ok(None) => None,
            Err(err) => {
                warn!("discarding persisted session: {err}");
                clear_persisted(storage.as_ref());
                None
            }
        };

        let (current, _) = watch::channel(session);
        let (events, _) = broadcast::channel(16);

        Self {
            storage,
            current,
            events,
            write_lock: Mutex::new(()),
        }
    }

    /// Persists and publishes a freshly issued session.
    pub fn establish(&self, session: Session) -> ApiResult<()> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());

        let user = serde_json::to_string(&session).map_err(|e| ApiError::Storage(e.to_string()))?;
        // Identity first: a token on disk always has an identity next to it.
        let written = self
            .storage
            .set(USER_KEY, &user)
            .and_then(|_| self.storage.set(TOKEN_KEY, &session.token));
        if let Err(err) = written {
            clear_persisted(self.storage.as_ref());
            return Err(ApiError::Storage(err.to_string()));
        }

        info!(username = %session.username, role = %session.role, "logged in");
        self.current.send_replace(Some(session.clone()));
        let _ = self.events.send(AuthEvent::LoggedIn(session));
        Ok(())
    }

    /// Clears the session and asks the view to show the login screen.
    ///
    /// Returns whether a session was actually cleared. Calling it while
    /// anonymous only repeats the redirect.
    pub fn logout(&self, reason: Option<&str>) -> bool {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());

        clear_persisted(self.storage.as_ref());
        let cleared = self.current.send_if_modified(|current| current.take().is_some());

        if cleared {
            info!(reason = reason.unwrap_or("requested"), "logged out");
            let _ = self.events.send(AuthEvent::SessionEnded);
        }
        let _ = self.events.send(AuthEvent::RedirectToLogin {
            notice: reason.map(str::to_string),
        });
        cleared
    }

    pub fn current(&self) -> Option<Session> {
        self.current.borrow().clone()
    }

    pub fn token(&self) -> Option<String> {
        self.current.borrow().as_ref().map(|s| s.token.clone())
    }

    pub fn is_logged_in(&self) -> bool {
        self.current.borrow().is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.current
            .borrow()
            .as_ref()
            .is_some_and(|s| s.role == Role::Admin)
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.current.subscribe()
    }

    pub fn events(&self) -> broadcast::Receiver<AuthEvent> {
        self.events.subscribe()
    }
}

fn read_persisted(storage: &dyn KeyValueStore) -> eyre::Result<Option<Session>> {
    let token = storage.get(TOKEN_KEY)?;
    let user = storage.get(USER_KEY)?;

    match (token, user) {
        (None, None) => Ok(None),
        (Some(token), Some(user)) => {
            let session: Session = serde_json::from_str(&user)?;
            if session.token != token {
                eyre::bail!("persisted token does not match persisted identity");
            }
            Ok(Some(session))
        }
        _ => eyre::bail!("only half of the session was persisted"),
    }
}

fn clear_persisted(storage: &dyn KeyValueStore) {
    // Token first: an identity without a token is inert.
    for key in [TOKEN_KEY, USER_KEY] {
        if let Err(err) = storage.remove(key) {
            warn!("failed to remove {key}: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FileStore, MemoryStore};
    use uuid::Uuid;

    fn session(token: &str) -> Session {
        Session {
            id: Uuid::new_v4(),
            token: token.into(),
            username: "ada".into(),
            email: "ada@example.com".into(),
            role: Role::Regular,
        }
    }

    #[test]
    fn starts_anonymous_without_storage() {
        let store = SessionStore::restore(Box::new(MemoryStore::new()));
        assert!(store.current().is_none());
        assert!(store.token().is_none());
        assert!(!store.is_admin());
    }

    #[test]
    fn restores_persisted_session() {
        let dir = tempfile::TempDir::new().unwrap();
        let s = session("tok-1");
        {
            let store = SessionStore::restore(Box::new(FileStore::new(dir.path()).unwrap()));
            store.establish(s.clone()).unwrap();
        }

        let store = SessionStore::restore(Box::new(FileStore::new(dir.path()).unwrap()));
        assert_eq!(store.current(), Some(s));
        assert_eq!(store.token().as_deref(), Some("tok-1"));
    }

    #[test]
    fn token_without_identity_is_discarded() {
        let storage = MemoryStore::new();
        storage.set(TOKEN_KEY, "orphan").unwrap();

        let store = SessionStore::restore(Box::new(storage));
        assert!(store.current().is_none());
        assert!(store.storage.get(TOKEN_KEY).unwrap().is_none());
    }

    #[test]
    fn mismatched_token_is_discarded() {
        let storage = MemoryStore::new();
        storage
            .set(USER_KEY, &serde_json::to_string(&session("a")).unwrap())
            .unwrap();
        storage.set(TOKEN_KEY, "b").unwrap();

        let store = SessionStore::restore(Box::new(storage));
        assert!(store.current().is_none());
        assert!(store.storage.get(USER_KEY).unwrap().is_none());
    }

    #[test]
    fn garbage_identity_is_discarded() {
        let storage = MemoryStore::new();
        storage.set(USER_KEY, "{not json").unwrap();
        storage.set(TOKEN_KEY, "t").unwrap();

        let store = SessionStore::restore(Box::new(storage));
        assert!(store.current().is_none());
    }

    #[test]
    fn establish_publishes_before_returning() {
        let store = SessionStore::restore(Box::new(MemoryStore::new()));
        let mut rx = store.subscribe();

        store.establish(session("fresh")).unwrap();

        assert!(rx.has_changed().unwrap());
        assert_eq!(
            rx.borrow_and_update().as_ref().map(|s| s.token.as_str()),
            Some("fresh")
        );
    }

    #[test]
    fn login_then_logout_leaves_nothing_behind() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = SessionStore::restore(Box::new(FileStore::new(dir.path()).unwrap()));

        store.establish(session("t")).unwrap();
        assert!(store.logout(None));

        assert!(store.current().is_none());
        assert!(!dir.path().join(TOKEN_KEY).exists());
        assert!(!dir.path().join(USER_KEY).exists());
    }

    #[test]
    fn logout_is_idempotent() {
        let store = SessionStore::restore(Box::new(MemoryStore::new()));
        let mut events = store.events();
        store.establish(session("t")).unwrap();

        assert!(store.logout(Some("bye")));
        assert!(!store.logout(Some("bye")));

        let mut ended = 0;
        let mut redirects = 0;
        while let Ok(event) = events.try_recv() {
            match event {
                AuthEvent::SessionEnded => ended += 1,
                AuthEvent::RedirectToLogin { notice } => {
                    assert_eq!(notice.as_deref(), Some("bye"));
                    redirects += 1;
                }
                AuthEvent::LoggedIn(_) => {}
            }
        }
        assert_eq!(ended, 1);
        assert_eq!(redirects, 2);
    }

    #[test]
    fn admin_role_is_reported() {
        let store = SessionStore::restore(Box::new(MemoryStore::new()));
        let mut s = session("t");
        s.role = Role::Admin;
        store.establish(s).unwrap();
        assert!(store.is_admin());
    }
}
