//! Login state derived from the persisted profile
//!
//! There is no separate "logged in" flag anywhere: the session is active
//! exactly when the profile key holds a parseable [`Profile`]. Every read
//! goes back to storage, so another process clearing the key is seen on
//! the next check.

use std::sync::Arc;

use tracing::{info, warn};

use crate::error::Result;
use crate::notifier::Notifier;
use crate::profile::Profile;
use crate::storage::KeyValueStorage;

/// Storage key holding the JSON profile
pub const PROFILE_KEY: &str = "pathfinder.profile";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Unauthenticated,
    Authenticated,
}

#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn KeyValueStorage>,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    /// Persist the profile, replacing any previous one
    pub fn set(&self, profile: &Profile) -> Result<()> {
        let json = serde_json::to_string(profile)?;
        self.storage.set_item(PROFILE_KEY, &json)
    }

    /// Current profile; unreadable or corrupt storage reads as logged out
    pub fn get(&self) -> Option<Profile> {
        let raw = self.raw()?;
        match serde_json::from_str(&raw) {
            Ok(profile) => Some(profile),
            Err(e) => {
                warn!(error = %e, key = PROFILE_KEY, "stored profile is not valid JSON, treating as logged out");
                None
            }
        }
    }

    pub fn clear(&self) -> Result<()> {
        self.storage.remove_item(PROFILE_KEY)
    }

    pub fn is_authenticated(&self) -> bool {
        self.get().is_some()
    }

    pub fn auth_state(&self) -> AuthState {
        if self.is_authenticated() {
            AuthState::Authenticated
        } else {
            AuthState::Unauthenticated
        }
    }

    /// Raw stored value, used by the watcher to detect outside writes
    pub fn raw(&self) -> Option<String> {
        match self.storage.get_item(PROFILE_KEY) {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "profile storage unavailable, treating as logged out");
                None
            }
        }
    }
}

/// Shared session handle injected into every consumer
#[derive(Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    store: SessionStore,
    notifier: Notifier,
}

impl Session {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self::with_notifier(storage, Notifier::default())
    }

    pub fn with_notifier(storage: Arc<dyn KeyValueStorage>, notifier: Notifier) -> Self {
        Self {
            inner: Arc::new(SessionInner {
                store: SessionStore::new(storage),
                notifier,
            }),
        }
    }

    pub fn store(&self) -> &SessionStore {
        &self.inner.store
    }

    pub fn notifier(&self) -> &Notifier {
        &self.inner.notifier
    }

    pub fn profile(&self) -> Option<Profile> {
        self.inner.store.get()
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.store.is_authenticated()
    }

    pub fn auth_state(&self) -> AuthState {
        self.inner.store.auth_state()
    }

    /// Persist the profile and announce the login
    pub fn sign_in(&self, profile: &Profile) -> Result<()> {
        self.inner.store.set(profile)?;
        info!(name = profile.display_name(), "profile saved, session active");
        self.inner.notifier.notify_login();
        Ok(())
    }

    /// Remove the profile and announce the logout
    pub fn sign_out(&self) -> Result<()> {
        self.inner.store.clear()?;
        info!("profile removed, session inactive");
        self.inner.notifier.notify_logout();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifier::SessionEvent;
    use crate::storage::{FileStorage, MemoryStorage};
    use std::sync::Mutex;
    use tempfile::TempDir;

    fn profile() -> Profile {
        Profile {
            name: "Sam".to_string(),
            preferred_programming_language: "Python".to_string(),
            skills: ["SQL".to_string()].into_iter().collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_set_get_clear() {
        let store = SessionStore::new(Arc::new(MemoryStorage::new()));
        assert_eq!(store.get(), None);
        assert_eq!(store.auth_state(), AuthState::Unauthenticated);

        store.set(&profile()).unwrap();
        assert_eq!(store.get(), Some(profile()));
        assert!(store.is_authenticated());

        store.clear().unwrap();
        assert_eq!(store.get(), None);
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_set_overwrites_wholesale() {
        let store = SessionStore::new(Arc::new(MemoryStorage::new()));
        let mut first = profile();
        first.bio = "old bio".to_string();
        store.set(&first).unwrap();

        let second = profile();
        store.set(&second).unwrap();
        assert_eq!(store.get().unwrap().bio, "");
    }

    #[test]
    fn test_corrupt_value_reads_as_logged_out() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set_item(PROFILE_KEY, "{\"skills\": oops").unwrap();
        let store = SessionStore::new(storage);
        assert_eq!(store.get(), None);
        assert_eq!(store.auth_state(), AuthState::Unauthenticated);
    }

    #[test]
    fn test_unavailable_storage_reads_as_logged_out() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join(format!("{}.json", PROFILE_KEY))).unwrap();
        let store = SessionStore::new(Arc::new(FileStorage::new(dir.path())));
        assert!(!store.is_authenticated());
        assert!(store.set(&profile()).is_err());
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_sign_in_and_out_publish_events() {
        let session = Session::new(Arc::new(MemoryStorage::new()));
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let _sub = session.notifier().on_change(move |e| sink.lock().unwrap().push(e));

        session.sign_in(&profile()).unwrap();
        assert!(session.is_authenticated());
        session.sign_out().unwrap();
        assert!(!session.is_authenticated());

        assert_eq!(*seen.lock().unwrap(), vec![SessionEvent::Login, SessionEvent::Logout]);
    }

    #[test]
    fn test_failed_sign_in_does_not_publish() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join(format!("{}.json", PROFILE_KEY))).unwrap();
        let session = Session::new(Arc::new(FileStorage::new(dir.path())));
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let _sub = session.notifier().on_change(move |e| sink.lock().unwrap().push(e));

        assert!(session.sign_in(&profile()).is_err());
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_session_clones_share_state() {
        let session = Session::new(Arc::new(MemoryStorage::new()));
        let other = session.clone();
        session.sign_in(&profile()).unwrap();
        assert_eq!(other.profile().map(|p| p.name), Some("Sam".to_string()));
    }
}
