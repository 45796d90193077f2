//! Fallback detection of profile changes made by other processes
//!
//! Polls the stored profile value and publishes
//! [`SessionEvent::ExternalChange`] when it differs from the last value this
//! process knows about. Own sign in/out events reset the baseline so they
//! are not reported twice.

use std::time::Duration;

use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::notifier::SessionEvent;
use crate::session::{Session, SessionStore};

pub const DEFAULT_WATCH_INTERVAL: Duration = Duration::from_millis(1000);
pub const MIN_WATCH_INTERVAL: Duration = Duration::from_millis(50);

/// Last observed raw value of the profile key
#[derive(Debug, Default)]
pub struct WatchState {
    last: Option<String>,
}

impl WatchState {
    pub fn new(store: &SessionStore) -> Self {
        Self { last: store.raw() }
    }

    /// Re-read storage; true when the value changed since the last poll
    pub fn poll(&mut self, store: &SessionStore) -> bool {
        let current = store.raw();
        if current != self.last {
            self.last = current;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self, store: &SessionStore) {
        self.last = store.raw();
    }
}

/// Running watcher task; stops when dropped
pub struct WatcherHandle {
    task: JoinHandle<()>,
}

impl WatcherHandle {
    pub fn stop(self) {}
}

impl Drop for WatcherHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Start polling; intervals below [`MIN_WATCH_INTERVAL`] are raised to it
pub fn spawn(session: Session, interval: Duration) -> WatcherHandle {
    let interval = interval.max(MIN_WATCH_INTERVAL);
    let mut own_events = session.notifier().subscribe();
    let task = tokio::spawn(async move {
        let mut state = WatchState::new(session.store());
        let mut ticker = tokio::time::interval(interval);
        info!(interval_ms = interval.as_millis() as u64, "profile watcher started");

        loop {
            // Own events first, so a tick never reports our own write
            tokio::select! {
                biased;
                event = own_events.recv() => match event {
                    Ok(SessionEvent::Login) | Ok(SessionEvent::Logout) => state.reset(session.store()),
                    Ok(SessionEvent::ExternalChange) => {}
                    Err(RecvError::Lagged(_)) => state.reset(session.store()),
                    Err(RecvError::Closed) => break,
                },
                _ = ticker.tick() => {
                    if state.poll(session.store()) {
                        debug!("profile changed outside this process");
                        session.notifier().notify_external_change();
                    }
                }
            }
        }
    });
    WatcherHandle { task }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::Profile;
    use crate::storage::FileStorage;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn profile(name: &str) -> Profile {
        Profile {
            name: name.to_string(),
            preferred_programming_language: "Go".to_string(),
            skills: ["Git".to_string()].into_iter().collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_poll_detects_write_from_other_handle() {
        let dir = TempDir::new().unwrap();
        let ours = Session::new(Arc::new(FileStorage::new(dir.path())));
        let theirs = Session::new(Arc::new(FileStorage::new(dir.path())));

        let mut state = WatchState::new(ours.store());
        assert!(!state.poll(ours.store()));

        theirs.sign_in(&profile("Other")).unwrap();
        assert!(state.poll(ours.store()));
        assert!(!state.poll(ours.store()));

        theirs.sign_out().unwrap();
        assert!(state.poll(ours.store()));
    }

    #[test]
    fn test_reset_absorbs_own_write() {
        let dir = TempDir::new().unwrap();
        let session = Session::new(Arc::new(FileStorage::new(dir.path())));
        let mut state = WatchState::new(session.store());

        session.sign_in(&profile("Me")).unwrap();
        state.reset(session.store());
        assert!(!state.poll(session.store()));
    }

    #[tokio::test]
    async fn test_zero_interval_is_clamped() {
        let dir = TempDir::new().unwrap();
        let ours = Session::new(Arc::new(FileStorage::new(dir.path())));
        let theirs = Session::new(Arc::new(FileStorage::new(dir.path())));
        let mut rx = ours.notifier().subscribe();

        let _watcher = spawn(ours.clone(), Duration::ZERO);
        tokio::time::sleep(Duration::from_millis(80)).await;
        theirs.sign_in(&profile("Other")).unwrap();

        let event = tokio::time::timeout(Duration::from_secs(2), rx.recv())
            .await
            .expect("watcher should still be running")
            .unwrap();
        assert_eq!(event, SessionEvent::ExternalChange);
    }

    #[tokio::test]
    async fn test_own_sign_out_is_not_reported_as_external() {
        let dir = TempDir::new().unwrap();
        let session = Session::new(Arc::new(FileStorage::new(dir.path())));
        session.sign_in(&profile("Me")).unwrap();
        let mut rx = session.notifier().subscribe();

        let _watcher = spawn(session.clone(), MIN_WATCH_INTERVAL);
        tokio::time::sleep(Duration::from_millis(120)).await;
        session.sign_out().unwrap();
        assert_eq!(rx.recv().await.unwrap(), SessionEvent::Logout);

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert!(matches!(
            rx.try_recv(),
            Err(tokio::sync::broadcast::error::TryRecvError::Empty)
        ));
    }

    #[tokio::test]
    async fn test_spawned_watcher_publishes_external_change() {
        let dir = TempDir::new().unwrap();
        let ours = Session::new(Arc::new(FileStorage::new(dir.path())));
        let theirs = Session::new(Arc::new(FileStorage::new(dir.path())));
        let mut rx = ours.notifier().subscribe();

        let _watcher = spawn(ours.clone(), Duration::from_millis(10));
        // Let the watcher record its baseline
        tokio::time::sleep(Duration::from_millis(30)).await;
        theirs.sign_in(&profile("Other")).unwrap();

        let event = tokio::time::timeout(Duration::from_secs(2), rx.recv())
            .await
            .expect("watcher should report the change")
            .unwrap();
        assert_eq!(event, SessionEvent::ExternalChange);
        assert!(ours.is_authenticated());
    }
}
