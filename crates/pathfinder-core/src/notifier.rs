//! Session change notifications
//!
//! One internal publish/subscribe channel for login state. Synchronous
//! callbacks registered with [`Notifier::on_change`] run inline on publish;
//! async consumers (the UI event loop) take a broadcast receiver from
//! [`Notifier::subscribe`]. Changes made by another process only arrive
//! here through the storage watcher as [`SessionEvent::ExternalChange`].

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};

use tokio::sync::broadcast;
use tracing::debug;

pub const DEFAULT_EVENT_BUFFER: usize = 64;

/// Payload-free session events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    Login,
    Logout,
    /// The persisted profile changed outside this process
    ExternalChange,
}

type Callback = Arc<dyn Fn(SessionEvent) + Send + Sync>;
type CallbackTable = Mutex<BTreeMap<u64, Callback>>;

pub struct Notifier {
    sender: broadcast::Sender<SessionEvent>,
    callbacks: Arc<CallbackTable>,
    next_id: AtomicU64,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_BUFFER)
    }
}

impl std::fmt::Debug for Notifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("receivers", &self.sender.receiver_count())
            .field("callbacks", &self.callback_count())
            .finish()
    }
}

impl Notifier {
    pub fn new(buffer: usize) -> Self {
        let (sender, _receiver) = broadcast::channel(buffer.max(1));
        Self {
            sender,
            callbacks: Arc::new(Mutex::new(BTreeMap::new())),
            next_id: AtomicU64::new(0),
        }
    }

    pub fn notify_login(&self) {
        self.publish(SessionEvent::Login);
    }

    pub fn notify_logout(&self) {
        self.publish(SessionEvent::Logout);
    }

    pub fn notify_external_change(&self) {
        self.publish(SessionEvent::ExternalChange);
    }

    /// Register a callback. It stays registered until the returned
    /// subscription is dropped.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn on_change<F>(&self, callback: F) -> Subscription
    where
        F: Fn(SessionEvent) + Send + Sync + 'static,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.lock_callbacks().insert(id, Arc::new(callback));
        Subscription {
            id,
            callbacks: Arc::downgrade(&self.callbacks),
        }
    }

    /// Receiver for async consumers; sees events published after this call
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.sender.subscribe()
    }

    pub fn callback_count(&self) -> usize {
        self.lock_callbacks().len()
    }

    fn publish(&self, event: SessionEvent) {
        // Snapshot so a callback may drop its own subscription without deadlocking
        let callbacks: Vec<Callback> = self.lock_callbacks().values().cloned().collect();
        debug!(?event, callbacks = callbacks.len(), receivers = self.sender.receiver_count(), "publishing session event");

        for callback in callbacks {
            callback(event);
        }
        // No receivers is fine
        let _ = self.sender.send(event);
    }

    fn lock_callbacks(&self) -> std::sync::MutexGuard<'_, BTreeMap<u64, Callback>> {
        self.callbacks.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Handle for a callback registration; unsubscribes on drop
pub struct Subscription {
    id: u64,
    callbacks: Weak<CallbackTable>,
}

impl Subscription {
    pub fn unsubscribe(self) {
        // Drop does the work
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(callbacks) = self.callbacks.upgrade() {
            callbacks
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .remove(&self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    fn counter() -> (Arc<AtomicUsize>, impl Fn(SessionEvent) + Send + Sync + 'static) {
        let count = Arc::new(AtomicUsize::new(0));
        let c = count.clone();
        (count, move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn test_callback_registered_before_notify_sees_it() {
        let notifier = Notifier::default();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let _sub = notifier.on_change(move |e| sink.lock().unwrap().push(e));

        notifier.notify_login();
        notifier.notify_logout();

        assert_eq!(*seen.lock().unwrap(), vec![SessionEvent::Login, SessionEvent::Logout]);
    }

    #[test]
    fn test_dropped_subscription_is_not_invoked() {
        let notifier = Notifier::default();
        let (count, callback) = counter();
        let sub = notifier.on_change(callback);
        assert_eq!(notifier.callback_count(), 1);

        drop(sub);
        notifier.notify_login();

        assert_eq!(count.load(Ordering::SeqCst), 0);
        assert_eq!(notifier.callback_count(), 0);
    }

    #[test]
    fn test_explicit_unsubscribe() {
        let notifier = Notifier::default();
        let (count, callback) = counter();
        let sub = notifier.on_change(callback);
        notifier.notify_login();
        sub.unsubscribe();
        notifier.notify_login();
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_subscription_outliving_notifier_drops_cleanly() {
        let notifier = Notifier::default();
        let (_count, callback) = counter();
        let sub = notifier.on_change(callback);
        drop(notifier);
        drop(sub);
    }

    #[tokio::test]
    async fn test_async_receiver_gets_events_in_order() {
        let notifier = Notifier::default();
        let mut rx = notifier.subscribe();

        notifier.notify_login();
        notifier.notify_external_change();
        notifier.notify_logout();

        assert_eq!(rx.recv().await.unwrap(), SessionEvent::Login);
        assert_eq!(rx.recv().await.unwrap(), SessionEvent::ExternalChange);
        assert_eq!(rx.recv().await.unwrap(), SessionEvent::Logout);
    }

    #[test]
    fn test_publish_without_receivers_does_not_panic() {
        let notifier = Notifier::new(0);
        notifier.notify_logout();
    }
}
