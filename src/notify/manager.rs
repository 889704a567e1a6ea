//! Observer registry and notification fan-out.

use crossbeam_channel::bounded;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::warn;

use super::types::{
    EventsHandle, HistoryEvent, NotifyFailure, ObserverCallback, ObserverError, ObserverId,
};

/// Registry of observers notified on every history transition.
///
/// Observers are invoked in registration order. The registry is internally
/// synchronized so handles can be managed from anywhere, including from
/// inside a running callback; registration changes made during a fan-out
/// take effect on the next round.
pub struct ChangeNotifier {
    /// Registered observers, in registration order.
    observers: RwLock<Vec<(ObserverId, ObserverCallback)>>,
    /// Counter for generating observer IDs.
    next_id: AtomicU64,
}

impl ChangeNotifier {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            observers: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Register an observer callback. Returns a token for `unsubscribe`.
    ///
    /// Registering the same `Arc` twice is a no-op returning the existing
    /// token; distinct `Arc`s are distinct observers even if they wrap
    /// equivalent closures.
    pub fn subscribe(&self, callback: ObserverCallback) -> ObserverId {
        let mut observers = self.observers.write();

        if let Some((id, _)) = observers
            .iter()
            .find(|(_, existing)| Arc::ptr_eq(existing, &callback))
        {
            return *id;
        }

        let id = ObserverId(self.next_id.fetch_add(1, Ordering::SeqCst));
        observers.push((id, callback));
        id
    }

    /// Register a plain closure as an observer.
    pub fn subscribe_fn<F>(&self, callback: F) -> ObserverId
    where
        F: Fn(&HistoryEvent) -> Result<(), ObserverError> + Send + Sync + 'static,
    {
        self.subscribe(Arc::new(callback))
    }

    /// Register a channel-backed observer with a bounded buffer.
    ///
    /// Events are `try_send`-delivered; a full or disconnected channel
    /// surfaces as that observer's failure in the triggering operation's
    /// aggregate, and the observer stays registered until unsubscribed.
    pub fn subscribe_channel(&self, buffer_size: usize) -> EventsHandle {
        let (sender, receiver) = bounded(buffer_size);

        let id = self.subscribe(Arc::new(move |event: &HistoryEvent| {
            sender
                .try_send(event.clone())
                .map_err(|e| -> ObserverError {
                    match e {
                        crossbeam_channel::TrySendError::Full(_) => "event buffer full".into(),
                        crossbeam_channel::TrySendError::Disconnected(_) => {
                            "event receiver disconnected".into()
                        }
                    }
                })
        }));

        EventsHandle { id, receiver }
    }

    /// Remove an observer. No-op if already removed.
    pub fn unsubscribe(&self, id: ObserverId) {
        self.observers.write().retain(|(oid, _)| *oid != id);
    }

    /// Number of registered observers.
    pub fn observer_count(&self) -> usize {
        self.observers.read().len()
    }

    /// Invoke every registered observer with `event`, in registration order.
    ///
    /// Iterates over a fixed snapshot of the registry taken before the
    /// first call, so re-entrant subscribe/unsubscribe cannot affect the
    /// current round. A failing observer never prevents later observers
    /// from running; all failures are returned as an aggregate.
    pub fn notify_all(&self, event: &HistoryEvent) -> Vec<NotifyFailure> {
        let snapshot: Vec<(ObserverId, ObserverCallback)> = self
            .observers
            .read()
            .iter()
            .map(|(id, cb)| (*id, Arc::clone(cb)))
            .collect();

        let mut failures = Vec::new();
        for (id, callback) in snapshot {
            if let Err(error) = callback(event) {
                warn!(observer = id.0, kind = %event.kind, %error, "observer callback failed");
                failures.push(NotifyFailure {
                    observer: id,
                    error,
                });
            }
        }
        failures
    }
}

impl Default for ChangeNotifier {
    fn default() -> Self {
        Self::new()
    }
}
