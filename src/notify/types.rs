//! Event and observer types for history notifications.

use crate::types::{OperationKind, Timestamp};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Event emitted after every successful history transition.
///
/// Carries the operation kind and the resulting sequence lengths — enough
/// for a UI to enable or disable undo/redo affordances without reaching
/// into the manager.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEvent {
    /// Which transition happened.
    pub kind: OperationKind,

    /// Length of undo history after the transition.
    pub undo_len: usize,

    /// Length of redo history after the transition.
    pub redo_len: usize,

    /// When the transition committed.
    pub timestamp: Timestamp,
}

/// Unique identifier for a registered observer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObserverId(pub u64);

impl fmt::Display for ObserverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error returned by a failing observer callback.
pub type ObserverError = Box<dyn std::error::Error + Send + Sync>;

/// Observer callback invoked on every transition.
pub type ObserverCallback = Arc<dyn Fn(&HistoryEvent) -> std::result::Result<(), ObserverError> + Send + Sync>;

/// One observer's failure during a notification round.
#[derive(Debug)]
pub struct NotifyFailure {
    /// The observer whose callback failed.
    pub observer: ObserverId,
    /// What it reported.
    pub error: ObserverError,
}

/// Handle to a channel-backed observer.
///
/// Created by [`ChangeNotifier::subscribe_channel`](super::ChangeNotifier::subscribe_channel);
/// events are delivered into a bounded channel instead of running observer
/// code inline.
pub struct EventsHandle {
    pub id: ObserverId,
    /// Channel to receive events.
    pub receiver: crossbeam_channel::Receiver<HistoryEvent>,
}

impl EventsHandle {
    /// Receive the next event (blocking).
    pub fn recv(&self) -> std::result::Result<HistoryEvent, crossbeam_channel::RecvError> {
        self.receiver.recv()
    }

    /// Try to receive an event (non-blocking).
    pub fn try_recv(&self) -> std::result::Result<HistoryEvent, crossbeam_channel::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Receive with timeout.
    pub fn recv_timeout(
        &self,
        timeout: std::time::Duration,
    ) -> std::result::Result<HistoryEvent, crossbeam_channel::RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }
}
