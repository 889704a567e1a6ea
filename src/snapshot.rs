//! Opaque snapshot values.

use crate::types::Timestamp;
use std::fmt;

/// An immutable capture of an entity's state at one instant.
///
/// A snapshot is produced only by the history manager calling
/// [`Versioned::capture`](crate::entity::Versioned::capture) and consumed
/// only through [`Versioned::restore`](crate::entity::Versioned::restore).
/// The payload is deliberately inaccessible outside the crate: everything
/// else holds snapshots as opaque handles.
pub struct Snapshot<S> {
    payload: S,
    timestamp: Timestamp,
    label: Option<String>,
}

impl<S> Snapshot<S> {
    pub(crate) fn new(payload: S, label: Option<String>) -> Self {
        Self {
            payload,
            timestamp: Timestamp::now(),
            label,
        }
    }

    /// When this snapshot was captured.
    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    /// Optional human-readable description, set at checkpoint time.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub(crate) fn payload(&self) -> &S {
        &self.payload
    }
}

impl<S> fmt::Debug for Snapshot<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Snapshot")
            .field("timestamp", &self.timestamp)
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}
