//! Error types for the history engine.

use crate::types::OperationKind;
use thiserror::Error;

/// Main error type for history operations.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// A history manager was constructed with a zero capacity.
    #[error("Invalid capacity: {0} (must be at least 1)")]
    InvalidCapacity(usize),

    /// Undo or redo was called with nothing to apply. The entity and both
    /// history sequences are unchanged and no notification fires.
    #[error("History is empty: nothing to {op}")]
    EmptyHistory { op: OperationKind },

    /// A restore was handed a payload the entity cannot interpret.
    ///
    /// Only reachable with dynamically-typed payloads such as
    /// [`DynState`](crate::entity::DynState); the generic API ties snapshots
    /// to their entity type at compile time.
    #[error("Incompatible snapshot: expected {expected}, got {got}")]
    IncompatibleSnapshot {
        expected: &'static str,
        got: &'static str,
    },
}

/// Result type for history operations.
pub type Result<T> = std::result::Result<T, HistoryError>;
