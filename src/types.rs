//! Core types for the history engine.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Microseconds since Unix epoch.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(pub i64);

impl Timestamp {
    /// Current time.
    pub fn now() -> Self {
        let duration = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        Timestamp(duration.as_micros() as i64)
    }
}

impl fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timestamp({})", self.0)
    }
}

/// Kind of history transition.
///
/// A closed set rather than free-form event names, so observers can match
/// exhaustively.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    /// Current state was captured and pushed onto undo history.
    Checkpoint,
    /// The most recent checkpoint was moved aside and its predecessor restored.
    Undo,
    /// A previously undone checkpoint was re-applied.
    Redo,
    /// Both history sequences were emptied.
    Clear,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OperationKind::Checkpoint => "checkpoint",
            OperationKind::Undo => "undo",
            OperationKind::Redo => "redo",
            OperationKind::Clear => "clear",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_ordering() {
        let a = Timestamp(1);
        let b = Timestamp(2);
        assert!(a < b);
    }

    #[test]
    fn test_operation_kind_display() {
        assert_eq!(OperationKind::Checkpoint.to_string(), "checkpoint");
        assert_eq!(OperationKind::Undo.to_string(), "undo");
        assert_eq!(OperationKind::Redo.to_string(), "redo");
        assert_eq!(OperationKind::Clear.to_string(), "clear");
    }

    #[test]
    fn test_operation_kind_serde_tag() {
        let json = serde_json::to_string(&OperationKind::Checkpoint).unwrap();
        assert_eq!(json, "\"checkpoint\"");
        let back: OperationKind = serde_json::from_str(&json).unwrap();
        assert_eq!(back, OperationKind::Checkpoint);
    }
}
