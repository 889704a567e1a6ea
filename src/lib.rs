//! # Rewind
//!
//! A bounded undo/redo history engine: an entity's state is captured into
//! immutable snapshots, held in an ordered, capacity-limited history, and
//! restorable on demand, with observers notified of every transition.
//!
//! ## Core Concepts
//!
//! - **Snapshots**: Opaque, immutable captures of entity state
//! - **Versioned entities**: The only code that can read a snapshot's payload
//! - **History manager**: Bounded undo history, redo history, FIFO eviction
//! - **Change notifier**: Ordered observer fan-out after each transition
//!
//! ## Example
//!
//! ```ignore
//! use rewind::{HistoryConfig, HistoryManager, Versioned};
//!
//! let mut history = HistoryManager::new(document, HistoryConfig::with_capacity(100))?;
//!
//! // After each user action
//! history.entity_mut().insert("hello");
//! history.checkpoint();
//!
//! // Ctrl+Z / Ctrl+Y
//! if history.can_undo() {
//!     history.undo()?;
//! }
//! history.redo()?;
//! ```

pub mod entity;
pub mod error;
pub mod history;
pub mod notify;
pub mod snapshot;
pub mod types;

// Re-exports
pub use entity::{DynState, Versioned};
pub use error::{HistoryError, Result};
pub use history::{Applied, HistoryConfig, HistoryManager};
pub use notify::{
    ChangeNotifier, EventsHandle, HistoryEvent, NotifyFailure, ObserverCallback, ObserverError,
    ObserverId,
};
pub use snapshot::Snapshot;
pub use types::{OperationKind, Timestamp};
