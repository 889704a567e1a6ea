//! History manager: checkpoint, undo, redo, and eviction.

use crate::entity::Versioned;
use crate::error::{HistoryError, Result};
use crate::notify::{ChangeNotifier, HistoryEvent, NotifyFailure};
use crate::snapshot::Snapshot;
use crate::types::{OperationKind, Timestamp};
use std::collections::VecDeque;
use tracing::{debug, trace};

/// History manager configuration.
#[derive(Clone, Debug)]
pub struct HistoryConfig {
    /// Maximum undo history length. Must be at least 1; the oldest
    /// snapshot is evicted (dropped) when a push would exceed it.
    pub capacity: usize,

    /// Optional bound on redo history. `None` (the default) leaves redo
    /// unbounded — it can never exceed the number of undos performed.
    pub redo_capacity: Option<usize>,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            capacity: 64,
            redo_capacity: None,
        }
    }
}

impl HistoryConfig {
    /// Config with the given undo capacity and unbounded redo.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            ..Default::default()
        }
    }
}

/// Outcome of a committed history transition.
///
/// The transition itself has already taken effect; `notify_failures`
/// aggregates any observer callbacks that failed while being told about
/// it. Failed observers never roll the transition back.
#[derive(Debug)]
pub struct Applied {
    /// The event delivered to observers.
    pub event: HistoryEvent,

    /// Observers whose callbacks failed, in registration order.
    pub notify_failures: Vec<NotifyFailure>,
}

/// Bounded undo/redo history bound to a single entity.
///
/// Owns the entity, the two snapshot sequences, and a [`ChangeNotifier`].
/// After every successful transition the last undo entry is a snapshot of
/// the live state, so undo restores the predecessor checkpoint and redo
/// re-applies the one most recently undone.
///
/// Not internally thread-safe: one logical owner per instance. All
/// operations are synchronous and complete (or fail) immediately.
pub struct HistoryManager<E: Versioned> {
    /// The entity whose state is versioned.
    entity: E,

    /// Past snapshots, most recent last. Length never exceeds
    /// `config.capacity`.
    undo: VecDeque<Snapshot<E::State>>,

    /// Undone snapshots available for redo, most recent last. Invalidated
    /// by any new checkpoint.
    redo: VecDeque<Snapshot<E::State>>,

    config: HistoryConfig,

    notifier: ChangeNotifier,
}

impl<E: Versioned> HistoryManager<E> {
    /// Create a manager bound to `entity` with an empty notifier.
    pub fn new(entity: E, config: HistoryConfig) -> Result<Self> {
        Self::with_notifier(entity, config, ChangeNotifier::new())
    }

    /// Create a manager bound to `entity` with a pre-populated notifier.
    pub fn with_notifier(
        entity: E,
        config: HistoryConfig,
        notifier: ChangeNotifier,
    ) -> Result<Self> {
        if config.capacity < 1 {
            return Err(HistoryError::InvalidCapacity(config.capacity));
        }

        Ok(Self {
            entity,
            undo: VecDeque::with_capacity(config.capacity),
            redo: VecDeque::new(),
            config,
            notifier,
        })
    }

    // --- Entity access ---

    /// Borrow the entity.
    pub fn entity(&self) -> &E {
        &self.entity
    }

    /// Mutably borrow the entity. Mutations are not recorded until the
    /// next `checkpoint`.
    pub fn entity_mut(&mut self) -> &mut E {
        &mut self.entity
    }

    /// Consume the manager, dropping all history and returning the entity.
    pub fn into_entity(self) -> E {
        self.entity
    }

    /// The observer registry for this manager.
    pub fn notifier(&self) -> &ChangeNotifier {
        &self.notifier
    }

    // --- Queries ---

    /// Whether `undo` would succeed.
    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    /// Whether `redo` would succeed.
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Current undo history length.
    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    /// Current redo history length.
    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }

    /// Maximum undo history length.
    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    /// Labels of undo history entries, oldest first.
    pub fn undo_labels(&self) -> Vec<Option<&str>> {
        self.undo.iter().map(|s| s.label()).collect()
    }

    // --- Transitions ---

    /// Capture the current state and record it in undo history.
    ///
    /// Evicts the oldest snapshot if the push would exceed capacity and
    /// clears redo history: a new divergent action makes the old "future"
    /// unreachable. The whole transition commits before observers run.
    pub fn checkpoint(&mut self) -> Applied {
        self.checkpoint_inner(None)
    }

    /// Like [`checkpoint`](Self::checkpoint), attaching a human-readable
    /// label to the snapshot.
    pub fn checkpoint_with_label(&mut self, label: impl Into<String>) -> Applied {
        self.checkpoint_inner(Some(label.into()))
    }

    fn checkpoint_inner(&mut self, label: Option<String>) -> Applied {
        let snapshot = Snapshot::new(self.entity.capture(), label);
        self.push_undo(snapshot);
        self.redo.clear();

        self.notify(OperationKind::Checkpoint)
    }

    /// Restore the entity to the checkpoint before the most recent one.
    ///
    /// A capture of the *current* live state goes onto redo history — so
    /// mutations made since the last checkpoint survive an undo/redo round
    /// trip — then the most recent undo entry is dropped and the entry
    /// beneath it is restored. When no entry remains beneath (sole entry,
    /// or its predecessor was evicted) the dropped entry itself is
    /// restored, reverting the entity to its last checkpoint.
    ///
    /// Fails with [`HistoryError::EmptyHistory`] when undo history is
    /// empty; nothing changes and no notification fires.
    pub fn undo(&mut self) -> Result<Applied> {
        let popped = self.undo.pop_back().ok_or(HistoryError::EmptyHistory {
            op: OperationKind::Undo,
        })?;

        let current = Snapshot::new(self.entity.capture(), None);
        let restored = match self.undo.back() {
            Some(previous) => self.entity.restore(previous.payload()),
            // Sole entry or evicted predecessor: land on the last checkpoint.
            None => self.entity.restore(popped.payload()),
        };
        if let Err(e) = restored {
            // Entity unchanged per the restore contract; reinstate the
            // popped snapshot so the failed call has no effect.
            self.undo.push_back(popped);
            return Err(e);
        }

        self.redo.push_back(current);
        if let Some(bound) = self.config.redo_capacity {
            if self.redo.len() > bound {
                self.redo.pop_front();
                debug!(bound, "evicted oldest redo snapshot");
            }
        }

        Ok(self.notify(OperationKind::Undo))
    }

    /// Re-apply the checkpoint most recently undone.
    ///
    /// The last redo entry is restored and moved back onto undo history
    /// (evicting the oldest undo entry if at capacity).
    ///
    /// Fails with [`HistoryError::EmptyHistory`] when redo history is
    /// empty; nothing changes and no notification fires.
    pub fn redo(&mut self) -> Result<Applied> {
        let snapshot = self.redo.pop_back().ok_or(HistoryError::EmptyHistory {
            op: OperationKind::Redo,
        })?;

        if let Err(e) = self.entity.restore(snapshot.payload()) {
            self.redo.push_back(snapshot);
            return Err(e);
        }

        self.push_undo(snapshot);

        Ok(self.notify(OperationKind::Redo))
    }

    /// Empty both history sequences. The entity's live state is untouched.
    pub fn clear(&mut self) -> Applied {
        self.undo.clear();
        self.redo.clear();

        self.notify(OperationKind::Clear)
    }

    // --- Internals ---

    /// Push onto undo history, evicting the single oldest entry (strict
    /// FIFO) when over capacity.
    fn push_undo(&mut self, snapshot: Snapshot<E::State>) {
        self.undo.push_back(snapshot);
        if self.undo.len() > self.config.capacity {
            self.undo.pop_front();
            debug!(capacity = self.config.capacity, "evicted oldest undo snapshot");
        }
    }

    fn notify(&self, kind: OperationKind) -> Applied {
        let event = HistoryEvent {
            kind,
            undo_len: self.undo.len(),
            redo_len: self.redo.len(),
            timestamp: Timestamp::now(),
        };
        trace!(%kind, undo_len = event.undo_len, redo_len = event.redo_len, "history transition");

        let notify_failures = self.notifier.notify_all(&event);
        Applied {
            event,
            notify_failures,
        }
    }
}
