//! The stateful entity contract.

use crate::error::{HistoryError, Result};
use std::any::{type_name, Any};
use std::fmt;

/// An entity whose state can be captured and restored.
///
/// Exactly one entity is bound to one
/// [`HistoryManager`](crate::history::HistoryManager) for the lifetime of
/// that manager. The engine never inspects `State` — it only moves captured
/// values between the history sequences and hands them back for restoration.
pub trait Versioned {
    /// Owned payload describing one moment of the entity's state.
    ///
    /// `capture` must return an independent deep copy: no `Rc<RefCell<..>>`
    /// or other shared interior mutability reaching back into the live
    /// entity, so later mutation cannot corrupt a stored snapshot.
    type State;

    /// Capture the current state. Must be a pure read and always succeed.
    fn capture(&self) -> Self::State;

    /// Overwrite the entity's state with a copy of `state`.
    ///
    /// Must succeed for any payload this entity produced via `capture`. On
    /// `Err` the entity must be left exactly as it was — no partial
    /// restores. Statically-typed entities can simply clone the fields in
    /// and return `Ok(())`.
    fn restore(&mut self, state: &Self::State) -> Result<()>;
}

/// Dynamically-typed snapshot payload.
///
/// For entities whose captured shape can change at runtime (plugin state,
/// schema-driven documents). Restoring checks that the payload is the type
/// the entity currently expects and reports
/// [`HistoryError::IncompatibleSnapshot`] otherwise — the runtime
/// "is this snapshot mine?" check that the generic API makes unnecessary
/// for fixed-shape entities.
pub struct DynState {
    value: Box<dyn Any>,
    type_name: &'static str,
}

impl DynState {
    /// Wrap an owned value.
    pub fn new<T: Any>(value: T) -> Self {
        Self {
            value: Box::new(value),
            type_name: type_name::<T>(),
        }
    }

    /// Name of the wrapped type, as captured.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Borrow the wrapped value as `T`, or report an incompatible snapshot.
    pub fn downcast_ref<T: Any>(&self) -> Result<&T> {
        self.value
            .downcast_ref::<T>()
            .ok_or(HistoryError::IncompatibleSnapshot {
                expected: type_name::<T>(),
                got: self.type_name,
            })
    }
}

impl fmt::Debug for DynState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DynState({})", self.type_name)
    }
}
