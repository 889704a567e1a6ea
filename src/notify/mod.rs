//! Change notification: observer registry and history events.

mod manager;
mod types;

pub use manager::ChangeNotifier;
pub use types::{
    EventsHandle, HistoryEvent, NotifyFailure, ObserverCallback, ObserverError, ObserverId,
};
