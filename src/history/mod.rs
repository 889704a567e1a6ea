//! Bounded undo/redo history management.

mod manager;

pub use manager::{Applied, HistoryConfig, HistoryManager};
