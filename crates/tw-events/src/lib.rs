//! Event and observer types shared between the dispatcher and its host.
//!
//! This crate holds only data and a contract trait — no parsing logic lives
//! here, matching the teacher workspace's `core-events` crate (events/traits
//! only, no dispatch).

mod history;
mod observer;

pub use history::{Message, MessageHistory, MessageKind, DEFAULT_HISTORY_SIZE};
pub use observer::{DatabaseStateInfo, NoopObserver, ObserverError, StatusUpdate, TuiObserver};
