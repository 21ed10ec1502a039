//! The `TuiObserver` contract (spec §6 "Observer contract").
//!
//! The parser never holds a concrete TUI/renderer type; it only knows this
//! trait. Implementors receive borrowed, already-materialized snapshots —
//! the parser deep-copies state before emitting (see §9 "Bounded mutable
//! state without sharing") so nothing an observer does after the call
//! returns can be observed by the parser.

use tw_model::{PlayerStats, Sector, Trader};

/// Database open/close transition payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseStateInfo {
    pub open: bool,
    pub detail: String,
}

/// Status used by `on_connection_status`/`on_script_status` pass-throughs.
/// The core never constructs these; they exist only so a single trait object
/// can serve the surrounding proxy's needs too.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusUpdate {
    pub message: String,
}

/// Error payload used by the pass-through error callbacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObserverError {
    pub message: String,
}

/// Callbacks the parser drives as it decodes and persists game state.
///
/// `on_connection_status`, `on_connection_error`, `on_script_status`, and
/// `on_script_error` are part of the contract but are never invoked by this
/// crate — they are here purely so a single implementor can satisfy both the
/// parser and the surrounding proxy without two trait objects. Default
/// (no-op) bodies let test doubles implement only what they exercise.
pub trait TuiObserver: Send {
    /// Decoded, ANSI-stripped text forwarded verbatim for display.
    fn on_raw_data(&mut self, _decoded: &str) {}

    /// Fired once per `sectorCompleted` (§4.17), after persistence.
    fn on_current_sector(&mut self, _sector: &Sector) {}

    /// Fired iff the completed sector collected at least one trader.
    fn on_trader_data(&mut self, _sector_id: u32, _traders: &[Trader]) {}

    /// Fired after a quick-stats line or a sealed info-panel block.
    fn on_player_stats(&mut self, _stats: &PlayerStats) {}

    /// Fired on store open/close transitions.
    fn on_database_state(&mut self, _info: &DatabaseStateInfo) {}

    fn on_connection_status(&mut self, _status: &StatusUpdate) {}
    fn on_connection_error(&mut self, _error: &ObserverError) {}
    fn on_script_status(&mut self, _status: &StatusUpdate) {}
    fn on_script_error(&mut self, _error: &ObserverError) {}
}

/// Observer that discards everything. Used when a caller has no TUI to
/// drive (e.g. headless persistence-only operation).
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl TuiObserver for NoopObserver {}
