//! Plain data model for the TWGS protocol parser (spec §3).
//!
//! This crate holds types only — no parsing, no I/O, no persistence. It
//! mirrors the teacher workspace's `core-model`/`core-text` split: shared
//! vocabulary that every other crate in the workspace depends on.

mod alignment;
mod cim;
mod mine;
mod planet;
mod player_stats;
mod port;
mod sector;
mod trader;
pub mod validate;
mod version;

pub use alignment::Alignment;
pub use cim::{CimPortRow, CimTables, CimWarpRow};
pub use mine::{FighterKind, MineGroup, MineKind, SectorFighterGroup};
pub use planet::Planet;
pub use player_stats::{
    CargoHolds, ColumnValue, Ordnance, PlayerFlags, PlayerIdentity, PlayerStatColumn, PlayerStats,
};
pub use port::{class_from_pattern, pattern_from_class, Commodity, Port};
pub use sector::{ExplorationStatus, Sector};
pub use trader::{Ship, Trader};
pub use version::ServerVersion;
