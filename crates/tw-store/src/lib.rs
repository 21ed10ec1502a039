//! The persistence contract (spec §6 "Persistence contract").
//!
//! The parser never knows the underlying storage engine — only this trait.
//! `InMemoryGameStore` is the reference implementation tests substitute in,
//! mirroring the teacher workspace's preference for swapping concrete
//! backends behind a small trait (e.g. `core-terminal::TerminalBackend`).

use std::collections::HashMap;

use thiserror::Error;
use tw_events::Message;
use tw_model::{ColumnValue, PlayerStatColumn, PlayerStats, Port, Sector};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("store is closed")]
    Closed,
    #[error("store backend error: {0}")]
    Backend(String),
}

/// A single `{column -> value}` update applied atomically by
/// [`GameStore::apply_player_stat_updates`].
pub type PlayerStatUpdate = (PlayerStatColumn, ColumnValue);

/// The relational store's operations, as invoked by the parser. Everything
/// else about the backing engine (schema, SQL dialect, connection pooling)
/// is out of scope (spec §1).
pub trait GameStore: Send {
    fn save_sector(&mut self, record: &Sector, id: u32) -> Result<(), StoreError>;
    fn load_sector(&mut self, id: u32) -> Result<Option<Sector>, StoreError>;
    fn save_port(&mut self, record: &Port, sector_id: u32) -> Result<(), StoreError>;
    fn load_port(&mut self, sector_id: u32) -> Result<Option<Port>, StoreError>;
    fn add_message_to_history(&mut self, message: &Message) -> Result<(), StoreError>;
    fn get_player_stats_info(&mut self) -> Result<PlayerStats, StoreError>;
    /// Apply a batch of `{column -> value}` updates atomically, without the
    /// caller needing to round-trip a full `PlayerStats` value.
    fn apply_player_stat_updates(
        &mut self,
        updates: &[PlayerStatUpdate],
    ) -> Result<(), StoreError>;
    fn is_open(&self) -> bool;
}

/// Reference in-memory implementation used by the crate's own tests and
/// available to any integration harness that needs a `GameStore` without a
/// real database.
#[derive(Debug, Default)]
pub struct InMemoryGameStore {
    sectors: HashMap<u32, Sector>,
    ports: HashMap<u32, Port>,
    messages: Vec<Message>,
    stats: PlayerStats,
    open: bool,
}

impl InMemoryGameStore {
    pub fn new() -> Self {
        Self {
            open: true,
            ..Default::default()
        }
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn reopen(&mut self) {
        self.open = true;
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn sector(&self, id: u32) -> Option<&Sector> {
        self.sectors.get(&id)
    }
}

impl GameStore for InMemoryGameStore {
    fn save_sector(&mut self, record: &Sector, id: u32) -> Result<(), StoreError> {
        if !self.open {
            return Err(StoreError::Closed);
        }
        self.sectors.insert(id, record.clone());
        Ok(())
    }

    fn load_sector(&mut self, id: u32) -> Result<Option<Sector>, StoreError> {
        if !self.open {
            return Err(StoreError::Closed);
        }
        Ok(self.sectors.get(&id).cloned())
    }

    fn save_port(&mut self, record: &Port, sector_id: u32) -> Result<(), StoreError> {
        if !self.open {
            return Err(StoreError::Closed);
        }
        self.ports.insert(sector_id, record.clone());
        Ok(())
    }

    fn load_port(&mut self, sector_id: u32) -> Result<Option<Port>, StoreError> {
        if !self.open {
            return Err(StoreError::Closed);
        }
        Ok(self.ports.get(&sector_id).cloned())
    }

    fn add_message_to_history(&mut self, message: &Message) -> Result<(), StoreError> {
        if !self.open {
            return Err(StoreError::Closed);
        }
        self.messages.push(message.clone());
        Ok(())
    }

    fn get_player_stats_info(&mut self) -> Result<PlayerStats, StoreError> {
        if !self.open {
            return Err(StoreError::Closed);
        }
        Ok(self.stats.clone())
    }

    fn apply_player_stat_updates(
        &mut self,
        updates: &[PlayerStatUpdate],
    ) -> Result<(), StoreError> {
        if !self.open {
            return Err(StoreError::Closed);
        }
        for (column, value) in updates {
            apply_one(&mut self.stats, *column, value);
        }
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.open
    }
}

fn apply_one(stats: &mut PlayerStats, column: PlayerStatColumn, value: &ColumnValue) {
    use PlayerStatColumn::*;
    let as_u64 = || match value {
        ColumnValue::UInt(v) => *v,
        ColumnValue::Int(v) => (*v).max(0) as u64,
        _ => 0,
    };
    let as_u32 = || as_u64() as u32;
    let as_i64 = || match value {
        ColumnValue::Int(v) => *v,
        ColumnValue::UInt(v) => *v as i64,
        _ => 0,
    };
    let as_bool = || matches!(value, ColumnValue::Bool(true));
    let as_text = || match value {
        ColumnValue::Text(s) => Some(s.clone()),
        _ => None,
    };

    match column {
        Turns => stats.turns = as_u64(),
        Credits => stats.credits = as_i64(),
        Fighters => stats.fighters = as_u64(),
        Shields => stats.shields = as_u32(),
        TotalHolds => stats.holds.total = as_u32(),
        OreHolds => stats.holds.ore = as_u32(),
        OrgHolds => stats.holds.org = as_u32(),
        EquHolds => stats.holds.equ = as_u32(),
        ColHolds => stats.holds.col = as_u32(),
        Photons => stats.ordnance.photons = as_u32(),
        Armids => stats.ordnance.armids = as_u32(),
        Limpets => stats.ordnance.limpets = as_u32(),
        GenTorps => stats.ordnance.gen_torps = as_u32(),
        TwarpType => stats.flags.twarp_type = as_u32() as u8,
        Cloaks => stats.flags.cloaks = as_u32(),
        Beacons => stats.flags.beacons = as_u32(),
        Atomics => stats.ordnance.atomics = as_u32(),
        Corbomite => stats.ordnance.corbomite = as_u32(),
        Eprobes => stats.ordnance.eprobes = as_u32(),
        MineDisr => stats.ordnance.mine_disr = as_u32(),
        Alignment => stats.identity.alignment = as_i64() as i32,
        Experience => stats.identity.experience = as_u64(),
        Corp => stats.identity.corp = as_text(),
        ShipNumber => stats.identity.ship_number = as_u32(),
        PsychicProbe => stats.flags.psychic_probe = as_bool(),
        PlanetScanner => stats.flags.planet_scanner = as_bool(),
        ScanType => stats.flags.scan_type = as_text(),
        ShipClass => stats.identity.ship_class = as_text(),
        CurrentSector => stats.identity.current_sector = match value {
            ColumnValue::UInt(v) => Some(*v as u32),
            ColumnValue::Int(v) if *v > 0 => Some(*v as u32),
            _ => None,
        },
        PlayerName => stats.identity.player_name = as_text(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tw_events::MessageKind;

    #[test]
    fn save_then_load_round_trips() {
        let mut store = InMemoryGameStore::new();
        let sector = Sector::new(42);
        store.save_sector(&sector, 42).unwrap();
        assert_eq!(store.load_sector(42).unwrap().unwrap().id, 42);
    }

    #[test]
    fn closed_store_errors_on_every_operation() {
        let mut store = InMemoryGameStore::new();
        store.close();
        assert!(matches!(
            store.save_sector(&Sector::new(1), 1),
            Err(StoreError::Closed)
        ));
        assert!(matches!(
            store.get_player_stats_info(),
            Err(StoreError::Closed)
        ));
    }

    #[test]
    fn partial_stat_update_only_touches_named_columns() {
        let mut store = InMemoryGameStore::new();
        store
            .apply_player_stat_updates(&[(PlayerStatColumn::Turns, ColumnValue::UInt(500))])
            .unwrap();
        let stats = store.get_player_stats_info().unwrap();
        assert_eq!(stats.turns, 500);
        assert_eq!(stats.credits, 0);
    }

    #[test]
    fn message_history_is_persisted() {
        let mut store = InMemoryGameStore::new();
        let msg = Message::new(MessageKind::Radio, "Kirk", "hailing frequencies open");
        store.add_message_to_history(&msg).unwrap();
        assert_eq!(store.messages().len(), 1);
    }
}
