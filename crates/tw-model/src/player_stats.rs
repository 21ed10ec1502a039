//! Player statistics (spec §3 "Player Stats", §4.12 "Info Panel & Quick Stats").

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CargoHolds {
    pub total: u32,
    pub ore: u32,
    pub org: u32,
    pub equ: u32,
    pub col: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ordnance {
    pub photons: u32,
    pub armids: u32,
    pub limpets: u32,
    pub gen_torps: u32,
    pub atomics: u32,
    pub corbomite: u32,
    pub eprobes: u32,
    pub mine_disr: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerFlags {
    pub twarp_type: u8,
    pub cloaks: u32,
    pub beacons: u32,
    pub psychic_probe: bool,
    pub planet_scanner: bool,
    pub scan_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerIdentity {
    pub alignment: i32,
    pub experience: u64,
    pub corp: Option<String>,
    pub ship_number: u32,
    pub ship_class: Option<String>,
    pub player_name: Option<String>,
    pub current_sector: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub turns: u64,
    pub credits: i64,
    pub fighters: u64,
    pub shields: u32,
    pub holds: CargoHolds,
    pub ordnance: Ordnance,
    pub flags: PlayerFlags,
    pub identity: PlayerIdentity,
}

/// The database column identifiers from the glossary, used by the
/// update-tracker facility (`tw-store::GameStore::apply_player_stat_updates`)
/// to apply partial writes atomically without the store needing to know
/// about `PlayerStats`'s Rust shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerStatColumn {
    Turns,
    Credits,
    Fighters,
    Shields,
    TotalHolds,
    OreHolds,
    OrgHolds,
    EquHolds,
    ColHolds,
    Photons,
    Armids,
    Limpets,
    GenTorps,
    TwarpType,
    Cloaks,
    Beacons,
    Atomics,
    Corbomite,
    Eprobes,
    MineDisr,
    Alignment,
    Experience,
    Corp,
    ShipNumber,
    PsychicProbe,
    PlanetScanner,
    ScanType,
    ShipClass,
    CurrentSector,
    PlayerName,
}

/// A typed value carried alongside a [`PlayerStatColumn`] for a partial
/// store update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ColumnValue {
    Int(i64),
    UInt(u64),
    Bool(bool),
    Text(String),
    None,
}
