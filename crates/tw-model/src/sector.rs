//! Sector record (spec §3 "Sector", §4.17 "Sector Completion").

use serde::{Deserialize, Serialize};
use std::time::SystemTime;

use crate::mine::{MineGroup, SectorFighterGroup};
use crate::planet::Planet;
use crate::port::Port;
use crate::trader::{Ship, Trader};

/// Exploration depth. Declaration order is the rank order (`No < Calc <
/// Density < Holo`); the derived `PartialOrd`/`Ord` implement the monotone
/// comparison used by the "Monotone exploration" invariant (spec §8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ExplorationStatus {
    No,
    Calc,
    Density,
    Holo,
}

impl Default for ExplorationStatus {
    fn default() -> Self {
        Self::No
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sector {
    pub id: u32,
    pub constellation: String,
    pub beacon: Option<String>,
    pub navhaz_percent: u8,
    pub navhaz_raw: u32,
    pub anomaly: bool,
    pub density: i64,
    /// Informational warp-count reported by a density scan; never derived
    /// from `warps.len()` and never used to populate `warps` (spec §9).
    pub warp_count: u8,
    pub warps: [u32; 6],
    pub exploration: ExplorationStatus,
    #[serde(skip)]
    pub last_update: Option<SystemTime>,
    pub ships: Vec<Ship>,
    pub traders: Vec<Trader>,
    pub planets: Vec<Planet>,
    pub mines: Vec<MineGroup>,
    pub fighters: Option<SectorFighterGroup>,
    pub port: Option<Port>,
}

impl Sector {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            constellation: String::new(),
            beacon: None,
            navhaz_percent: 0,
            navhaz_raw: 0,
            anomaly: false,
            density: 0,
            warp_count: 0,
            warps: [0; 6],
            exploration: ExplorationStatus::No,
            last_update: None,
            ships: Vec::new(),
            traders: Vec::new(),
            planets: Vec::new(),
            mines: Vec::new(),
            fighters: None,
            port: None,
        }
    }

    /// Upgrade `exploration` only if `candidate` ranks higher, preserving
    /// the monotone-upgrade invariant (spec §3, §8).
    pub fn upgrade_exploration(&mut self, candidate: ExplorationStatus) {
        if candidate > self.exploration {
            self.exploration = candidate;
        }
    }

    /// Store a warp list, left-padding the remainder with zero and enforcing
    /// "slot n nonzero implies slot n-1 nonzero" by writing only a
    /// contiguous, non-zero, order-preserving prefix.
    pub fn set_warps(&mut self, warps: &[u32]) {
        let mut slots = [0u32; 6];
        let mut i = 0;
        for &w in warps.iter().take(6) {
            if w == 0 {
                break;
            }
            slots[i] = w;
            i += 1;
        }
        self.warps = slots;
    }

    pub fn touch(&mut self) {
        self.last_update = Some(SystemTime::now());
    }
}
