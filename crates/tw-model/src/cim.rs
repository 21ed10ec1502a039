//! CIM (Computer Interrogation Mode) accumulator rows (spec §3, §4.13).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CimPortRow {
    pub sector: u32,
    /// Ore, organics, equipment, in that order.
    pub amounts: [u32; 3],
    pub percents: [u8; 3],
    /// `true` iff the port is buying that commodity (amount carried a
    /// leading minus sign in the dump).
    pub buying: [bool; 3],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CimWarpRow {
    pub sector: u32,
    pub warps: Vec<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CimTables {
    pub ports: Vec<CimPortRow>,
    pub warps: Vec<CimWarpRow>,
}

impl CimTables {
    pub fn push_port(&mut self, row: CimPortRow) {
        self.ports.push(row);
    }

    pub fn push_warp(&mut self, row: CimWarpRow) {
        self.warps.push(row);
    }

    pub fn clear(&mut self) {
        self.ports.clear();
        self.warps.clear();
    }
}
