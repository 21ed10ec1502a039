//! Mine groups and sector fighter groups (spec §3, §4.10).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MineKind {
    Armid,
    Limpet,
}

impl MineKind {
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "Armid" => Some(Self::Armid),
            "Limpet" => Some(Self::Limpet),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MineGroup {
    pub kind: MineKind,
    pub quantity: u32,
    pub owner: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FighterKind {
    Offensive,
    Defensive,
    Toll,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorFighterGroup {
    pub owner: String,
    pub quantity: u32,
    pub kind: FighterKind,
}
