//! Port record and class derivation (spec §4.5).

use serde::{Deserialize, Serialize};

/// Commodity slot ordering used throughout the port/CIM model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commodity {
    Ore = 0,
    Organics = 1,
    Equipment = 2,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Port {
    pub name: String,
    /// 0 = unknown, 1..=8 = standard classes, 9 = Stargate ("???").
    pub class: u8,
    /// `true` at index *i* means the port is buying that commodity (`B`);
    /// `false` means selling (`S`).
    pub buying: [bool; 3],
    pub amounts: [u32; 3],
    pub percents: [u8; 3],
    pub build_time: u32,
    pub dead: bool,
}

impl Default for Port {
    fn default() -> Self {
        Self {
            name: String::new(),
            class: 0,
            buying: [false; 3],
            amounts: [0; 3],
            percents: [0; 3],
            build_time: 0,
            dead: false,
        }
    }
}

impl Port {
    pub fn dead_port() -> Self {
        Self {
            dead: true,
            ..Default::default()
        }
    }
}

/// Derive a port class (1..=9) from a three-letter Buy/Sell pattern
/// (`B`/`S` per commodity, ore/organics/equipment order), or the trailing
/// `???` Stargate marker. Unknown patterns return `0`.
///
/// Fixed mapping per spec §4.5:
/// BBS=1 BSB=2 SBB=3 SSB=4 SBS=5 BSS=6 SSS=7 BBB=8 ???=9
pub fn class_from_pattern(pattern: &str) -> u8 {
    match pattern {
        "BBS" => 1,
        "BSB" => 2,
        "SBB" => 3,
        "SSB" => 4,
        "SBS" => 5,
        "BSS" => 6,
        "SSS" => 7,
        "BBB" => 8,
        "???" => 9,
        _ => 0,
    }
}

/// Inverse of [`class_from_pattern`], used by tests and by any caller that
/// needs to render a canonical pattern back from a known class.
pub fn pattern_from_class(class: u8) -> Option<&'static str> {
    match class {
        1 => Some("BBS"),
        2 => Some("BSB"),
        3 => Some("SBB"),
        4 => Some("SSB"),
        5 => Some("SBS"),
        6 => Some("BSS"),
        7 => Some("SSS"),
        8 => Some("BBB"),
        9 => Some("???"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_round_trip_law() {
        for pattern in ["BBS", "BSB", "SBB", "SSB", "SBS", "BSS", "SSS", "BBB", "???"] {
            let class = class_from_pattern(pattern);
            assert_ne!(class, 0);
            assert_eq!(pattern_from_class(class), Some(pattern));
        }
    }

    #[test]
    fn unknown_pattern_is_zero() {
        assert_eq!(class_from_pattern("XYZ"), 0);
        assert_eq!(class_from_pattern(""), 0);
    }
}
