//! Info panel and quick-stats line parsing (spec §4.4 items 12-13, §4.12).

use tw_model::validate::{parse_int_safe, validate_nonnegative};
use tw_model::{ColumnValue, PlayerStatColumn, PlayerStats};

/// Exact left-column labels the info panel recognises, in the order spec
/// §4.12 lists them. Matching is byte-exact, including spacing.
const TRADER_NAME: &str = "Trader Name    :";
const RANK_AND_EXP: &str = "Rank and Exp   :";
const SHIP_INFO: &str = "Ship Info      :";
const TURNS_LEFT: &str = "Turns left     :";
const TOTAL_HOLDS: &str = "Total Holds    :";
const FIGHTERS: &str = "Fighters       :";
const ETHER_PROBES: &str = "Ether Probes   :";
const CREDITS: &str = "Credits        :";
const CURRENT_SECTOR: &str = "Current Sector :";

const INFO_PANEL_LABELS: &[&str] = &[
    TRADER_NAME,
    RANK_AND_EXP,
    SHIP_INFO,
    TURNS_LEFT,
    TOTAL_HOLDS,
    FIGHTERS,
    ETHER_PROBES,
    CREDITS,
    CURRENT_SECTOR,
];

/// `true` iff `line` opens (or continues) an info-panel block.
pub fn is_info_panel_line(line: &str) -> bool {
    INFO_PANEL_LABELS.iter().any(|label| line.starts_with(label))
}

/// `true` iff `line` is the field that seals the block in the legacy
/// layout (spec §4.12: "the terminal field in the legacy layout").
pub fn is_terminal_field(line: &str) -> bool {
    line.starts_with(CREDITS)
}

/// Apply one info-panel line's payload to the in-progress draft.
pub fn apply_info_line(draft: &mut PlayerStats, line: &str) {
    if let Some(payload) = line.strip_prefix(TRADER_NAME) {
        draft.identity.player_name = Some(payload.trim().to_string());
    } else if let Some(payload) = line.strip_prefix(RANK_AND_EXP) {
        apply_rank_and_exp(draft, payload.trim());
    } else if let Some(payload) = line.strip_prefix(SHIP_INFO) {
        apply_ship_info(draft, payload.trim());
    } else if let Some(payload) = line.strip_prefix(TURNS_LEFT) {
        draft.turns = validate_nonnegative(parse_int_safe(payload.trim()));
    } else if let Some(payload) = line.strip_prefix(TOTAL_HOLDS) {
        apply_total_holds(draft, payload.trim());
    } else if let Some(payload) = line.strip_prefix(FIGHTERS) {
        draft.fighters = validate_nonnegative(parse_int_safe(payload.trim()));
    } else if let Some(payload) = line.strip_prefix(ETHER_PROBES) {
        draft.ordnance.eprobes = validate_nonnegative(parse_int_safe(payload.trim())) as u32;
    } else if let Some(payload) = line.strip_prefix(CREDITS) {
        draft.credits = parse_int_safe(payload.trim());
    } else if let Some(payload) = line.strip_prefix(CURRENT_SECTOR) {
        let sector = parse_int_safe(payload.trim());
        draft.identity.current_sector = if sector > 0 {
            Some(tw_model::validate::clamp_sector_id(sector))
        } else {
            None
        };
    }
}

/// `"<N> points, Alignment=<N>"` → experience and alignment.
fn apply_rank_and_exp(draft: &mut PlayerStats, payload: &str) {
    if let Some(idx) = payload.find(" points") {
        draft.identity.experience = validate_nonnegative(parse_int_safe(payload[..idx].trim()));
    }
    if let Some(idx) = payload.find("Alignment=") {
        let after = &payload[idx + "Alignment=".len()..];
        let token: String = after
            .chars()
            .take_while(|c| c.is_ascii_digit() || *c == '-')
            .collect();
        draft.identity.alignment = parse_int_safe(&token) as i32;
    }
}

/// `"<ship-class>, #<ship-number>"` (tolerant of a missing second field).
fn apply_ship_info(draft: &mut PlayerStats, payload: &str) {
    let mut parts = payload.splitn(2, ',');
    if let Some(class) = parts.next() {
        let class = class.trim();
        if !class.is_empty() {
            draft.identity.ship_class = Some(class.to_string());
        }
    }
    if let Some(rest) = parts.next() {
        let rest = rest.trim().trim_start_matches('#');
        draft.identity.ship_number = validate_nonnegative(parse_int_safe(rest)) as u32;
    }
}

/// `"<total> - Fuel Ore=N Organics=N Empty=N"` — only the total and the
/// ore/organics tokens populate holds (spec §4.12: "populate ore/org holds").
fn apply_total_holds(draft: &mut PlayerStats, payload: &str) {
    let total_part = payload.split(" -").next().unwrap_or(payload);
    draft.holds.total = validate_nonnegative(parse_int_safe(total_part.trim())) as u32;

    if let Some(value) = equals_value(payload, "Fuel Ore=") {
        draft.holds.ore = validate_nonnegative(parse_int_safe(&value)) as u32;
    }
    if let Some(value) = equals_value(payload, "Organics=") {
        draft.holds.org = validate_nonnegative(parse_int_safe(&value)) as u32;
    }
}

fn equals_value(payload: &str, label: &str) -> Option<String> {
    let idx = payload.find(label)?;
    let after = &payload[idx + label.len()..];
    Some(
        after
            .chars()
            .take_while(|c| c.is_ascii_digit() || *c == ',')
            .collect(),
    )
}

/// `true` iff `line` is a quick-stats line: a leading space, `"Turns "`, and
/// the field separator byte (CP437 `·`, decoded from `0xB3`) or the legacy
/// `|` variant (spec §4.12, §4.13).
pub fn is_quick_stats_line(line: &str) -> bool {
    line.starts_with(" Turns ") && (line.contains('\u{00B7}') || line.contains('|'))
}

/// Tokenise and apply a quick-stats line. Tolerant of missing fields: any
/// segment that doesn't match a recognised label is ignored (spec §4.12).
pub fn apply_quick_stats(draft: &mut PlayerStats, line: &str) {
    let normalised = line.replace('\u{00B7}', "|");
    for segment in normalised.split('|') {
        let tokens: Vec<&str> = segment.split_whitespace().collect();
        let (Some(label), Some(value)) = (tokens.first(), tokens.get(1)) else {
            continue;
        };
        let int_val = || validate_nonnegative(parse_int_safe(value));
        match *label {
            "Turns" => draft.turns = int_val(),
            "Creds" => draft.credits = parse_int_safe(value),
            "Figs" => draft.fighters = int_val(),
            "Shlds" => draft.shields = int_val() as u32,
            "Hlds" => draft.holds.total = int_val() as u32,
            "Ore" => draft.holds.ore = int_val() as u32,
            "Org" => draft.holds.org = int_val() as u32,
            "Equ" => draft.holds.equ = int_val() as u32,
            "Col" => draft.holds.col = int_val() as u32,
            "Photons" => draft.ordnance.photons = int_val() as u32,
            "Armids" => draft.ordnance.armids = int_val() as u32,
            "Limpets" => draft.ordnance.limpets = int_val() as u32,
            "GTorps" => draft.ordnance.gen_torps = int_val() as u32,
            "Atomics" => draft.ordnance.atomics = int_val() as u32,
            "Corbomite" => draft.ordnance.corbomite = int_val() as u32,
            "EProbes" => draft.ordnance.eprobes = int_val() as u32,
            "MineD" => draft.ordnance.mine_disr = int_val() as u32,
            "Cloaks" => draft.flags.cloaks = int_val() as u32,
            "Beacons" => draft.flags.beacons = int_val() as u32,
            "Ship" => {
                draft.identity.ship_number = int_val() as u32;
                if let Some(class) = tokens.get(2) {
                    draft.identity.ship_class = Some((*class).to_string());
                }
            }
            _ => {}
        }
    }
}

/// Project a full `PlayerStats` snapshot onto the update-tracker facility's
/// column/value pairs (spec §6 "update-tracker facility for partial
/// player-stats writes"), the inverse of `tw-store`'s internal `apply_one`.
/// Used to persist a sealed info-block or a quick-stats line as a single
/// atomic store write rather than one field at a time.
pub fn to_column_updates(stats: &PlayerStats) -> Vec<(PlayerStatColumn, ColumnValue)> {
    use PlayerStatColumn::*;
    let text = |value: &Option<String>| match value {
        Some(s) => ColumnValue::Text(s.clone()),
        None => ColumnValue::None,
    };
    vec![
        (Turns, ColumnValue::UInt(stats.turns)),
        (Credits, ColumnValue::Int(stats.credits)),
        (Fighters, ColumnValue::UInt(stats.fighters)),
        (Shields, ColumnValue::UInt(stats.shields as u64)),
        (TotalHolds, ColumnValue::UInt(stats.holds.total as u64)),
        (OreHolds, ColumnValue::UInt(stats.holds.ore as u64)),
        (OrgHolds, ColumnValue::UInt(stats.holds.org as u64)),
        (EquHolds, ColumnValue::UInt(stats.holds.equ as u64)),
        (ColHolds, ColumnValue::UInt(stats.holds.col as u64)),
        (Photons, ColumnValue::UInt(stats.ordnance.photons as u64)),
        (Armids, ColumnValue::UInt(stats.ordnance.armids as u64)),
        (Limpets, ColumnValue::UInt(stats.ordnance.limpets as u64)),
        (GenTorps, ColumnValue::UInt(stats.ordnance.gen_torps as u64)),
        (TwarpType, ColumnValue::UInt(stats.flags.twarp_type as u64)),
        (Cloaks, ColumnValue::UInt(stats.flags.cloaks as u64)),
        (Beacons, ColumnValue::UInt(stats.flags.beacons as u64)),
        (Atomics, ColumnValue::UInt(stats.ordnance.atomics as u64)),
        (Corbomite, ColumnValue::UInt(stats.ordnance.corbomite as u64)),
        (Eprobes, ColumnValue::UInt(stats.ordnance.eprobes as u64)),
        (MineDisr, ColumnValue::UInt(stats.ordnance.mine_disr as u64)),
        (Alignment, ColumnValue::Int(stats.identity.alignment as i64)),
        (Experience, ColumnValue::UInt(stats.identity.experience)),
        (Corp, text(&stats.identity.corp)),
        (ShipNumber, ColumnValue::UInt(stats.identity.ship_number as u64)),
        (PsychicProbe, ColumnValue::Bool(stats.flags.psychic_probe)),
        (PlanetScanner, ColumnValue::Bool(stats.flags.planet_scanner)),
        (ScanType, text(&stats.flags.scan_type)),
        (ShipClass, text(&stats.identity.ship_class)),
        (
            CurrentSector,
            match stats.identity.current_sector {
                Some(sector) => ColumnValue::UInt(sector as u64),
                None => ColumnValue::None,
            },
        ),
        (PlayerName, text(&stats.identity.player_name)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn info_panel_labels_require_exact_spacing() {
        assert!(is_info_panel_line("Turns left     : 500"));
        assert!(!is_info_panel_line("Turns left: 500"));
    }

    #[test]
    fn credits_seals_the_block() {
        assert!(is_terminal_field("Credits        : 1,000,000"));
        assert!(!is_terminal_field("Turns left     : 500"));
    }

    #[test]
    fn rank_and_exp_extracts_both_fields() {
        let mut stats = PlayerStats::default();
        apply_info_line(&mut stats, "Rank and Exp   : 5,000 points, Alignment=-200");
        assert_eq!(stats.identity.experience, 5000);
        assert_eq!(stats.identity.alignment, -200);
    }

    #[test]
    fn total_holds_populates_total_and_ore_org_only() {
        let mut stats = PlayerStats::default();
        apply_info_line(
            &mut stats,
            "Total Holds    : 75 - Fuel Ore=10 Organics=20 Empty=45",
        );
        assert_eq!(stats.holds.total, 75);
        assert_eq!(stats.holds.ore, 10);
        assert_eq!(stats.holds.org, 20);
    }

    #[test]
    fn credits_line_parses_negative_and_commas() {
        let mut stats = PlayerStats::default();
        apply_info_line(&mut stats, "Credits        : 1,234,567");
        assert_eq!(stats.credits, 1_234_567);
    }

    #[test]
    fn quick_stats_line_requires_leading_space_and_separator() {
        assert!(is_quick_stats_line(" Turns 5 \u{00B7} Creds 100"));
        assert!(is_quick_stats_line(" Turns 5 | Creds 100"));
        assert!(!is_quick_stats_line("Turns 5 | Creds 100"));
        assert!(!is_quick_stats_line(" Turns 5 Creds 100"));
    }

    #[test]
    fn quick_stats_tokenises_known_fields() {
        let mut stats = PlayerStats::default();
        apply_quick_stats(
            &mut stats,
            " Turns 150 \u{00B7} Creds 50,000 \u{00B7} Figs 1,000 \u{00B7} Ship 5 MerCru",
        );
        assert_eq!(stats.turns, 150);
        assert_eq!(stats.credits, 50_000);
        assert_eq!(stats.fighters, 1000);
        assert_eq!(stats.identity.ship_number, 5);
        assert_eq!(stats.identity.ship_class, Some("MerCru".to_string()));
    }

    #[test]
    fn quick_stats_is_tolerant_of_missing_fields() {
        let mut stats = PlayerStats::default();
        apply_quick_stats(&mut stats, " Turns 10 | Creds 20");
        assert_eq!(stats.turns, 10);
        assert_eq!(stats.credits, 20);
        assert_eq!(stats.fighters, 0);
    }

    #[test]
    fn quick_stats_negative_values_clamp_to_zero() {
        let mut stats = PlayerStats::default();
        apply_quick_stats(&mut stats, " Turns -5 | Figs -10");
        assert_eq!(stats.turns, 0);
        assert_eq!(stats.fighters, 0);
    }

    #[test]
    fn to_column_updates_covers_every_column() {
        let stats = PlayerStats::default();
        let updates = to_column_updates(&stats);
        assert_eq!(updates.len(), 30);
    }

    #[test]
    fn to_column_updates_round_trips_scalar_fields() {
        let mut stats = PlayerStats::default();
        stats.turns = 150;
        stats.credits = -25;
        stats.identity.ship_class = Some("MerCru".to_string());
        let updates = to_column_updates(&stats);
        assert!(updates.contains(&(PlayerStatColumn::Turns, ColumnValue::UInt(150))));
        assert!(updates.contains(&(PlayerStatColumn::Credits, ColumnValue::Int(-25))));
        assert!(updates.contains(&(
            PlayerStatColumn::ShipClass,
            ColumnValue::Text("MerCru".to_string())
        )));
    }
}
