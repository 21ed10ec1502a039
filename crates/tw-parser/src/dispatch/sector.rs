//! Sector header, sub-section dispatch, and completion (spec §4.4 items 9,
//! 10; §4.17).

use tw_events::{MessageKind, TuiObserver};
use tw_model::validate::{parse_int_safe, validate_nonnegative, validate_percent};
use tw_model::{FighterKind, SectorFighterGroup};
use tw_store::GameStore;

use crate::persist;
use crate::sector_record::InProgressSector;
use crate::text_util::between;

pub const SECTOR_HEADER_PREFIX: &str = "Sector  : ";
pub const BEACON_PREFIX: &str = "Beacon  : ";
pub const FIGHTERS_PREFIX: &str = "Fighters: ";
pub const NAVHAZ_PREFIX: &str = "NavHaz  : ";

pub fn is_sector_header(line: &str) -> bool {
    line.starts_with(SECTOR_HEADER_PREFIX)
}

/// Parse `"5678 in Citadel System."` into `(5678, "Citadel System")`,
/// stripping a trailing `.` and the `" (unexplored)"` suffix (spec §4.4
/// item 9).
pub fn parse_header(payload: &str) -> (u32, String) {
    let id = payload
        .split_whitespace()
        .next()
        .map(parse_int_safe)
        .unwrap_or(0);
    let id = tw_model::validate::clamp_sector_id(id);
    let constellation = payload
        .find(" in ")
        .map(|idx| &payload[idx + " in ".len()..])
        .unwrap_or("");
    let constellation = constellation
        .trim_end()
        .trim_end_matches(" (unexplored)")
        .trim_end_matches('.');
    (id, tw_model::validate::truncate_constellation(constellation))
}

/// `Fighters: <N> (<Offensive|Defensive|Toll>) belong to <OWNER>` — updates
/// the sector's fighter group. Per spec §9, this line also produces a
/// Fighter-type message (the dual effect), driven from the dispatcher.
pub fn parse_fighters(payload: &str) -> Option<SectorFighterGroup> {
    let quantity = payload.split_whitespace().next()?;
    let quantity = validate_nonnegative(parse_int_safe(quantity)) as u32;
    let kind_tok = between(payload, "(", ")")?;
    let kind = match kind_tok {
        "Offensive" => FighterKind::Offensive,
        "Defensive" => FighterKind::Defensive,
        "Toll" => FighterKind::Toll,
        _ => return None,
    };
    let owner = payload
        .find("belong to ")
        .map(|idx| payload[idx + "belong to ".len()..].trim().to_string())
        .unwrap_or_default();
    Some(SectorFighterGroup {
        owner,
        quantity,
        kind,
    })
}

pub fn parse_navhaz_percent(payload: &str) -> u8 {
    let digits: String = payload.chars().take_while(|c| c.is_ascii_digit()).collect();
    validate_percent(digits.parse().unwrap_or(0))
}

/// `sectorCompleted` (spec §4.17): persists the sector and its port (if
/// any), then emits the current-sector and, iff non-empty, the trader-list
/// event. Idempotent: a sector already marked saved by
/// [`InProgressSector::take_for_completion`] produces no further effect.
pub fn complete_sector(
    in_progress: &mut InProgressSector,
    store: &mut dyn GameStore,
    observer: &mut dyn TuiObserver,
) {
    let Some(sector) = in_progress.take_for_completion() else {
        return;
    };

    persist::with_retry("save_sector", || store.save_sector(&sector, sector.id));
    if let Some(port) = &sector.port {
        persist::with_retry("save_port", || store.save_port(port, sector.id));
    }

    observer.on_current_sector(&sector);
    if !sector.traders.is_empty() {
        observer.on_trader_data(sector.id, &sector.traders);
    }
}

/// Records both effects of a `Fighters: ` line (spec §9): attach the
/// fighter group to the in-progress sector, and log a Fighter message.
pub fn record_fighters(
    in_progress: &mut InProgressSector,
    history: &mut tw_events::MessageHistory,
    store: &mut dyn GameStore,
    payload: &str,
) {
    if let Some(group) = parse_fighters(payload) {
        if let Some(sector) = in_progress.current() {
            sector.fighters = Some(group);
        }
    }
    super::messages::record_message(
        history,
        store,
        MessageKind::Fighter,
        "Fighters",
        None,
        payload,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_strips_unexplored_suffix() {
        let (id, constellation) = parse_header("5678 in Citadel System (unexplored)");
        assert_eq!(id, 5678);
        assert_eq!(constellation, "Citadel System");
    }

    #[test]
    fn header_strips_trailing_period() {
        let (id, constellation) = parse_header("1 in Fed Space.");
        assert_eq!(id, 1);
        assert_eq!(constellation, "Fed Space");
    }

    #[test]
    fn fighters_line_parses_owner_and_kind() {
        let group = parse_fighters("5000 (Defensive) belong to Federation").unwrap();
        assert_eq!(group.quantity, 5000);
        assert_eq!(group.kind, FighterKind::Defensive);
        assert_eq!(group.owner, "Federation");
    }

    #[test]
    fn navhaz_percent_clamps() {
        assert_eq!(parse_navhaz_percent("35%"), 35);
        assert_eq!(parse_navhaz_percent("250%"), 100);
    }

    #[test]
    fn completing_twice_is_a_noop_the_second_time() {
        use tw_events::NoopObserver;
        use tw_store::InMemoryGameStore;

        let mut acc = InProgressSector::default();
        acc.start(42);
        let mut store = InMemoryGameStore::new();
        let mut observer = NoopObserver;
        complete_sector(&mut acc, &mut store, &mut observer);
        assert!(store.sector(42).is_some());

        // second call: nothing in progress, must not panic or re-save.
        complete_sector(&mut acc, &mut store, &mut observer);
    }
}
