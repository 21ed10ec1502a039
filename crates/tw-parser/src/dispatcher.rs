//! The central dispatcher & state machine (spec §2 item 4, §4.4).
//!
//! One method, [`Dispatcher::handle_line`], implements the ordered cascade
//! of spec §4.4 ("first match wins"). A second, narrower entry point,
//! [`Dispatcher::check_partial_prompt`], recognises the handful of prompts
//! that never terminate with CR/LF, re-parsing the still-growing current
//! line on every append per spec §4.3/§9.

use tw_events::{MessageHistory, MessageKind, TuiObserver};
use tw_model::validate::clamp_sector_id;
use tw_model::{PlayerStats, Sector, ServerVersion};
use tw_store::GameStore;

use crate::dispatch::messages::MessageContext;
use crate::dispatch::{cim, density, fig_scan, messages, mines, planet, port, prompt, sector, ship, stats, trader, version, warp};
use crate::persist;
use crate::sector_record::InProgressSector;
use crate::stats_tracker::StatsTracker;
use crate::state::{Display, SectorPosition};

const EIGHT_SPACES: &str = "        ";

#[derive(Debug, Default)]
pub struct Dispatcher {
    display: Display,
    sector_position: SectorPosition,
    in_progress: InProgressSector,
    stats_tracker: StatsTracker,
    live_stats: PlayerStats,
    history: MessageHistory,
    message_ctx: Option<MessageContext>,
    server_version: Option<ServerVersion>,
}

impl Dispatcher {
    pub fn new(history_capacity: usize) -> Self {
        Self {
            history: MessageHistory::new(history_capacity),
            ..Default::default()
        }
    }

    pub fn display(&self) -> Display {
        self.display
    }

    pub fn sector_position(&self) -> SectorPosition {
        self.sector_position
    }

    pub fn server_version(&self) -> Option<&ServerVersion> {
        self.server_version.as_ref()
    }

    pub fn player_stats(&self) -> &PlayerStats {
        &self.live_stats
    }

    pub fn history(&self) -> &MessageHistory {
        &self.history
    }

    /// Fully reset to the initial state (spec §8 "Idempotent reset").
    pub fn reset(&mut self) {
        self.display = Display::None;
        self.sector_position = SectorPosition::Normal;
        self.in_progress.reset();
        self.stats_tracker.reset();
        self.live_stats = PlayerStats::default();
        self.history.clear();
        self.message_ctx = None;
        self.server_version = None;
    }

    /// Reset the state machine only, leaving history and live stats intact.
    /// Used after a recovered handler panic (spec §7 "Propagation policy").
    pub(crate) fn reset_state_machine(&mut self) {
        self.display = Display::None;
        self.sector_position = SectorPosition::Normal;
    }

    /// Dispatch one completed logical line per the ordered cascade of
    /// spec §4.4.
    pub fn handle_line(&mut self, line: &str, store: &mut dyn GameStore, observer: &mut dyn TuiObserver) {
        // 1. Version banner.
        if let Some(v) = version::detect(line) {
            self.server_version = Some(v);
            return;
        }

        // 2. Prompt / completion markers.
        if prompt::is_command_prompt(line) {
            self.apply_command_prompt(line, store, observer);
            return;
        }

        // 3. Citadel treasury.
        if prompt::is_citadel_treasury(line) {
            if let Some(current) = self.in_progress.current() {
                for planet in current.planets.iter_mut() {
                    planet.citadel = true;
                }
            }
            sector::complete_sector(&mut self.in_progress, store, observer);
            self.display = Display::None;
            return;
        }

        // 4. Density header.
        if density::is_density_header(line) {
            self.display = Display::Density;
            return;
        }

        // 5. Fighter-scan header.
        if fig_scan::is_header(line) {
            self.display = Display::FigScan;
            return;
        }

        // 6. Docking / commerce markers.
        if prompt::is_docking_marker(line) {
            self.display = Display::Port;
            return;
        }
        if prompt::is_port_cr_prompt(line) {
            self.display = Display::PortCr;
            return;
        }

        // 7. CIM prompt.
        if prompt::is_cim_prompt(line) {
            self.display = Display::Cim;
            return;
        }

        // 8. Transmission headers.
        if messages::is_transmission_header(line) {
            let ctx = messages::classify_header(line);
            let kind = ctx.kind.unwrap_or(MessageKind::General);
            messages::record_message(&mut self.history, store, kind, &ctx.sender, ctx.channel, line);
            self.message_ctx = Some(ctx);
            return;
        }

        // 9. Sector header.
        if sector::is_sector_header(line) {
            let payload = &line[sector::SECTOR_HEADER_PREFIX.len()..];
            let (id, constellation) = sector::parse_header(payload);
            let record = self.in_progress.start(id);
            record.constellation = constellation;
            self.display = Display::Sector;
            self.sector_position = SectorPosition::Normal;
            return;
        }

        // 10. Sector sub-sections (only meaningful while assembling a sector).
        if self.display == Display::Sector && self.in_progress.is_active() {
            if self.dispatch_sector_subsection(line, store) {
                return;
            }
        }

        // 11. Continuation lines.
        if self.display == Display::Sector && line.starts_with(EIGHT_SPACES) {
            if self.dispatch_continuation(line) {
                return;
            }
        }

        // 12. Info panel.
        if stats::is_info_panel_line(line) {
            let draft = self.stats_tracker.ensure_started(&self.live_stats);
            stats::apply_info_line(draft, line);
            if stats::is_terminal_field(line) {
                self.seal_info_panel(store, observer);
            }
            return;
        }

        // 13. Quick-stats line.
        if stats::is_quick_stats_line(line) {
            stats::apply_quick_stats(&mut self.live_stats, line);
            let updates = stats::to_column_updates(&self.live_stats);
            persist::with_retry("quick_stats", || store.apply_player_stat_updates(&updates));
            observer.on_player_stats(&self.live_stats);
            return;
        }

        // 14. Otherwise: display-specific data rows, then message content,
        // then ignore.
        if self.handle_display_row(line, store) {
            return;
        }
        self.handle_message_content(line, store);
    }

    /// Recognise the handful of prompts that never terminate with CR/LF,
    /// re-parsed on every append of the still-growing current line
    /// (spec §4.3, §9 "Partial-line prompt detection").
    pub fn check_partial_prompt(&mut self, partial: &str, store: &mut dyn GameStore, observer: &mut dyn TuiObserver) {
        if prompt::is_command_prompt(partial) {
            self.apply_command_prompt(partial, store, observer);
        } else if prompt::is_cim_prompt(partial) {
            self.display = Display::Cim;
        } else if prompt::is_docking_marker(partial) {
            self.display = Display::Port;
        } else if prompt::is_port_cr_prompt(partial) {
            self.display = Display::PortCr;
        }
    }

    fn apply_command_prompt(&mut self, line: &str, store: &mut dyn GameStore, observer: &mut dyn TuiObserver) {
        if let Some(current) = prompt::command_prompt_sector(line) {
            self.live_stats.identity.current_sector = Some(current);
        }
        // A `Command [` line seals a pending info-panel draft even when it
        // was never terminated by a `Credits` field (spec §4.4 item 12,
        // §4.12).
        self.seal_info_panel(store, observer);
        if self.in_progress.is_active() {
            sector::complete_sector(&mut self.in_progress, store, observer);
        }
        self.display = Display::None;
    }

    fn seal_info_panel(&mut self, store: &mut dyn GameStore, observer: &mut dyn TuiObserver) {
        if let Some(sealed) = self.stats_tracker.seal() {
            self.live_stats = sealed;
            let updates = stats::to_column_updates(&self.live_stats);
            persist::with_retry("player_stats_seal", || {
                store.apply_player_stat_updates(&updates)
            });
            observer.on_player_stats(&self.live_stats);
        }
    }

    /// Item 10: dispatch on the sector-block sub-section prefix. Returns
    /// `true` iff the line was recognised as one of these prefixes.
    fn dispatch_sector_subsection(&mut self, line: &str, store: &mut dyn GameStore) -> bool {
        if let Some(payload) = line.strip_prefix(sector::BEACON_PREFIX) {
            if let Some(s) = self.in_progress.current() {
                s.beacon = Some(payload.to_string());
            }
            return true;
        }
        if let Some(payload) = line.strip_prefix(port::PORTS_PREFIX) {
            let parsed = port::parse(payload);
            if let Some(s) = self.in_progress.current() {
                s.port = Some(parsed);
            }
            self.sector_position = SectorPosition::Ports;
            return true;
        }
        if let Some(payload) = line.strip_prefix(planet::PLANETS_PREFIX) {
            let parsed = planet::parse(payload);
            if let Some(s) = self.in_progress.current() {
                s.planets.extend(parsed);
            }
            self.sector_position = SectorPosition::Planets;
            return true;
        }
        if let Some(payload) = line.strip_prefix(trader::TRADERS_PREFIX) {
            self.in_progress.flush_held_trader();
            let held = trader::parse(payload);
            self.in_progress.hold_trader(held);
            self.sector_position = SectorPosition::Traders;
            return true;
        }
        if let Some(payload) = line.strip_prefix(ship::SHIPS_PREFIX) {
            let parsed = ship::parse(payload);
            if let Some(s) = self.in_progress.current() {
                s.ships.push(parsed);
            }
            self.sector_position = SectorPosition::Ships;
            return true;
        }
        if let Some(payload) = line.strip_prefix(sector::FIGHTERS_PREFIX) {
            sector::record_fighters(&mut self.in_progress, &mut self.history, store, payload);
            return true;
        }
        if let Some(payload) = line.strip_prefix(sector::NAVHAZ_PREFIX) {
            let percent = sector::parse_navhaz_percent(payload);
            if let Some(s) = self.in_progress.current() {
                s.navhaz_percent = percent;
            }
            self.sector_position = SectorPosition::Normal;
            return true;
        }
        if let Some(payload) = line.strip_prefix(mines::MINES_PREFIX) {
            let groups = mines::parse(payload);
            if let Some(s) = self.in_progress.current() {
                s.mines.extend(groups);
            }
            self.sector_position = SectorPosition::Mines;
            return true;
        }
        if let Some(payload) = line.strip_prefix(warp::WARPS_PREFIX) {
            let warps = warp::parse(payload);
            if let Some(s) = self.in_progress.current() {
                s.set_warps(&warps);
            }
            return true;
        }
        false
    }

    /// Item 11: route an eight-space continuation line to the handler for
    /// the current [`SectorPosition`]. Returns `true` iff handled.
    fn dispatch_continuation(&mut self, line: &str) -> bool {
        let payload = &line[EIGHT_SPACES.len()..];
        match self.sector_position {
            SectorPosition::Ports => {
                let build_time = port::parse_build_time_continuation(payload);
                if let Some(s) = self.in_progress.current() {
                    if let Some(p) = s.port.as_mut() {
                        p.build_time = build_time;
                    }
                }
                true
            }
            SectorPosition::Planets => {
                let parsed = planet::parse(payload);
                if let Some(s) = self.in_progress.current() {
                    s.planets.extend(parsed);
                }
                true
            }
            SectorPosition::Traders => {
                if trader::is_ship_continuation(payload) {
                    if let Some(held) = self.in_progress.held_trader_mut() {
                        trader::apply_ship_continuation(held, payload);
                    }
                    self.in_progress.flush_held_trader();
                } else {
                    self.in_progress.flush_held_trader();
                    let held = trader::parse(payload);
                    self.in_progress.hold_trader(held);
                }
                true
            }
            SectorPosition::Ships => {
                // The type-continuation's column offset is measured from the
                // full raw line, not the stripped payload (spec §4.8).
                if ship::is_type_continuation(line) {
                    if let Some(s) = self.in_progress.current() {
                        if let Some(last) = s.ships.last_mut() {
                            ship::apply_type_continuation(last, line);
                        }
                    }
                }
                true
            }
            SectorPosition::Mines => {
                let mut groups = mines::parse(payload);
                if let Some(s) = self.in_progress.current() {
                    let fallback_owner = s.mines.last().map(|m| m.owner.clone());
                    if let Some(owner) = fallback_owner {
                        for g in groups.iter_mut() {
                            if g.owner.is_empty() {
                                g.owner = owner.clone();
                            }
                        }
                    }
                    s.mines.extend(groups);
                }
                true
            }
            SectorPosition::Normal => false,
        }
    }

    /// Item 14 (structured part): parse a data row for the current
    /// display-only modes (CIM, density, fighter scan). Returns `true` iff
    /// the line was consumed as such a row.
    fn handle_display_row(&mut self, line: &str, store: &mut dyn GameStore) -> bool {
        match self.display {
            Display::Cim => {
                if line.trim().is_empty() {
                    return true;
                }
                if cim::has_percent_token(line) {
                    self.display = Display::PortCim;
                } else {
                    self.display = Display::WarpCim;
                }
                self.handle_display_row(line, store)
            }
            Display::PortCim => {
                match cim::parse_port_row(line) {
                    Some(row) => {
                        let mut sector = load_or_new(store, row.sector);
                        let port = sector.port.get_or_insert_with(tw_model::Port::default);
                        port.amounts = row.amounts;
                        port.percents = row.percents;
                        port.buying = row.buying;
                        if port.class == 0 {
                            let pattern: String = row
                                .buying
                                .iter()
                                .map(|&buying| if buying { 'B' } else { 'S' })
                                .collect();
                            port.class = tw_model::class_from_pattern(&pattern);
                        }
                        persist::with_retry("cim_port_row", || store.save_sector(&sector, sector.id));
                        persist::with_retry("cim_port_row_port", || {
                            store.save_port(sector.port.as_ref().unwrap(), sector.id)
                        });
                    }
                    None => self.display = Display::None,
                }
                true
            }
            Display::WarpCim => {
                match cim::parse_warp_row(line) {
                    Some(row) => {
                        let mut sector = load_or_new(store, row.sector);
                        sector.set_warps(&row.warps);
                        persist::with_retry("cim_warp_row", || store.save_sector(&sector, sector.id));
                    }
                    None => self.display = Display::None,
                }
                true
            }
            Display::Density => {
                if let Some(row) = density::parse(line) {
                    let mut sector = load_or_new(store, row.sector);
                    density::apply(&mut sector, row);
                    persist::with_retry("density_row", || store.save_sector(&sector, sector.id));
                }
                true
            }
            Display::FigScan => {
                if let Some((id, group)) = fig_scan::parse_row(line) {
                    let mut sector = load_or_new(store, id);
                    sector.fighters = Some(group);
                    persist::with_retry("fig_scan_row", || store.save_sector(&sector, sector.id));
                }
                true
            }
            _ => false,
        }
    }

    fn handle_message_content(&mut self, line: &str, store: &mut dyn GameStore) {
        let Some(marker) = messages::content_marker(line) else {
            return;
        };
        let Some(ctx) = self.message_ctx.clone() else {
            return;
        };
        let content = line[1..].trim_start();
        if marker == 'P' && messages::is_dropped_indicator_line(content) {
            return;
        }
        let kind = ctx.kind.unwrap_or(MessageKind::General);
        let channel = if marker == 'R' { ctx.channel } else { None };
        messages::record_message(&mut self.history, store, kind, &ctx.sender, channel, content);
    }
}

fn load_or_new(store: &mut dyn GameStore, id: u32) -> Sector {
    match store.load_sector(id) {
        Ok(Some(s)) => s,
        _ => Sector::new(clamp_sector_id(id as i64)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tw_events::NoopObserver;
    use tw_model::ExplorationStatus;
    use tw_store::InMemoryGameStore;

    fn run(lines: &[&str]) -> (Dispatcher, InMemoryGameStore) {
        let mut dispatcher = Dispatcher::new(100);
        let mut store = InMemoryGameStore::new();
        let mut observer = NoopObserver;
        for line in lines {
            dispatcher.handle_line(line, &mut store, &mut observer);
        }
        (dispatcher, store)
    }

    #[test]
    fn version_banner_sets_server_version() {
        let (dispatcher, _) = run(&["TradeWars Game Server v2.20b"]);
        assert_eq!(dispatcher.server_version().unwrap().twgs_type, 2);
    }

    #[test]
    fn citadel_completion_scenario() {
        let (dispatcher, store) = run(&[
            "Sector  : 5678 in Citadel System",
            "Planets : Alpha Citadel",
            "Warps to Sector(s) :  (5679) - 5680",
            "Citadel treasury contains 2,500,000 credits",
        ]);
        assert_eq!(dispatcher.display(), Display::None);
        let sector = store.sector(5678).expect("sector persisted");
        assert!(sector.planets[0].citadel);
    }

    #[test]
    fn port_cim_row_scenario() {
        let (_, store) = run(&[": ", "2345 -5000 60% 3000 80% -2000 90%"]);
        let sector = store.sector(2345).unwrap();
        let port = sector.port.as_ref().unwrap();
        assert_eq!(port.amounts, [5000, 3000, 2000]);
        assert_eq!(port.buying, [true, false, true]);
        assert_eq!(port.class, 2); // BSB
    }

    #[test]
    fn warp_cim_row_scenario() {
        let (_, store) = run(&[": ", "5678 1234 2345 3456 4567 5678 6789"]);
        let sector = store.sector(5678).unwrap();
        assert_eq!(sector.warps, [1234, 2345, 3456, 4567, 5678, 6789]);
    }

    #[test]
    fn density_preserves_holo_scenario() {
        let mut dispatcher = Dispatcher::new(100);
        let mut store = InMemoryGameStore::new();
        let mut observer = NoopObserver;
        let mut seed = Sector::new(2222);
        seed.exploration = ExplorationStatus::Holo;
        seed.constellation = "Known Space".to_string();
        seed.density = 1000;
        store.save_sector(&seed, 2222).unwrap();

        dispatcher.handle_line(
            "Relative Density scan                for sector",
            &mut store,
            &mut observer,
        );
        // Pad so "Relative Density" lands at columns 27..42.
        let header = format!("{}Relative Density", " ".repeat(26));
        dispatcher.handle_line(&header, &mut store, &mut observer);
        dispatcher.handle_line(
            "Sector ( 2222) ==>           2000  Warps : 3    NavHaz :     0%    Anom : No",
            &mut store,
            &mut observer,
        );

        let sector = store.sector(2222).unwrap();
        assert_eq!(sector.density, 2000);
        assert_eq!(sector.constellation, "Known Space");
        assert_eq!(sector.exploration, ExplorationStatus::Holo);
    }

    #[test]
    fn trader_with_ship_continuation_scenario() {
        let (_, store) = run(&[
            "Sector  : 1 in Fed Space",
            "Traders : Captain Kirk, w/ 1,000 ftrs",
            "        in Enterprise (Constitution Class)",
            "Command [TL=00000] (1) ?",
        ]);
        let sector = store.sector(1).unwrap();
        assert_eq!(sector.traders.len(), 1);
        assert_eq!(sector.traders[0].ship_name, Some("Enterprise".to_string()));
        assert_eq!(sector.traders[0].fighters, 1000);
    }

    #[test]
    fn command_prompt_completes_and_sets_current_sector() {
        let (dispatcher, store) = run(&[
            "Sector  : 42 in Fed Space",
            "Command [TL=00150] (2500) ?",
        ]);
        assert_eq!(dispatcher.display(), Display::None);
        assert_eq!(dispatcher.player_stats().identity.current_sector, Some(2500));
        assert!(store.sector(42).is_some());
    }

    #[test]
    fn quick_stats_line_fires_observer() {
        use std::cell::RefCell;
        use std::rc::Rc;

        struct Recorder(Rc<RefCell<Vec<u64>>>);
        impl TuiObserver for Recorder {
            fn on_player_stats(&mut self, stats: &PlayerStats) {
                self.0.borrow_mut().push(stats.turns);
            }
        }

        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut dispatcher = Dispatcher::new(10);
        let mut store = InMemoryGameStore::new();
        let mut observer = Recorder(seen.clone());
        dispatcher.handle_line(" Turns 150 \u{00B7} Creds 5,000", &mut store, &mut observer);
        assert_eq!(*seen.borrow(), vec![150]);
    }

    #[test]
    fn message_content_inherits_sticky_context() {
        let (_, store) = run(&[
            "Incoming transmission from Spock:",
            "R Live long and prosper",
        ]);
        assert_eq!(store.messages().len(), 2);
        assert_eq!(store.messages()[1].sender, "Spock");
    }
}
