//! The in-progress sector accumulator (spec §3 "Sector", §4.17).

use tw_model::{Sector, Trader};

/// Owns the sector currently being assembled from a multi-line `Sector :`
/// block, plus the bookkeeping needed to finalise it correctly.
#[derive(Debug, Default)]
pub struct InProgressSector {
    sector: Option<Sector>,
    /// Set once the current sector has been persisted, to suppress a
    /// redundant second save if more than one completion trigger fires for
    /// the same block (spec §4.17, §8 "State closure").
    saved: bool,
    /// A trader line with no continuation yet (spec §4.7): held until either
    /// a ship continuation line finalises it or another trader/section
    /// boundary forces it out without ship details.
    held_trader: Option<Trader>,
}

impl InProgressSector {
    /// Start a fresh accumulator for `id`, discarding whatever was being
    /// accumulated before (spec §4.4 item 9: "starts (or resets)").
    pub fn start(&mut self, id: u32) -> &mut Sector {
        self.held_trader = None;
        self.saved = false;
        self.sector = Some(Sector::new(id));
        self.sector.as_mut().unwrap()
    }

    pub fn current(&mut self) -> Option<&mut Sector> {
        self.sector.as_mut()
    }

    pub fn current_ref(&self) -> Option<&Sector> {
        self.sector.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.sector.is_some()
    }

    pub fn hold_trader(&mut self, trader: Trader) {
        self.held_trader = Some(trader);
    }

    pub fn take_held_trader(&mut self) -> Option<Trader> {
        self.held_trader.take()
    }

    pub fn held_trader_mut(&mut self) -> Option<&mut Trader> {
        self.held_trader.as_mut()
    }

    /// Flush any held trader (without ship details) into the sector's
    /// trader list. Used whenever a new trader line or a section boundary
    /// arrives before a continuation line finalised the held one.
    pub fn flush_held_trader(&mut self) {
        if let Some(trader) = self.held_trader.take() {
            if let Some(sector) = self.sector.as_mut() {
                sector.traders.push(trader);
            }
        }
    }

    /// Take the completed sector out of the accumulator, resetting all
    /// bookkeeping. Returns `None` if nothing was in progress, or if the
    /// current block was already saved (idempotent completion, spec §8
    /// "State closure": a sector is persisted at most once).
    pub fn take_for_completion(&mut self) -> Option<Sector> {
        if self.saved {
            return None;
        }
        self.flush_held_trader();
        let sector = self.sector.take();
        if sector.is_some() {
            self.saved = true;
        }
        sector
    }

    /// Fully reset to the initial state (spec §8 "Idempotent reset").
    pub fn reset(&mut self) {
        self.sector = None;
        self.saved = false;
        self.held_trader = None;
    }
}
