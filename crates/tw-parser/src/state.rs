//! The dispatcher's two orthogonal state axes (spec §4.4).
//!
//! Exhaustive tagged enums, per the design note in spec §9: exhaustiveness
//! checking at every `match` catches missing-state bugs that the original
//! implementation's integer constants could not.

/// Top-level interpretation mode of incoming lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Display {
    None,
    Sector,
    Density,
    WarpLane,
    /// A CIM dump has started (`: ` prompt seen) but the first data line has
    /// not yet decided whether it is a port or warp row.
    Cim,
    PortCim,
    WarpCim,
    Port,
    PortCr,
    FigScan,
}

impl Default for Display {
    fn default() -> Self {
        Display::None
    }
}

/// Sub-mode within `Display::Sector` controlling which continuation handler
/// runs for eight-space-indented lines (spec §4.11).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectorPosition {
    Normal,
    Ports,
    Planets,
    Traders,
    Ships,
    Mines,
}

impl Default for SectorPosition {
    fn default() -> Self {
        SectorPosition::Normal
    }
}
