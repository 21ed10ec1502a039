//! Relative-density scan line parsing and sector update (spec §4.4 item 4,
//! §4.14).

use tw_model::validate::{parse_int_safe, validate_percent};
use tw_model::{ExplorationStatus, Sector};

/// Fixed-column test for the density-scan header, per spec §4.4 item 4:
/// "characters at 1-based columns 27..42 equal `Relative Density`".
pub const HEADER_COLUMN_TEXT: &str = "Relative Density";
const HEADER_START_COL: usize = 27;
const HEADER_END_COL: usize = 42;

pub fn is_density_header(line: &str) -> bool {
    crate::text_util::column_range(line, HEADER_START_COL, HEADER_END_COL) == Some(HEADER_COLUMN_TEXT)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DensityRow {
    pub sector: u32,
    pub density: i64,
    /// Informational only (spec §9): never written into `Sector::warps`.
    pub warp_count: u8,
    pub navhaz_percent: u8,
    pub anomaly: bool,
}

/// Parse `"Sector (<N>) ==>  <density>  Warps : <W>    NavHaz : <P>%    Anom : <Yes|No>"`,
/// or the variant without parentheses around the sector number (spec §4.14).
/// Returns `None` if the line lacks a recognisable sector number.
pub fn parse(line: &str) -> Option<DensityRow> {
    let rest = line.strip_prefix("Sector")?;
    let rest = rest.trim_start();
    let sector_tok = rest.split_whitespace().next()?;
    let sector_tok = sector_tok.trim_matches(|c| c == '(' || c == ')');
    let sector = tw_model::validate::clamp_sector_id(parse_int_safe(sector_tok));

    let density = line
        .find("==>")
        .and_then(|idx| line[idx + 3..].split_whitespace().next())
        .map(|tok| parse_int_safe(tok.trim_end_matches(',')))
        .unwrap_or(0);

    let warp_count = find_after(line, "Warps", ":")
        .map(|tok| parse_int_safe(tok).max(0) as u8)
        .unwrap_or(0);

    let navhaz_percent = find_after(line, "NavHaz", ":")
        .map(|tok| validate_percent(parse_int_safe(tok.trim_end_matches('%'))))
        .unwrap_or(0);

    let anomaly = find_after(line, "Anom", ":")
        .map(|tok| tok.eq_ignore_ascii_case("Yes"))
        .unwrap_or(false);

    Some(DensityRow {
        sector,
        density,
        warp_count,
        navhaz_percent,
        anomaly,
    })
}

/// Find `label` then the first whitespace token after the following `sep`.
fn find_after<'a>(line: &'a str, label: &str, sep: &str) -> Option<&'a str> {
    let label_idx = line.find(label)?;
    let after_label = &line[label_idx + label.len()..];
    let sep_idx = after_label.find(sep)?;
    after_label[sep_idx + sep.len()..].split_whitespace().next()
}

/// Apply a parsed density row to a (possibly fresh) sector record, per the
/// write rules of spec §4.14: density/navhaz/anomaly always update; the
/// exploration status and constellation only change if the sector had not
/// already been scanned at density-or-better depth.
pub fn apply(sector: &mut Sector, row: DensityRow) {
    sector.density = row.density;
    sector.navhaz_percent = row.navhaz_percent;
    sector.anomaly = row.anomaly;
    sector.touch();
    if matches!(sector.exploration, ExplorationStatus::No | ExplorationStatus::Calc) {
        sector.exploration = ExplorationStatus::Density;
        sector.constellation = "??? (Density only)".to_string();
    }
}
