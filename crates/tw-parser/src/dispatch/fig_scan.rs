//! Deployed fighter scan header and row parsing (spec §4.4 item 5).
//!
//! The spec pins down only the header recognition test; row layout is a
//! whitespace-delimited `<sector> <owner...> <kind> <quantity>` table, the
//! same shape as the `Fighters: ` sector line (spec §4.4 item 10) with the
//! sector id fronting the row instead of being implicit from context.

use tw_model::validate::{clamp_sector_id, parse_int_safe, validate_nonnegative};
use tw_model::{FighterKind, SectorFighterGroup};

/// The double space between `Deployed` and `Fighter` (and between `Fighter`
/// and `Scan`) is semantically significant and must be preserved verbatim
/// (spec §4.4 item 5, §9).
pub const HEADER_MARKER: &str = "Deployed  Fighter  Scan";

pub fn is_header(line: &str) -> bool {
    line.contains(HEADER_MARKER)
}

/// Parse one data row into `(sector, group)`, or `None` if the line does not
/// have the minimum `sector owner... kind quantity` shape.
pub fn parse_row(line: &str) -> Option<(u32, SectorFighterGroup)> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < 3 {
        return None;
    }
    let sector_val: i64 = tokens[0].parse().ok()?;
    if sector_val <= 0 {
        return None;
    }
    let sector = clamp_sector_id(sector_val);

    let quantity_tok = tokens.last()?;
    let kind_tok = tokens[tokens.len() - 2];
    let kind = match kind_tok {
        "Offensive" => FighterKind::Offensive,
        "Defensive" => FighterKind::Defensive,
        "Toll" => FighterKind::Toll,
        _ => return None,
    };
    let quantity = validate_nonnegative(parse_int_safe(quantity_tok)) as u32;
    let owner = tokens[1..tokens.len() - 2].join(" ");

    Some((
        sector,
        SectorFighterGroup {
            owner,
            quantity,
            kind,
        },
    ))
}
