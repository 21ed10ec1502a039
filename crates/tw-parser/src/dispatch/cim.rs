//! CIM (Computer Interrogation Mode) row parsing (spec §4.4 item 7, §4.13).

use tw_model::validate::{clamp_sector_id, parse_int_safe, validate_percent};
use tw_model::{CimPortRow, CimWarpRow};

/// `true` iff any whitespace-separated token carries a `%` sign — the
/// signal that the first CIM data line is a port row, not a warp row
/// (spec §4.13).
pub fn has_percent_token(line: &str) -> bool {
    line.split_whitespace().any(|tok| tok.contains('%'))
}

/// Parameter 1 is the sector. Errors — missing, non-numeric, or `<= 0` — are
/// reported as `None`; the caller abandons the line and sets `Display = None`
/// (spec §4.13).
fn parse_sector(tok: &str) -> Option<u32> {
    let cleaned: String = tok.chars().filter(|c| *c != ',').collect();
    let value: i64 = cleaned.trim().parse().ok()?;
    if value <= 0 {
        return None;
    }
    Some(clamp_sector_id(value))
}

/// Parse a PortCIM row: parameters (2,4,6) are signed amounts (negative =
/// buying), (3,5,7) are percents. A percent over 100 abandons the whole row
/// (spec §4.13).
pub fn parse_port_row(line: &str) -> Option<CimPortRow> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let sector = parse_sector(tokens.first()?)?;

    let mut amounts = [0u32; 3];
    let mut percents = [0u8; 3];
    let mut buying = [false; 3];
    for i in 0..3 {
        let amount_tok = tokens.get(1 + i * 2)?;
        let percent_tok = tokens.get(2 + i * 2)?;

        let amount_val = parse_int_safe(amount_tok);
        buying[i] = amount_val < 0;
        amounts[i] = amount_val.unsigned_abs() as u32;

        let percent_val = parse_int_safe(percent_tok.trim_end_matches('%'));
        if percent_val > 100 {
            return None;
        }
        percents[i] = validate_percent(percent_val);
    }

    Some(CimPortRow {
        sector,
        amounts,
        percents,
        buying,
    })
}

/// Parse a WarpCIM row: parameter 1 is the origin sector, up to six
/// subsequent parameters are warp destinations (spec §4.13).
pub fn parse_warp_row(line: &str) -> Option<CimWarpRow> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let sector = parse_sector(tokens.first()?)?;
    let warps = tokens
        .iter()
        .skip(1)
        .take(6)
        .filter_map(|tok| {
            let v = parse_int_safe(tok);
            if v > 0 {
                Some(v as u32)
            } else {
                None
            }
        })
        .collect();
    Some(CimWarpRow { sector, warps })
}
