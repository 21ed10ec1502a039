//! `Warps to Sector(s) :` parsing (spec §4.4 item 10, §4.15).
//!
//! Unlike the density scan's warp count (informational only, spec §9), this
//! line's payload is the sector's real, ordered warp list and is written
//! straight into the in-progress sector. It does not end the sector block —
//! subsequent lines (e.g. `NavHaz  : `) may still belong to it.

pub const WARPS_PREFIX: &str = "Warps to Sector(s) :";

/// Parse the payload after the prefix: integers separated by `" - "`,
/// optionally with parentheses around one destination, up to six entries,
/// order preserved (spec §4.15).
pub fn parse(payload: &str) -> Vec<u32> {
    payload
        .split(" - ")
        .map(|tok| tok.trim().trim_matches(|c| c == '(' || c == ')'))
        .filter_map(|tok| tok.parse::<u32>().ok())
        .take(6)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hyphen_separated_list() {
        assert_eq!(parse("  1234 - 2345 - 3456"), vec![1234, 2345, 3456]);
    }

    #[test]
    fn strips_parens_around_one_destination() {
        assert_eq!(parse(" (5679) - 5680"), vec![5679, 5680]);
    }

    #[test]
    fn truncates_past_six() {
        let warps = parse("1 - 2 - 3 - 4 - 5 - 6 - 7 - 8");
        assert_eq!(warps, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn non_numeric_tokens_are_skipped() {
        assert_eq!(parse("1234 - abc - 2345"), vec![1234, 2345]);
    }
}
