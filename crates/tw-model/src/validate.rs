//! Uniform bounds enforcement (spec §4.16 "Validation", §8 "Validation totality").
//!
//! Every function here is total: any `i64` input, including negative and
//! pathological values, yields a clamped, in-range result. None of these
//! panic or return `Result` — invalid input is a clamp, never an error, per
//! spec §7 ("Validation rejections").

pub const MIN_SECTOR_ID: u32 = 1;
pub const MAX_SECTOR_ID: u32 = 50_000;
pub const MAX_FIGHTERS: u64 = 100_000_000_000; // 1e11
pub const MAX_CONSTELLATION_LEN: usize = 500;

/// Clamp to `[0, 100]`. Negative input becomes `0`.
pub fn validate_percent(value: i64) -> u8 {
    value.clamp(0, 100) as u8
}

/// Clamp to `[0, 1e11]`. Negative input becomes `0`.
pub fn validate_fighters(value: i64) -> u64 {
    if value <= 0 {
        0
    } else {
        (value as u64).min(MAX_FIGHTERS)
    }
}

/// `true` iff `1 <= value <= 50_000`.
pub fn validate_sector(value: i64) -> bool {
    value >= MIN_SECTOR_ID as i64 && value <= MAX_SECTOR_ID as i64
}

/// Clamp a sector id into the valid range without rejecting it outright;
/// used by handlers that must always produce *some* sector record.
pub fn clamp_sector_id(value: i64) -> u32 {
    value.clamp(MIN_SECTOR_ID as i64, MAX_SECTOR_ID as i64) as u32
}

/// Negative non-signed counters collapse to zero.
pub fn validate_nonnegative(value: i64) -> u64 {
    value.max(0) as u64
}

/// Truncate a constellation/beacon string to the 500-char bound.
pub fn truncate_constellation(value: &str) -> String {
    if value.chars().count() <= MAX_CONSTELLATION_LEN {
        value.to_string()
    } else {
        value.chars().take(MAX_CONSTELLATION_LEN).collect()
    }
}

/// Parse a comma-stripped integer, defaulting to `0` on any failure —
/// mirrors the original implementation's `parseIntSafe`, including its
/// documented quirk (spec §9): a trailing colon is simply not a valid
/// integer and becomes `0`, not an error.
pub fn parse_int_safe(token: &str) -> i64 {
    let cleaned: String = token.chars().filter(|c| *c != ',').collect();
    cleaned.trim().parse::<i64>().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_clamps_both_ends() {
        assert_eq!(validate_percent(-5), 0);
        assert_eq!(validate_percent(0), 0);
        assert_eq!(validate_percent(100), 100);
        assert_eq!(validate_percent(250), 100);
    }

    #[test]
    fn fighters_clamp_totality() {
        assert_eq!(validate_fighters(-1), 0);
        assert_eq!(validate_fighters(0), 0);
        assert_eq!(validate_fighters(200_000_000_000), MAX_FIGHTERS);
        assert_eq!(validate_fighters(42), 42);
    }

    #[test]
    fn sector_bounds() {
        assert!(!validate_sector(0));
        assert!(validate_sector(1));
        assert!(validate_sector(50_000));
        assert!(!validate_sector(50_001));
        assert!(!validate_sector(-3));
    }

    #[test]
    fn parse_int_safe_quirk_trailing_colon() {
        // Preserved legacy quirk: "1:" is not a valid number and parses to 0.
        assert_eq!(parse_int_safe("1:"), 0);
        assert_eq!(parse_int_safe("1,234"), 1234);
        assert_eq!(parse_int_safe("  42 "), 42);
        assert_eq!(parse_int_safe("garbage"), 0);
    }

    #[test]
    fn constellation_truncation() {
        let long = "x".repeat(600);
        assert_eq!(truncate_constellation(&long).len(), MAX_CONSTELLATION_LEN);
        assert_eq!(truncate_constellation("short"), "short");
    }
}
