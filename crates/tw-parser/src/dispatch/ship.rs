//! Foreign ship line and type continuation (spec §4.8).

use tw_model::validate::parse_int_safe;
use tw_model::{Alignment, Ship};

use crate::text_util::{between, column_range};

pub const SHIPS_PREFIX: &str = "Ships   : ";
/// The continuation's ship-type parenthesis must open at 1-based column 12
/// of the raw (unstripped) line (spec §4.8).
const SHIP_TYPE_OPEN_COLUMN: usize = 12;

/// Parse `"<NAME> [Owned by <OWNER>], w/ <count> ftrs,"` into a [`Ship`]
/// (no type yet — that arrives, if at all, on a continuation line).
pub fn parse(payload: &str) -> Ship {
    let name_end = payload.find("[Owned by").unwrap_or(payload.len());
    let name = payload[..name_end].trim().to_string();

    let owner = between(payload, "[Owned by ", "]").map(|raw| raw.trim().to_string());

    let fighters = payload
        .find(", w/ ")
        .map(|idx| {
            let rest = &payload[idx + ", w/ ".len()..];
            let digits: String = rest
                .chars()
                .take_while(|c| c.is_ascii_digit() || *c == ',')
                .collect();
            parse_int_safe(&digits).max(0) as u64
        })
        .unwrap_or(0);

    Ship {
        name,
        owner,
        ship_type: None,
        fighters,
        alignment: None,
    }
}

/// `true` iff the continuation's `(` sits at 1-based column 12 (spec §4.8).
pub fn is_type_continuation(continuation: &str) -> bool {
    column_range(continuation, SHIP_TYPE_OPEN_COLUMN, SHIP_TYPE_OPEN_COLUMN)
        .map(|s| s == "(")
        .unwrap_or(false)
}

/// Apply the parenthesised continuation content: a recognised alignment is
/// stored as alignment instead of ship-type.
pub fn apply_type_continuation(ship: &mut Ship, continuation: &str) {
    let Some(inner) = between(continuation, "(", ")") else {
        return;
    };
    let inner = inner.trim();
    match Alignment::parse(inner) {
        Some(alignment) => ship.alignment = Some(alignment),
        None => ship.ship_type = Some(inner.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_name_owner_and_fighters() {
        let ship = parse("Death Star [Owned by Vader], w/ 9,000 ftrs,");
        assert_eq!(ship.name, "Death Star");
        assert_eq!(ship.owner, Some("Vader".to_string()));
        assert_eq!(ship.fighters, 9000);
    }

    #[test]
    fn type_continuation_requires_column_twelve_paren() {
        assert!(is_type_continuation("           (Imperial Cruiser)")); // '(' at column 12
        assert!(!is_type_continuation("        (Imperial Cruiser)")); // '(' at column 9
    }

    #[test]
    fn alignment_in_parens_sets_alignment_not_type() {
        let mut ship = Ship::new("Death Star");
        apply_type_continuation(&mut ship, "           (Evil)");
        assert_eq!(ship.alignment, Some(Alignment::Evil));
        assert_eq!(ship.ship_type, None);
    }

    #[test]
    fn non_alignment_parens_set_ship_type() {
        let mut ship = Ship::new("Death Star");
        apply_type_continuation(&mut ship, "           (Imperial Cruiser)");
        assert_eq!(ship.ship_type, Some("Imperial Cruiser".to_string()));
        assert_eq!(ship.alignment, None);
    }
}
