//! Trader line and ship continuation (spec §4.7).

use tw_model::validate::{parse_int_safe, validate_fighters};
use tw_model::{Alignment, Trader};

use crate::text_util::between;

pub const TRADERS_PREFIX: &str = "Traders : ";

/// Parse `"<NAME>[ (<alignment>)], w/ <count> ftrs"` into a held [`Trader`]
/// (no ship details yet — those arrive, if at all, on a continuation line).
pub fn parse(payload: &str) -> Trader {
    let (name_part, ftrs_part) = match payload.find(", w/ ") {
        Some(idx) => (&payload[..idx], &payload[idx + ", w/ ".len()..]),
        None => (payload, ""),
    };

    let (name, alignment) = extract_alignment(name_part);
    let fighters = parse_fighter_count(ftrs_part);

    Trader {
        name,
        ship_name: None,
        ship_type: None,
        fighters,
        alignment,
    }
}

fn extract_alignment(text: &str) -> (String, Option<Alignment>) {
    if let Some(paren) = between(text, "(", ")") {
        if let Some(alignment) = Alignment::parse(paren) {
            let open = text.find('(').unwrap();
            let name = text[..open].trim().to_string();
            return (name, Some(alignment));
        }
    }
    (text.trim().to_string(), None)
}

fn parse_fighter_count(text: &str) -> u64 {
    let digits: String = text
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == ',')
        .collect();
    validate_fighters(parse_int_safe(&digits))
}

/// `true` iff a continuation line's first token is `in` — ship details
/// follow (spec §4.7).
pub fn is_ship_continuation(continuation: &str) -> bool {
    continuation.split_whitespace().next() == Some("in")
}

/// Parse `"in <ship-name> (<ship-type>)"` (or, with no parentheses,
/// `"in <ship-name> [<alignment>]"`) and attach it to `trader`.
pub fn apply_ship_continuation(trader: &mut Trader, continuation: &str) {
    let rest = continuation
        .trim_start()
        .strip_prefix("in ")
        .unwrap_or(continuation)
        .trim();

    if let Some(ship_type) = between(rest, "(", ")") {
        let open = rest.find('(').unwrap();
        trader.ship_name = Some(rest[..open].trim().to_string());
        trader.ship_type = Some(ship_type.trim().to_string());
        return;
    }

    if let Some(alignment_tok) = between(rest, "[", "]") {
        let open = rest.find('[').unwrap();
        trader.ship_name = Some(rest[..open].trim().to_string());
        trader.alignment = Alignment::parse(alignment_tok).or(trader.alignment);
        return;
    }

    trader.ship_name = Some(rest.to_string());
}
