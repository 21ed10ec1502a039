//! Planet line and continuation parsing (spec §4.6).

use tw_model::Planet;

use crate::text_util::{between, contains_word_ci, split_outside_parens};

pub const PLANETS_PREFIX: &str = "Planets : ";

/// Parse the payload after `Planets : ` (or, for a continuation line, after
/// its eight-space indent) into zero or more planets. A `, w/ N ftrs`
/// annotation attaches only to the first planet (spec §4.6).
pub fn parse(payload: &str) -> Vec<Planet> {
    let segments = split_outside_parens(payload);
    let mut planets = Vec::new();
    for segment in &segments {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }
        if let Some(ftrs) = fighter_annotation(segment) {
            if let Some(first) = planets.get_mut(0) {
                first.fighters = ftrs;
            }
            continue;
        }
        planets.push(parse_segment(segment));
    }
    planets
}

/// `true`-returning extraction for a standalone `w/ N ftrs` segment, which
/// the comma split produces as its own segment rather than part of a
/// planet's name (spec §4.6).
fn fighter_annotation(segment: &str) -> Option<u64> {
    let rest = segment.strip_prefix("w/ ")?;
    let count: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    if count.is_empty() || !rest[count.len()..].trim_start().starts_with("ftrs") {
        return None;
    }
    count.parse().ok()
}

fn parse_segment(segment: &str) -> Planet {
    let owner = between(segment, "[", "]").map(|raw| strip_owned_by(raw).to_string());

    let without_brackets = match (segment.find('['), segment.find(']')) {
        (Some(open), Some(close)) if close > open => {
            format!("{}{}", &segment[..open], &segment[close + 1..])
        }
        _ => segment.to_string(),
    };

    let citadel = contains_word_ci(&without_brackets, "citadel") || contains_word_ci(&without_brackets, "cit");
    let stardock = contains_word_ci(&without_brackets, "stardock") || contains_word_ci(&without_brackets, "sd");

    let mut name = strip_flag_words(&without_brackets).trim().to_string();
    if name.is_empty() {
        name = if stardock {
            "Stardock".to_string()
        } else if citadel {
            "Citadel".to_string()
        } else {
            "Unknown Planet".to_string()
        };
    }

    Planet {
        name,
        owner,
        fighters: 0,
        citadel,
        stardock,
    }
}

fn strip_owned_by(raw: &str) -> &str {
    let trimmed = raw.trim();
    if trimmed.len() >= 9 && trimmed[..9].eq_ignore_ascii_case("Owned by ") {
        trimmed[9..].trim()
    } else {
        trimmed
    }
}

/// Remove flag tokens (`citadel`, `cit`, `stardock`, `sd`) so the remainder
/// is the bare planet name.
fn strip_flag_words(text: &str) -> String {
    text.split_whitespace()
        .filter(|tok| {
            let bare = tok.trim_matches(|c: char| !c.is_ascii_alphanumeric());
            !matches!(
                bare.to_ascii_lowercase().as_str(),
                "citadel" | "cit" | "stardock" | "sd"
            )
        })
        .collect::<Vec<_>>()
        .join(" ")
}
