//! Port line and build-time continuation (spec §4.5).

use tw_model::validate::parse_int_safe;
use tw_model::{class_from_pattern, Port};

pub const PORTS_PREFIX: &str = "Ports   : ";
const DEAD_PORT_MARKER: &str = "<=-DANGER-=>";
const CLASS_MARKER: &str = ", Class ";

/// Parse a `Ports   : ` payload into a [`Port`]. Returns a dead port for the
/// destroyed-port marker, parsing no further (spec §4.5).
pub fn parse(payload: &str) -> Port {
    if payload.contains(DEAD_PORT_MARKER) {
        return Port::dead_port();
    }

    let name = payload
        .find(CLASS_MARKER)
        .map(|idx| payload[..idx].to_string())
        .unwrap_or_default();

    let explicit_class = payload
        .find(CLASS_MARKER)
        .and_then(|idx| {
            let after = &payload[idx + CLASS_MARKER.len()..];
            after.chars().next()
        })
        .and_then(|c| c.to_digit(10))
        .unwrap_or(0) as u8;

    let pattern = last_three_chars(payload);
    let buying = [
        pattern.first() == Some(&'B'),
        pattern.get(1) == Some(&'B'),
        pattern.get(2) == Some(&'B'),
    ];
    let pattern_str: String = pattern.iter().collect();

    let class = if explicit_class != 0 {
        explicit_class
    } else {
        class_from_pattern(&pattern_str)
    };

    Port {
        name,
        class,
        buying,
        amounts: [0; 3],
        percents: [0; 3],
        build_time: 0,
        dead: false,
    }
}

fn last_three_chars(line: &str) -> Vec<char> {
    let chars: Vec<char> = line.chars().collect();
    let len = chars.len();
    if len >= 3 {
        chars[len - 3..].to_vec()
    } else {
        chars
    }
}

/// The eight-space continuation line's build-time token: the 4th
/// whitespace-separated token (1-based), falling back to the first numeric
/// token adjacent to a label containing `build`/`time`, or preceded by `:`
/// (spec §4.5).
pub fn parse_build_time_continuation(continuation: &str) -> u32 {
    let tokens: Vec<&str> = continuation.split_whitespace().collect();
    if let Some(fourth) = tokens.get(3) {
        if is_strictly_numeric(fourth) {
            return parse_int_safe(fourth).max(0) as u32;
        }
    }

    for (i, tok) in tokens.iter().enumerate() {
        let lower = tok.to_ascii_lowercase();
        let labelled = lower.contains("build") || lower.contains("time") || tok.ends_with(':');
        if !labelled {
            continue;
        }
        if let Some(stripped) = tok.strip_prefix(':') {
            if is_strictly_numeric(stripped) {
                return parse_int_safe(stripped).max(0) as u32;
            }
        }
        if let Some(next) = tokens.get(i + 1) {
            if is_strictly_numeric(next) {
                return parse_int_safe(next).max(0) as u32;
            }
        }
    }
    0
}

fn is_strictly_numeric(token: &str) -> bool {
    let cleaned: String = token.chars().filter(|c| *c != ',').collect();
    !cleaned.is_empty() && cleaned.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_name_and_explicit_class() {
        let port = parse("Stargate Alpha, Class 9 Port ???");
        assert_eq!(port.name, "Stargate Alpha");
        assert_eq!(port.class, 9);
        assert!(!port.dead);
    }

    #[test]
    fn derives_class_from_pattern_when_explicit_is_zero() {
        let port = parse("Trading Post, Class 0 Port BSB");
        assert_eq!(port.class, 2); // BSB=2
        assert_eq!(port.buying, [true, false, true]);
    }

    #[test]
    fn dead_port_marker_short_circuits() {
        let port = parse("<=-DANGER-=>");
        assert!(port.dead);
        assert_eq!(port.name, "");
    }

    #[test]
    fn build_time_continuation_uses_fourth_token() {
        // 1-based 4th token is the build-time value.
        let build_time = parse_build_time_continuation("Build   time   :    365");
        assert_eq!(build_time, 365);
    }

    #[test]
    fn build_time_falls_back_to_labelled_token_when_fourth_is_not_numeric() {
        let build_time = parse_build_time_continuation("The station's build time: 120");
        assert_eq!(build_time, 120);
    }
}
