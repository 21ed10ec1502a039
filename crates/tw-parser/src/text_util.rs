//! Shared string-scanning helpers for the line handlers (spec §9 "String
//! scanning contracts", "Comma-aware split").
//!
//! Every handler depends on *exact* spacing and column offsets; keeping the
//! primitives here (rather than inlining `&line[..n]` everywhere) keeps the
//! prefix set auditable, per the design note in spec §9.

/// 1-based column range, inclusive on both ends, matching spec §4.4's
/// "characters at 1-based columns 27..42" phrasing. Returns `None` if the
/// line is too short; callers treat that as "no match" rather than panicking.
pub fn column_range(line: &str, start_1based: usize, end_1based: usize) -> Option<&str> {
    let chars: Vec<char> = line.char_indices().map(|(i, _)| i).collect();
    if start_1based == 0 || end_1based < start_1based {
        return None;
    }
    let start_idx = start_1based - 1;
    if start_idx >= chars.len() {
        return None;
    }
    let end_byte = if end_1based < chars.len() {
        chars[end_1based]
    } else {
        line.len()
    };
    let start_byte = chars[start_idx];
    line.get(start_byte..end_byte)
}

/// `true` iff `line`'s first `prefix.len()` characters equal `prefix`
/// exactly (case-sensitive, byte-exact spacing).
pub fn starts_with_exact(line: &str, prefix: &str) -> bool {
    line.starts_with(prefix)
}

/// Split `payload` on commas that are not nested inside parentheses or
/// brackets (spec §4.6, §9 "Comma-aware split"). A small scanner with a
/// depth counter rather than a naive `str::split`.
pub fn split_outside_parens(payload: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut current = String::new();
    for ch in payload.chars() {
        match ch {
            '(' | '[' => {
                depth += 1;
                current.push(ch);
            }
            ')' | ']' => {
                depth -= 1;
                current.push(ch);
            }
            ',' if depth <= 0 => {
                parts.push(std::mem::take(&mut current));
            }
            _ => current.push(ch),
        }
    }
    parts.push(current);
    parts
}

/// Whitespace-separated tokens, 1-based indexing to match spec prose like
/// "the 4th token start".
pub fn tokens(line: &str) -> Vec<&str> {
    line.split_whitespace().collect()
}

/// 1-based token access.
pub fn token_at(line: &str, n: usize) -> Option<&str> {
    if n == 0 {
        return None;
    }
    tokens(line).into_iter().nth(n - 1)
}

/// Byte offset where the `n`th (1-based) whitespace-separated token starts,
/// used by handlers that need "everything from the 4th token onward" rather
/// than the token itself (spec §4.9).
pub fn nth_token_start(line: &str, n: usize) -> Option<usize> {
    if n == 0 {
        return None;
    }
    let mut count = 0;
    let mut in_token = false;
    for (i, ch) in line.char_indices() {
        if ch.is_whitespace() {
            in_token = false;
        } else if !in_token {
            in_token = true;
            count += 1;
            if count == n {
                return Some(i);
            }
        }
    }
    None
}

/// Extract the text strictly between the first `open` and the matching
/// `close` that follows it.
pub fn between<'a>(line: &'a str, open: &str, close: &str) -> Option<&'a str> {
    let start = line.find(open)? + open.len();
    let rest = &line[start..];
    let end = rest.find(close)?;
    Some(&rest[..end])
}

/// Strip a case-insensitive prefix, if present.
pub fn strip_prefix_ci<'a>(value: &'a str, prefix: &str) -> &'a str {
    if value.len() >= prefix.len() && value[..prefix.len()].eq_ignore_ascii_case(prefix) {
        &value[prefix.len()..]
    } else {
        value
    }
}

/// `true` if `haystack` contains `needle` as a standalone word (bounded by
/// non-alphanumeric characters or string edges), case-insensitive.
pub fn contains_word_ci(haystack: &str, needle: &str) -> bool {
    let hay_lower = haystack.to_ascii_lowercase();
    let needle_lower = needle.to_ascii_lowercase();
    let bytes = hay_lower.as_bytes();
    let needle_bytes = needle_lower.as_bytes();
    if needle_bytes.is_empty() {
        return false;
    }
    let mut start = 0;
    while let Some(pos) = find_from(bytes, needle_bytes, start) {
        let before_ok = pos == 0 || !is_word_byte(bytes[pos - 1]);
        let after = pos + needle_bytes.len();
        let after_ok = after >= bytes.len() || !is_word_byte(bytes[after]);
        if before_ok && after_ok {
            return true;
        }
        start = pos + 1;
    }
    false
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric()
}

fn find_from(haystack: &[u8], needle: &[u8], start: usize) -> Option<usize> {
    if start >= haystack.len() || needle.is_empty() || needle.len() > haystack.len() - start {
        return None;
    }
    haystack[start..]
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|p| p + start)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comma_split_ignores_commas_inside_parens() {
        let parts = split_outside_parens("Alpha [Owned by Bob, Inc], w/ 5 ftrs, Beta");
        assert_eq!(
            parts,
            vec![
                "Alpha [Owned by Bob, Inc]".to_string(),
                " w/ 5 ftrs".to_string(),
                " Beta".to_string(),
            ]
        );
    }

    #[test]
    fn token_at_is_one_based() {
        assert_eq!(token_at("a b c", 1), Some("a"));
        assert_eq!(token_at("a b c", 3), Some("c"));
        assert_eq!(token_at("a b c", 4), None);
    }

    #[test]
    fn nth_token_start_finds_byte_offset() {
        let line = "Incoming transmission from Kirk on channel 5:";
        let start = nth_token_start(line, 4).unwrap();
        assert_eq!(&line[start..], "Kirk on channel 5:");
    }

    #[test]
    fn contains_word_matches_whole_words_only() {
        assert!(contains_word_ci("A Citadel Planet", "citadel"));
        assert!(!contains_word_ci("Citadelle", "citadel"));
        assert!(contains_word_ci("cit", "cit"));
    }

    #[test]
    fn between_extracts_bracketed_text() {
        assert_eq!(
            between("Alpha [Owned by Bob]", "[", "]"),
            Some("Owned by Bob")
        );
        assert_eq!(between("no brackets here", "[", "]"), None);
    }
}
