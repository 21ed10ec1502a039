//! Transmission headers and message content lines (spec §4.9).

use tw_events::{Message, MessageHistory, MessageKind};
use tw_model::validate::parse_int_safe;
use tw_store::GameStore;

use crate::text_util::{nth_token_start, token_at};

/// Sticky context a transmission header establishes for the content lines
/// that follow it (`R `, `F `, `P ` prefixes).
#[derive(Debug, Clone, Default)]
pub struct MessageContext {
    pub kind: Option<MessageKind>,
    pub sender: String,
    pub channel: Option<u32>,
}

/// `true` iff `line` is one of the recognised transmission header prefixes
/// (spec §4.4 item 8).
pub fn is_transmission_header(line: &str) -> bool {
    line.starts_with("Incoming transmission from")
        || line.starts_with("Continuing transmission from")
        || line.starts_with("Fighter message from sector")
        || line.starts_with("Computer message")
        || line.starts_with("Deployed Fighters Report Sector")
        || line.starts_with("Shipboard Computers ")
}

/// Classify a transmission header into a fresh [`MessageContext`], per the
/// exhaustive rules in spec §4.9.
pub fn classify_header(line: &str) -> MessageContext {
    if let Some(marker) = line.find(" on channel ") {
        let sender = nth_token_start(line, 4)
            .map(|start| line[start..marker].trim().to_string())
            .unwrap_or_default();
        let after = &line[marker + " on channel ".len()..];
        let channel_tok = after.split_whitespace().next().unwrap_or("");
        let channel = parse_int_safe(channel_tok.trim_end_matches(':')) as u32;
        return MessageContext {
            kind: Some(MessageKind::Radio),
            sender,
            channel: Some(channel),
        };
    }

    if line.trim_end().ends_with("comm-link:") {
        let sender = line
            .find(" on Federation")
            .and_then(|marker| nth_token_start(line, 4).map(|start| line[start..marker].trim().to_string()))
            .unwrap_or_default();
        return MessageContext {
            kind: Some(MessageKind::Fedlink),
            sender,
            channel: None,
        };
    }

    if token_at(line, 5) == Some("Fighters:") {
        return MessageContext {
            kind: Some(MessageKind::Fighter),
            sender: "Fighters".to_string(),
            channel: None,
        };
    }

    if token_at(line, 5) == Some("Computers:") {
        return MessageContext {
            kind: Some(MessageKind::Computer),
            sender: "Computer".to_string(),
            channel: None,
        };
    }

    if line.starts_with("Deployed Fighters Report Sector") {
        let sector = token_at(line, 5).unwrap_or("");
        return MessageContext {
            kind: Some(MessageKind::Deployed),
            sender: format!("sector {sector}"),
            channel: None,
        };
    }

    if line.starts_with("Shipboard Computers ") {
        return MessageContext {
            kind: Some(MessageKind::Shipboard),
            sender: "Computer".to_string(),
            channel: None,
        };
    }

    // Default: "Incoming/Continuing transmission from <name>:" personal message.
    let sender = nth_token_start(line, 4)
        .map(|start| line[start..].trim().trim_end_matches(':').to_string())
        .unwrap_or_default();
    MessageContext {
        kind: Some(MessageKind::Personal),
        sender,
        channel: None,
    }
}

/// Whether a content line is `R `, `F `, or `P ` and should inherit the
/// sticky context, returning the marker character.
pub fn content_marker(line: &str) -> Option<char> {
    let bytes = line.as_bytes();
    if bytes.len() >= 2 && bytes[1] == b' ' && matches!(bytes[0], b'R' | b'F' | b'P') {
        Some(bytes[0] as char)
    } else {
        None
    }
}

/// `true` iff a `P ` line's 3rd token is `indicates` — such lines are
/// dropped, not recorded (spec §4.9).
pub fn is_dropped_indicator_line(content: &str) -> bool {
    token_at(content, 3) == Some("indicates")
}

/// Record a classified transmission or content line into history and the
/// store. `sender`/`channel` come from the sticky [`MessageContext`] for
/// content lines, or are freshly derived for headers.
pub fn record_message(
    history: &mut MessageHistory,
    store: &mut dyn GameStore,
    kind: MessageKind,
    sender: &str,
    channel: Option<u32>,
    content: &str,
) {
    let mut message = Message::new(kind, sender, content);
    if let Some(channel) = channel {
        message = message.with_channel(channel);
    }
    history.push(message.clone());
    if let Err(e) = store.add_message_to_history(&message) {
        tracing::warn!(target: "persist", error = %e, "add_message_to_history failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radio_header_extracts_sender_and_channel() {
        let ctx = classify_header("Incoming Kirk Solo on channel 5: hailing");
        assert_eq!(ctx.kind, Some(MessageKind::Radio));
        assert_eq!(ctx.sender, "Kirk Solo");
        assert_eq!(ctx.channel, Some(5));
    }

    #[test]
    fn radio_channel_trailing_colon_quirk_preserved() {
        // "1:" is not a valid integer in the legacy parser and becomes 0.
        let ctx = classify_header("Incoming Kirk on channel 1: hi");
        assert_eq!(ctx.channel, Some(0));
    }

    #[test]
    fn fighter_and_computer_headers() {
        let ctx = classify_header("Incoming transmission from Fighters: under attack");
        assert_eq!(ctx.kind, Some(MessageKind::Fighter));
        assert_eq!(ctx.sender, "Fighters");

        let ctx = classify_header("Incoming transmission from Computers: alert");
        assert_eq!(ctx.kind, Some(MessageKind::Computer));
        assert_eq!(ctx.sender, "Computer");
    }

    #[test]
    fn deployed_fighters_header() {
        let ctx = classify_header("Deployed Fighters Report Sector 1234 : status");
        assert_eq!(ctx.kind, Some(MessageKind::Deployed));
        assert_eq!(ctx.sender, "sector 1234");
    }

    #[test]
    fn default_personal_header_strips_trailing_colon() {
        let ctx = classify_header("Incoming transmission from Spock:");
        assert_eq!(ctx.kind, Some(MessageKind::Personal));
        assert_eq!(ctx.sender, "Spock");
    }

    #[test]
    fn content_line_markers() {
        assert_eq!(content_marker("R hello"), Some('R'));
        assert_eq!(content_marker("F msg"), Some('F'));
        assert_eq!(content_marker("P msg"), Some('P'));
        assert_eq!(content_marker("plain text"), None);
    }

    #[test]
    fn dropped_indicator_line_detected() {
        assert!(is_dropped_indicator_line("P Computer indicates hostile"));
        assert!(!is_dropped_indicator_line("P says hello there"));
    }
}
