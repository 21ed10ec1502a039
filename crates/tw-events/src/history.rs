//! Bounded message history ring (§3 "Message history", §8 "Bounded history").

use std::collections::VecDeque;
use std::time::SystemTime;

/// Classification of an in-game message per spec §3.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    General,
    Radio,
    Fedlink,
    Personal,
    Fighter,
    Computer,
    Shipboard,
    Deployed,
}

/// A single recorded message (transmission, radio chatter, fighter report, ...).
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub kind: MessageKind,
    pub timestamp: SystemTime,
    pub content: String,
    pub sender: String,
    /// Radio channel, when applicable. `Some(0)` is a legitimate value — see
    /// the `parseIntSafe("1:")` quirk preserved in `tw-parser`.
    pub channel: Option<u32>,
}

impl Message {
    pub fn new(kind: MessageKind, sender: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            kind,
            timestamp: SystemTime::now(),
            content: content.into(),
            sender: sender.into(),
            channel: None,
        }
    }

    pub fn with_channel(mut self, channel: u32) -> Self {
        self.channel = Some(channel);
        self
    }
}

/// Default ring capacity when a caller does not specify one (§6 "Configuration").
pub const DEFAULT_HISTORY_SIZE: usize = 500;

/// Fixed-capacity FIFO ring of messages. Pushing past capacity drops the
/// oldest entry first, guaranteeing `len() <= capacity` at all times (the
/// "Bounded history" property in spec §8).
#[derive(Debug, Clone)]
pub struct MessageHistory {
    capacity: usize,
    entries: VecDeque<Message>,
}

impl MessageHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: VecDeque::with_capacity(capacity.max(1).min(64)),
        }
    }

    pub fn push(&mut self, message: Message) {
        if self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(message);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.entries.iter()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for MessageHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_drops_oldest_past_capacity() {
        let mut history = MessageHistory::new(3);
        for i in 0..5 {
            history.push(Message::new(MessageKind::General, "sys", format!("msg {i}")));
        }
        assert_eq!(history.len(), 3);
        let contents: Vec<_> = history.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["msg 2", "msg 3", "msg 4"]);
    }

    #[test]
    fn capacity_floor_is_one() {
        let history = MessageHistory::new(0);
        assert_eq!(history.capacity(), 1);
    }
}
