//! Trader/ship alignment (spec §3, round-trip law in §8).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Alignment {
    Good,
    Evil,
    Neutral,
    Outlaw,
    Criminal,
}

impl Alignment {
    /// Parse the exact (case-sensitive) tokens the wire format uses. Returns
    /// `None` for anything else, including the empty string — callers store
    /// that as `Option<Alignment> = None`, not a sixth variant, since "" is
    /// simply the absence of a parsed alignment (spec §3).
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "Good" => Some(Self::Good),
            "Evil" => Some(Self::Evil),
            "Neutral" => Some(Self::Neutral),
            "Outlaw" => Some(Self::Outlaw),
            "Criminal" => Some(Self::Criminal),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Evil => "Evil",
            Self::Neutral => "Neutral",
            Self::Outlaw => "Outlaw",
            Self::Criminal => "Criminal",
        }
    }
}
