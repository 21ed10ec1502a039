//! Construction-time configuration (spec §6 "No CLI", SPEC_FULL §6).
//!
//! There is no CLI surface here — a surrounding proxy loads its own
//! configuration (out of scope, spec §1) and passes the handful of values
//! the parser actually needs into [`ParserConfig`], the same way the teacher
//! workspace's `core-config::ConfigFile` is parsed upstream of the editor
//! core and only the derived, clamped values cross into the hot path.

use serde::Deserialize;
use tw_codec::DEFAULT_MAX_LINE_BYTES;
use tw_events::DEFAULT_HISTORY_SIZE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ParserConfig {
    #[serde(default = "default_history_size")]
    pub history_size: usize,
    #[serde(default = "default_max_line_bytes")]
    pub max_line_bytes: usize,
}

fn default_history_size() -> usize {
    DEFAULT_HISTORY_SIZE
}

fn default_max_line_bytes() -> usize {
    DEFAULT_MAX_LINE_BYTES
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            history_size: DEFAULT_HISTORY_SIZE,
            max_line_bytes: DEFAULT_MAX_LINE_BYTES,
        }
    }
}

impl ParserConfig {
    /// Load from a TOML document, falling back to defaults for missing
    /// fields and clamping zero values the same way the rest of the crate
    /// treats invalid numeric input: never reject, always produce something
    /// usable (spec §4.16).
    pub fn from_toml(raw: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(raw)?;
        config.clamp();
        Ok(config)
    }

    fn clamp(&mut self) {
        if self.history_size == 0 {
            self.history_size = DEFAULT_HISTORY_SIZE;
        }
        if self.max_line_bytes == 0 {
            self.max_line_bytes = DEFAULT_MAX_LINE_BYTES;
        }
    }
}
