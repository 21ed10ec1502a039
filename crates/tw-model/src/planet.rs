//! Planet record (spec §3, §4.6).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Planet {
    pub name: String,
    pub owner: Option<String>,
    pub fighters: u64,
    pub citadel: bool,
    pub stardock: bool,
}

impl Planet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            owner: None,
            fighters: 0,
            citadel: false,
            stardock: false,
        }
    }
}
