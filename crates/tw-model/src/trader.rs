//! Trader and foreign-ship records (spec §3, §4.7, §4.8).

use serde::{Deserialize, Serialize};

use crate::alignment::Alignment;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trader {
    pub name: String,
    pub ship_name: Option<String>,
    pub ship_type: Option<String>,
    pub fighters: u64,
    pub alignment: Option<Alignment>,
}

impl Trader {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ship_name: None,
            ship_type: None,
            fighters: 0,
            alignment: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ship {
    pub name: String,
    pub owner: Option<String>,
    pub ship_type: Option<String>,
    pub fighters: u64,
    pub alignment: Option<Alignment>,
}

impl Ship {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            owner: None,
            ship_type: None,
            fighters: 0,
            alignment: None,
        }
    }
}
