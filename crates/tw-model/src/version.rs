//! Server-version descriptor (spec §4.4 item 1 "Version banner").

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerVersion {
    pub twgs_type: u8,
    pub twgs_version: String,
    pub tw2002_version: String,
}

impl ServerVersion {
    pub fn twgs() -> Self {
        Self {
            twgs_type: 2,
            twgs_version: "2.20b".to_string(),
            tw2002_version: "3.34".to_string(),
        }
    }

    pub fn tw2002() -> Self {
        Self {
            twgs_type: 1,
            twgs_version: "1.03".to_string(),
            tw2002_version: "3.13".to_string(),
        }
    }
}
