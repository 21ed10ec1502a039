//! Version banner detection (spec §4.4 item 1).

use tw_model::ServerVersion;

/// Case-sensitive, column-1-anchored banner match. Longer banner wins when
/// both prefixes could apply, since `"Trade Wars 2002 Game"` is not a prefix
/// of `"TradeWars Game"` or vice versa, so only one of these ever matches.
pub fn detect(line: &str) -> Option<ServerVersion> {
    if line.starts_with("TradeWars Game") {
        Some(ServerVersion::twgs())
    } else if line.starts_with("Trade Wars 2002 Game") {
        Some(ServerVersion::tw2002())
    } else {
        None
    }
}
