//! Prompt and completion markers (spec §4.4 items 2, 3, 6, 7).

use tw_model::validate::clamp_sector_id;

use crate::text_util::between;

const COMMAND_PROMPT_PREFIX: &str = "Command [TL=";
const COMPUTER_COMMAND_PROMPT_PREFIX: &str = "Computer command [TL=";
const CITADEL_TREASURY_PREFIX: &str = "Citadel treasury contains";
const DOCKING_PREFIX: &str = "Docking...";
const PORT_CR_PROMPT: &str = "What sector is the port in?";

/// `true` iff `line` opens a `Command [TL=` / `Computer command [TL=` prompt
/// — the sector completion trigger of spec §4.4 item 2.
pub fn is_command_prompt(line: &str) -> bool {
    line.starts_with(COMMAND_PROMPT_PREFIX) || line.starts_with(COMPUTER_COMMAND_PROMPT_PREFIX)
}

/// Extract the current-sector number from the parenthesised trailer of a
/// command prompt, e.g. `"Command [TL=00150] (2500) ?"` → `2500`.
pub fn command_prompt_sector(line: &str) -> Option<u32> {
    let inside = between(line, "(", ")")?;
    Some(clamp_sector_id(tw_model::validate::parse_int_safe(inside)))
}

/// First 25 characters equal `Citadel treasury contains`, anchored at
/// column 1 exactly — a line with any leading whitespace never matches
/// (spec §9).
pub fn is_citadel_treasury(line: &str) -> bool {
    line.len() >= CITADEL_TREASURY_PREFIX.len()
        && &line[..CITADEL_TREASURY_PREFIX.len()] == CITADEL_TREASURY_PREFIX
}

pub fn is_docking_marker(line: &str) -> bool {
    line.starts_with(DOCKING_PREFIX)
}

pub fn is_port_cr_prompt(line: &str) -> bool {
    line == PORT_CR_PROMPT
}

/// The CIM prompt is exactly `": "` (colon-space), nothing more (spec §4.4
/// item 7).
pub fn is_cim_prompt(line: &str) -> bool {
    line == ": "
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_prompt_extracts_sector() {
        assert!(is_command_prompt("Command [TL=00150] (2500) ?"));
        assert_eq!(command_prompt_sector("Command [TL=00150] (2500) ?"), Some(2500));
    }

    #[test]
    fn computer_command_prompt_recognised() {
        assert!(is_command_prompt("Computer command [TL=00000] (42) ?"));
    }

    #[test]
    fn citadel_treasury_requires_column_one_anchor() {
        assert!(is_citadel_treasury("Citadel treasury contains 2,500,000 credits"));
        assert!(!is_citadel_treasury(" Citadel treasury contains 500 credits"));
    }

    #[test]
    fn cim_prompt_is_exact() {
        assert!(is_cim_prompt(": "));
        assert!(!is_cim_prompt(":"));
        assert!(!is_cim_prompt(":  "));
    }
}
