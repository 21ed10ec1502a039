//! Mine-group line parsing (spec §4.10).

use tw_model::validate::parse_int_safe;
use tw_model::{MineGroup, MineKind};

pub const MINES_PREFIX: &str = "Mines   : ";

/// Parse `"<N> <Type> Mines[, <N> <Type> Mines] (belong to <OWNER>)"` into
/// one or more [`MineGroup`]s sharing the trailing owner.
pub fn parse(payload: &str) -> Vec<MineGroup> {
    let (head, owner) = split_owner(payload);
    head.split(',')
        .filter_map(|segment| parse_segment(segment, &owner))
        .collect()
}

fn split_owner(payload: &str) -> (&str, String) {
    match (payload.rfind('('), payload.rfind(')')) {
        (Some(open), Some(close)) if close > open => {
            let inner = payload[open + 1..close].trim();
            let owner = inner
                .strip_prefix("belong to ")
                .unwrap_or(inner)
                .trim()
                .to_string();
            (&payload[..open], owner)
        }
        _ => (payload, String::new()),
    }
}

fn parse_segment(segment: &str, owner: &str) -> Option<MineGroup> {
    let tokens: Vec<&str> = segment.split_whitespace().collect();
    let quantity_tok = tokens.first()?;
    let kind_tok = tokens.get(1)?;
    let quantity = parse_int_safe(quantity_tok).max(0) as u32;
    let kind = MineKind::parse(kind_tok)?;
    Some(MineGroup {
        kind,
        quantity,
        owner: owner.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_group_with_owner() {
        let groups = parse("500 Armid Mines (belong to Federation)");
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].kind, MineKind::Armid);
        assert_eq!(groups[0].quantity, 500);
        assert_eq!(groups[0].owner, "Federation");
    }

    #[test]
    fn two_groups_share_owner() {
        let groups = parse("500 Armid Mines, 200 Limpet Mines (belong to Klingons)");
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].kind, MineKind::Armid);
        assert_eq!(groups[1].kind, MineKind::Limpet);
        assert_eq!(groups[1].owner, "Klingons");
    }

    #[test]
    fn missing_owner_parens_yields_empty_owner() {
        let groups = parse("10 Armid Mines");
        assert_eq!(groups[0].owner, "");
    }
}
