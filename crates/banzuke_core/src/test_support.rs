//! Roster fixtures shared by unit tests.

use crate::models::{Attributes, Competitor};
use crate::rank::{Capacity, RankSlot, RuleSet, Tier};

/// Full ladder: `yokozuna` and `ozeki` members, every fixed tier at its
/// quota and `sandanme` competitors in the bottom tier. Ids are `c000`,
/// `c001`, ... from the top; stables cycle through 23 ids so neighbours
/// rarely share one.
pub(crate) fn ladder(rules: &RuleSet, yokozuna: usize, ozeki: usize, sandanme: usize) -> Vec<Competitor> {
    let mut roster = Vec::new();
    let mut n = 0usize;
    for &tier in Tier::all() {
        let count = match (tier, rules.capacity(tier)) {
            (Tier::Yokozuna, _) => yokozuna,
            (Tier::Ozeki, _) => ozeki,
            (t, _) if t == Tier::bottom() => sandanme,
            (_, Capacity::Fixed(k)) | (_, Capacity::Minimum(k)) => k,
            (_, Capacity::Unbounded) => 0,
        };
        for slot in 0..count {
            let rank = RankSlot::from_slot(tier, slot);
            roster.push(
                Competitor::new(format!("c{:03}", n), format!("stable{:02}", n % 23), tier)
                    .with_slot(rank.position, rank.side)
                    .with_attributes(Attributes::new(
                        40 + (n * 7 % 50) as u8,
                        40 + (n * 11 % 50) as u8,
                        40 + (n * 13 % 50) as u8,
                    )),
            );
            n += 1;
        }
    }
    roster
}

pub(crate) fn find<'a>(roster: &'a [Competitor], id: &str) -> &'a Competitor {
    roster
        .iter()
        .find(|c| c.id == id)
        .unwrap_or_else(|| panic!("competitor {} missing from roster", id))
}
