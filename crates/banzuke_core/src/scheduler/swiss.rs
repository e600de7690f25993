//! Swiss pairing for the lower divisions: competitors meet others on the
//! same net score, with leftovers dropping into the next band.

use std::cmp::{Ordering, Reverse};
use std::collections::BTreeMap;

use crate::models::{Competitor, Pairing};
use crate::rank::RuleSet;
use crate::scheduler::constraints::{compatible, orient, scan_pairs, Relaxation};
use crate::scheduler::strategy::PairingStrategy;

#[derive(Debug, Clone, Copy, Default)]
pub struct SwissStrategy;

impl PairingStrategy for SwissStrategy {
    fn name(&self) -> &'static str {
        "swiss"
    }

    /// Bouts left, result not yet decided, and no bout on the previous day.
    fn is_eligible(&self, competitor: &Competitor, day: u8, rules: &RuleSet) -> bool {
        let record = &competitor.record;
        let rested = day <= 1 || !record.fought_on(day - 1);
        record.bouts() < rules.lower_bouts
            && record.wins < rules.lower_bouts
            && record.losses < rules.lower_bouts
            && !record.fought_on(day)
            && rested
    }

    fn generate(&self, pool: &[&Competitor], day: u8, rules: &RuleSet) -> Vec<Pairing> {
        let mut pairings = Vec::new();
        let mut carry: Vec<&Competitor> = Vec::new();

        for (_, band) in bands(pool, rules) {
            let mut members = std::mem::take(&mut carry);
            members.extend(band);

            let mut paired = vec![false; members.len()];
            let pairs = scan_pairs(&members, &mut paired, |a, b| {
                compatible(a, b, day, rules, Relaxation::Strict)
            });
            pairings.extend(pairs.into_iter().map(|(i, j)| orient(members[i], members[j], day)));

            carry = members
                .into_iter()
                .zip(paired)
                .filter_map(|(c, was_paired)| (!was_paired).then_some(c))
                .collect();
        }
        pairings
    }
}

/// Fewer bouts first, then better net record, then higher rank.
pub(crate) fn priority(a: &Competitor, b: &Competitor, rules: &RuleSet) -> Ordering {
    a.record
        .bouts()
        .cmp(&b.record.bouts())
        .then_with(|| b.record.net().cmp(&a.record.net()))
        .then_with(|| rules.rank_value(b.tier).cmp(&rules.rank_value(a.tier)))
        .then_with(|| a.rank_slot().cmp(&b.rank_slot()))
        .then_with(|| a.id.cmp(&b.id))
}

/// Score bands keyed by net wins, highest band first. Members keep priority
/// order within equal rank value.
pub(crate) fn bands<'a>(pool: &[&'a Competitor], rules: &RuleSet) -> BTreeMap<Reverse<i16>, Vec<&'a Competitor>> {
    let mut by_priority = pool.to_vec();
    by_priority.sort_by(|a, b| priority(a, b, rules));

    let mut bands: BTreeMap<Reverse<i16>, Vec<&'a Competitor>> = BTreeMap::new();
    for competitor in by_priority {
        bands.entry(Reverse(competitor.record.net())).or_default().push(competitor);
    }
    for members in bands.values_mut() {
        members.sort_by(|a, b| rules.rank_value(b.tier).cmp(&rules.rank_value(a.tier)));
    }
    bands
}
