//! Pairing constraints and the greedy forward scan both strategies share.

use crate::models::{Competitor, Pairing};
use crate::rank::{RuleSet, Tier};

/// Which constraints a scan enforces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relaxation {
    /// Every constraint, including the top-two reservation.
    Strict,
    /// Drops only the top-two reservation.
    AllowReserved,
}

pub fn same_stable(a: &Competitor, b: &Competitor) -> bool {
    a.stable_id == b.stable_id
}

pub fn already_met(a: &Competitor, b: &Competitor) -> bool {
    a.record.has_faced(&b.id) || b.record.has_faced(&a.id)
}

/// Juryo competitors never face the upper Maegashira ranks or anyone above them.
pub fn violates_rank_barrier(a: &Competitor, b: &Competitor, rules: &RuleSet) -> bool {
    let shielded = |c: &Competitor| {
        c.tier.is_above(Tier::Maegashira)
            || (c.tier == Tier::Maegashira && c.rank_slot().position <= rules.barrier_position)
    };
    (a.tier == Tier::Juryo && shielded(b)) || (b.tier == Tier::Juryo && shielded(a))
}

/// Yokozuna and Ozeki are kept apart until the final days.
pub fn reserved(a: &Competitor, b: &Competitor, day: u8, rules: &RuleSet) -> bool {
    day <= rules.reserved_until_day && a.tier.is_top_two() && b.tier.is_top_two()
}

/// Whether `a` and `b` may meet on `day`.
pub fn compatible(a: &Competitor, b: &Competitor, day: u8, rules: &RuleSet, relaxation: Relaxation) -> bool {
    if a.id == b.id || same_stable(a, b) || already_met(a, b) || violates_rank_barrier(a, b, rules) {
        return false;
    }
    match relaxation {
        Relaxation::Strict => !reserved(a, b, day, rules),
        Relaxation::AllowReserved => true,
    }
}

/// Greedy forward scan: each unpaired entry in order takes the first later
/// unpaired entry `accept` allows. Returns index pairs into `order`.
pub fn scan_pairs<F>(order: &[&Competitor], paired: &mut [bool], accept: F) -> Vec<(usize, usize)>
where
    F: Fn(&Competitor, &Competitor) -> bool,
{
    let mut pairs = Vec::new();
    for i in 0..order.len() {
        if paired[i] {
            continue;
        }
        let found = (i + 1..order.len()).find(|&j| !paired[j] && accept(order[i], order[j]));
        if let Some(j) = found {
            paired[i] = true;
            paired[j] = true;
            pairs.push((i, j));
        }
    }
    pairs
}

/// Pairing with the higher-ranked competitor on the east side.
pub fn orient(a: &Competitor, b: &Competitor, day: u8) -> Pairing {
    let (east, west) = if a.rank_slot() <= b.rank_slot() { (a, b) } else { (b, a) };
    Pairing::new(east.id.clone(), west.id.clone(), east.tier.division(), day)
}
