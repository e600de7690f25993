//! Combined salaried pool: Makuuchi and Juryo paired together.

use std::cmp::Ordering;

use crate::models::{BoutTag, Competitor, Pairing};
use crate::rank::{RankSlot, RuleSet, Tier};
use crate::scheduler::constraints::{compatible, orient, scan_pairs, Relaxation};
use crate::scheduler::strategy::PairingStrategy;

/// Rank order early in the period, leaders first late in the period. A
/// strict pass is followed by a pass that lifts only the top-two
/// reservation, so the reservation never leaves anyone without a bout.
#[derive(Debug, Clone, Copy, Default)]
pub struct SekitoriStrategy;

impl PairingStrategy for SekitoriStrategy {
    fn name(&self) -> &'static str {
        "sekitori"
    }

    fn is_eligible(&self, competitor: &Competitor, day: u8, rules: &RuleSet) -> bool {
        competitor.record.bouts() < rules.sekitori_bouts && !competitor.record.fought_on(day)
    }

    fn generate(&self, pool: &[&Competitor], day: u8, rules: &RuleSet) -> Vec<Pairing> {
        let order = ordered(pool, day, rules);
        let mut paired = vec![false; order.len()];

        let mut pairs = scan_pairs(&order, &mut paired, |a, b| {
            compatible(a, b, day, rules, Relaxation::Strict)
        });
        pairs.extend(scan_pairs(&order, &mut paired, |a, b| {
            compatible(a, b, day, rules, Relaxation::AllowReserved)
        }));

        let mut bouts: Vec<(RankSlot, Pairing)> = pairs
            .into_iter()
            .map(|(i, j)| {
                let (a, b) = (order[i], order[j]);
                let mut pairing = orient(a, b, day);
                tag(&mut pairing, a, b, day, rules);
                (a.rank_slot().min(b.rank_slot()), pairing)
            })
            .collect();

        // Lowest-ranked bouts first; the top of the card fights last.
        bouts.sort_by(|x, y| y.0.cmp(&x.0));
        let mut pairings: Vec<Pairing> = bouts.into_iter().map(|(_, p)| p).collect();

        if day == rules.period_days {
            if let Some(last) = pairings.last_mut() {
                last.add_tag(BoutTag::ClosingBout);
            }
        }
        pairings
    }
}

/// Pool order for the day.
pub(crate) fn ordered<'a>(pool: &[&'a Competitor], day: u8, rules: &RuleSet) -> Vec<&'a Competitor> {
    let by_rank = |a: &Competitor, b: &Competitor| -> Ordering {
        rules
            .rank_value(b.tier)
            .cmp(&rules.rank_value(a.tier))
            .then_with(|| a.rank_slot().cmp(&b.rank_slot()))
            .then_with(|| a.id.cmp(&b.id))
    };

    let mut order = pool.to_vec();
    if day <= rules.rank_order_until_day {
        order.sort_by(|a, b| by_rank(a, b));
    } else {
        order.sort_by(|a, b| b.record.wins.cmp(&a.record.wins).then_with(|| by_rank(a, b)));
    }
    order
}

fn tag(pairing: &mut Pairing, a: &Competitor, b: &Competitor, day: u8, rules: &RuleSet) {
    let upset = |x: &Competitor, y: &Competitor| x.tier == Tier::Maegashira && y.tier == Tier::Yokozuna;
    if upset(a, b) || upset(b, a) {
        pairing.add_tag(BoutTag::UpsetOpportunity);
    }

    let in_race = |c: &Competitor| {
        c.is_top_division() && c.record.wins as u16 + rules.contention_offset as u16 >= day as u16
    };
    if day >= rules.contention_from_day && in_race(a) && in_race(b) {
        pairing.add_tag(BoutTag::TitleContention);
    }
}
