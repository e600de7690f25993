//! Draft scorer: rank plus period record folded into one comparable number.

use std::cmp::Ordering;

use crate::models::Competitor;
use crate::rank::RuleSet;

/// Promotion-priority score for a competitor's current rank and record.
pub fn draft_score(competitor: &Competitor, rules: &RuleSet) -> i64 {
    let tier = competitor.tier;
    rules.base_score(tier) + competitor.record.net() as i64 * rules.coefficient(tier)
}

/// Fixed score for a competitor demoted from the minimum tier in this
/// allocation; places them at the head of the tier below.
pub fn soft_landing_score(rules: &RuleSet) -> i64 {
    rules.soft_landing_score
}

/// A competitor paired with its draft score. Lives only inside the
/// allocator's sort and cascade; the score never becomes part of the entity.
#[derive(Debug, Clone)]
pub struct ScoredCandidate {
    pub score: i64,
    pub competitor: Competitor,
}

impl ScoredCandidate {
    pub fn new(competitor: Competitor, rules: &RuleSet) -> Self {
        Self { score: draft_score(&competitor, rules), competitor }
    }

    pub fn with_score(competitor: Competitor, score: i64) -> Self {
        Self { score, competitor }
    }

    /// Draft order: higher score first, then higher previous rank, then id.
    pub fn draft_order(a: &ScoredCandidate, b: &ScoredCandidate) -> Ordering {
        b.score
            .cmp(&a.score)
            .then_with(|| a.competitor.rank_slot().cmp(&b.competitor.rank_slot()))
            .then_with(|| a.competitor.id.cmp(&b.competitor.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rank::{Side, Tier};
    use proptest::prelude::*;

    #[test]
    fn test_score_formula() {
        let rules = RuleSet::standard();
        let c = Competitor::new("a", "s", Tier::Maegashira).with_record(10, 5);
        assert_eq!(draft_score(&c, &rules), 1520 + 5 * 10);

        let lower = Competitor::new("b", "s", Tier::Makushita).with_record(2, 5);
        assert_eq!(draft_score(&lower, &rules), 1180 - 3 * 25);
    }

    #[test]
    fn test_soft_landing_tops_the_tier_below_minimum() {
        let rules = RuleSet::standard();
        let perfect = Competitor::new("p", "s", Tier::Sekiwake).with_record(15, 0);
        assert!(soft_landing_score(&rules) > draft_score(&perfect, &rules));
        assert!(soft_landing_score(&rules) < rules.base_score(Tier::Ozeki));
    }

    #[test]
    fn test_draft_order_tie_breaks_on_previous_rank() {
        let rules = RuleSet::standard();
        let a = ScoredCandidate::with_score(
            Competitor::new("a", "s", Tier::Maegashira).with_slot(3, Side::West),
            1500,
        );
        let b = ScoredCandidate::with_score(
            Competitor::new("b", "s", Tier::Maegashira).with_slot(2, Side::East),
            1500,
        );
        let c = ScoredCandidate::new(Competitor::new("c", "s", Tier::Maegashira), &rules);
        let mut all = vec![a, b, c];
        all.sort_by(ScoredCandidate::draft_order);
        let ids: Vec<&str> = all.iter().map(|s| s.competitor.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "b", "a"]);
    }

    proptest! {
        /// No record in a lower tier reaches the base score of the tier above,
        /// so a competitor at or above its tier base is never overtaken from below.
        #[test]
        fn prop_lower_tier_never_reaches_upper_base(
            tier_index in 1usize..8,
            wins in 0u8..=15,
            losses in 0u8..=15,
        ) {
            let rules = RuleSet::standard();
            let lower = Tier::all()[tier_index];
            let upper = Tier::all()[tier_index - 1];
            let bouts = rules.bouts_for(lower);
            prop_assume!(wins as u16 + losses as u16 <= bouts as u16);

            let c = Competitor::new("x", "s", lower).with_record(wins, losses);
            prop_assert!(draft_score(&c, &rules) < rules.base_score(upper));
        }

        /// Within a tier, more net wins always means a higher score.
        #[test]
        fn prop_score_monotone_in_net_wins(
            tier_index in 0usize..8,
            a_wins in 0u8..=7,
            b_wins in 0u8..=7,
        ) {
            let rules = RuleSet::standard();
            let tier = Tier::all()[tier_index];
            let a = Competitor::new("a", "s", tier).with_record(a_wins, 7 - a_wins);
            let b = Competitor::new("b", "s", tier).with_record(b_wins, 7 - b_wins);
            prop_assert_eq!(
                a_wins.cmp(&b_wins),
                draft_score(&a, &rules).cmp(&draft_score(&b, &rules))
            );
        }
    }
}
