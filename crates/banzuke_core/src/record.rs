//! Applying resolved bouts to the running period records.

use tracing::warn;

use crate::models::{Competitor, CompetitorId, Pairing};
use crate::resolver::BoutOutcome;

/// Record `outcome` on both competitors and on the pairing. Returns `false`
/// (and changes nothing) when the outcome does not belong to the pairing or
/// either competitor is missing from the roster.
pub fn apply_outcome(roster: &mut [Competitor], pairing: &mut Pairing, outcome: &BoutOutcome) -> bool {
    if pairing.opponent_of(&outcome.winner) != Some(outcome.loser.as_str()) {
        warn!(
            east = %pairing.east,
            west = %pairing.west,
            winner = %outcome.winner,
            "outcome does not match pairing"
        );
        return false;
    }

    let winner = roster.iter().position(|c| c.id == outcome.winner);
    let loser = roster.iter().position(|c| c.id == outcome.loser);
    let (Some(w), Some(l)) = (winner, loser) else {
        warn!(winner = %outcome.winner, loser = %outcome.loser, "unknown competitor in outcome");
        return false;
    };

    let day = pairing.day;
    roster[w].record.record_bout(&outcome.loser, day, true);
    roster[l].record.record_bout(&outcome.winner, day, false);
    pairing.winner = Some(outcome.winner.clone());
    true
}

/// Top-division competitor with the most wins; ties go to the higher rank.
/// `None` when nobody in the top division has a win.
pub fn period_champion(roster: &[Competitor]) -> Option<CompetitorId> {
    roster
        .iter()
        .filter(|c| c.is_top_division() && c.record.wins > 0)
        .min_by(|a, b| b.record.wins.cmp(&a.record.wins).then_with(|| a.rank_slot().cmp(&b.rank_slot())))
        .map(|c| c.id.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rank::{Division, RuleSet, Side, Tier};
    use crate::resolver::resolve;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn outcome(winner: &str, loser: &str) -> BoutOutcome {
        BoutOutcome {
            winner: winner.into(),
            loser: loser.into(),
            winning_side: Side::East,
            probability_east: 0.5,
            roll: 0.1,
            triggered: Vec::new(),
        }
    }

    #[test]
    fn test_apply_outcome_updates_both_sides() {
        let mut roster = vec![
            Competitor::new("a", "s1", Tier::Maegashira),
            Competitor::new("b", "s2", Tier::Maegashira).with_slot(1, Side::West),
        ];
        let mut pairing = Pairing::new("a", "b", Division::Makuuchi, 4);
        assert!(apply_outcome(&mut roster, &mut pairing, &outcome("b", "a")));

        assert_eq!(pairing.winner.as_deref(), Some("b"));
        assert_eq!((roster[0].record.wins, roster[0].record.losses), (0, 1));
        assert_eq!((roster[1].record.wins, roster[1].record.losses), (1, 0));
        assert!(roster[0].record.has_faced("b"));
        assert!(roster[1].record.fought_on(4));
    }

    #[test]
    fn test_mismatched_outcome_is_ignored() {
        let mut roster = vec![Competitor::new("a", "s1", Tier::Juryo), Competitor::new("b", "s2", Tier::Juryo)];
        let mut pairing = Pairing::new("a", "b", Division::Juryo, 1);
        assert!(!apply_outcome(&mut roster, &mut pairing, &outcome("a", "z")));
        assert!(!apply_outcome(&mut roster, &mut pairing, &outcome("x", "a")));
        assert!(pairing.winner.is_none());
        assert_eq!(roster[0].record.bouts(), 0);
    }

    #[test]
    fn test_missing_competitor_is_ignored() {
        let mut roster = vec![Competitor::new("a", "s1", Tier::Juryo)];
        let mut pairing = Pairing::new("a", "b", Division::Juryo, 1);
        assert!(!apply_outcome(&mut roster, &mut pairing, &outcome("a", "b")));
        assert_eq!(roster[0].record.bouts(), 0);
    }

    #[test]
    fn test_resolved_bout_round_trip() {
        let rules = RuleSet::standard();
        let mut roster = vec![
            Competitor::new("e", "s1", Tier::Sekiwake),
            Competitor::new("w", "s2", Tier::Komusubi),
        ];
        let mut pairing = Pairing::new("e", "w", Division::Makuuchi, 2);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let result = resolve(&roster[0], &roster[1], &rules, &mut rng);
        assert!(apply_outcome(&mut roster, &mut pairing, &result));
        assert_eq!(roster.iter().map(|c| c.record.bouts()).sum::<u8>(), 2);
        assert_eq!(pairing.loser(), Some(result.loser.as_str()));
    }

    #[test]
    fn test_period_champion() {
        let roster = vec![
            Competitor::new("o", "s1", Tier::Ozeki).with_record(12, 3),
            Competitor::new("m", "s2", Tier::Maegashira).with_slot(9, Side::East).with_record(12, 3),
            Competitor::new("j", "s3", Tier::Juryo).with_record(14, 1),
        ];
        assert_eq!(period_champion(&roster), Some("o".to_string()));

        let idle = vec![Competitor::new("y", "s", Tier::Yokozuna)];
        assert_eq!(period_champion(&idle), None);
    }
}
