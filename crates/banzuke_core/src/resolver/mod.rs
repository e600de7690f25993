//! Outcome resolver: two competitors in, east win probability and a winner out.
//!
//! Pipeline:
//! 1. dominant attribute per side, base force = attribute mean
//! 2. cyclical advantage bonus (power > skill > composure > power)
//! 3. trait modifiers
//! 4. force ratio, then rank-value adjustment, top-tier intimidation and
//!    variance compression
//! 5. clamp, then one uniform draw against the injected RNG

pub mod traits;

pub use traits::{BoutTrait, TriggeredTrait};

use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::models::{Competitor, CompetitorId};
use crate::rank::{RuleSet, Side, Tier};

/// Result of one resolved bout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoutOutcome {
    pub winner: CompetitorId,
    pub loser: CompetitorId,
    pub winning_side: Side,
    pub probability_east: f64,
    pub roll: f64,
    pub triggered: Vec<TriggeredTrait>,
}

/// East win probability without drawing randomness. Probabilistic traits are
/// not considered.
pub fn probability(east: &Competitor, west: &Competitor, rules: &RuleSet) -> f64 {
    let mut triggered = Vec::new();
    compute_probability(east, west, rules, None, &mut triggered)
}

/// Resolve a bout. Probabilistic traits roll first (east's, then west's, in
/// list order), then one draw decides the winner: east wins if the draw is
/// below the east probability.
pub fn resolve(
    east: &Competitor,
    west: &Competitor,
    rules: &RuleSet,
    rng: &mut impl Rng,
) -> BoutOutcome {
    let mut triggered = Vec::new();
    let probability_east =
        compute_probability(east, west, rules, Some(&mut *rng), &mut triggered);
    let roll: f64 = rng.gen();
    let (winner, loser, winning_side) = if roll < probability_east {
        (east, west, Side::East)
    } else {
        (west, east, Side::West)
    };

    trace!(
        east = %east.id,
        west = %west.id,
        probability_east,
        roll,
        winner = %winner.id,
        traits = triggered.len(),
        "bout resolved"
    );

    BoutOutcome {
        winner: winner.id.clone(),
        loser: loser.id.clone(),
        winning_side,
        probability_east,
        roll,
        triggered,
    }
}

fn compute_probability(
    east: &Competitor,
    west: &Competitor,
    rules: &RuleSet,
    mut rng: Option<&mut dyn RngCore>,
    triggered: &mut Vec<TriggeredTrait>,
) -> f64 {
    let r = &rules.resolver;
    let east_attrs = east.effective_attributes();
    let west_attrs = west.effective_attributes();

    let mut east_force = east_attrs.mean();
    let mut west_force = west_attrs.mean();

    let east_dominant = east_attrs.dominant();
    let west_dominant = west_attrs.dominant();
    if east_dominant.beats(west_dominant) {
        east_force *= 1.0 + r.advantage_bonus;
    } else if west_dominant.beats(east_dominant) {
        west_force *= 1.0 + r.advantage_bonus;
    }

    east_force = traits::apply_traits(
        east,
        west,
        rules,
        east_force,
        reborrow(&mut rng),
        triggered,
    );
    west_force = traits::apply_traits(
        west,
        east,
        rules,
        west_force,
        reborrow(&mut rng),
        triggered,
    );

    let total = east_force + west_force;
    let mut p = if total > 0.0 { east_force / total } else { 0.5 };

    let rank_gap = (rules.rank_value(east.tier) - rules.rank_value(west.tier)) as f64;
    p += (rank_gap / 100.0 * r.rank_value_step).clamp(-r.rank_value_cap, r.rank_value_cap);

    if intimidates(east.tier, west.tier) {
        p += r.intimidation_bonus;
    } else if intimidates(west.tier, east.tier) {
        p -= r.intimidation_bonus;
    }

    if p > r.compression_high {
        p += r.compression_shift;
    } else if p < r.compression_low {
        p -= r.compression_shift;
    }

    p.clamp(r.min_probability, r.max_probability)
}

/// Shorter-lived handle on an optional RNG, so it can be lent out more than
/// once.
fn reborrow<'a>(rng: &'a mut Option<&mut dyn RngCore>) -> Option<&'a mut dyn RngCore> {
    match rng {
        Some(r) => Some(&mut **r as &mut dyn RngCore),
        None => None,
    }
}

/// Top-tier competitor facing anyone below the minimum tier.
fn intimidates(holder: Tier, opponent: Tier) -> bool {
    holder == Tier::top() && Tier::Ozeki.is_above(opponent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Attributes;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn fighter(id: &str, tier: Tier, attrs: Attributes) -> Competitor {
        Competitor::new(id, format!("stable-{}", id), tier).with_attributes(attrs)
    }

    #[test]
    fn test_mirror_match_is_even() {
        let rules = RuleSet::standard();
        let a = fighter("a", Tier::Maegashira, Attributes::new(60, 60, 60));
        let b = fighter("b", Tier::Maegashira, Attributes::new(60, 60, 60));
        assert!((probability(&a, &b, &rules) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_cycle_winner_is_favoured() {
        let rules = RuleSet::standard();
        // Equal totals (150), power-dominant vs skill-dominant.
        let east = fighter("e", Tier::Maegashira, Attributes::new(60, 50, 40));
        let west = fighter("w", Tier::Maegashira, Attributes::new(40, 60, 50));
        assert_eq!(east.attributes.total(), west.attributes.total());

        let p_east = probability(&east, &west, &rules);
        assert!(p_east > 0.51, "p_east = {}", p_east);

        // Composure beats power: swap roles and the west side is favoured.
        let composed = fighter("c", Tier::Maegashira, Attributes::new(45, 45, 60));
        let p = probability(&east, &composed, &rules);
        assert!(1.0 - p > 0.51, "p = {}", p);
    }

    #[test]
    fn test_zero_forces_give_even_odds() {
        let rules = RuleSet::standard();
        let a = fighter("a", Tier::Juryo, Attributes::new(0, 0, 0));
        let b = fighter("b", Tier::Juryo, Attributes::new(0, 0, 0));
        assert!((probability(&a, &b, &rules) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_yokozuna_intimidates_lower_tiers_only() {
        let rules = RuleSet::standard();
        let attrs = Attributes::new(60, 60, 60);
        let yokozuna = fighter("y", Tier::Yokozuna, attrs);
        let ozeki = fighter("o", Tier::Ozeki, attrs);
        let sekiwake = fighter("s", Tier::Sekiwake, attrs);

        // Rank gap 100 → +0.02, no intimidation, no compression.
        let vs_ozeki = probability(&yokozuna, &ozeki, &rules);
        assert!((vs_ozeki - 0.52).abs() < 1e-9, "{}", vs_ozeki);

        // Rank gap 200 → +0.04, intimidation +0.15, compression +0.05.
        let vs_sekiwake = probability(&yokozuna, &sekiwake, &rules);
        assert!((vs_sekiwake - 0.74).abs() < 1e-9, "{}", vs_sekiwake);

        let reversed = probability(&sekiwake, &yokozuna, &rules);
        assert!((reversed - 0.26).abs() < 1e-9, "{}", reversed);
    }

    #[test]
    fn test_rank_adjustment_is_capped() {
        let mut rules = RuleSet::standard();
        rules.resolver.rank_value_step = 1.0;
        let attrs = Attributes::new(60, 60, 60);
        let high = fighter("h", Tier::Ozeki, attrs);
        let low = fighter("l", Tier::Sandanme, attrs);
        // 0.5 + 0.20 cap, then compression +0.05.
        let p = probability(&high, &low, &rules);
        assert!((p - 0.75).abs() < 1e-9, "{}", p);
    }

    #[test]
    fn test_probability_is_clamped() {
        let rules = RuleSet::standard();
        let giant = fighter("g", Tier::Yokozuna, Attributes::new(100, 100, 100));
        let novice = fighter("n", Tier::Sandanme, Attributes::new(1, 1, 1));
        let p = probability(&giant, &novice, &rules);
        assert!((p - rules.resolver.max_probability).abs() < 1e-9);
        let q = probability(&novice, &giant, &rules);
        assert!((q - rules.resolver.min_probability).abs() < 1e-9);
    }

    #[test]
    fn test_potential_limits_force() {
        let rules = RuleSet::standard();
        let mut capped = fighter("c", Tier::Juryo, Attributes::new(90, 90, 90));
        capped.potential = 60;
        let plain = fighter("p", Tier::Juryo, Attributes::new(60, 60, 60));
        assert!((probability(&capped, &plain, &rules) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_resolve_is_reproducible() {
        let rules = RuleSet::standard();
        let east = fighter("e", Tier::Sekiwake, Attributes::new(70, 55, 60))
            .with_traits(vec![BoutTrait::Unpredictable, BoutTrait::Heavyweight]);
        let west = fighter("w", Tier::Komusubi, Attributes::new(55, 72, 58))
            .with_traits(vec![BoutTrait::Unpredictable]);

        let run = |seed: u64| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            (0..20).map(|_| resolve(&east, &west, &rules, &mut rng)).collect::<Vec<_>>()
        };
        let first = serde_json::to_string(&run(99)).unwrap();
        let second = serde_json::to_string(&run(99)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_resolve_winner_matches_roll() {
        let rules = RuleSet::standard();
        let east = fighter("e", Tier::Maegashira, Attributes::new(65, 50, 55));
        let west = fighter("w", Tier::Maegashira, Attributes::new(50, 62, 55));
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..100 {
            let outcome = resolve(&east, &west, &rules, &mut rng);
            let east_won = outcome.roll < outcome.probability_east;
            assert_eq!(outcome.winner == "e", east_won);
            assert_eq!(outcome.winning_side == Side::East, east_won);
            assert_ne!(outcome.winner, outcome.loser);
        }
    }

    #[test]
    fn test_resolve_win_rate_tracks_probability() {
        let rules = RuleSet::standard();
        let east = fighter("e", Tier::Maegashira, Attributes::new(70, 50, 50));
        let west = fighter("w", Tier::Maegashira, Attributes::new(50, 70, 50));
        let p = probability(&east, &west, &rules);
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let wins = (0..4000)
            .filter(|_| resolve(&east, &west, &rules, &mut rng).winning_side == Side::East)
            .count();
        let rate = wins as f64 / 4000.0;
        assert!((rate - p).abs() < 0.04, "rate {} vs p {}", rate, p);
    }
}
