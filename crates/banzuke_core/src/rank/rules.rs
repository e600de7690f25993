//! Rule set: the tier table plus every threshold the allocator, scheduler and
//! resolver read. Passed explicitly so alternate formats can be substituted
//! without touching the algorithms.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{BanzukeError, Result};
use crate::rank::tier::Tier;

/// Capacity rule of a tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", content = "count", rename_all = "snake_case")]
pub enum Capacity {
    /// No ceiling and no floor (top tier).
    Unbounded,
    /// Must never fall below `n`; backfilled from below when short.
    Minimum(usize),
    /// Exactly `n` members. The bottom tier absorbs the remainder instead.
    Fixed(usize),
}

impl Capacity {
    fn describe(&self) -> String {
        match self {
            Capacity::Unbounded => "unbounded".to_string(),
            Capacity::Minimum(n) => format!("minimum({})", n),
            Capacity::Fixed(n) => format!("fixed({})", n),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierRule {
    pub tier: Tier,
    /// Promotion-priority base; only compared, never displayed.
    pub base_score: i64,
    /// Legacy strength value used by the resolver's rank adjustment.
    pub rank_value: i64,
    pub capacity: Capacity,
}

/// Constants of the outcome resolver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverRules {
    /// Force bonus for the side whose dominant attribute wins the cycle.
    pub advantage_bonus: f64,
    /// Probability shift per 100 rank-value points.
    pub rank_value_step: f64,
    pub rank_value_cap: f64,
    /// Shift toward a top-tier competitor facing anyone below the minimum tier.
    pub intimidation_bonus: f64,
    pub compression_high: f64,
    pub compression_low: f64,
    pub compression_shift: f64,
    pub min_probability: f64,
    pub max_probability: f64,
}

impl Default for ResolverRules {
    fn default() -> Self {
        Self {
            advantage_bonus: 0.15,
            rank_value_step: 0.02,
            rank_value_cap: 0.20,
            intimidation_bonus: 0.15,
            compression_high: 0.6,
            compression_low: 0.4,
            compression_shift: 0.05,
            min_probability: 0.01,
            max_probability: 0.99,
        }
    }
}

/// Complete competitive format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSet {
    /// One entry per tier, in ladder order.
    pub tiers: [TierRule; 8],
    /// Score per net win in the salaried divisions.
    pub upper_coefficient: i64,
    /// Score per net win in the lower divisions.
    pub lower_coefficient: i64,
    /// Bouts per period for salaried competitors.
    pub sekitori_bouts: u8,
    /// Bouts per period for lower-division competitors.
    pub lower_bouts: u8,
    /// Tournament days per period.
    pub period_days: u8,
    /// Wins that restore a demoted minimum-tier competitor after one period.
    pub return_wins: u8,
    /// Wins over three periods that promote a secondary-tier competitor.
    pub accumulation_wins: u32,
    /// Fixed score given to a competitor just demoted from the minimum tier.
    pub soft_landing_score: i64,
    /// Maximum retained history snapshots (`None` keeps everything).
    pub history_limit: Option<usize>,
    /// Lowest Maegashira position (inclusive) a Juryo competitor may not face.
    pub barrier_position: u16,
    /// Last day on which two top-two-tier competitors are kept apart.
    pub reserved_until_day: u8,
    /// Last day the salaried pool is ordered purely by rank.
    pub rank_order_until_day: u8,
    /// First day title-contention bouts are tagged.
    pub contention_from_day: u8,
    /// A competitor is in contention with at least `day - contention_offset` wins.
    pub contention_offset: u8,
    #[serde(default)]
    pub resolver: ResolverRules,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::standard()
    }
}

impl RuleSet {
    /// Professional format: 15-day periods, 7 bouts below the salaried line.
    pub fn standard() -> Self {
        let tier = |tier, base_score, rank_value, capacity| TierRule {
            tier,
            base_score,
            rank_value,
            capacity,
        };
        Self {
            tiers: [
                tier(Tier::Yokozuna, 2160, 800, Capacity::Unbounded),
                tier(Tier::Ozeki, 2000, 700, Capacity::Minimum(2)),
                tier(Tier::Sekiwake, 1840, 600, Capacity::Fixed(2)),
                tier(Tier::Komusubi, 1680, 500, Capacity::Fixed(2)),
                tier(Tier::Maegashira, 1520, 400, Capacity::Fixed(28)),
                tier(Tier::Juryo, 1360, 300, Capacity::Fixed(28)),
                tier(Tier::Makushita, 1180, 200, Capacity::Fixed(60)),
                tier(Tier::Sandanme, 1000, 100, Capacity::Fixed(120)),
            ],
            upper_coefficient: 10,
            lower_coefficient: 25,
            sekitori_bouts: 15,
            lower_bouts: 7,
            period_days: 15,
            return_wins: 10,
            accumulation_wins: 33,
            soft_landing_score: 1995,
            history_limit: Some(24),
            barrier_position: 4,
            reserved_until_day: 12,
            rank_order_until_day: 10,
            contention_from_day: 13,
            contention_offset: 3,
            resolver: ResolverRules::default(),
        }
    }

    // ========== Loading ==========

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let rules: RuleSet = serde_yaml::from_str(yaml)?;
        rules.validate()?;
        Ok(rules)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let rules: RuleSet = serde_json::from_str(json)?;
        rules.validate()?;
        Ok(rules)
    }

    /// Load a rule file, choosing the parser by extension (`yaml`, `yml`, `json`).
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_str(&contents),
            Some("json") => Self::from_json_str(&contents),
            _ => Err(BanzukeError::UnsupportedFormat { path: path.display().to_string() }),
        }
    }

    // ========== Lookups ==========

    pub fn tier_rule(&self, tier: Tier) -> &TierRule {
        &self.tiers[tier.ordinal()]
    }

    pub fn base_score(&self, tier: Tier) -> i64 {
        self.tier_rule(tier).base_score
    }

    pub fn rank_value(&self, tier: Tier) -> i64 {
        self.tier_rule(tier).rank_value
    }

    pub fn capacity(&self, tier: Tier) -> Capacity {
        self.tier_rule(tier).capacity
    }

    /// Bouts a competitor of `tier` fights in one period.
    pub fn bouts_for(&self, tier: Tier) -> u8 {
        if tier.is_sekitori() {
            self.sekitori_bouts
        } else {
            self.lower_bouts
        }
    }

    pub fn coefficient(&self, tier: Tier) -> i64 {
        if tier.is_sekitori() {
            self.upper_coefficient
        } else {
            self.lower_coefficient
        }
    }

    /// Wins needed for a winning record (kachi-koshi) in `tier`.
    pub fn winning_record(&self, tier: Tier) -> u8 {
        self.bouts_for(tier) / 2 + 1
    }

    /// Highest draft score any record in `tier` can produce.
    pub fn best_reachable_score(&self, tier: Tier) -> i64 {
        self.base_score(tier) + self.bouts_for(tier) as i64 * self.coefficient(tier)
    }

    /// Floor of the minimum tier.
    pub fn minimum_floor(&self) -> usize {
        match self.capacity(Tier::Ozeki) {
            Capacity::Minimum(n) => n,
            _ => 0,
        }
    }

    // ========== Validation ==========

    pub fn validate(&self) -> Result<()> {
        for (i, rule) in self.tiers.iter().enumerate() {
            let expected = Tier::all()[i];
            if rule.tier != expected {
                if self.tiers.iter().filter(|r| r.tier == rule.tier).count() > 1 {
                    return Err(BanzukeError::DuplicateTier(rule.tier));
                }
                return Err(BanzukeError::MissingTier(expected));
            }
            let capacity_ok = match (rule.tier, rule.capacity) {
                (Tier::Yokozuna, Capacity::Unbounded) => true,
                (Tier::Ozeki, Capacity::Minimum(_)) => true,
                (Tier::Yokozuna, _) | (Tier::Ozeki, _) => false,
                (_, Capacity::Fixed(_)) => true,
                _ => false,
            };
            if !capacity_ok {
                let expected = match rule.tier {
                    Tier::Yokozuna => "unbounded",
                    Tier::Ozeki => "minimum",
                    _ => "fixed",
                };
                return Err(BanzukeError::CapacityRule {
                    tier: rule.tier,
                    expected,
                    found: rule.capacity.describe(),
                });
            }
        }

        for pair in Tier::all().windows(2) {
            let (upper, lower) = (pair[0], pair[1]);
            let reachable = self.best_reachable_score(lower);
            if self.base_score(upper) <= reachable {
                return Err(BanzukeError::ScoreMargin {
                    upper,
                    lower,
                    upper_score: self.base_score(upper),
                    reachable,
                });
            }
        }

        if self.upper_coefficient <= 0 || self.lower_coefficient <= 0 {
            return Err(BanzukeError::InvalidRule("score coefficients must be positive".into()));
        }
        if self.lower_coefficient < self.upper_coefficient {
            return Err(BanzukeError::InvalidRule(
                "lower division coefficient must not be smaller than the salaried one".into(),
            ));
        }
        if self.sekitori_bouts == 0 || self.sekitori_bouts > self.period_days {
            return Err(BanzukeError::InvalidRule(format!(
                "sekitori_bouts {} must be within 1..={}",
                self.sekitori_bouts, self.period_days
            )));
        }
        if self.lower_bouts == 0 || self.lower_bouts > self.period_days {
            return Err(BanzukeError::InvalidRule(format!(
                "lower_bouts {} must be within 1..={}",
                self.lower_bouts, self.period_days
            )));
        }
        if self.return_wins > self.sekitori_bouts {
            return Err(BanzukeError::InvalidRule(format!(
                "return_wins {} exceeds bouts per period",
                self.return_wins
            )));
        }
        let sekiwake_best = self.best_reachable_score(Tier::Sekiwake);
        if self.soft_landing_score <= sekiwake_best
            || self.soft_landing_score >= self.base_score(Tier::Ozeki)
        {
            return Err(BanzukeError::InvalidRule(format!(
                "soft_landing_score {} must lie in {}..{}",
                self.soft_landing_score,
                sekiwake_best + 1,
                self.base_score(Tier::Ozeki)
            )));
        }
        if matches!(self.history_limit, Some(n) if n < 2) {
            return Err(BanzukeError::InvalidRule(
                "history_limit must keep at least two snapshots".into(),
            ));
        }
        if self.reserved_until_day > self.period_days
            || self.rank_order_until_day > self.period_days
            || self.contention_from_day > self.period_days
        {
            return Err(BanzukeError::InvalidRule("day thresholds exceed period length".into()));
        }
        let r = &self.resolver;
        if !(0.0..0.5).contains(&r.min_probability)
            || !(0.5..=1.0).contains(&r.max_probability)
            || r.compression_low >= r.compression_high
        {
            return Err(BanzukeError::InvalidRule("resolver probability bounds".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_standard_rules_validate() {
        let rules = RuleSet::standard();
        assert!(rules.validate().is_ok());
        assert_eq!(rules.minimum_floor(), 2);
        assert_eq!(rules.winning_record(Tier::Ozeki), 8);
        assert_eq!(rules.winning_record(Tier::Makushita), 4);
        assert_eq!(rules.capacity(Tier::Sekiwake), Capacity::Fixed(2));
        assert_eq!(rules.capacity(Tier::Komusubi), Capacity::Fixed(2));
    }

    #[test]
    fn test_lower_divisions_have_larger_coefficient() {
        let rules = RuleSet::standard();
        assert!(rules.coefficient(Tier::Makushita) > rules.coefficient(Tier::Juryo));
        assert_eq!(rules.coefficient(Tier::Sandanme), rules.coefficient(Tier::Makushita));
    }

    #[test]
    fn test_rejects_shrunk_margin() {
        let mut rules = RuleSet::standard();
        rules.tiers[Tier::Juryo.ordinal()].base_score = 1450;
        match rules.validate() {
            Err(BanzukeError::ScoreMargin { upper, lower, .. }) => {
                assert_eq!(upper, Tier::Maegashira);
                assert_eq!(lower, Tier::Juryo);
            }
            other => panic!("expected score margin error, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_wrong_capacity_rule() {
        let mut rules = RuleSet::standard();
        rules.tiers[Tier::Ozeki.ordinal()].capacity = Capacity::Fixed(2);
        assert!(matches!(
            rules.validate(),
            Err(BanzukeError::CapacityRule { tier: Tier::Ozeki, .. })
        ));
    }

    #[test]
    fn test_rejects_reordered_tiers() {
        let mut rules = RuleSet::standard();
        rules.tiers.swap(2, 3);
        assert!(matches!(rules.validate(), Err(BanzukeError::MissingTier(Tier::Sekiwake))));
    }

    #[test]
    fn test_rejects_short_history_limit() {
        let mut rules = RuleSet::standard();
        rules.history_limit = Some(1);
        assert!(matches!(rules.validate(), Err(BanzukeError::InvalidRule(_))));
    }

    #[test]
    fn test_yaml_round_trip_through_file() {
        let yaml = serde_yaml::to_string(&RuleSet::standard()).unwrap();
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();

        let loaded = RuleSet::load(file.path()).unwrap();
        assert_eq!(loaded, RuleSet::standard());
    }

    #[test]
    fn test_json_rules_and_unknown_extension() {
        let json = serde_json::to_string(&RuleSet::standard()).unwrap();
        assert!(RuleSet::from_json_str(&json).is_ok());

        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        assert!(matches!(
            RuleSet::load(file.path()),
            Err(BanzukeError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn test_capacity_serialization_shape() {
        let json = serde_json::to_value(Capacity::Fixed(2)).unwrap();
        assert_eq!(json["rule"], "fixed");
        assert_eq!(json["count"], 2);
        let unbounded = serde_json::to_value(Capacity::Unbounded).unwrap();
        assert_eq!(unbounded["rule"], "unbounded");
    }
}
