//! Status rules applied before the candidate pool is built: top-tier
//! retention, minimum-tier probation, the one-period return rule,
//! accumulation promotion and the optional championship promotion.

use serde::{Deserialize, Serialize};

use crate::models::{Competitor, CompetitorId};
use crate::rank::{RuleSet, Tier};

/// Championship results the host may supply to an allocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationContext {
    #[serde(default)]
    pub current_champion: Option<CompetitorId>,
    #[serde(default)]
    pub previous_champion: Option<CompetitorId>,
}

impl AllocationContext {
    pub fn new(current: Option<CompetitorId>, previous: Option<CompetitorId>) -> Self {
        Self { current_champion: current, previous_champion: previous }
    }

    /// Champion of both the closing and the preceding period.
    pub fn back_to_back_champion(&self) -> Option<&str> {
        match (&self.current_champion, &self.previous_champion) {
            (Some(current), Some(previous)) if current == previous => Some(current),
            _ => None,
        }
    }
}

/// Where the status rules send a competitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Placement {
    /// Locked into a protected tier, outside the cascade.
    Locked(Tier),
    /// Enters the cascade with its normal draft score.
    Pool,
    /// Enters the cascade with the soft-landing score; excluded from floor fill.
    SoftLanding,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MovementKind {
    Promoted,
    Demoted,
    /// Minimum-tier competitor finished with a losing record.
    ProbationSet,
    ProbationCleared,
    /// Demoted from the minimum tier after a second losing record.
    LostMinimumTier,
    /// Restored to the minimum tier under the one-period return rule.
    Returned,
    /// Return window passed without enough wins.
    ReturnExpired,
    AccumulationPromotion,
    ChampionshipPromotion,
}

/// Result of the status pass for one competitor.
#[derive(Debug, Clone)]
pub(crate) struct StatusDecision {
    pub placement: Placement,
    pub event: Option<MovementKind>,
}

impl StatusDecision {
    fn new(placement: Placement, event: Option<MovementKind>) -> Self {
        Self { placement, event }
    }
}

/// Resolve status for `competitor`, updating its probation and return flags
/// in place.
pub(crate) fn resolve_status(
    competitor: &mut Competitor,
    rules: &RuleSet,
    context: &AllocationContext,
) -> StatusDecision {
    match competitor.tier {
        Tier::Yokozuna => {
            competitor.probation = false;
            competitor.demoted_from_minimum = false;
            StatusDecision::new(Placement::Locked(Tier::Yokozuna), None)
        }
        Tier::Ozeki => minimum_tier_status(competitor, rules, context),
        _ if competitor.demoted_from_minimum => {
            competitor.probation = false;
            competitor.demoted_from_minimum = false;
            if competitor.record.wins >= rules.return_wins {
                StatusDecision::new(Placement::Locked(Tier::Ozeki), Some(MovementKind::Returned))
            } else {
                // Only the return rule applies in the period after demotion.
                StatusDecision::new(Placement::Pool, Some(MovementKind::ReturnExpired))
            }
        }
        tier => {
            competitor.probation = false;
            competitor.demoted_from_minimum = false;
            if matches!(tier, Tier::Sekiwake | Tier::Komusubi) && qualifies_by_accumulation(competitor, rules) {
                StatusDecision::new(
                    Placement::Locked(Tier::Ozeki),
                    Some(MovementKind::AccumulationPromotion),
                )
            } else {
                StatusDecision::new(Placement::Pool, None)
            }
        }
    }
}

fn minimum_tier_status(
    competitor: &mut Competitor,
    rules: &RuleSet,
    context: &AllocationContext,
) -> StatusDecision {
    competitor.demoted_from_minimum = false;

    if context.back_to_back_champion() == Some(competitor.id.as_str()) {
        competitor.probation = false;
        return StatusDecision::new(
            Placement::Locked(Tier::Yokozuna),
            Some(MovementKind::ChampionshipPromotion),
        );
    }

    if competitor.record.wins >= rules.winning_record(Tier::Ozeki) {
        let event = competitor.probation.then_some(MovementKind::ProbationCleared);
        competitor.probation = false;
        return StatusDecision::new(Placement::Locked(Tier::Ozeki), event);
    }

    if !competitor.probation {
        competitor.probation = true;
        return StatusDecision::new(
            Placement::Locked(Tier::Ozeki),
            Some(MovementKind::ProbationSet),
        );
    }

    competitor.probation = false;
    competitor.demoted_from_minimum = true;
    StatusDecision::new(Placement::SoftLanding, Some(MovementKind::LostMinimumTier))
}

/// Current wins plus the two most recent snapshots reach the accumulation
/// threshold, with both snapshots spent in Ozeki, Sekiwake or Komusubi.
pub(crate) fn qualifies_by_accumulation(competitor: &Competitor, rules: &RuleSet) -> bool {
    let recent: Vec<_> = competitor.recent_history(2).collect();
    if recent.len() < 2 {
        return false;
    }
    let eligible = |tier: Tier| matches!(tier, Tier::Ozeki | Tier::Sekiwake | Tier::Komusubi);
    if !recent.iter().all(|s| eligible(s.tier)) {
        return false;
    }
    let total = competitor.record.wins as u32 + recent.iter().map(|s| s.wins as u32).sum::<u32>();
    total >= rules.accumulation_wins
}
