//! Daily match scheduler.
//!
//! The active roster (not injured, debuted) is split into brackets by tier;
//! each bracket is filtered by its strategy's eligibility rule and paired
//! by that strategy. Brackets are always processed in ladder order so a
//! schedule is fully determined by roster and day.

pub mod constraints;
pub mod sekitori;
pub mod strategy;
pub mod swiss;

pub use constraints::Relaxation;
pub use sekitori::SekitoriStrategy;
pub use strategy::{PairingStrategy, StrategyRegistry};
pub use swiss::SwissStrategy;

use fxhash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::models::{Competitor, CompetitorId, Pairing};
use crate::rank::{Bracket, RuleSet};

/// Pairings for one day plus the eligible competitors left without a bout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySchedule {
    pub day: u8,
    pub pairings: Vec<Pairing>,
    pub byes: Vec<CompetitorId>,
}

impl DaySchedule {
    pub fn pairing_for(&self, id: &str) -> Option<&Pairing> {
        self.pairings.iter().find(|p| p.involves(id))
    }
}

pub struct Scheduler {
    registry: StrategyRegistry,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new(StrategyRegistry::standard())
    }
}

impl Scheduler {
    pub fn new(registry: StrategyRegistry) -> Self {
        Self { registry }
    }

    /// Build the day's card. Days outside `1..=period_days` produce an
    /// empty schedule.
    pub fn plan_day(&self, roster: &[Competitor], day: u8, rules: &RuleSet) -> DaySchedule {
        let mut schedule = DaySchedule { day, pairings: Vec::new(), byes: Vec::new() };
        if day == 0 || day > rules.period_days {
            warn!(day, period_days = rules.period_days, "day outside the period; nothing scheduled");
            return schedule;
        }

        for &bracket in Bracket::all() {
            let Some(strategy) = self.registry.get(bracket) else {
                debug!(?bracket, "no strategy registered; bracket skipped");
                continue;
            };

            let pool: Vec<&Competitor> = roster
                .iter()
                .filter(|c| c.tier.bracket() == bracket && !c.injured && c.debuted)
                .filter(|c| strategy.is_eligible(c, day, rules))
                .collect();
            let pairings = strategy.generate(&pool, day, rules);

            let paired: FxHashSet<&str> = pairings
                .iter()
                .flat_map(|p| [p.east.as_str(), p.west.as_str()])
                .collect();
            let byes: Vec<CompetitorId> = pool
                .iter()
                .filter(|c| !paired.contains(c.id.as_str()))
                .map(|c| c.id.clone())
                .collect();

            debug!(
                day,
                ?bracket,
                strategy = strategy.name(),
                eligible = pool.len(),
                pairings = pairings.len(),
                byes = byes.len(),
                "bracket scheduled"
            );
            schedule.pairings.extend(pairings);
            schedule.byes.extend(byes);
        }
        schedule
    }
}

/// Pairings for `day` with the standard strategies.
pub fn schedule_day(roster: &[Competitor], day: u8, rules: &RuleSet) -> Vec<Pairing> {
    Scheduler::default().plan_day(roster, day, rules).pairings
}

/// Like [`schedule_day`] but also reports byes.
pub fn plan_day(roster: &[Competitor], day: u8, rules: &RuleSet) -> DaySchedule {
    Scheduler::default().plan_day(roster, day, rules)
}
