//! Banzuke allocator: closes a period and produces the next period's ranks.
//!
//! ## Pass order
//! 1. Status rules lock Yokozuna, retained Ozeki and direct promotions into
//!    the protected tiers; a twice-failed Ozeki gets the soft-landing score.
//! 2. Everyone else is scored and sorted into a cursor queue.
//! 3. The Ozeki floor is backfilled from the queue, skipping anyone who lost
//!    Ozeki status in this call.
//! 4. Fixed tiers take exactly their quota in ladder order; the bottom tier
//!    absorbs what is left.
//! 5. Positions alternate east/west from the top of each tier. The closing
//!    rank and record are appended to history and the record is reset.
//!
//! Every branch is total: `allocate` never fails and returns a roster with
//! the same competitors it was given.

mod queue;
pub mod status;

pub use status::{AllocationContext, MovementKind};

use fxhash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::draft::{draft_score, soft_landing_score, ScoredCandidate};
use crate::models::{Competitor, CompetitorId, PeriodRecord};
use crate::rank::{Capacity, RankSlot, RuleSet, Tier};
use queue::CandidateQueue;
use status::{resolve_status, Placement};

/// One rank change or status event produced by an allocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankMovement {
    pub competitor: CompetitorId,
    pub from: RankSlot,
    pub to: RankSlot,
    pub kind: MovementKind,
}

/// New roster plus the movements that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    /// Ordered from the highest rank down.
    pub roster: Vec<Competitor>,
    pub movements: Vec<RankMovement>,
}

impl Allocation {
    pub fn movements_of<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a RankMovement> + 'a {
        self.movements.iter().filter(move |m| m.competitor == id)
    }

    pub fn count_in(&self, tier: Tier) -> usize {
        self.roster.iter().filter(|c| c.tier == tier).count()
    }
}

/// Allocate the next period's ranks without championship information.
pub fn allocate(roster: &[Competitor], period_id: &str, rules: &RuleSet) -> Vec<Competitor> {
    allocate_detailed(roster, period_id, rules, &AllocationContext::default()).roster
}

/// Allocate the next period's ranks and report every movement.
///
/// `period_id` labels the history snapshot written for the closing period.
pub fn allocate_detailed(
    roster: &[Competitor],
    period_id: &str,
    rules: &RuleSet,
    context: &AllocationContext,
) -> Allocation {
    let mut yokozuna: Vec<ScoredCandidate> = Vec::new();
    let mut ozeki: Vec<ScoredCandidate> = Vec::new();
    let mut pool: Vec<ScoredCandidate> = Vec::with_capacity(roster.len());
    let mut soft_landed: FxHashSet<CompetitorId> = FxHashSet::default();
    let mut events: FxHashMap<CompetitorId, MovementKind> = FxHashMap::default();

    for original in roster {
        let mut competitor = original.clone();
        let score = draft_score(&competitor, rules);
        let decision = resolve_status(&mut competitor, rules, context);
        if let Some(kind) = decision.event {
            events.insert(competitor.id.clone(), kind);
        }

        match decision.placement {
            Placement::Locked(Tier::Yokozuna) => {
                yokozuna.push(ScoredCandidate::with_score(competitor, score))
            }
            Placement::Locked(_) => ozeki.push(ScoredCandidate::with_score(competitor, score)),
            Placement::Pool => pool.push(ScoredCandidate::with_score(competitor, score)),
            Placement::SoftLanding => {
                soft_landed.insert(competitor.id.clone());
                pool.push(ScoredCandidate::with_score(competitor, soft_landing_score(rules)));
            }
        }
    }

    let mut queue = CandidateQueue::new(pool);

    let floor = rules.minimum_floor();
    while ozeki.len() < floor {
        match queue.take_first_where(|c| !soft_landed.contains(&c.competitor.id)) {
            Some(candidate) => {
                debug!(competitor = %candidate.competitor.id, "ozeki floor backfill");
                ozeki.push(candidate);
            }
            None => break,
        }
    }

    yokozuna.sort_by(ScoredCandidate::draft_order);
    ozeki.sort_by(ScoredCandidate::draft_order);

    let mut tiers: Vec<(Tier, Vec<ScoredCandidate>)> = Vec::with_capacity(Tier::all().len());
    tiers.push((Tier::Yokozuna, yokozuna));
    tiers.push((Tier::Ozeki, ozeki));
    for &tier in &Tier::all()[2..] {
        let members = if tier == Tier::bottom() {
            queue.drain_rest()
        } else {
            match rules.capacity(tier) {
                Capacity::Fixed(n) | Capacity::Minimum(n) => queue.take_up_to(n),
                Capacity::Unbounded => queue.drain_rest(),
            }
        };
        tiers.push((tier, members));
    }

    let mut next = Vec::with_capacity(roster.len());
    let mut movements = Vec::new();
    for (tier, members) in tiers {
        for (index, candidate) in members.into_iter().enumerate() {
            let slot = RankSlot::from_slot(tier, index);
            let event = events.remove(&candidate.competitor.id);
            let (competitor, moved) = commit(candidate.competitor, slot, event, period_id, rules);
            for movement in &moved {
                debug!(
                    competitor = %movement.competitor,
                    from = %movement.from.label(),
                    to = %movement.to.label(),
                    kind = ?movement.kind,
                    "rank movement"
                );
            }
            movements.extend(moved);
            next.push(competitor);
        }
    }

    info!(
        period_id,
        competitors = next.len(),
        movements = movements.len(),
        yokozuna = next.iter().filter(|c| c.tier == Tier::Yokozuna).count(),
        ozeki = next.iter().filter(|c| c.tier == Tier::Ozeki).count(),
        "banzuke allocated"
    );

    Allocation { roster: next, movements }
}

/// Move a competitor into `slot`, archive the closing period and reset its
/// record.
fn commit(
    mut competitor: Competitor,
    slot: RankSlot,
    event: Option<MovementKind>,
    period_id: &str,
    rules: &RuleSet,
) -> (Competitor, Vec<RankMovement>) {
    let previous = competitor.rank_slot();
    let snapshot = competitor.snapshot(period_id);

    competitor.tier = slot.tier;
    competitor.position = slot.position;
    competitor.side = slot.side;
    competitor.max_tier_reached = Some(competitor.highest_tier());
    if slot.tier != Tier::Ozeki {
        competitor.probation = false;
    }
    competitor.push_history(snapshot, rules.history_limit);
    competitor.record = PeriodRecord::default();

    let movement = |kind| RankMovement { competitor: competitor.id.clone(), from: previous, to: slot, kind };
    let mut moved = Vec::new();
    if let Some(kind) = event {
        moved.push(movement(kind));
    }
    let event_moves_tier = matches!(
        event,
        Some(
            MovementKind::LostMinimumTier
                | MovementKind::Returned
                | MovementKind::AccumulationPromotion
                | MovementKind::ChampionshipPromotion
        )
    );
    if previous.tier != slot.tier && !event_moves_tier {
        let kind = if slot.tier.is_above(previous.tier) {
            MovementKind::Promoted
        } else {
            MovementKind::Demoted
        };
        moved.push(movement(kind));
    }
    (competitor, moved)
}
