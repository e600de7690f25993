//! Competitor entity, its running period record and its history.

use serde::{Deserialize, Serialize};

use crate::rank::{RankSlot, Side, Tier};
use crate::resolver::BoutTrait;

pub type CompetitorId = String;
pub type StableId = String;

// ============================================================================
// Attributes
// ============================================================================

/// The three fighting attributes. Declaration order is the dominance
/// tie-break order (`Power > Skill > Composure`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Attribute {
    Power,
    Skill,
    Composure,
}

impl Attribute {
    /// Cyclical advantage: power beats skill, skill beats composure,
    /// composure beats power.
    pub fn beats(self, other: Attribute) -> bool {
        matches!(
            (self, other),
            (Attribute::Power, Attribute::Skill)
                | (Attribute::Skill, Attribute::Composure)
                | (Attribute::Composure, Attribute::Power)
        )
    }
}

/// Attribute scalars, each 0–100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attributes {
    pub power: u8,
    pub skill: u8,
    pub composure: u8,
}

impl Default for Attributes {
    fn default() -> Self {
        Self { power: 50, skill: 50, composure: 50 }
    }
}

impl Attributes {
    pub fn new(power: u8, skill: u8, composure: u8) -> Self {
        Self { power: power.min(100), skill: skill.min(100), composure: composure.min(100) }
    }

    pub fn get(&self, attribute: Attribute) -> u8 {
        match attribute {
            Attribute::Power => self.power,
            Attribute::Skill => self.skill,
            Attribute::Composure => self.composure,
        }
    }

    /// Values limited by a potential ceiling.
    pub fn capped(&self, potential: u8) -> Attributes {
        let ceiling = potential.min(100);
        Attributes {
            power: self.power.min(ceiling),
            skill: self.skill.min(ceiling),
            composure: self.composure.min(ceiling),
        }
    }

    /// Highest attribute; ties resolve `Power > Skill > Composure`.
    pub fn dominant(&self) -> Attribute {
        let mut best = Attribute::Power;
        for attribute in [Attribute::Skill, Attribute::Composure] {
            if self.get(attribute) > self.get(best) {
                best = attribute;
            }
        }
        best
    }

    pub fn mean(&self) -> f64 {
        (self.power as f64 + self.skill as f64 + self.composure as f64) / 3.0
    }

    pub fn total(&self) -> u16 {
        self.power as u16 + self.skill as u16 + self.composure as u16
    }
}

// ============================================================================
// Period record / history
// ============================================================================

/// Running record for the current period.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PeriodRecord {
    pub wins: u8,
    pub losses: u8,
    /// Opponents faced this period, in bout order.
    pub opponents: Vec<CompetitorId>,
    /// Tournament days on which a bout was fought.
    pub days_fought: Vec<u8>,
}

impl PeriodRecord {
    pub fn bouts(&self) -> u8 {
        self.wins.saturating_add(self.losses)
    }

    /// Wins minus losses.
    pub fn net(&self) -> i16 {
        self.wins as i16 - self.losses as i16
    }

    pub fn has_faced(&self, opponent: &str) -> bool {
        self.opponents.iter().any(|o| o == opponent)
    }

    pub fn fought_on(&self, day: u8) -> bool {
        self.days_fought.contains(&day)
    }

    pub fn is_losing(&self) -> bool {
        self.losses > self.wins
    }

    pub fn record_bout(&mut self, opponent: &str, day: u8, won: bool) {
        if won {
            self.wins = self.wins.saturating_add(1);
        } else {
            self.losses = self.losses.saturating_add(1);
        }
        self.opponents.push(opponent.to_string());
        self.days_fought.push(day);
    }
}

/// Rank and record at the close of a period. Never modified once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodSnapshot {
    pub period_id: String,
    pub tier: Tier,
    pub position: u16,
    pub side: Side,
    pub wins: u8,
    pub losses: u8,
}

// ============================================================================
// Stable
// ============================================================================

/// Training stable. Only the id takes part in pairing; the strength
/// modifier is data for roster generators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stable {
    pub id: StableId,
    #[serde(default)]
    pub strength_modifier: f64,
}

impl Stable {
    pub fn new(id: impl Into<StableId>, strength_modifier: f64) -> Self {
        Self { id: id.into(), strength_modifier }
    }
}

// ============================================================================
// Competitor
// ============================================================================

fn default_position() -> u16 {
    1
}

fn default_potential() -> u8 {
    100
}

fn default_debuted() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Competitor {
    pub id: CompetitorId,
    pub stable_id: StableId,
    pub tier: Tier,
    #[serde(default = "default_position")]
    pub position: u16,
    #[serde(default)]
    pub side: Side,
    #[serde(default)]
    pub attributes: Attributes,
    /// Ceiling applied to every attribute.
    #[serde(default = "default_potential")]
    pub potential: u8,
    #[serde(default)]
    pub record: PeriodRecord,
    /// Oldest first.
    #[serde(default)]
    pub history: Vec<PeriodSnapshot>,
    /// Kadoban: minimum-tier member under a one-period warning.
    #[serde(default)]
    pub probation: bool,
    /// Set when demoted from the minimum tier; valid for one period.
    #[serde(default)]
    pub demoted_from_minimum: bool,
    #[serde(default)]
    pub injured: bool,
    #[serde(default = "default_debuted")]
    pub debuted: bool,
    #[serde(default)]
    pub max_tier_reached: Option<Tier>,
    #[serde(default)]
    pub traits: Vec<BoutTrait>,
}

impl Competitor {
    pub fn new(id: impl Into<String>, stable_id: impl Into<String>, tier: Tier) -> Self {
        Self {
            id: id.into(),
            stable_id: stable_id.into(),
            tier,
            position: 1,
            side: Side::East,
            attributes: Attributes::default(),
            potential: default_potential(),
            record: PeriodRecord::default(),
            history: Vec::new(),
            probation: false,
            demoted_from_minimum: false,
            injured: false,
            debuted: true,
            max_tier_reached: Some(tier),
            traits: Vec::new(),
        }
    }

    pub fn with_slot(mut self, position: u16, side: Side) -> Self {
        self.position = position;
        self.side = side;
        self
    }

    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn with_record(mut self, wins: u8, losses: u8) -> Self {
        self.record.wins = wins;
        self.record.losses = losses;
        self
    }

    pub fn with_traits(mut self, traits: Vec<BoutTrait>) -> Self {
        self.traits = traits;
        self
    }

    /// Current rank; a missing or zero position reads as 1.
    pub fn rank_slot(&self) -> RankSlot {
        RankSlot::new(self.tier, self.position.max(1), self.side)
    }

    pub fn is_top_division(&self) -> bool {
        self.tier.division() == crate::rank::Division::Makuuchi
    }

    /// Attributes limited by this competitor's potential.
    pub fn effective_attributes(&self) -> Attributes {
        self.attributes.capped(self.potential)
    }

    /// Highest tier ever held, including the current one.
    pub fn highest_tier(&self) -> Tier {
        match self.max_tier_reached {
            Some(t) => t.min(self.tier),
            None => self.tier,
        }
    }

    /// Most recent `n` snapshots, newest first.
    pub fn recent_history(&self, n: usize) -> impl Iterator<Item = &PeriodSnapshot> {
        self.history.iter().rev().take(n)
    }

    /// Snapshot of the current rank and record, used when a period closes.
    pub fn snapshot(&self, period_id: &str) -> PeriodSnapshot {
        let slot = self.rank_slot();
        PeriodSnapshot {
            period_id: period_id.to_string(),
            tier: slot.tier,
            position: slot.position,
            side: slot.side,
            wins: self.record.wins,
            losses: self.record.losses,
        }
    }

    /// Append a snapshot, dropping the oldest entries beyond `limit`.
    pub fn push_history(&mut self, snapshot: PeriodSnapshot, limit: Option<usize>) {
        self.history.push(snapshot);
        if let Some(limit) = limit {
            if self.history.len() > limit {
                let excess = self.history.len() - limit;
                self.history.drain(..excess);
            }
        }
    }
}
