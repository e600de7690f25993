//! Rank model: the tier ladder and the rule set that prices it.

pub mod rules;
pub mod tier;

pub use rules::{Capacity, ResolverRules, RuleSet, TierRule};
pub use tier::{position_for_slot, Bracket, Division, RankSlot, Side, Tier};
