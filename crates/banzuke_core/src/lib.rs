//! # banzuke_core - Deterministic Sumo Ranking and Scheduling Engine
//!
//! Ranks a stable of competitors between periods, builds each tournament
//! day's card and resolves individual bouts.
//!
//! ## Features
//! - Banzuke allocation with probation, return and accumulation rules
//! - Daily scheduling through pluggable per-bracket pairing strategies
//! - Bout resolution against an injected RNG (same seed = same result)
//! - Rule sets loadable from YAML or JSON
//! - JSON API for host integration

// Loop style - index loops read closer to the pairing scans
#![allow(clippy::needless_range_loop)]

pub mod allocator;
pub mod api;
pub mod draft;
pub mod error;
pub mod models;
pub mod rank;
pub mod record;
pub mod resolver;
pub mod scheduler;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export main entry points
pub use allocator::{allocate, allocate_detailed, Allocation, AllocationContext, MovementKind, RankMovement};
pub use api::{allocate_json, resolve_bout_json, schedule_day_json};
pub use error::{BanzukeError, Result};
pub use models::{Attribute, Attributes, BoutTag, Competitor, CompetitorId, Pairing, PeriodRecord, Stable};
pub use rank::{Bracket, Capacity, Division, RankSlot, RuleSet, Side, Tier};
pub use record::{apply_outcome, period_champion};
pub use resolver::{probability, resolve, BoutOutcome, BoutTrait};
pub use scheduler::{plan_day, schedule_day, DaySchedule, PairingStrategy, Scheduler, StrategyRegistry};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const SCHEMA_VERSION: u8 = 1;
