// Banzuke JSON API layer
// Host-facing entry points: JSON request in, JSON envelope out. Never panics.

use fxhash::FxHashSet;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::allocator::{allocate_detailed, Allocation, AllocationContext};
use crate::error::{BanzukeError, Result};
use crate::models::{Competitor, CompetitorId};
use crate::rank::RuleSet;
use crate::resolver::{probability, resolve, BoutOutcome};
use crate::scheduler::{plan_day, DaySchedule};
use crate::SCHEMA_VERSION;

// ========== Request/Response Structures ==========

#[derive(Debug, Serialize, Deserialize)]
pub struct AllocateRequest {
    pub schema_version: u8,
    pub roster: Vec<Competitor>,
    pub period_id: String,
    #[serde(default)]
    pub rules: Option<RuleSet>,
    #[serde(default)]
    pub current_champion: Option<CompetitorId>,
    #[serde(default)]
    pub previous_champion: Option<CompetitorId>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ScheduleDayRequest {
    pub schema_version: u8,
    pub roster: Vec<Competitor>,
    pub day: u8,
    #[serde(default)]
    pub rules: Option<RuleSet>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ResolveBoutRequest {
    pub schema_version: u8,
    pub east: Competitor,
    pub west: Competitor,
    pub seed: u64,
    #[serde(default)]
    pub rules: Option<RuleSet>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ResolveBoutData {
    pub outcome: BoutOutcome,
    /// East win probability before probabilistic traits.
    pub preview_probability: f64,
}

/// Envelope shared by every response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub schema_version: u8,
    pub success: bool,
    pub data: Option<T>,
    #[serde(default)]
    pub error_code: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self { schema_version: SCHEMA_VERSION, success: true, data: Some(data), error_code: None, error_message: None }
    }

    fn err(error: &BanzukeError) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            success: false,
            data: None,
            error_code: Some(error.code().to_string()),
            error_message: Some(error.to_string()),
        }
    }
}

// ========== Entry Points ==========

/// Allocate the next period from an [`AllocateRequest`].
pub fn allocate_json(request_json: &str) -> String {
    respond("allocate", handle_allocate(request_json))
}

/// Schedule one day from a [`ScheduleDayRequest`].
pub fn schedule_day_json(request_json: &str) -> String {
    respond("schedule_day", handle_schedule_day(request_json))
}

/// Resolve one bout from a [`ResolveBoutRequest`]. The seed makes the result
/// reproducible.
pub fn resolve_bout_json(request_json: &str) -> String {
    respond("resolve_bout", handle_resolve_bout(request_json))
}

// ========== Handlers ==========

fn handle_allocate(request_json: &str) -> Result<Allocation> {
    let request: AllocateRequest = serde_json::from_str(request_json)?;
    check_schema(request.schema_version)?;
    let rules = rules_or_standard(request.rules)?;
    if request.period_id.trim().is_empty() {
        return Err(BanzukeError::InvalidRequest("period_id must not be empty".into()));
    }
    check_unique_ids(&request.roster)?;
    check_records(&request.roster, &rules)?;

    let context = AllocationContext::new(request.current_champion, request.previous_champion);
    Ok(allocate_detailed(&request.roster, &request.period_id, &rules, &context))
}

fn handle_schedule_day(request_json: &str) -> Result<DaySchedule> {
    let request: ScheduleDayRequest = serde_json::from_str(request_json)?;
    check_schema(request.schema_version)?;
    let rules = rules_or_standard(request.rules)?;
    if request.day == 0 || request.day > rules.period_days {
        return Err(BanzukeError::InvalidRequest(format!(
            "day {} outside 1..={}",
            request.day, rules.period_days
        )));
    }
    check_unique_ids(&request.roster)?;
    check_records(&request.roster, &rules)?;

    Ok(plan_day(&request.roster, request.day, &rules))
}

fn handle_resolve_bout(request_json: &str) -> Result<ResolveBoutData> {
    let request: ResolveBoutRequest = serde_json::from_str(request_json)?;
    check_schema(request.schema_version)?;
    let rules = rules_or_standard(request.rules)?;
    if request.east.id == request.west.id {
        return Err(BanzukeError::InvalidRequest(format!(
            "competitor {} cannot face itself",
            request.east.id
        )));
    }

    let mut rng = ChaCha8Rng::seed_from_u64(request.seed);
    let preview_probability = probability(&request.east, &request.west, &rules);
    let outcome = resolve(&request.east, &request.west, &rules, &mut rng);
    Ok(ResolveBoutData { outcome, preview_probability })
}

// ========== Helpers ==========

fn check_schema(found: u8) -> Result<()> {
    if found != SCHEMA_VERSION {
        return Err(BanzukeError::SchemaVersion { found, expected: SCHEMA_VERSION });
    }
    Ok(())
}

fn rules_or_standard(rules: Option<RuleSet>) -> Result<RuleSet> {
    match rules {
        Some(rules) => {
            rules.validate()?;
            Ok(rules)
        }
        None => Ok(RuleSet::standard()),
    }
}

fn check_unique_ids(roster: &[Competitor]) -> Result<()> {
    let mut seen = FxHashSet::default();
    for c in roster {
        if !seen.insert(c.id.as_str()) {
            return Err(BanzukeError::InvalidRequest(format!("duplicate competitor id {}", c.id)));
        }
    }
    Ok(())
}

/// Records may not hold more bouts than the competitor's tier fights.
fn check_records(roster: &[Competitor], rules: &RuleSet) -> Result<()> {
    for c in roster {
        let fought = c.record.wins as u16 + c.record.losses as u16;
        let cap = rules.bouts_for(c.tier);
        if fought > cap as u16 {
            return Err(BanzukeError::InvalidRequest(format!(
                "competitor {} has {} bouts recorded, more than the {} allowed",
                c.id, fought, cap
            )));
        }
    }
    Ok(())
}

fn respond<T: Serialize>(operation: &str, result: Result<T>) -> String {
    let response = match result {
        Ok(data) => {
            debug!(operation, "request handled");
            ApiResponse::ok(data)
        }
        Err(error) => {
            warn!(operation, code = error.code(), error = %error, "request rejected");
            ApiResponse::err(&error)
        }
    };
    serde_json::to_string(&response).unwrap_or_else(|e| {
        serde_json::json!({
            "schema_version": SCHEMA_VERSION,
            "success": false,
            "error_code": "serialize",
            "error_message": format!("Failed to serialize response: {}", e),
        })
        .to_string()
    })
}
