use thiserror::Error;

use crate::rank::Tier;

/// Errors raised at the edges of the core: rule set loading/validation and the
/// JSON API. The allocator, scheduler and resolver themselves are total.
#[derive(Error, Debug)]
pub enum BanzukeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Unsupported rule file extension: {path}")]
    UnsupportedFormat { path: String },

    #[error("Rule set is missing tier {0:?}")]
    MissingTier(Tier),

    #[error("Rule set lists tier {0:?} more than once")]
    DuplicateTier(Tier),

    #[error("Tier {tier:?} has capacity rule {found}, expected {expected}")]
    CapacityRule { tier: Tier, expected: &'static str, found: String },

    #[error("Base score of {upper:?} ({upper_score}) must exceed best score reachable from {lower:?} ({reachable})")]
    ScoreMargin { upper: Tier, lower: Tier, upper_score: i64, reachable: i64 },

    #[error("Invalid rule value: {0}")]
    InvalidRule(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Unsupported schema version: found {found}, expected {expected}")]
    SchemaVersion { found: u8, expected: u8 },
}

impl BanzukeError {
    /// Short machine-readable code for the JSON response envelope.
    pub fn code(&self) -> &'static str {
        match self {
            BanzukeError::Io(_) => "io",
            BanzukeError::Json(_) | BanzukeError::Yaml(_) => "parse",
            BanzukeError::UnsupportedFormat { .. } => "unsupported_format",
            BanzukeError::MissingTier(_)
            | BanzukeError::DuplicateTier(_)
            | BanzukeError::CapacityRule { .. }
            | BanzukeError::ScoreMargin { .. }
            | BanzukeError::InvalidRule(_) => "invalid_rules",
            BanzukeError::InvalidRequest(_) => "invalid_request",
            BanzukeError::SchemaVersion { .. } => "schema_version",
        }
    }
}

pub type Result<T> = std::result::Result<T, BanzukeError>;
