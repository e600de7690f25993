pub mod competitor;
pub mod pairing;

pub use competitor::{
    Attribute, Attributes, Competitor, CompetitorId, PeriodRecord, PeriodSnapshot, Stable, StableId,
};
pub use pairing::{BoutTag, Pairing};
