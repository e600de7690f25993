// Host integration API
pub mod banzuke_json;

pub use banzuke_json::{
    allocate_json, resolve_bout_json, schedule_day_json, AllocateRequest, ApiResponse,
    ResolveBoutData, ResolveBoutRequest, ScheduleDayRequest,
};
