use serde::{Deserialize, Serialize};

use super::category::Category;
use super::history::HISTORY_LEN;
use super::record::{EntityKey, GroupKind};

/// One competitor's clamped forecast for the target period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    pub key: EntityKey,
    pub collective: String,
    pub kind: GroupKind,
    pub target_period: i32,
    /// Forecast clamped to the encoding range.
    pub score: f64,
    /// Tier decoded straight from the score, used when no allocation runs.
    pub fallback: Category,
    pub history: [u8; HISTORY_LEN],
    pub participation_count: usize,
    /// True when the grey model could not be fitted and the last observed
    /// value was carried forward.
    pub degenerate: bool,
}
