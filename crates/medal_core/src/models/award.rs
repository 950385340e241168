use serde::{Deserialize, Serialize};

use super::category::Category;
use super::history::HISTORY_LEN;
use super::record::{EntityKey, GroupKind};

/// Final tier granted to one competitor within its event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AwardAssignment {
    pub key: EntityKey,
    pub collective: String,
    pub target_period: i32,
    pub category: Category,
    pub score: f64,
    /// 1-based position after sorting the event by descending score.
    pub rank: usize,
    pub group_size: usize,
    pub kind: GroupKind,
    pub history: [u8; HISTORY_LEN],
    pub participation_count: usize,
}
