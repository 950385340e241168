use serde::{Deserialize, Serialize};

/// Medal table row for one collective.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectiveSummary {
    pub collective: String,
    pub gold: u32,
    pub silver: u32,
    pub bronze: u32,
    pub total: u32,
}

impl CollectiveSummary {
    pub fn new(collective: impl Into<String>, gold: u32, silver: u32, bronze: u32) -> Self {
        Self { collective: collective.into(), gold, silver, bronze, total: gold + silver + bronze }
    }
}
