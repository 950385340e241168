//! Medal table per collective.

use std::collections::BTreeMap;

use crate::models::{AwardAssignment, Category, CollectiveSummary};

/// Count medals per collective.
///
/// Every collective present in `assignments` gets a row, including those
/// without any medal. Rows are sorted by Gold, then Total, both descending;
/// remaining ties fall back to collective name so output is reproducible.
pub fn summarize(assignments: &[AwardAssignment]) -> Vec<CollectiveSummary> {
    let mut counts: BTreeMap<&str, [u32; 3]> = BTreeMap::new();
    for assignment in assignments {
        let row = counts.entry(assignment.collective.as_str()).or_default();
        match assignment.category {
            Category::Gold => row[0] += 1,
            Category::Silver => row[1] += 1,
            Category::Bronze => row[2] += 1,
            Category::NoMedal | Category::NotParticipated => {}
        }
    }

    let mut summaries: Vec<CollectiveSummary> = counts
        .into_iter()
        .map(|(collective, [gold, silver, bronze])| {
            CollectiveSummary::new(collective, gold, silver, bronze)
        })
        .collect();
    // BTreeMap order makes the stable sort break ties by name
    summaries.sort_by(|a, b| b.gold.cmp(&a.gold).then(b.total.cmp(&a.total)));
    summaries
}
