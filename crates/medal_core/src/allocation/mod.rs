//! Per-event medal allocation.

pub mod engine;

pub use engine::allocate;

use rayon::prelude::*;
use std::collections::BTreeMap;
use tracing::{debug, info};

use crate::config::AwardThresholds;
use crate::models::{AwardAssignment, ForecastResult, GroupKind};

/// All forecasts competing for one event's medals.
#[derive(Debug, Clone)]
pub struct EventGroup {
    pub event: String,
    pub kind: GroupKind,
    pub entries: Vec<ForecastResult>,
}

impl EventGroup {
    pub fn allocate(&self, thresholds: &AwardThresholds) -> Vec<AwardAssignment> {
        let assignments = allocate(self.kind, &self.entries, thresholds);
        debug!(event = %self.event, kind = ?self.kind, entries = self.entries.len(), "event allocated");
        assignments
    }
}

/// Partition forecasts by event name. Groups are ordered by event name and
/// keep input order inside each group.
pub fn group_by_event(forecasts: Vec<ForecastResult>) -> Vec<EventGroup> {
    let mut groups: BTreeMap<String, EventGroup> = BTreeMap::new();
    for forecast in forecasts {
        groups
            .entry(forecast.key.event.clone())
            .or_insert_with(|| EventGroup {
                event: forecast.key.event.clone(),
                kind: forecast.kind,
                entries: Vec::new(),
            })
            .entries
            .push(forecast);
    }
    groups.into_values().collect()
}

/// Allocate every event. Events are independent of each other, so they run
/// on the rayon pool when `parallel` is set; the result is concatenated in
/// group order either way.
pub fn allocate_all(
    groups: &[EventGroup],
    thresholds: &AwardThresholds,
    parallel: bool,
) -> Vec<AwardAssignment> {
    let per_group: Vec<Vec<AwardAssignment>> = if parallel {
        groups.par_iter().map(|g| g.allocate(thresholds)).collect()
    } else {
        groups.iter().map(|g| g.allocate(thresholds)).collect()
    };
    let assignments: Vec<AwardAssignment> = per_group.into_iter().flatten().collect();

    let medals = assignments.iter().filter(|a| a.category.is_medal()).count();
    info!(events = groups.len(), assignments = assignments.len(), medals, "allocation complete");
    assignments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, EntityKey};

    fn forecast(name: &str, event: &str, team: &str, score: f64) -> ForecastResult {
        let kind = GroupKind::classify(event, "Team");
        ForecastResult {
            key: EntityKey::new(name, event),
            collective: team.to_string(),
            kind,
            target_period: 2028,
            score,
            fallback: Category::decode(score),
            history: [11, 12, 13, 14],
            participation_count: 3,
            degenerate: false,
        }
    }

    #[test]
    fn test_group_by_event_orders_groups_and_keeps_entry_order() {
        let groups = group_by_event(vec![
            forecast("b", "Vault", "USA", 14.0),
            forecast("a", "Relay Team", "USA", 13.0),
            forecast("c", "Vault", "CHN", 15.0),
        ]);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].event, "Relay Team");
        assert_eq!(groups[0].kind, GroupKind::Team);
        assert_eq!(groups[1].event, "Vault");
        assert_eq!(groups[1].kind, GroupKind::Individual);
        let names: Vec<&str> = groups[1].entries.iter().map(|e| e.key.name.as_str()).collect();
        assert_eq!(names, vec!["b", "c"]);
    }

    #[test]
    fn test_allocate_all_handles_events_independently() {
        let groups = group_by_event(vec![
            forecast("a", "Vault", "USA", 14.5),
            forecast("b", "Floor", "USA", 14.5),
            forecast("c", "Vault", "CHN", 14.6),
        ]);
        for parallel in [true, false] {
            let assignments = allocate_all(&groups, &AwardThresholds::default(), parallel);
            assert_eq!(assignments.len(), 3);
            let golds: Vec<&str> = assignments
                .iter()
                .filter(|a| a.category == Category::Gold)
                .map(|a| a.key.name.as_str())
                .collect();
            assert_eq!(golds, vec!["b", "c"]);
        }
    }

    #[test]
    fn test_no_groups() {
        assert!(group_by_event(Vec::new()).is_empty());
        assert!(allocate_all(&[], &AwardThresholds::default(), true).is_empty());
    }
}
