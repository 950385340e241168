//! Builds fixed-length encoded histories from raw result records.

use std::collections::BTreeMap;
use tracing::info;

use crate::models::{
    encode_outcome, missing_period_value, EntityHistory, EntityKey, GroupKind, HistoricalRecord,
    ObservationSchedule, HISTORY_LEN,
};

/// Assemble one history per distinct (name, event) pair.
///
/// - The collective is taken from the record with the latest period; among
///   records of the same period the later one in input order wins.
/// - Each scheduled period uses the first record found for it; periods
///   without a record get [`missing_period_value`].
/// - The participation count is the number of records for the pair,
///   counted before gaps are filled.
/// - Records outside the schedule do not enter the sequence.
///
/// Output is ordered by (name, event).
pub fn build_history(
    records: &[HistoricalRecord],
    schedule: &ObservationSchedule,
    team_marker: &str,
) -> Vec<EntityHistory> {
    let mut by_entity: BTreeMap<EntityKey, Vec<&HistoricalRecord>> = BTreeMap::new();
    for record in records {
        by_entity.entry(record.key()).or_default().push(record);
    }

    let histories: Vec<EntityHistory> = by_entity
        .into_iter()
        .filter_map(|(key, group)| build_one(key, &group, schedule, team_marker))
        .collect();

    info!(records = records.len(), entities = histories.len(), "histories built");
    histories
}

fn build_one(
    key: EntityKey,
    group: &[&HistoricalRecord],
    schedule: &ObservationSchedule,
    team_marker: &str,
) -> Option<EntityHistory> {
    // max_by_key keeps the last of equal maxima
    let latest = group.iter().max_by_key(|r| r.period)?;

    let slots: [Option<&HistoricalRecord>; HISTORY_LEN] = schedule
        .history
        .map(|period| group.iter().find(|r| r.period == period).copied());
    // every row counts, including off-schedule years and same-year repeats
    let participation_count = group.len();

    let sequence = slots.map(|slot| match slot {
        Some(record) => encode_outcome(record.outcome.as_deref()),
        None => missing_period_value(participation_count),
    });

    let kind = GroupKind::classify(&key.event, team_marker);
    Some(EntityHistory::from_sequence(key, latest.collective.clone(), kind, sequence, participation_count))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(name: &str, event: &str, team: &str, year: i32, medal: Option<&str>) -> HistoricalRecord {
        HistoricalRecord::new(name, event, team, year, medal)
    }

    #[test]
    fn test_fills_missing_periods_with_not_participated() {
        let records = vec![
            rec("Ann", "100m", "USA", 2016, Some("Bronze")),
            rec("Ann", "100m", "USA", 2024, Some("Gold")),
        ];
        let histories = build_history(&records, &ObservationSchedule::default(), "Team");
        assert_eq!(histories.len(), 1);
        let h = &histories[0];
        assert_eq!(h.sequence(), &[11, 13, 11, 15]);
        assert_eq!(h.participation_count, 2);
        assert_eq!(h.kind, GroupKind::Individual);
    }

    #[test]
    fn test_blank_outcome_is_no_medal() {
        let records = vec![
            rec("Bo", "Long Jump", "SWE", 2012, None),
            rec("Bo", "Long Jump", "SWE", 2016, Some("")),
            rec("Bo", "Long Jump", "SWE", 2020, Some("Silver")),
        ];
        let histories = build_history(&records, &ObservationSchedule::default(), "Team");
        assert_eq!(histories[0].sequence(), &[12, 12, 14, 11]);
        assert_eq!(histories[0].participation_count, 3);
    }

    #[test]
    fn test_latest_collective_wins() {
        let records = vec![
            rec("Cy", "Judo -73kg", "FRA", 2020, None),
            rec("Cy", "Judo -73kg", "BEL", 2024, Some("Gold")),
            rec("Cy", "Judo -73kg", "GER", 2016, None),
        ];
        let histories = build_history(&records, &ObservationSchedule::default(), "Team");
        assert_eq!(histories[0].collective, "BEL");
    }

    #[test]
    fn test_same_period_tie_uses_later_record() {
        let records = vec![
            rec("Di", "Rowing Team Eight", "NED", 2024, Some("Silver")),
            rec("Di", "Rowing Team Eight", "GBR", 2024, Some("Gold")),
        ];
        let histories = build_history(&records, &ObservationSchedule::default(), "Team");
        let h = &histories[0];
        assert_eq!(h.collective, "GBR");
        // first record for the period feeds the sequence
        assert_eq!(h.sequence(), &[11, 11, 11, 14]);
        assert_eq!(h.participation_count, 2);
        assert_eq!(h.kind, GroupKind::Team);
    }

    #[test]
    fn test_off_schedule_records_stay_out_of_sequence() {
        let records = vec![
            rec("Ed", "Marathon", "KEN", 2008, Some("Gold")),
            rec("Ed", "Marathon", "KEN", 2012, Some("Silver")),
        ];
        let histories = build_history(&records, &ObservationSchedule::default(), "Team");
        assert_eq!(histories[0].sequence(), &[14, 11, 11, 11]);
        assert_eq!(histories[0].participation_count, 2);
    }

    #[test]
    fn test_participation_counts_every_record() {
        let records = vec![
            rec("Ed", "Marathon", "KEN", 2008, Some("Gold")),
            rec("Ed", "Marathon", "KEN", 2012, Some("Silver")),
            rec("Ed", "Marathon", "KEN", 2016, None),
        ];
        let histories = build_history(&records, &ObservationSchedule::default(), "Team");
        assert_eq!(histories[0].sequence(), &[14, 12, 11, 11]);
        assert_eq!(histories[0].participation_count, 3);
    }

    #[test]
    fn test_one_history_per_name_event_pair_in_key_order() {
        let records = vec![
            rec("Zed", "200m", "JAM", 2020, None),
            rec("Amy", "200m", "USA", 2020, None),
            rec("Zed", "100m", "JAM", 2020, Some("Bronze")),
            rec("Amy", "200m", "USA", 2024, Some("Gold")),
        ];
        let histories = build_history(&records, &ObservationSchedule::default(), "Team");
        let keys: Vec<(String, String)> = histories
            .iter()
            .map(|h| (h.key.name.clone(), h.key.event.clone()))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("Amy".to_string(), "200m".to_string()),
                ("Zed".to_string(), "100m".to_string()),
                ("Zed".to_string(), "200m".to_string()),
            ]
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(build_history(&[], &ObservationSchedule::default(), "Team").is_empty());
    }
}
