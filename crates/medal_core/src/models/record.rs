use serde::{Deserialize, Serialize};
use std::fmt;

/// One historical result row: a competitor in an event at one period.
///
/// Field names follow the CSV headers used by the results tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoricalRecord {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Event")]
    pub event: String,
    /// Team / nation the competitor represented at that period.
    #[serde(rename = "Team")]
    pub collective: String,
    #[serde(rename = "Year")]
    pub period: i32,
    /// Medal label; empty or absent means competed without a medal.
    #[serde(rename = "Medal", default)]
    pub outcome: Option<String>,
}

impl HistoricalRecord {
    pub fn new(
        name: impl Into<String>,
        event: impl Into<String>,
        collective: impl Into<String>,
        period: i32,
        outcome: Option<&str>,
    ) -> Self {
        Self {
            name: name.into(),
            event: event.into(),
            collective: collective.into(),
            period,
            outcome: outcome.map(str::to_string),
        }
    }

    pub fn key(&self) -> EntityKey {
        EntityKey::new(&self.name, &self.event)
    }
}

/// Identity of a forecast subject: a competitor within one event.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityKey {
    pub name: String,
    pub event: String,
}

impl EntityKey {
    pub fn new(name: impl Into<String>, event: impl Into<String>) -> Self {
        Self { name: name.into(), event: event.into() }
    }
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} / {}", self.name, self.event)
    }
}

/// Allocation rule set of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GroupKind {
    Individual,
    /// One award per collective per event.
    Team,
}

impl GroupKind {
    /// Resolve the kind from an event name. Called once at ingestion so the
    /// allocation pass never looks at event names.
    pub fn classify(event: &str, team_marker: &str) -> GroupKind {
        if !team_marker.is_empty() && event.contains(team_marker) {
            GroupKind::Team
        } else {
            GroupKind::Individual
        }
    }

    pub fn is_team(self) -> bool {
        self == GroupKind::Team
    }
}
