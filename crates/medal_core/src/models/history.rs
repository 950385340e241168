use serde::{Deserialize, Serialize};

use super::record::{EntityKey, GroupKind};
use crate::error::{PredictError, Result};

/// Number of historical periods every history carries.
pub const HISTORY_LEN: usize = 4;

/// Fixed historical periods plus the period being forecast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservationSchedule {
    pub history: [i32; HISTORY_LEN],
    pub target: i32,
}

impl Default for ObservationSchedule {
    fn default() -> Self {
        Self { history: [2012, 2016, 2020, 2024], target: 2028 }
    }
}

impl ObservationSchedule {
    /// Build a schedule from caller-supplied periods.
    pub fn new(history: &[i32], target: i32) -> Result<Self> {
        let history: [i32; HISTORY_LEN] = history.try_into().map_err(|_| {
            PredictError::InvalidSchedule(format!(
                "expected {} historical periods, found {}",
                HISTORY_LEN,
                history.len()
            ))
        })?;
        let schedule = Self { history, target };
        schedule.validate()?;
        Ok(schedule)
    }

    /// Periods must be strictly increasing and the target must lie after them.
    pub fn validate(&self) -> Result<()> {
        if self.history.windows(2).any(|w| w[0] >= w[1]) {
            return Err(PredictError::InvalidSchedule(format!(
                "historical periods must be strictly increasing: {:?}",
                self.history
            )));
        }
        if self.target <= self.history[HISTORY_LEN - 1] {
            return Err(PredictError::InvalidSchedule(format!(
                "target period {} is not after {}",
                self.target,
                self.history[HISTORY_LEN - 1]
            )));
        }
        Ok(())
    }

    pub fn position(&self, period: i32) -> Option<usize> {
        self.history.iter().position(|&p| p == period)
    }
}

/// Encoded outcome sequence of one competitor in one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityHistory {
    pub key: EntityKey,
    /// Most recent collective affiliation.
    pub collective: String,
    pub kind: GroupKind,
    sequence: [u8; HISTORY_LEN],
    /// Records found for this competitor/event, off-schedule years and
    /// same-period repeats included.
    pub participation_count: usize,
}

impl EntityHistory {
    pub fn new(
        key: EntityKey,
        collective: impl Into<String>,
        kind: GroupKind,
        values: &[u8],
        participation_count: usize,
    ) -> Result<Self> {
        let sequence: [u8; HISTORY_LEN] = values.try_into().map_err(|_| {
            PredictError::MalformedHistory { expected: HISTORY_LEN, found: values.len() }
        })?;
        Ok(Self::from_sequence(key, collective, kind, sequence, participation_count))
    }

    pub fn from_sequence(
        key: EntityKey,
        collective: impl Into<String>,
        kind: GroupKind,
        sequence: [u8; HISTORY_LEN],
        participation_count: usize,
    ) -> Self {
        Self { key, collective: collective.into(), kind, sequence, participation_count }
    }

    pub fn sequence(&self) -> &[u8; HISTORY_LEN] {
        &self.sequence
    }

    /// Sequence as reals, ready for the grey model.
    pub fn series(&self) -> [f64; HISTORY_LEN] {
        self.sequence.map(f64::from)
    }

    /// Bracketed rendering used in exported tables, e.g. `[11, 12, 13, 15]`.
    pub fn history_label(&self) -> String {
        let parts: Vec<String> = self.sequence.iter().map(|v| v.to_string()).collect();
        format!("[{}]", parts.join(", "))
    }
}
