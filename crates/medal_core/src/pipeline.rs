//! Records → histories → forecasts → awards → medal table.
//!
//! The pipeline is pure: callers load records and persist the report.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::aggregation::summarize;
use crate::allocation::{allocate_all, group_by_event};
use crate::config::PredictorConfig;
use crate::error::Result;
use crate::forecast::{forecast_all, ForecastStats};
use crate::history::build_history;
use crate::models::{AwardAssignment, CollectiveSummary, EntityHistory, ForecastResult, HistoricalRecord};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunStats {
    pub records: usize,
    pub entities: usize,
    pub events: usize,
    pub forecasts: ForecastStats,
    pub medals: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictionReport {
    pub histories: Vec<EntityHistory>,
    /// Forecasts before allocation, in history order.
    pub forecasts: Vec<ForecastResult>,
    /// Final awards, grouped by event in event-name order, rank order within.
    pub assignments: Vec<AwardAssignment>,
    pub summaries: Vec<CollectiveSummary>,
    pub stats: RunStats,
}

impl PredictionReport {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[derive(Debug, Clone)]
pub struct Predictor {
    config: PredictorConfig,
}

impl Predictor {
    /// Validates the config up front so a run never starts half-configured.
    pub fn new(config: PredictorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PredictorConfig {
        &self.config
    }

    pub fn histories(&self, records: &[HistoricalRecord]) -> Vec<EntityHistory> {
        build_history(records, &self.config.schedule, &self.config.team_marker)
    }

    pub fn run(&self, records: &[HistoricalRecord]) -> PredictionReport {
        let config = &self.config;
        let histories = self.histories(records);
        let batch = forecast_all(&histories, config);

        let forecasts = batch.results;
        let groups = group_by_event(forecasts.clone());
        let assignments = allocate_all(&groups, &config.thresholds, config.parallel);
        let summaries = summarize(&assignments);

        let stats = RunStats {
            records: records.len(),
            entities: histories.len(),
            events: groups.len(),
            forecasts: batch.stats,
            medals: assignments.iter().filter(|a| a.category.is_medal()).count(),
        };
        info!(
            records = stats.records,
            entities = stats.entities,
            events = stats.events,
            medals = stats.medals,
            collectives = summaries.len(),
            "prediction run complete"
        );

        PredictionReport { histories, forecasts, assignments, summaries, stats }
    }
}
