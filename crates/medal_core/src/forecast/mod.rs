//! Per-entity forecasting on top of the grey model.

pub mod grey;

pub use grey::{
    forecast, gm11, DegenerateReason, GreyModel, GreyOutcome, DEFAULT_COEFFICIENT_TOLERANCE,
    MIN_SERIES_LEN,
};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::PredictorConfig;
use crate::models::{Category, EntityHistory, ForecastResult};

/// Outcome counts of one forecasting batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastStats {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// Successful forecasts that carried the last value forward.
    pub degenerate: usize,
}

#[derive(Debug, Clone, Default)]
pub struct ForecastBatch {
    pub results: Vec<ForecastResult>,
    pub stats: ForecastStats,
}

/// Forecast one history for the target period.
///
/// Returns `None` only when the grey model produced no value at all.
pub fn forecast_entity(history: &EntityHistory, config: &PredictorConfig) -> Option<ForecastResult> {
    let outcome = gm11(&history.series(), config.horizon, config.coefficient_tolerance);
    if let GreyOutcome::Degenerate { last, reason } = &outcome {
        debug!(entity = %history.key, ?reason, last, "grey fit degenerate, carrying last value");
    }

    let raw = outcome.first()?;
    let score = config.score_bounds.clamp(raw);

    Some(ForecastResult {
        key: history.key.clone(),
        collective: history.collective.clone(),
        kind: history.kind,
        target_period: config.schedule.target,
        score,
        fallback: Category::decode(score),
        history: *history.sequence(),
        participation_count: history.participation_count,
        degenerate: outcome.is_degenerate(),
    })
}

fn forecast_logged(
    index: usize,
    history: &EntityHistory,
    config: &PredictorConfig,
) -> Option<ForecastResult> {
    if config.progress_interval > 0 && (index + 1) % config.progress_interval == 0 {
        debug!(
            processed = index + 1,
            entity = %history.key,
            collective = %history.collective,
            participation = history.participation_count,
            history = %history.history_label(),
            "forecast progress"
        );
    }
    let result = forecast_entity(history, config);
    if result.is_none() {
        warn!(entity = %history.key, "no forecast produced");
    }
    result
}

/// Forecast every history. Each entity is independent, so the work runs
/// on the rayon pool when `config.parallel` is set; output order always
/// matches input order.
pub fn forecast_all(histories: &[EntityHistory], config: &PredictorConfig) -> ForecastBatch {
    let outcomes: Vec<Option<ForecastResult>> = if config.parallel {
        histories
            .par_iter()
            .enumerate()
            .map(|(i, h)| forecast_logged(i, h, config))
            .collect()
    } else {
        histories.iter().enumerate().map(|(i, h)| forecast_logged(i, h, config)).collect()
    };

    let mut stats = ForecastStats { total: histories.len(), ..ForecastStats::default() };
    let mut results = Vec::with_capacity(outcomes.len());
    for outcome in outcomes {
        match outcome {
            Some(result) => {
                stats.succeeded += 1;
                if result.degenerate {
                    stats.degenerate += 1;
                }
                results.push(result);
            }
            None => stats.failed += 1,
        }
    }

    info!(
        total = stats.total,
        succeeded = stats.succeeded,
        failed = stats.failed,
        degenerate = stats.degenerate,
        "forecast batch complete"
    );

    ForecastBatch { results, stats }
}
