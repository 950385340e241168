//! # medal_core - Grey-Model Medal Forecasting
//!
//! Forecasts the next medal tier of every competitor/event pair from a
//! short history of results and turns the forecasts into a medal table.
//!
//! ## Stages
//! - [`history`]: raw records → fixed four-period encoded histories
//! - [`forecast`]: GM(1,1) grey model, one future score per history
//! - [`allocation`]: per-event Gold/Silver/Bronze allocation with
//!   team-event deduplication
//! - [`aggregation`]: medal counts per collective
//! - [`pipeline`]: all of the above behind [`Predictor`]
//!
//! Everything here is pure computation; loading and exporting tables is
//! left to callers (see the `medal_cli` crate).

pub mod aggregation;
pub mod allocation;
pub mod config;
pub mod error;
pub mod forecast;
pub mod history;
pub mod models;
pub mod pipeline;

pub use aggregation::summarize;
pub use allocation::{allocate, allocate_all, group_by_event, EventGroup};
pub use config::{AwardThresholds, PredictorConfig, ScoreBounds};
pub use error::{PredictError, Result};
pub use forecast::{forecast, forecast_all, forecast_entity, gm11, GreyOutcome};
pub use history::build_history;
pub use models::{
    AwardAssignment, Category, CollectiveSummary, EntityHistory, EntityKey, ForecastResult,
    GroupKind, HistoricalRecord, ObservationSchedule,
};
pub use pipeline::{PredictionReport, Predictor, RunStats};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
