//! Data model shared by the forecasting and allocation stages.

pub mod award;
pub mod category;
pub mod forecast;
pub mod history;
pub mod record;
pub mod summary;

pub use award::AwardAssignment;
pub use category::{encode_outcome, missing_period_value, Category, ParseCategoryError};
pub use forecast::ForecastResult;
pub use history::{EntityHistory, ObservationSchedule, HISTORY_LEN};
pub use record::{EntityKey, GroupKind, HistoricalRecord};
pub use summary::CollectiveSummary;
