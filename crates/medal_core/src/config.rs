//! # Predictor Configuration
//!
//! All tuning constants of the forecast → allocation pipeline live here.
//!
//! ## Usage
//! ```rust
//! use medal_core::config::PredictorConfig;
//!
//! let config = PredictorConfig::default();
//! let strict = PredictorConfig::strict();
//! assert!(config.validate().is_ok());
//! assert!(strict.thresholds.gold > config.thresholds.gold);
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{PredictError, Result};
use crate::models::category::{ENCODED_MAX, ENCODED_MIN};
use crate::models::ObservationSchedule;

/// Range forecasts are clamped into before decoding and allocation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBounds {
    pub floor: f64,
    pub ceiling: f64,
}

impl Default for ScoreBounds {
    fn default() -> Self {
        Self { floor: ENCODED_MIN as f64, ceiling: ENCODED_MAX as f64 }
    }
}

impl ScoreBounds {
    /// Clamp a raw forecast. Non-finite input maps to the floor.
    pub fn clamp(&self, score: f64) -> f64 {
        if score.is_nan() {
            return self.floor;
        }
        score.clamp(self.floor, self.ceiling)
    }
}

/// Minimum score per tier in the allocation pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AwardThresholds {
    pub gold: f64,
    pub silver: f64,
    pub bronze: f64,
    /// Below this a competitor is predicted not to take part at all.
    pub no_medal: f64,
}

impl Default for AwardThresholds {
    fn default() -> Self {
        Self { gold: 14.0, silver: 13.5, bronze: 13.0, no_medal: 12.0 }
    }
}

impl AwardThresholds {
    pub fn validate(&self) -> Result<()> {
        let ordered = self.no_medal <= self.bronze
            && self.bronze <= self.silver
            && self.silver <= self.gold;
        let finite = [self.gold, self.silver, self.bronze, self.no_medal]
            .iter()
            .all(|v| v.is_finite());
        if !ordered || !finite {
            return Err(PredictError::InvalidConfig(format!(
                "award thresholds must be finite and ordered no_medal <= bronze <= silver <= gold: {:?}",
                self
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictorConfig {
    pub schedule: ObservationSchedule,
    /// Future points requested from the grey model; only the first is used.
    pub horizon: usize,
    /// Substring marking an event as a team event.
    pub team_marker: String,
    pub score_bounds: ScoreBounds,
    pub thresholds: AwardThresholds,
    /// |a| below this is treated as a degenerate fit.
    pub coefficient_tolerance: f64,
    /// Emit a debug line every N histories (0 disables).
    pub progress_interval: usize,
    /// Forecast entities and allocate events on the rayon pool.
    pub parallel: bool,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            schedule: ObservationSchedule::default(),
            horizon: 1,
            team_marker: "Team".to_string(),
            score_bounds: ScoreBounds::default(),
            thresholds: AwardThresholds::default(),
            coefficient_tolerance: 1e-10,
            progress_interval: 1000,
            parallel: true,
        }
    }
}

impl PredictorConfig {
    /// Award thresholds raised to the decode midpoints, so a medal is only
    /// granted when the fallback label agrees.
    pub fn strict() -> Self {
        Self {
            thresholds: AwardThresholds { gold: 14.5, silver: 13.5, bronze: 12.5, no_medal: 11.5 },
            ..Self::default()
        }
    }

    /// Single-threaded run, handy for debugging.
    pub fn sequential() -> Self {
        Self { parallel: false, ..Self::default() }
    }

    pub fn validate(&self) -> Result<()> {
        self.schedule.validate()?;
        self.thresholds.validate()?;
        if self.horizon == 0 {
            return Err(PredictError::InvalidConfig("horizon must be at least 1".to_string()));
        }
        let bounds = self.score_bounds;
        if !(bounds.floor.is_finite() && bounds.ceiling.is_finite() && bounds.floor < bounds.ceiling)
        {
            return Err(PredictError::InvalidConfig(format!(
                "score bounds must be finite with floor < ceiling: {:?}",
                bounds
            )));
        }
        if !(self.coefficient_tolerance > 0.0) {
            return Err(PredictError::InvalidConfig(format!(
                "coefficient tolerance must be positive: {}",
                self.coefficient_tolerance
            )));
        }
        Ok(())
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }
}

// ========== Tests ==========
