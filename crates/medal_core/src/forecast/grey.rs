//! # GM(1,1) Grey Forecasting Model
//!
//! Fits the first-order single-variable grey model to a short positive
//! series and extrapolates future points.
//!
//! ## Method
//! 1. Accumulate the series: `x1[k] = Σ x[0..=k]`
//! 2. Least squares over the background values `z[k] = -(x1[k-1] + x1[k]) / 2`:
//!    `x[k] = a·z[k] + u`, solved with the normal equations `(BᵀB)⁻¹ Bᵀ Y`
//! 3. Closed-form accumulated prediction:
//!    `x1_hat[k] = (x[0] - u/a)·e^(-a·k) + u/a`
//! 4. First differences of `x1_hat` give point forecasts.
//!
//! A zero anywhere in the series would make the exponential form
//! meaningless, so such series are shifted by +1 before fitting and the
//! forecasts shifted back (floored at 0).
//!
//! Fitting never fails loudly: every numeric dead end produces
//! [`GreyOutcome::Degenerate`] carrying the last observed value.

use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

/// Shortest series the model will fit.
pub const MIN_SERIES_LEN: usize = 4;

/// |a| under this is treated as a flat (non-exponential) series.
pub const DEFAULT_COEFFICIENT_TOLERANCE: f64 = 1e-10;

/// Fitted GM(1,1) parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GreyModel {
    /// Development coefficient.
    pub a: f64,
    /// Grey action quantity.
    pub u: f64,
    /// First value of the (possibly shifted) series, anchors the solution.
    pub x0: f64,
    /// Series was shifted by +1 to avoid zeros.
    pub shifted: bool,
}

/// Why a fit fell back to the last observed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DegenerateReason {
    /// At most one non-zero value.
    SparseSeries,
    /// Gram matrix could not be inverted.
    SingularSystem,
    /// |a| below tolerance.
    FlatCoefficient,
    /// Non-finite input, coefficient or reconstruction.
    NonFinite,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GreyOutcome {
    Fitted { values: Vec<f64>, model: GreyModel },
    Degenerate { last: f64, reason: DegenerateReason },
    /// Series shorter than [`MIN_SERIES_LEN`]; nothing is forecast.
    Insufficient { len: usize },
}

impl GreyOutcome {
    /// Forecast values as the caller sees them: the fitted points, a single
    /// carried-forward value, or nothing.
    pub fn values(&self) -> Vec<f64> {
        match self {
            GreyOutcome::Fitted { values, .. } => values.clone(),
            GreyOutcome::Degenerate { last, .. } => vec![*last],
            GreyOutcome::Insufficient { .. } => Vec::new(),
        }
    }

    pub fn first(&self) -> Option<f64> {
        match self {
            GreyOutcome::Fitted { values, .. } => values.first().copied(),
            GreyOutcome::Degenerate { last, .. } => Some(*last),
            GreyOutcome::Insufficient { .. } => None,
        }
    }

    pub fn is_degenerate(&self) -> bool {
        matches!(self, GreyOutcome::Degenerate { .. })
    }
}

impl GreyModel {
    /// Fit the model to an already shifted series.
    fn fit(x: &[f64], shifted: bool, tolerance: f64) -> Result<GreyModel, DegenerateReason> {
        let n = x.len();
        let x1: Vec<f64> = x
            .iter()
            .scan(0.0, |acc, &v| {
                *acc += v;
                Some(*acc)
            })
            .collect();

        let b = DMatrix::from_fn(n - 1, 2, |i, j| {
            if j == 0 {
                -(x1[i] + x1[i + 1]) / 2.0
            } else {
                1.0
            }
        });
        let y = DVector::from_column_slice(&x[1..]);

        let bt = b.transpose();
        let gram = &bt * &b;
        let gram_inv = gram.try_inverse().ok_or(DegenerateReason::SingularSystem)?;
        let params = gram_inv * bt * y;
        let (a, u) = (params[0], params[1]);

        if !a.is_finite() || !u.is_finite() {
            return Err(DegenerateReason::NonFinite);
        }
        if a.abs() < tolerance {
            return Err(DegenerateReason::FlatCoefficient);
        }

        Ok(GreyModel { a, u, x0: x[0], shifted })
    }

    /// Accumulated prediction `x1_hat[k]`.
    pub fn accumulated(&self, k: usize) -> f64 {
        let ratio = self.u / self.a;
        (self.x0 - ratio) * (-self.a * k as f64).exp() + ratio
    }

    /// Point forecasts for indices `1..len + horizon`, shift undone.
    fn reconstruct(&self, len: usize, horizon: usize) -> Vec<f64> {
        let x1_hat: Vec<f64> = (0..len + horizon).map(|k| self.accumulated(k)).collect();
        x1_hat
            .windows(2)
            .map(|w| w[1] - w[0])
            .map(|p| if self.shifted { (p - 1.0).max(0.0) } else { p })
            .collect()
    }
}

/// Fit GM(1,1) to `series` and forecast `horizon` future points.
pub fn gm11(series: &[f64], horizon: usize, tolerance: f64) -> GreyOutcome {
    if series.len() < MIN_SERIES_LEN {
        return GreyOutcome::Insufficient { len: series.len() };
    }
    let last = series[series.len() - 1];
    let degenerate = |reason| GreyOutcome::Degenerate { last, reason };

    if series.iter().any(|v| !v.is_finite()) {
        return degenerate(DegenerateReason::NonFinite);
    }
    if series.iter().filter(|&&v| v != 0.0).count() <= 1 {
        return degenerate(DegenerateReason::SparseSeries);
    }

    let min = series.iter().copied().fold(f64::INFINITY, f64::min);
    let shifted = min == 0.0;
    let x: Vec<f64> = if shifted { series.iter().map(|v| v + 1.0).collect() } else { series.to_vec() };

    let model = match GreyModel::fit(&x, shifted, tolerance) {
        Ok(model) => model,
        Err(reason) => return degenerate(reason),
    };

    let predictions = model.reconstruct(x.len(), horizon);
    let values = predictions[predictions.len().saturating_sub(horizon)..].to_vec();
    if values.iter().any(|v| !v.is_finite()) {
        return degenerate(DegenerateReason::NonFinite);
    }

    GreyOutcome::Fitted { values, model }
}

/// Convenience wrapper with the default tolerance, returning plain values.
///
/// The result holds `horizon` values on a successful fit, a single value
/// when the fit degenerated, and nothing for series shorter than four.
pub fn forecast(series: &[f64], horizon: usize) -> Vec<f64> {
    gm11(series, horizon, DEFAULT_COEFFICIENT_TOLERANCE).values()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-6;

    fn assert_close(actual: f64, expected: f64) {
        assert!((actual - expected).abs() < EPS, "expected {expected}, got {actual}");
    }

    #[test]
    fn test_rising_finish_golden_value() {
        let out = forecast(&[11.0, 11.0, 11.0, 15.0], 1);
        assert_eq!(out.len(), 1);
        assert_close(out[0], 17.11627284909264);
    }

    #[test]
    fn test_consistent_podium_golden_value() {
        let outcome = gm11(&[13.0, 14.0, 15.0, 15.0], 1, DEFAULT_COEFFICIENT_TOLERANCE);
        match outcome {
            GreyOutcome::Fitted { values, model } => {
                assert_close(values[0], 15.68203134668812);
                assert_close(model.a, -0.0337035618536959);
                assert_close(model.u, 13.49827652240521);
                assert!(!model.shifted);
            }
            other => panic!("expected a fit, got {other:?}"),
        }
    }

    #[test]
    fn test_multi_step_horizon() {
        let out = forecast(&[11.0, 12.0, 13.0, 14.0], 3);
        assert_eq!(out.len(), 3);
        assert_close(out[0], 15.122785983360103);
        assert_close(out[1], 16.331369655519865);
        assert_close(out[2], 17.63654098647598);
    }

    #[test]
    fn test_all_zero_series_returns_last_value() {
        let outcome = gm11(&[0.0, 0.0, 0.0, 0.0], 1, DEFAULT_COEFFICIENT_TOLERANCE);
        assert_eq!(
            outcome,
            GreyOutcome::Degenerate { last: 0.0, reason: DegenerateReason::SparseSeries }
        );
        assert_eq!(outcome.values(), vec![0.0]);
    }

    #[test]
    fn test_single_nonzero_returns_last_value() {
        assert_eq!(forecast(&[0.0, 0.0, 0.0, 5.0], 1), vec![5.0]);
        assert_eq!(forecast(&[0.0, 7.0, 0.0, 0.0], 1), vec![0.0]);
    }

    #[test]
    fn test_zero_shift_is_undone() {
        let outcome = gm11(&[0.0, 0.0, 2.0, 3.0], 1, DEFAULT_COEFFICIENT_TOLERANCE);
        match outcome {
            GreyOutcome::Fitted { values, model } => {
                assert!(model.shifted);
                assert_close(model.x0, 1.0);
                assert_close(values[0], 5.884813415336067);
            }
            other => panic!("expected a fit, got {other:?}"),
        }
    }

    #[test]
    fn test_constant_series_is_flat() {
        let outcome = gm11(&[11.0, 11.0, 11.0, 11.0], 1, DEFAULT_COEFFICIENT_TOLERANCE);
        match outcome {
            GreyOutcome::Degenerate { last, reason } => {
                assert_eq!(last, 11.0);
                assert_eq!(reason, DegenerateReason::FlatCoefficient);
            }
            other => panic!("expected degenerate outcome, got {other:?}"),
        }
    }

    #[test]
    fn test_shifted_flat_series_returns_observed_last() {
        // shifted to [1, 5, 5, 5]; the fallback is the unshifted 4
        let outcome = gm11(&[0.0, 4.0, 4.0, 4.0], 1, DEFAULT_COEFFICIENT_TOLERANCE);
        assert!(outcome.is_degenerate());
        assert_eq!(outcome.first(), Some(4.0));
    }

    #[test]
    fn test_short_series_is_rejected() {
        let outcome = gm11(&[12.0, 13.0, 14.0], 1, DEFAULT_COEFFICIENT_TOLERANCE);
        assert_eq!(outcome, GreyOutcome::Insufficient { len: 3 });
        assert!(outcome.values().is_empty());
        assert_eq!(outcome.first(), None);
    }

    #[test]
    fn test_non_finite_input_degrades() {
        let outcome = gm11(&[11.0, f64::NAN, 12.0, 13.0], 1, DEFAULT_COEFFICIENT_TOLERANCE);
        assert!(outcome.is_degenerate());
        assert_eq!(outcome.first(), Some(13.0));
    }

    #[test]
    fn test_overflowing_series_never_panics() {
        let out = forecast(&[1.0, 1e200, 1e300, 1e308], 1);
        assert!(!out.is_empty());
        assert!(out.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_longer_series_is_accepted() {
        let out = forecast(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 1);
        assert_eq!(out.len(), 1);
        assert!(out[0] > 6.0);
    }

    #[test]
    fn test_accumulated_reproduces_first_value() {
        let model = GreyModel { a: -0.05, u: 10.0, x0: 12.0, shifted: false };
        assert_close(model.accumulated(0), 12.0);
    }
}
