//! Piecewise-linear trend fit with weekly seasonality.
//!
//! The model follows the usual additive decomposition for daily epidemic
//! counts:
//!
//! ```text
//! y(t) = trend(t) + weekly(t) + noise
//! ```
//!
//! - `trend(t)` is piecewise linear with a candidate slope change at every
//!   interior date of the series: intercept, base slope, and one hinge term
//!   `max(t - s_j, 0)` per interior date `s_j`.
//! - `weekly(t)` is a Fourier block of order 3 on a 7-day period. Yearly and
//!   daily terms are omitted; daily counts carry a strong day-of-week
//!   reporting rhythm and little else at this granularity.
//!
//! With one hinge per date the regression is underdetermined, so the slope
//! changes get a ridge penalty (and the seasonal block a weaker one),
//! implemented as scaled identity rows appended to the design matrix. The
//! whole fit is a single SVD least-squares solve; a full-history series is a
//! few seconds of dense linear algebra.
//!
//! Only the fitted trend component is returned. The seasonal and residual
//! parts are discarded: the caller wants the long-run movement, not a
//! zero-horizon forecast.

use nalgebra::{DMatrix, DVector};

use crate::domain::TimeSeries;
use crate::error::PlotError;
use crate::math::solve_least_squares;
use crate::trend::TrendFitter;

/// Weekly seasonality period in days.
const WEEK_DAYS: f64 = 7.0;

/// Default trend smoother: ridge-regularized piecewise-linear regression.
#[derive(Debug, Clone)]
pub struct ChangepointTrend {
    /// Prior scale for slope changes. Larger means a more flexible trend;
    /// the ridge weight on each hinge coefficient is its reciprocal.
    pub changepoint_prior_scale: f64,
    /// Prior scale for the weekly Fourier coefficients.
    pub seasonality_prior_scale: f64,
    /// Fourier order of the weekly block (order 3 gives 6 columns).
    pub weekly_order: usize,
}

impl Default for ChangepointTrend {
    fn default() -> Self {
        ChangepointTrend {
            changepoint_prior_scale: 0.5,
            seasonality_prior_scale: 10.0,
            weekly_order: 3,
        }
    }
}

impl TrendFitter for ChangepointTrend {
    fn fit_trend(&self, series: &TimeSeries) -> Result<TimeSeries, PlotError> {
        let n = series.len();
        if n < 3 {
            return Err(PlotError::trend(format!(
                "need at least 3 points to fit a trend, got {n}"
            )));
        }
        if !(self.changepoint_prior_scale > 0.0 && self.seasonality_prior_scale > 0.0) {
            return Err(PlotError::trend("prior scales must be positive"));
        }

        let points = series.points();
        let first_date = points[0].0;

        // Day offsets from the first date; the regression time axis is scaled
        // to [0, 1] so the prior weights are independent of series length.
        let days: Vec<f64> = points
            .iter()
            .map(|&(d, _)| (d - first_date).num_days() as f64)
            .collect();
        let span = days[n - 1];
        if span <= 0.0 {
            return Err(PlotError::trend("series dates do not advance"));
        }
        let t: Vec<f64> = days.iter().map(|&d| d / span).collect();

        // Scale values to unit magnitude so the ridge weights are unit-free.
        let y_scale = series
            .values()
            .fold(0.0_f64, |acc, v| acc.max(v.abs()))
            .max(1.0);

        // Candidate changepoints at every interior date. A changepoint at the
        // first date duplicates the base slope and one at the last date has an
        // all-zero hinge column, so both are skipped.
        let changepoints: Vec<f64> = t[1..n - 1].to_vec();
        let n_cp = changepoints.len();
        let n_seas = 2 * self.weekly_order;
        let p = 2 + n_cp + n_seas;

        let lambda_cp = 1.0 / self.changepoint_prior_scale;
        let lambda_seas = 1.0 / self.seasonality_prior_scale;

        // Observation rows followed by one penalty row per regularized column.
        let rows = n + n_cp + n_seas;
        let mut x = DMatrix::<f64>::zeros(rows, p);
        let mut yv = DVector::<f64>::zeros(rows);

        for i in 0..n {
            x[(i, 0)] = 1.0;
            x[(i, 1)] = t[i];
            for (j, &s) in changepoints.iter().enumerate() {
                x[(i, 2 + j)] = (t[i] - s).max(0.0);
            }
            for k in 0..self.weekly_order {
                let angle = 2.0 * std::f64::consts::PI * (k as f64 + 1.0) * days[i] / WEEK_DAYS;
                x[(i, 2 + n_cp + 2 * k)] = angle.sin();
                x[(i, 2 + n_cp + 2 * k + 1)] = angle.cos();
            }
            yv[i] = points[i].1 / y_scale;
        }
        for j in 0..n_cp {
            x[(n + j, 2 + j)] = lambda_cp.sqrt();
        }
        for k in 0..n_seas {
            x[(n + n_cp + k, 2 + n_cp + k)] = lambda_seas.sqrt();
        }

        let beta = solve_least_squares(&x, &yv)
            .ok_or_else(|| PlotError::trend("trend regression did not converge"))?;

        // Evaluate the trend component only: intercept + slope + hinges.
        let trend: Vec<(chrono::NaiveDate, f64)> = points
            .iter()
            .enumerate()
            .map(|(i, &(date, _))| {
                let mut v = beta[0] + beta[1] * t[i];
                for (j, &s) in changepoints.iter().enumerate() {
                    v += beta[2 + j] * (t[i] - s).max(0.0);
                }
                (date, v * y_scale)
            })
            .collect();

        Ok(TimeSeries::from_sorted(trend))
    }
}
