//! Trend smoothing for daily-count series.
//!
//! The chart driver only needs one narrow capability: turn a daily series
//! into a smoothed trend series on the same dates. `TrendFitter` is that
//! seam; `ChangepointTrend` is the default implementation. Alternative
//! smoothers (rolling means, state-space models) can be substituted without
//! touching the driver.

pub mod changepoint;

pub use changepoint::*;

use crate::domain::TimeSeries;
use crate::error::PlotError;

/// A smoothing model: fit a series, return its trend on the same dates.
pub trait TrendFitter {
    fn fit_trend(&self, series: &TimeSeries) -> Result<TimeSeries, PlotError>;
}
