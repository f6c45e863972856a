//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - input selector enums (`DataKind`, `SeriesKind`, `LineStyle`)
//! - the resolved location variant (`Location`)
//! - the dated series container and its differencing transform (`series`)
//! - per-call presentation options (`PlotStyle`, `PlotConfig`)

pub mod series;
pub mod types;

pub use series::*;
pub use types::*;
