//! Upstream data access.
//!
//! - `jhu`: HTTP client for the CSSE COVID-19 time-series feeds
//! - `table`: wide-CSV parsing, wide→long reshaping, location resolution

pub mod jhu;
pub mod table;

pub use jhu::*;
pub use table::*;
