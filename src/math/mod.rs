//! Numerical utilities: the least-squares solver behind the trend model.

pub mod ols;

pub use ols::*;
