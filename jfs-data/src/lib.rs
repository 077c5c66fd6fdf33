//! Data preparation and analysis for fatality datasets.
//!
//! This crate turns parsed records into the tables the charts and the
//! incident browser consume: exploded factor rows, collapsed and pivoted
//! category counts, numeric summaries and regression fits.

pub mod browser;
pub mod categories;
pub mod context;
pub mod factors;
pub mod regression;
pub mod summary;
