//! Query result rows for the accident charts.
//!
//! All structs derive `Serialize` so the command layer can print them as JSON.

use serde::Serialize;

/// Count for one (label, technical_error) bar segment.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GroupedCount {
    /// Category or fatal flag, possibly collapsed to "Other".
    pub label: String,
    pub technical_error: String,
    pub count: i64,
}

/// Count for one (report date, technical_error) point.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DatedCount {
    /// Report date as `YYYY-MM-DD`.
    pub date: String,
    pub technical_error: String,
    pub count: i64,
}

/// One pie slice.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ShareCount {
    pub technical_error: String,
    pub count: i64,
}
