//! Typed queries behind the accident charts.
//!
//! Every query is a `GROUP BY` over the `accidents` table returning rows
//! from [`crate::models`].

use crate::models::{DatedCount, GroupedCount, ShareCount};
use crate::Database;
use jfs_core::config::OTHER_CATEGORY;
use rusqlite::params;
use std::fmt;
use std::str::FromStr;

/// Column the stacked bar chart groups by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccidentGrouping {
    Category,
    Fatal,
}

impl AccidentGrouping {
    fn column(self) -> &'static str {
        match self {
            AccidentGrouping::Category => "category",
            AccidentGrouping::Fatal => "fatal",
        }
    }
}

impl fmt::Display for AccidentGrouping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for AccidentGrouping {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "category" => Ok(AccidentGrouping::Category),
            "fatal" => Ok(AccidentGrouping::Fatal),
            other => Err(format!("unknown accident grouping: {}", other)),
        }
    }
}

impl Database {
    /// Counts per (grouping value, technical_error), for the stacked bar chart.
    ///
    /// With `top_n`, grouping values outside the `top_n` most frequent are
    /// folded into "Other" (ties broken by ascending value). Reports with a
    /// null grouping value are left out. Ordered by label, then
    /// technical_error.
    pub fn query_grouped_counts(
        &self,
        grouping: AccidentGrouping,
        top_n: Option<usize>,
    ) -> anyhow::Result<Vec<GroupedCount>> {
        let column = grouping.column();
        // LIMIT -1 is SQLite for "no limit".
        let limit: i64 = match top_n {
            Some(n) => i64::try_from(n)?,
            None => -1,
        };
        let sql = format!(
            "WITH kept AS (
                 SELECT {col} AS value FROM accidents
                 WHERE {col} IS NOT NULL
                 GROUP BY {col}
                 ORDER BY COUNT(*) DESC, {col} ASC
                 LIMIT ?1
             )
             SELECT CASE WHEN {col} IN (SELECT value FROM kept) THEN {col} ELSE ?2 END AS label,
                    technical_error,
                    COUNT(*)
             FROM accidents
             WHERE {col} IS NOT NULL
             GROUP BY label, technical_error
             ORDER BY label, technical_error",
            col = column
        );
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params![limit, OTHER_CATEGORY], |row| {
                Ok(GroupedCount {
                    label: row.get(0)?,
                    technical_error: row.get(1)?,
                    count: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!(
            "[JFS] query: query_grouped_counts({}, {:?}) returned {} records",
            grouping,
            top_n,
            rows.len()
        );
        Ok(rows)
    }

    /// Counts per (report date, technical_error), chronological.
    ///
    /// Reports without a parseable date are excluded.
    pub fn query_accident_trend(&self) -> anyhow::Result<Vec<DatedCount>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(
            "SELECT report_date, technical_error, COUNT(*)
             FROM accidents
             WHERE report_date IS NOT NULL
             GROUP BY report_date, technical_error
             ORDER BY report_date, technical_error",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok(DatedCount {
                    date: row.get(0)?,
                    technical_error: row.get(1)?,
                    count: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!(
            "[JFS] query: query_accident_trend returned {} records",
            rows.len()
        );
        Ok(rows)
    }

    /// Yes/No totals of technical_error, for the pie chart.
    pub fn query_technical_error_share(&self) -> anyhow::Result<Vec<ShareCount>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(
            "SELECT technical_error, COUNT(*)
             FROM accidents
             GROUP BY technical_error
             ORDER BY technical_error",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok(ShareCount {
                    technical_error: row.get(0)?,
                    count: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!(
            "[JFS] query: query_technical_error_share returned {} records",
            rows.len()
        );
        Ok(rows)
    }

    pub fn query_accident_count(&self) -> anyhow::Result<i64> {
        let conn = self.conn.borrow();
        let count = conn.query_row("SELECT COUNT(*) FROM accidents", [], |row| row.get(0))?;
        Ok(count)
    }
}
