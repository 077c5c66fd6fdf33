//! Category counting, top-N collapsing and cross-tabulation.

use crate::factors::ExplodedIncident;
use jfs_core::config::OTHER_CATEGORY;
use jfs_core::incident::{Incident, IncidentColumn};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// A row type with categorical columns that can be read and rewritten.
pub trait Categorical: Clone {
    type Column: Copy;

    fn category(&self, column: Self::Column) -> Option<&str>;
    fn set_category(&mut self, column: Self::Column, value: Option<String>);
}

impl Categorical for Incident {
    type Column = IncidentColumn;

    fn category(&self, column: IncidentColumn) -> Option<&str> {
        Incident::category(self, column)
    }

    fn set_category(&mut self, column: IncidentColumn, value: Option<String>) {
        Incident::set_category(self, column, value)
    }
}

impl Categorical for ExplodedIncident {
    type Column = IncidentColumn;

    fn category(&self, column: IncidentColumn) -> Option<&str> {
        self.incident.category(column)
    }

    fn set_category(&mut self, column: IncidentColumn, value: Option<String>) {
        self.incident.set_category(column, value)
    }
}

/// Count of rows sharing one category value.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategoryCount {
    pub category: String,
    pub count: u64,
}

/// Non-null values of `column` with their counts, most frequent first.
///
/// Ties are ordered by ascending value so the ranking is stable for a
/// given input.
pub fn category_counts<R: Categorical>(rows: &[R], column: R::Column) -> Vec<CategoryCount> {
    let mut counts: HashMap<&str, u64> = HashMap::new();
    for row in rows {
        if let Some(value) = row.category(column) {
            *counts.entry(value).or_default() += 1;
        }
    }
    let mut ranked: Vec<CategoryCount> = counts
        .into_iter()
        .map(|(category, count)| CategoryCount {
            category: category.to_string(),
            count,
        })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.category.cmp(&b.category)));
    ranked
}

/// Copy of `rows` where every value of `column` outside the `n` most
/// frequent is replaced by "Other". Null values stay null.
pub fn top_n_with_other<R: Categorical>(rows: &[R], column: R::Column, n: usize) -> Vec<R> {
    let keep: BTreeSet<String> = category_counts(rows, column)
        .into_iter()
        .take(n)
        .map(|c| c.category)
        .collect();

    rows.iter()
        .map(|row| {
            let mut copy = row.clone();
            if let Some(value) = row.category(column) {
                if !keep.contains(value) {
                    copy.set_category(column, Some(OTHER_CATEGORY.to_string()));
                }
            }
            copy
        })
        .collect()
}

/// Pivoted (row, column) counts.
///
/// `rows` are ordered by descending total (ties by label), `columns`
/// ascending. `counts[i][j]` is the count for `rows[i]` × `columns[j]`;
/// combinations never seen are 0.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CrossTab {
    pub rows: Vec<String>,
    pub columns: Vec<String>,
    pub counts: Vec<Vec<u64>>,
    pub row_totals: Vec<u64>,
}

impl CrossTab {
    /// Build from pre-counted (row, column, count) triples.
    ///
    /// Repeated pairs are summed.
    pub fn from_counts<I, S>(triples: I) -> CrossTab
    where
        I: IntoIterator<Item = (S, S, u64)>,
        S: Into<String>,
    {
        let mut cells: BTreeMap<String, BTreeMap<String, u64>> = BTreeMap::new();
        let mut columns: BTreeSet<String> = BTreeSet::new();
        for (row, col, count) in triples {
            let col = col.into();
            *cells.entry(row.into()).or_default().entry(col.clone()).or_default() += count;
            columns.insert(col);
        }
        let columns: Vec<String> = columns.into_iter().collect();

        let mut rows: Vec<(String, u64, Vec<u64>)> = cells
            .into_iter()
            .map(|(row, by_col)| {
                let counts: Vec<u64> = columns
                    .iter()
                    .map(|c| by_col.get(c).copied().unwrap_or(0))
                    .collect();
                let total = counts.iter().sum();
                (row, total, counts)
            })
            .collect();
        // BTreeMap iteration already sorted labels; a stable sort keeps that for ties.
        rows.sort_by(|a, b| b.1.cmp(&a.1));

        let mut tab = CrossTab {
            rows: Vec::with_capacity(rows.len()),
            columns,
            counts: Vec::with_capacity(rows.len()),
            row_totals: Vec::with_capacity(rows.len()),
        };
        for (row, total, counts) in rows {
            tab.rows.push(row);
            tab.row_totals.push(total);
            tab.counts.push(counts);
        }
        tab
    }

    /// Count for a (row, column) pair, 0 when absent.
    pub fn get(&self, row: &str, column: &str) -> u64 {
        let Some(i) = self.rows.iter().position(|r| r == row) else {
            return 0;
        };
        let Some(j) = self.columns.iter().position(|c| c == column) else {
            return 0;
        };
        self.counts[i][j]
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Count rows per (`row_key`, `col_key`) pair and pivot.
///
/// Rows with a null value in either key are not counted.
pub fn grouped_cross_tab<R: Categorical>(
    rows: &[R],
    row_key: R::Column,
    col_key: R::Column,
) -> CrossTab {
    let triples = rows.iter().filter_map(|row| {
        let r = row.category(row_key)?;
        let c = row.category(col_key)?;
        Some((r, c, 1u64))
    });
    let tab = CrossTab::from_counts(triples);
    log::info!(
        "[JFS] categories: cross tab with {} rows x {} columns",
        tab.rows.len(),
        tab.columns.len()
    );
    tab
}
