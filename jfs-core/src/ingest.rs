//! Shared plumbing for the header-driven CSV loaders.

use crate::error::IngestionError;
use csv::{ReaderBuilder, StringRecord};
use std::collections::HashMap;

/// Records parsed from one file plus everything that went wrong on the way.
#[derive(Debug, Clone)]
pub struct LoadReport<T> {
    pub records: Vec<T>,
    pub issues: Vec<IngestionError>,
}

impl<T> LoadReport<T> {
    pub fn skipped_rows(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| matches!(i, IngestionError::MalformedRow { .. }))
            .count()
    }
}

/// Header name to column position lookup.
///
/// Header names are trimmed; a BOM on the first header is ignored.
#[derive(Debug, Clone, Default)]
pub struct ColumnMap {
    positions: HashMap<String, usize>,
}

impl ColumnMap {
    pub fn from_headers(headers: &StringRecord) -> Self {
        let positions = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.trim().trim_start_matches('\u{feff}').to_string(), i))
            .collect();
        Self { positions }
    }

    pub fn contains(&self, column: &str) -> bool {
        self.positions.contains_key(column)
    }

    /// Cell for `column`, or `None` if the header is absent or the row is short.
    pub fn get<'r>(&self, record: &'r StringRecord, column: &str) -> Option<&'r str> {
        self.positions.get(column).and_then(|&i| record.get(i))
    }

    /// Report each of `columns` missing from the header.
    pub fn missing(&self, columns: &[&'static str]) -> Vec<IngestionError> {
        columns
            .iter()
            .filter(|c| !self.contains(c))
            .map(|c| IngestionError::MissingColumn { column: *c })
            .collect()
    }
}

/// Read a delimited table, handing each good row to `parse_row`.
///
/// `data` is raw bytes so that a row which is not valid UTF-8 costs only
/// that row. Rows the reader cannot decode are recorded as `MalformedRow`
/// and skipped; `parse_row` pushes its own field-level issues.
pub fn read_table<D, T, F>(
    data: &D,
    delimiter: u8,
    expected_columns: &[&'static str],
    mut parse_row: F,
) -> LoadReport<T>
where
    D: AsRef<[u8]> + ?Sized,
    F: FnMut(&ColumnMap, &StringRecord, u64, &mut Vec<IngestionError>) -> Option<T>,
{
    let mut rdr = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(data.as_ref());

    let mut issues = Vec::new();
    let columns = match rdr.headers() {
        Ok(headers) => ColumnMap::from_headers(headers),
        Err(e) => {
            issues.push(IngestionError::MalformedRow {
                line: 1,
                message: e.to_string(),
            });
            return LoadReport {
                records: Vec::new(),
                issues,
            };
        }
    };
    issues.extend(columns.missing(expected_columns));

    let mut records = Vec::new();
    for result in rdr.records() {
        match result {
            Ok(record) => {
                let line = record.position().map(|p| p.line()).unwrap_or_default();
                if record.iter().all(|cell| cell.trim().is_empty()) {
                    continue;
                }
                if let Some(parsed) = parse_row(&columns, &record, line, &mut issues) {
                    records.push(parsed);
                }
            }
            Err(e) => {
                let line = e.position().map(|p| p.line()).unwrap_or_default();
                issues.push(IngestionError::MalformedRow {
                    line,
                    message: e.to_string(),
                });
            }
        }
    }

    for issue in &issues {
        log::warn!("[JFS] ingest: {}", issue);
    }
    LoadReport { records, issues }
}
