use crate::error::IngestionError;
use crate::event_date::EventDate;
use crate::ingest::{read_table, ColumnMap, LoadReport};
use csv::StringRecord;
use jfs_utils::cells::non_empty;
use serde::Serialize;

/// Headers expected in the accident log export.
pub const ACCIDENT_COLUMNS: [&str; 4] = ["report_date", "category", "fatal", "human_error"];

/// One report from the association accident log.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct AccidentReport {
    pub report_date: EventDate,
    pub category: Option<String>,
    /// "Yes"/"No" as written in the export.
    pub fatal: Option<String>,
    /// "Yes"/"No" as written in the export.
    pub human_error: Option<String>,
}

impl AccidentReport {
    /// An accident counts as having a technical error component exactly
    /// when the export says human error was "No".
    pub fn technical_error_component(&self) -> bool {
        self.human_error.as_deref() == Some("No")
    }

    /// Parse a semicolon-separated accident log export.
    ///
    /// Report dates that do not parse are kept as [`EventDate::Unparseable`]
    /// (and reported), matching the best-effort policy of the incident loader.
    pub fn parse_accident_csv<D>(csv_object: &D, delimiter: u8) -> LoadReport<AccidentReport>
    where
        D: AsRef<[u8]> + ?Sized,
    {
        let report = read_table(csv_object, delimiter, &ACCIDENT_COLUMNS, AccidentReport::from_row);
        log::info!(
            "[JFS] loader: Loaded {} accident reports, {} issues",
            report.records.len(),
            report.issues.len()
        );
        report
    }

    fn from_row(
        columns: &ColumnMap,
        record: &StringRecord,
        line: u64,
        issues: &mut Vec<IngestionError>,
    ) -> Option<AccidentReport> {
        let cell = |name: &str| columns.get(record, name).unwrap_or("");

        let raw_date = cell("report_date");
        let report_date = EventDate::parse(raw_date);
        if !report_date.is_known() {
            issues.push(IngestionError::UnparseableField {
                line,
                column: "report_date",
                value: raw_date.to_string(),
            });
        }

        Some(AccidentReport {
            report_date,
            category: non_empty(cell("category")),
            fatal: non_empty(cell("fatal")),
            human_error: non_empty(cell("human_error")),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ACCIDENT_CSV_DELIMITER;

    const SAMPLE: &str = "\
report_date;category;fatal;human_error;summary
2021-03-14;Landing;No;Yes;Hard landing, broken ankle
2021-04-02;Equipment;Yes;No;Reserve failed to deploy
pending;Canopy Collision;Yes;;Two canopies collided
";

    #[test]
    fn test_parse_accident_csv() {
        let report = AccidentReport::parse_accident_csv(SAMPLE, ACCIDENT_CSV_DELIMITER);
        assert_eq!(report.records.len(), 3);
        assert_eq!(report.records[0].category.as_deref(), Some("Landing"));
        assert!(!report.records[0].technical_error_component());
        assert!(report.records[1].technical_error_component());
    }

    #[test]
    fn test_unparseable_report_date_is_kept() {
        let report = AccidentReport::parse_accident_csv(SAMPLE, ACCIDENT_CSV_DELIMITER);
        let third = &report.records[2];
        assert_eq!(third.report_date, EventDate::Unparseable);
        assert_eq!(third.human_error, None);
        // Missing human_error is not "No", so no technical component.
        assert!(!third.technical_error_component());
        assert_eq!(report.issues.len(), 1);
    }
}
