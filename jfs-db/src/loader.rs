//! Loading the accident log export into the `accidents` table.
//!
//! Parsing is delegated to [`AccidentReport::parse_accident_csv`]; rows it
//! drops never reach the database, and its issues are handed back to the
//! caller.

use crate::Database;
use jfs_core::accident::AccidentReport;
use jfs_core::error::IngestionError;
use jfs_utils::dates::format_date;
use rusqlite::params;

impl Database {
    /// Load an accident log export.
    ///
    /// Expected headers: `report_date`, `category`, `fatal`, `human_error`
    /// (extra columns are ignored).
    ///
    /// # Example CSV
    /// ```text
    /// report_date;category;fatal;human_error
    /// 2021-03-14;Landing;No;Yes
    /// ```
    pub fn load_accidents<D>(
        &self,
        csv_data: &D,
        delimiter: u8,
    ) -> anyhow::Result<Vec<IngestionError>>
    where
        D: AsRef<[u8]> + ?Sized,
    {
        let report = AccidentReport::parse_accident_csv(csv_data, delimiter);
        self.insert_accidents(&report.records)?;
        Ok(report.issues)
    }

    /// Insert already parsed reports.
    pub fn insert_accidents(&self, reports: &[AccidentReport]) -> anyhow::Result<()> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(
            "INSERT INTO accidents (report_date, category, fatal, human_error, technical_error)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )?;
        for r in reports {
            let report_date = r.report_date.known().map(|d| format_date(&d));
            let technical_error = if r.technical_error_component() { "Yes" } else { "No" };
            stmt.execute(params![
                report_date,
                r.category,
                r.fatal,
                r.human_error,
                technical_error
            ])?;
        }
        log::info!("[JFS] loader: Inserted {} accident reports", reports.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::Database;

    const SAMPLE: &str = "\
report_date;category;fatal;human_error
2021-03-14;Landing;No;Yes
2021-04-02;Equipment;Yes;No
pending;Canopy Collision;Yes;
";

    #[test]
    fn load_accidents_from_csv() {
        let db = Database::new().unwrap();
        let issues = db.load_accidents(SAMPLE, b';').unwrap();
        assert_eq!(issues.len(), 1, "unparseable date is reported");

        let conn = db.conn.borrow();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM accidents", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 3);

        let technical: String = conn
            .query_row(
                "SELECT technical_error FROM accidents WHERE category = 'Equipment'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(technical, "Yes");
    }

    #[test]
    fn unparseable_date_is_stored_as_null() {
        let db = Database::new().unwrap();
        db.load_accidents(SAMPLE, b';').unwrap();

        let conn = db.conn.borrow();
        let date: Option<String> = conn
            .query_row(
                "SELECT report_date FROM accidents WHERE category = 'Canopy Collision'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert!(date.is_none());

        let human_error: Option<String> = conn
            .query_row(
                "SELECT human_error FROM accidents WHERE category = 'Canopy Collision'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert!(human_error.is_none());
    }

    #[test]
    fn wrong_delimiter_reports_missing_columns() {
        let db = Database::new().unwrap();
        let issues = db.load_accidents(SAMPLE, b',').unwrap();
        assert!(!issues.is_empty());
    }

    #[test]
    fn report_dates_are_stored_as_iso() {
        let db = Database::new().unwrap();
        db.load_accidents(
            "report_date;category;fatal;human_error\n14.03.2021;Landing;No;Yes\nApril 2, 2021;Equipment;Yes;No\n",
            b';',
        )
        .unwrap();

        let conn = db.conn.borrow();
        let mut stmt = conn
            .prepare("SELECT report_date FROM accidents ORDER BY id")
            .unwrap();
        let dates: Vec<String> = stmt
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        assert_eq!(dates, vec!["2021-03-14", "2021-04-02"]);
    }
}
