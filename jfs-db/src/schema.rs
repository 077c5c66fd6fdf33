//! SQL schema for the in-memory accident store.

/// Returns the full SQL schema as a single batch string.
///
/// `report_date` is `NULL` for reports whose date could not be parsed.
/// `technical_error` holds "Yes" when the report says human error was
/// "No", and "No" otherwise.
pub fn create_schema() -> &'static str {
    r#"
    CREATE TABLE IF NOT EXISTS accidents (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        report_date TEXT,
        category TEXT,
        fatal TEXT,
        human_error TEXT,
        technical_error TEXT NOT NULL CHECK (technical_error IN ('Yes', 'No'))
    );
    CREATE INDEX IF NOT EXISTS idx_accidents_date ON accidents(report_date);
    CREATE INDEX IF NOT EXISTS idx_accidents_category ON accidents(category);
    "#
}
