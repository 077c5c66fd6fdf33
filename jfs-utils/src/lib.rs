//! Shared parsing helpers for JFS crates.

/// Date utility functions
pub mod dates {
    use chrono::{NaiveDate, NaiveDateTime};

    /// Date-only layouts seen in the incident and accident exports, tried in order.
    const DATE_FORMATS: [&str; 6] = [
        "%Y-%m-%d",
        "%Y/%m/%d",
        "%m/%d/%Y",
        "%d.%m.%Y",
        "%B %d, %Y",
        "%d %B %Y",
    ];

    /// Date-time layouts; only the date part is kept.
    const DATE_TIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

    /// Format a NaiveDate as "YYYY-MM-DD"
    pub fn format_date(date: &NaiveDate) -> String {
        date.format("%Y-%m-%d").to_string()
    }

    /// Parse a date in any of the known export layouts.
    ///
    /// Returns `None` for empty or unrecognised input; callers decide how
    /// to mark the field.
    pub fn parse_flexible_date(s: &str) -> Option<NaiveDate> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }
        DATE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
            .or_else(|| {
                DATE_TIME_FORMATS
                    .iter()
                    .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                    .map(|dt| dt.date())
            })
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use chrono::NaiveDate;

        #[test]
        fn test_format_and_parse() {
            let date = NaiveDate::from_ymd_opt(2023, 6, 15).unwrap();
            let formatted = format_date(&date);
            assert_eq!(formatted, "2023-06-15");
            assert_eq!(parse_flexible_date(&formatted), Some(date));
        }

        #[test]
        fn test_parse_flexible_date_layouts() {
            let expected = NaiveDate::from_ymd_opt(2019, 7, 4).unwrap();
            assert_eq!(parse_flexible_date("2019-07-04"), Some(expected));
            assert_eq!(parse_flexible_date("2019/07/04"), Some(expected));
            assert_eq!(parse_flexible_date("07/04/2019"), Some(expected));
            assert_eq!(parse_flexible_date("04.07.2019"), Some(expected));
            assert_eq!(parse_flexible_date("July 4, 2019"), Some(expected));
            assert_eq!(parse_flexible_date("2019-07-04 13:45:00"), Some(expected));
            assert_eq!(parse_flexible_date("  2019-07-04 "), Some(expected));
        }

        #[test]
        fn test_parse_flexible_date_rejects_garbage() {
            assert_eq!(parse_flexible_date(""), None);
            assert_eq!(parse_flexible_date("unknown"), None);
            assert_eq!(parse_flexible_date("2019-13-01"), None);
        }
    }
}

/// Lenient cell parsing for hand-maintained spreadsheets.
pub mod cells {
    /// Placeholder spellings treated as an empty cell.
    pub fn is_null_marker(s: &str) -> bool {
        matches!(
            s.trim().to_lowercase().as_str(),
            "" | "null" | "nan" | "n/a" | "na" | "none" | "-"
        )
    }

    /// Trim a cell, mapping null markers to `None`.
    pub fn non_empty(s: &str) -> Option<String> {
        if is_null_marker(s) {
            None
        } else {
            Some(s.trim().to_string())
        }
    }

    /// Parse a non-negative count.
    ///
    /// Accepts integral floats ("12.0") since spreadsheet exports often
    /// write counts that way. Returns `Err(())` when the cell holds
    /// something that is neither a null marker nor a count.
    pub fn parse_count(s: &str) -> Result<Option<u32>, ()> {
        if is_null_marker(s) {
            return Ok(None);
        }
        let s = s.trim();
        if let Ok(v) = s.parse::<u32>() {
            return Ok(Some(v));
        }
        match s.parse::<f64>() {
            Ok(v) if v >= 0.0 && v.fract() == 0.0 && v <= u32::MAX as f64 => Ok(Some(v as u32)),
            _ => Err(()),
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn null_markers() {
            assert!(is_null_marker(""));
            assert!(is_null_marker("  NaN "));
            assert!(is_null_marker("N/A"));
            assert!(!is_null_marker("0"));
        }

        #[test]
        fn non_empty_trims() {
            assert_eq!(non_empty("  Norway "), Some("Norway".to_string()));
            assert_eq!(non_empty("null"), None);
        }

        #[test]
        fn parse_count_variants() {
            assert_eq!(parse_count("42"), Ok(Some(42)));
            assert_eq!(parse_count("42.0"), Ok(Some(42)));
            assert_eq!(parse_count(""), Ok(None));
            assert_eq!(parse_count("na"), Ok(None));
            assert_eq!(parse_count("-3"), Err(()));
            assert_eq!(parse_count("2.5"), Err(()));
            assert_eq!(parse_count("lots"), Err(()));
        }
    }
}
