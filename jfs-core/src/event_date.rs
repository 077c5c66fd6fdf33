use chrono::{Datelike, NaiveDate};
use jfs_utils::dates::{format_date, parse_flexible_date};
use serde::{Serialize, Serializer};
use std::fmt;

/// Date of an incident or report.
///
/// Exports mix several date layouts and contain typos; anything that does
/// not parse becomes `Unparseable` instead of failing the load.
#[derive(Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Copy, Clone)]
pub enum EventDate {
    Known(NaiveDate),
    Unparseable,
}

impl EventDate {
    /// Parse a raw cell. Empty cells are `Unparseable` too.
    pub fn parse(raw: &str) -> EventDate {
        match parse_flexible_date(raw) {
            Some(date) => EventDate::Known(date),
            None => EventDate::Unparseable,
        }
    }

    pub fn known(&self) -> Option<NaiveDate> {
        match self {
            EventDate::Known(date) => Some(*date),
            EventDate::Unparseable => None,
        }
    }

    pub fn year(&self) -> Option<i32> {
        self.known().map(|d| d.year())
    }

    pub fn is_known(&self) -> bool {
        matches!(self, EventDate::Known(_))
    }
}

impl fmt::Display for EventDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventDate::Known(date) => write!(f, "{}", format_date(date)),
            EventDate::Unparseable => write!(f, "unparseable"),
        }
    }
}

/// Serialized as "YYYY-MM-DD" or `null`.
impl Serialize for EventDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            EventDate::Known(date) => serializer.serialize_str(&format_date(date)),
            EventDate::Unparseable => serializer.serialize_none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_dates() {
        let d = EventDate::parse("2016-08-20");
        assert_eq!(d, EventDate::Known(NaiveDate::from_ymd_opt(2016, 8, 20).unwrap()));
        assert_eq!(d.year(), Some(2016));
        assert_eq!(d.to_string(), "2016-08-20");
    }

    #[test]
    fn marks_bad_dates_unparseable() {
        assert_eq!(EventDate::parse("summer 2016"), EventDate::Unparseable);
        assert_eq!(EventDate::parse(""), EventDate::Unparseable);
        assert!(!EventDate::Unparseable.is_known());
        assert_eq!(EventDate::Unparseable.year(), None);
    }

    #[test]
    fn unparseable_sorts_after_known() {
        let known = EventDate::parse("1990-01-01");
        assert!(known < EventDate::Unparseable);
    }
}
