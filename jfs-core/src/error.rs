//! Ingestion error taxonomy.
//!
//! None of these abort a load. They are collected alongside the parsed
//! records so callers can log or display them.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum IngestionError {
    /// The row could not be read at all (bad quoting, invalid UTF-8) and was skipped.
    MalformedRow { line: u64, message: String },
    /// A cell could not be converted; the field was nulled or marked unparseable.
    UnparseableField {
        line: u64,
        column: &'static str,
        value: String,
    },
    /// An expected header is absent; every row gets the field's empty value.
    MissingColumn { column: &'static str },
}

impl fmt::Display for IngestionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IngestionError::MalformedRow { line, message } => {
                write!(f, "line {}: malformed row skipped: {}", line, message)
            }
            IngestionError::UnparseableField {
                line,
                column,
                value,
            } => write!(f, "line {}: could not parse {} from {:?}", line, column, value),
            IngestionError::MissingColumn { column } => {
                write!(f, "missing column {:?}", column)
            }
        }
    }
}

impl std::error::Error for IngestionError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let e = IngestionError::UnparseableField {
            line: 7,
            column: "age",
            value: "old".to_string(),
        };
        assert_eq!(e.to_string(), "line 7: could not parse age from \"old\"");
        let e = IngestionError::MissingColumn { column: "name" };
        assert_eq!(e.to_string(), "missing column \"name\"");
    }
}
