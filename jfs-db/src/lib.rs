//! In-memory SQLite store for the association accident log.
//!
//! Accident reports are parsed by `jfs-core` and inserted into a single
//! `accidents` table. Every accident chart is a `GROUP BY` over that
//! table; see [`queries`] for the typed query methods.
//!
//! # Usage
//!
//! ```rust
//! use jfs_db::{AccidentGrouping, Database};
//!
//! let db = Database::new().unwrap();
//! db.load_accidents("report_date;category;fatal;human_error\n2021-03-14;Landing;No;Yes\n", b';')
//!     .unwrap();
//!
//! let counts = db.query_grouped_counts(AccidentGrouping::Category, Some(5)).unwrap();
//! assert_eq!(counts[0].label, "Landing");
//! ```

pub mod schema;
mod loader;
mod queries;
pub mod models;

pub use queries::AccidentGrouping;

use rusqlite::Connection;
use std::cell::RefCell;
use std::rc::Rc;

/// In-memory SQLite database holding the accident log.
///
/// Cheaply cloneable; clones share the same connection.
#[derive(Clone)]
pub struct Database {
    conn: Rc<RefCell<Connection>>,
}

impl Database {
    /// Create an empty in-memory database with the schema applied.
    pub fn new() -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(schema::create_schema())?;
        Ok(Self {
            conn: Rc::new(RefCell::new(conn)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_creates_successfully() {
        let db = Database::new();
        assert!(db.is_ok(), "Database should create without errors");
    }

    #[test]
    fn database_is_cloneable() {
        let db = Database::new().unwrap();
        let db2 = db.clone();
        db.load_accidents(
            "report_date;category;fatal;human_error\n2021-03-14;Landing;No;Yes\n",
            b';',
        )
        .unwrap();
        assert_eq!(
            db2.query_accident_count().unwrap(),
            1,
            "Clone should see same data via shared Rc"
        );
    }

    #[test]
    fn database_starts_empty() {
        let db = Database::new().unwrap();
        assert_eq!(db.query_accident_count().unwrap(), 0);
    }
}
