//! Core record types and CSV ingestion for the JFS toolkit.
//!
//! Two datasets feed the toolkit:
//! - the BASE Fatality List (comma-separated), parsed into [`incident::Incident`]
//! - the association accident log (semicolon-separated), parsed into
//!   [`accident::AccidentReport`]
//!
//! Both loaders are best-effort: a bad cell is nulled, a bad row is skipped,
//! and every such event is reported as an [`error::IngestionError`] in the
//! returned [`ingest::LoadReport`].

pub mod accident;
pub mod config;
pub mod error;
pub mod event_date;
pub mod incident;
pub mod ingest;
pub mod numeric_column;
