//! Prepared, read-only tables shared by every query and browsing session.

use crate::factors::{distinct_factors, explode_factors, ExplodedIncident};
use jfs_core::config::DashboardConfig;
use jfs_core::error::IngestionError;
use jfs_core::incident::Incident;
use std::collections::BTreeSet;

/// Everything derived from the incident table at startup.
///
/// Built once and only lent out by reference afterwards; nothing in here
/// changes for the lifetime of the process.
#[derive(Debug, Clone)]
pub struct DataContext {
    config: DashboardConfig,
    incidents: Vec<Incident>,
    exploded: Vec<ExplodedIncident>,
    factors: BTreeSet<String>,
}

impl DataContext {
    /// Derive the exploded table and factor list from parsed incidents.
    pub fn prepare(incidents: Vec<Incident>, config: DashboardConfig) -> Self {
        let exploded = explode_factors(&incidents, &config.factor_delimiter);
        let factors = distinct_factors(&exploded);
        log::info!(
            "[JFS] context: prepared {} incidents, {} factor rows, {} factors",
            incidents.len(),
            exploded.len(),
            factors.len()
        );
        Self {
            config,
            incidents,
            exploded,
            factors,
        }
    }

    /// Parse an incident export and prepare it; ingestion issues are handed back.
    pub fn from_incident_csv<D>(csv_object: &D, config: DashboardConfig) -> (Self, Vec<IngestionError>)
    where
        D: AsRef<[u8]> + ?Sized,
    {
        let report = Incident::parse_incident_csv(csv_object, config.incident_delimiter);
        (Self::prepare(report.records, config), report.issues)
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn incidents(&self) -> &[Incident] {
        &self.incidents
    }

    pub fn exploded(&self) -> &[ExplodedIncident] {
        &self.exploded
    }

    /// Sorted factor names for the selection control.
    pub fn factors(&self) -> &BTreeSet<String> {
        &self.factors
    }

    /// Exploded rows tagged with `factor` that have a narrative, in source order.
    ///
    /// Computed on every call.
    pub fn incident_subset(&self, factor: &str) -> Vec<&ExplodedIncident> {
        self.exploded
            .iter()
            .filter(|e| e.factor() == factor && !e.incident.description.is_empty())
            .collect()
    }
}
