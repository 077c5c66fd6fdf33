//! Explosion of the multi-valued `possible_factors` field.

use jfs_core::incident::Incident;
use serde::Serialize;
use std::collections::BTreeSet;

/// One (incident, factor) pair.
///
/// `incident` is a copy of the source row whose `possible_factors` holds
/// only this pair's factor; every other field is unchanged.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct ExplodedIncident {
    /// Position of the source row in the incident table.
    pub source_row: usize,
    pub incident: Incident,
}

impl ExplodedIncident {
    pub fn factor(&self) -> &str {
        self.incident.possible_factors.as_deref().unwrap_or_default()
    }
}

/// Split a factor list, dropping empty pieces and repeats.
pub fn split_factors<'a>(raw: &'a str, delimiter: &str) -> Vec<&'a str> {
    let mut seen = BTreeSet::new();
    raw.split(delimiter)
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .filter(|f| seen.insert(*f))
        .collect()
}

/// One row per (incident, factor), in source order.
///
/// Incidents without factors contribute no rows; the input is not modified.
pub fn explode_factors(incidents: &[Incident], delimiter: &str) -> Vec<ExplodedIncident> {
    let mut exploded = Vec::new();
    for (source_row, incident) in incidents.iter().enumerate() {
        let Some(raw) = incident.possible_factors.as_deref() else {
            continue;
        };
        for factor in split_factors(raw, delimiter) {
            let mut copy = incident.clone();
            copy.possible_factors = Some(factor.to_string());
            exploded.push(ExplodedIncident {
                source_row,
                incident: copy,
            });
        }
    }
    log::info!(
        "[JFS] factors: exploded {} incidents into {} factor rows",
        incidents.len(),
        exploded.len()
    );
    exploded
}

/// Every factor name in the exploded table, sorted.
pub fn distinct_factors(exploded: &[ExplodedIncident]) -> BTreeSet<String> {
    exploded.iter().map(|e| e.factor().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use jfs_core::event_date::EventDate;
    use jfs_core::incident::Experience;

    fn incident(name: &str, factors: Option<&str>) -> Incident {
        Incident {
            date: EventDate::parse("2015-06-01"),
            age: Some(30),
            location: Some("Italy".to_string()),
            cause_of_death: Some("Impact".to_string()),
            possible_factors: factors.map(str::to_string),
            description: format!("{} narrative", name),
            name: name.to_string(),
            experience: Experience::default(),
        }
    }

    #[test]
    fn explode_three_factors_yields_three_rows() {
        let source = vec![incident("A", Some("A, B, C"))];
        let exploded = explode_factors(&source, ", ");
        assert_eq!(exploded.len(), 3);
        let factors: Vec<&str> = exploded.iter().map(|e| e.factor()).collect();
        assert_eq!(factors, vec!["A", "B", "C"]);
        for row in &exploded {
            let mut expected = source[0].clone();
            expected.possible_factors = Some(row.factor().to_string());
            assert_eq!(row.incident, expected);
            assert_eq!(row.source_row, 0);
        }
        // Source table untouched.
        assert_eq!(source[0].possible_factors.as_deref(), Some("A, B, C"));
    }

    #[test]
    fn explode_null_factors_yields_no_rows() {
        let source = vec![incident("A", None)];
        assert!(explode_factors(&source, ", ").is_empty());
    }

    #[test]
    fn explode_single_factor_yields_one_row() {
        let source = vec![incident("A", Some("Object Strike"))];
        let exploded = explode_factors(&source, ", ");
        assert_eq!(exploded.len(), 1);
        assert_eq!(exploded[0].factor(), "Object Strike");
    }

    #[test]
    fn explode_skips_empty_and_repeated_pieces() {
        let source = vec![incident("A", Some("Off Heading, , Off Heading, Low Pull"))];
        let exploded = explode_factors(&source, ", ");
        let factors: Vec<&str> = exploded.iter().map(|e| e.factor()).collect();
        assert_eq!(factors, vec!["Off Heading", "Low Pull"]);
    }

    #[test]
    fn explode_keeps_source_order() {
        let source = vec![
            incident("first", Some("X, Y")),
            incident("none", None),
            incident("second", Some("Y")),
        ];
        let exploded = explode_factors(&source, ", ");
        let rows: Vec<(usize, &str)> = exploded.iter().map(|e| (e.source_row, e.factor())).collect();
        assert_eq!(rows, vec![(0, "X"), (0, "Y"), (2, "Y")]);
    }

    #[test]
    fn explode_honours_custom_delimiter() {
        let source = vec![incident("A", Some("Wind|Night"))];
        let exploded = explode_factors(&source, "|");
        assert_eq!(exploded.len(), 2);
    }

    #[test]
    fn distinct_factors_sorted_and_unique() {
        let source = vec![
            incident("a", Some("Low Pull, Object Strike")),
            incident("b", Some("Canopy Entanglement, Low Pull")),
        ];
        let exploded = explode_factors(&source, ", ");
        let factors: Vec<String> = distinct_factors(&exploded).into_iter().collect();
        assert_eq!(factors, vec!["Canopy Entanglement", "Low Pull", "Object Strike"]);
    }
}
