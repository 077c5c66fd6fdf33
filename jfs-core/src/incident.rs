use crate::error::IngestionError;
use crate::event_date::EventDate;
use crate::ingest::{read_table, ColumnMap, LoadReport};
use crate::numeric_column::NumericColumn;
use csv::StringRecord;
use jfs_utils::cells::{non_empty, parse_count};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Headers every BASE Fatality List export is expected to carry.
pub const INCIDENT_COLUMNS: [&str; 12] = [
    "date",
    "age",
    "country",
    "cause_of_death",
    "possible_factors",
    "description",
    "name",
    "skydives",
    "WS_skydives",
    "base_jumps",
    "WS_base_jumps",
    "base_seasons",
];

/// Experience counters recorded for the jumper.
#[derive(Debug, Default, PartialEq, Clone, Serialize)]
pub struct Experience {
    pub skydives: Option<u32>,
    pub ws_skydives: Option<u32>,
    pub base_jumps: Option<u32>,
    pub ws_base_jumps: Option<u32>,
    pub base_seasons: Option<u32>,
}

/// One fatality from the BASE Fatality List.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct Incident {
    pub date: EventDate,
    pub age: Option<u32>,
    /// Country or site; read from `country`, falling back to `location`.
    pub location: Option<String>,
    pub cause_of_death: Option<String>,
    /// Factor names joined by the configured delimiter, e.g.
    /// "Canopy Entanglement, Low Altitude Cutaway".
    pub possible_factors: Option<String>,
    /// Free-text narrative; empty when the export has none.
    pub description: String,
    pub name: String,
    pub experience: Experience,
}

/// Categorical incident columns usable as grouping keys.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Serialize)]
pub enum IncidentColumn {
    Location,
    CauseOfDeath,
    PossibleFactors,
}

impl IncidentColumn {
    pub fn as_str(&self) -> &'static str {
        match self {
            IncidentColumn::Location => "location",
            IncidentColumn::CauseOfDeath => "cause_of_death",
            IncidentColumn::PossibleFactors => "possible_factors",
        }
    }
}

impl fmt::Display for IncidentColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IncidentColumn {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "location" | "country" => Ok(IncidentColumn::Location),
            "cause_of_death" | "cause" => Ok(IncidentColumn::CauseOfDeath),
            "possible_factors" | "factor" | "factors" => Ok(IncidentColumn::PossibleFactors),
            other => Err(format!(
                "unknown incident column {:?} (expected location, cause_of_death or possible_factors)",
                other
            )),
        }
    }
}

impl Incident {
    /// Value of a numeric column as a float, for statistics.
    pub fn numeric(&self, column: NumericColumn) -> Option<f64> {
        let value = match column {
            NumericColumn::Skydives => self.experience.skydives,
            NumericColumn::WsSkydives => self.experience.ws_skydives,
            NumericColumn::BaseJumps => self.experience.base_jumps,
            NumericColumn::WsBaseJumps => self.experience.ws_base_jumps,
            NumericColumn::BaseSeasons => self.experience.base_seasons,
            NumericColumn::Age => self.age,
        };
        value.map(f64::from)
    }

    pub fn category(&self, column: IncidentColumn) -> Option<&str> {
        match column {
            IncidentColumn::Location => self.location.as_deref(),
            IncidentColumn::CauseOfDeath => self.cause_of_death.as_deref(),
            IncidentColumn::PossibleFactors => self.possible_factors.as_deref(),
        }
    }

    pub fn set_category(&mut self, column: IncidentColumn, value: Option<String>) {
        match column {
            IncidentColumn::Location => self.location = value,
            IncidentColumn::CauseOfDeath => self.cause_of_death = value,
            IncidentColumn::PossibleFactors => self.possible_factors = value,
        }
    }

    /// Parse a BASE Fatality List export.
    ///
    /// Columns are matched by header name, so column order does not matter.
    /// Unparseable dates become [`EventDate::Unparseable`], unparseable
    /// counters become `None`; both are reported in the returned issues.
    pub fn parse_incident_csv<D>(csv_object: &D, delimiter: u8) -> LoadReport<Incident>
    where
        D: AsRef<[u8]> + ?Sized,
    {
        let report = read_table(csv_object, delimiter, &INCIDENT_COLUMNS, Incident::from_row);
        log::info!(
            "[JFS] loader: Loaded {} incidents, {} issues",
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
    ) -> Option<Incident> {
        let cell = |name: &str| columns.get(record, name).unwrap_or("");

        let raw_date = cell("date");
        let date = EventDate::parse(raw_date);
        if !date.is_known() {
            issues.push(IngestionError::UnparseableField {
                line,
                column: "date",
                value: raw_date.to_string(),
            });
        }

        let mut count = |column: &'static str| match parse_count(cell(column)) {
            Ok(v) => v,
            Err(()) => {
                issues.push(IngestionError::UnparseableField {
                    line,
                    column,
                    value: cell(column).to_string(),
                });
                None
            }
        };

        let age = count("age");
        let experience = Experience {
            skydives: count("skydives"),
            ws_skydives: count("WS_skydives"),
            base_jumps: count("base_jumps"),
            ws_base_jumps: count("WS_base_jumps"),
            base_seasons: count("base_seasons"),
        };

        let location = columns
            .get(record, "country")
            .and_then(non_empty)
            .or_else(|| columns.get(record, "location").and_then(non_empty));

        Some(Incident {
            date,
            age,
            location,
            cause_of_death: non_empty(cell("cause_of_death")),
            possible_factors: non_empty(cell("possible_factors")),
            description: cell("description").trim().to_string(),
            name: cell("name").trim().to_string(),
            experience,
        })
    }
}
