//! Tunable constants for data preparation and chart queries.

use serde::Serialize;

/// Separator between factor names inside `possible_factors`.
pub const FACTOR_DELIMITER: &str = ", ";

/// Number of most frequent categories kept before collapsing into [`OTHER_CATEGORY`].
pub const TOP_N_CATEGORIES: usize = 5;

/// Bucket label for collapsed categories.
pub const OTHER_CATEGORY: &str = "Other";

/// Field delimiter of the BASE Fatality List export.
pub const INCIDENT_CSV_DELIMITER: u8 = b',';

/// Field delimiter of the accident log export.
pub const ACCIDENT_CSV_DELIMITER: u8 = b';';

/// Factor selected when a browsing session starts.
pub const DEFAULT_FACTOR: &str = "Canopy Entanglement";

/// Bin count for numeric histograms.
pub const HISTOGRAM_BINS: usize = 30;

/// Minimum paired observations before a regression is reported.
pub const MIN_REGRESSION_ROWS: usize = 10;

/// Confidence level of the slope interval.
pub const CONFIDENCE_LEVEL: f64 = 0.95;

/// Runtime configuration, defaulting to the constants above.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardConfig {
    pub factor_delimiter: String,
    pub top_n: usize,
    pub incident_delimiter: u8,
    pub accident_delimiter: u8,
    pub default_factor: String,
    pub histogram_bins: usize,
    pub min_regression_rows: usize,
    pub confidence_level: f64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            factor_delimiter: FACTOR_DELIMITER.to_string(),
            top_n: TOP_N_CATEGORIES,
            incident_delimiter: INCIDENT_CSV_DELIMITER,
            accident_delimiter: ACCIDENT_CSV_DELIMITER,
            default_factor: DEFAULT_FACTOR.to_string(),
            histogram_bins: HISTOGRAM_BINS,
            min_regression_rows: MIN_REGRESSION_ROWS,
            confidence_level: CONFIDENCE_LEVEL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_constants() {
        let config = DashboardConfig::default();
        assert_eq!(config.factor_delimiter, ", ");
        assert_eq!(config.top_n, 5);
        assert_eq!(config.incident_delimiter, b',');
        assert_eq!(config.accident_delimiter, b';');
        assert_eq!(config.default_factor, "Canopy Entanglement");
    }
}
