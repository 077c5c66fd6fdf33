//! Accident log charts backed by the SQLite store.

use crate::write_json;
use jfs_core::config::DashboardConfig;
use jfs_db::models::{DatedCount, GroupedCount, ShareCount};
use jfs_db::{AccidentGrouping, Database};
use serde::Serialize;
use std::io::Write;

/// Data for every accident chart.
#[derive(Debug, Serialize)]
pub struct AccidentReportSet {
    pub total: i64,
    pub skipped_issues: usize,
    pub grouping: String,
    pub grouped: Vec<GroupedCount>,
    pub trend: Vec<DatedCount>,
    pub technical_error_share: Vec<ShareCount>,
}

pub fn build_report(
    csv_data: &[u8],
    config: &DashboardConfig,
    grouping: AccidentGrouping,
) -> anyhow::Result<AccidentReportSet> {
    let db = Database::new()?;
    let issues = db.load_accidents(csv_data, config.accident_delimiter)?;
    Ok(AccidentReportSet {
        total: db.query_accident_count()?,
        skipped_issues: issues.len(),
        grouping: grouping.to_string(),
        grouped: db.query_grouped_counts(grouping, Some(config.top_n))?,
        trend: db.query_accident_trend()?,
        technical_error_share: db.query_technical_error_share()?,
    })
}

pub fn run_accidents(
    csv_data: &[u8],
    config: &DashboardConfig,
    grouping: AccidentGrouping,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let report = build_report(csv_data, config, grouping)?;
    write_json(out, &report)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
report_date;category;fatal;human_error
2021-03-14;Landing;No;Yes
2021-04-02;Equipment;Yes;No
2021-04-02;Landing;No;No
pending;Canopy Collision;Yes;
";

    #[test]
    fn report_covers_every_chart() {
        let report =
            build_report(SAMPLE.as_bytes(), &DashboardConfig::default(), AccidentGrouping::Category).unwrap();
        assert_eq!(report.total, 4);
        assert_eq!(report.skipped_issues, 1);
        assert_eq!(report.grouping, "category");
        let landing: i64 = report
            .grouped
            .iter()
            .filter(|g| g.label == "Landing")
            .map(|g| g.count)
            .sum();
        assert_eq!(landing, 2);
        assert_eq!(report.trend.iter().map(|d| d.count).sum::<i64>(), 3);
        assert_eq!(report.technical_error_share.len(), 2);
    }

    #[test]
    fn top_n_from_config() {
        let mut config = DashboardConfig::default();
        config.top_n = 1;
        let report = build_report(SAMPLE.as_bytes(), &config, AccidentGrouping::Category).unwrap();
        let labels: Vec<&str> = report.grouped.iter().map(|g| g.label.as_str()).collect();
        assert!(labels.contains(&"Landing"));
        assert!(labels.contains(&"Other"));
        assert!(!labels.contains(&"Equipment"));
    }

    #[test]
    fn writes_json() {
        let mut buf = Vec::new();
        run_accidents(SAMPLE.as_bytes(), &DashboardConfig::default(), AccidentGrouping::Fatal, &mut buf).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(json["grouping"], "fatal");
        assert_eq!(json["total"], 4);
    }
}
