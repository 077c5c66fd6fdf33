//! Incident table queries: factors, counts, cross-tabs, histogram, scatter.

use crate::write_json;
use jfs_core::incident::IncidentColumn;
use jfs_core::numeric_column::NumericColumn;
use jfs_data::categories::{category_counts, grouped_cross_tab, top_n_with_other, CrossTab};
use jfs_data::context::DataContext;
use jfs_data::regression::{scatter, ScatterOutcome};
use jfs_data::summary::histogram;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct FactorListing<'a> {
    factor: &'a str,
    incidents: usize,
}

/// Every factor with the number of browsable incidents it has.
pub fn run_factors(ctx: &DataContext, out: &mut dyn Write) -> anyhow::Result<()> {
    let listing: Vec<FactorListing> = ctx
        .factors()
        .iter()
        .map(|f| FactorListing {
            factor: f,
            incidents: ctx.incident_subset(f).len(),
        })
        .collect();
    write_json(out, &listing)
}

pub fn run_counts(
    ctx: &DataContext,
    column: IncidentColumn,
    collapse: bool,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let top_n = ctx.config().top_n;
    let counts = match (column, collapse) {
        (IncidentColumn::PossibleFactors, false) => category_counts(ctx.exploded(), column),
        (IncidentColumn::PossibleFactors, true) => {
            category_counts(&top_n_with_other(ctx.exploded(), column, top_n), column)
        }
        (_, false) => category_counts(ctx.incidents(), column),
        (_, true) => category_counts(&top_n_with_other(ctx.incidents(), column, top_n), column),
    };
    write_json(out, &counts)
}

/// Pivot `rows` against `columns`. Factor columns are read from the
/// exploded table so each factor counts once per incident.
pub fn cross_tab(
    ctx: &DataContext,
    rows: IncidentColumn,
    columns: IncidentColumn,
    collapse: bool,
) -> CrossTab {
    let exploded = rows == IncidentColumn::PossibleFactors || columns == IncidentColumn::PossibleFactors;
    let top_n = ctx.config().top_n;
    match (exploded, collapse) {
        (true, true) => {
            grouped_cross_tab(&top_n_with_other(ctx.exploded(), columns, top_n), rows, columns)
        }
        (true, false) => grouped_cross_tab(ctx.exploded(), rows, columns),
        (false, true) => {
            grouped_cross_tab(&top_n_with_other(ctx.incidents(), columns, top_n), rows, columns)
        }
        (false, false) => grouped_cross_tab(ctx.incidents(), rows, columns),
    }
}

pub fn run_cross_tab(
    ctx: &DataContext,
    rows: IncidentColumn,
    columns: IncidentColumn,
    collapse: bool,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    write_json(out, &cross_tab(ctx, rows, columns, collapse))
}

pub fn run_histogram(
    ctx: &DataContext,
    column: NumericColumn,
    bins: Option<usize>,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let bins = bins.unwrap_or(ctx.config().histogram_bins);
    write_json(out, &histogram(ctx.incidents(), column, bins))
}

#[derive(Serialize)]
struct ScatterReport<'a> {
    title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    annotation: Option<String>,
    outcome: &'a ScatterOutcome,
}

pub fn run_scatter(
    ctx: &DataContext,
    columns: &[NumericColumn],
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let outcome = scatter(ctx.incidents(), columns, ctx.config());
    let annotation = match &outcome {
        ScatterOutcome::Fit(fit) => Some(fit.stats_text()),
        _ => None,
    };
    let report = ScatterReport {
        title: outcome.title(),
        annotation,
        outcome: &outcome,
    };
    write_json(out, &report)
}
