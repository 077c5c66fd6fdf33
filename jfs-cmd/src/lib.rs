//! Command implementations for the JFS CLI.
//!
//! Each subcommand loads its input table, runs one query or browsing
//! session, and writes JSON to the given writer.

use anyhow::Context;
use clap::{Args, Subcommand};
use jfs_core::config::DashboardConfig;
use jfs_core::incident::IncidentColumn;
use jfs_core::numeric_column::NumericColumn;
use jfs_data::context::DataContext;
use jfs_db::AccidentGrouping;
use serde::Serialize;
use std::io::{BufRead, Write};

pub mod accidents;
pub mod browse;
pub mod incidents;

/// Where the incident table comes from and how to read it.
#[derive(Args, Debug, Clone)]
pub struct IncidentInput {
    /// Path to the BASE Fatality List CSV export
    #[arg(short = 'i', long)]
    pub incidents_csv: String,

    /// Field delimiter of the export
    #[arg(long)]
    pub delimiter: Option<char>,

    /// Separator between factor names inside possible_factors
    #[arg(long)]
    pub factor_delimiter: Option<String>,

    /// Number of categories kept before collapsing into "Other"
    #[arg(long)]
    pub top_n: Option<usize>,
}

impl IncidentInput {
    pub fn config(&self) -> anyhow::Result<DashboardConfig> {
        let mut config = DashboardConfig::default();
        if let Some(d) = self.delimiter {
            config.incident_delimiter = delimiter_byte(d)?;
        }
        if let Some(fd) = &self.factor_delimiter {
            config.factor_delimiter = fd.clone();
        }
        if let Some(n) = self.top_n {
            config.top_n = n;
        }
        Ok(config)
    }

    /// Read the export and build the shared context.
    pub fn load(&self) -> anyhow::Result<DataContext> {
        let config = self.config()?;
        let data = std::fs::read(&self.incidents_csv)
            .with_context(|| format!("reading incidents from {}", self.incidents_csv))?;
        let (ctx, issues) = DataContext::from_incident_csv(&data, config);
        if !issues.is_empty() {
            log::warn!(
                "[JFS] cmd: {} ingestion issues in {}",
                issues.len(),
                self.incidents_csv
            );
        }
        Ok(ctx)
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// List the contributing factors available for browsing
    Factors {
        #[command(flatten)]
        input: IncidentInput,
    },

    /// Count incidents per value of a categorical column
    Counts {
        #[command(flatten)]
        input: IncidentInput,

        /// location, cause_of_death or possible_factors
        #[arg(short = 'c', long)]
        column: IncidentColumn,

        /// Collapse values outside the top N into "Other"
        #[arg(long)]
        collapse: bool,
    },

    /// Page through incident narratives for one factor
    Browse {
        #[command(flatten)]
        input: IncidentInput,

        /// Factor to start on (defaults to the configured factor)
        #[arg(short = 'f', long)]
        factor: Option<String>,

        /// Scripted events, e.g. "next,next,prev,factor=Low Pull"; reads stdin when absent
        #[arg(short = 'e', long, value_delimiter = ',')]
        events: Vec<String>,
    },

    /// Pivot counts of one categorical column against another
    CrossTab {
        #[command(flatten)]
        input: IncidentInput,

        #[arg(long)]
        rows: IncidentColumn,

        #[arg(long)]
        columns: IncidentColumn,

        /// Collapse column values outside the top N into "Other"
        #[arg(long)]
        collapse: bool,
    },

    /// Distribution of a numeric column
    Histogram {
        #[command(flatten)]
        input: IncidentInput,

        /// skydives, WS_skydives, base_jumps, WS_base_jumps, base_seasons or age
        #[arg(short = 'c', long)]
        column: NumericColumn,

        #[arg(long)]
        bins: Option<usize>,
    },

    /// Linear regression of one numeric column on another
    Scatter {
        #[command(flatten)]
        input: IncidentInput,

        /// Exactly two numeric columns: x then y
        #[arg(short = 'c', long, value_delimiter = ',')]
        columns: Vec<NumericColumn>,
    },

    /// Accident log charts
    Accidents {
        /// Path to the accident log CSV export
        #[arg(short = 'a', long)]
        accidents_csv: String,

        /// Field delimiter of the export
        #[arg(long)]
        delimiter: Option<char>,

        /// category or fatal
        #[arg(long, default_value = "category")]
        group_by: AccidentGrouping,

        /// Number of categories kept before collapsing into "Other"
        #[arg(long)]
        top_n: Option<usize>,
    },
}

pub fn run(command: Command, out: &mut dyn Write) -> anyhow::Result<()> {
    match command {
        Command::Factors { input } => incidents::run_factors(&input.load()?, out),
        Command::Counts {
            input,
            column,
            collapse,
        } => incidents::run_counts(&input.load()?, column, collapse, out),
        Command::Browse {
            input,
            factor,
            events,
        } => {
            let ctx = input.load()?;
            if events.is_empty() {
                let stdin = std::io::stdin();
                browse::run_interactive(&ctx, factor, &mut stdin.lock(), out)
            } else {
                browse::run_scripted(&ctx, factor, &events, out)
            }
        }
        Command::CrossTab {
            input,
            rows,
            columns,
            collapse,
        } => incidents::run_cross_tab(&input.load()?, rows, columns, collapse, out),
        Command::Histogram {
            input,
            column,
            bins,
        } => incidents::run_histogram(&input.load()?, column, bins, out),
        Command::Scatter { input, columns } => {
            incidents::run_scatter(&input.load()?, &columns, out)
        }
        Command::Accidents {
            accidents_csv,
            delimiter,
            group_by,
            top_n,
        } => {
            let mut config = DashboardConfig::default();
            if let Some(d) = delimiter {
                config.accident_delimiter = delimiter_byte(d)?;
            }
            if let Some(n) = top_n {
                config.top_n = n;
            }
            let data = std::fs::read(&accidents_csv)
                .with_context(|| format!("reading accidents from {}", accidents_csv))?;
            accidents::run_accidents(&data, &config, group_by, out)
        }
    }
}

fn delimiter_byte(c: char) -> anyhow::Result<u8> {
    u8::try_from(c).map_err(|_| anyhow::anyhow!("delimiter {:?} is not a single-byte character", c))
}

/// Pretty JSON followed by a newline.
pub(crate) fn write_json<T: Serialize>(out: &mut dyn Write, value: &T) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

/// Read one trimmed line; `None` at end of input.
pub(crate) fn read_line(input: &mut dyn BufRead) -> anyhow::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
