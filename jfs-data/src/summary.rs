//! Distribution summaries for numeric incident columns.

use jfs_core::incident::Incident;
use jfs_core::numeric_column::NumericColumn;
use serde::Serialize;

/// One histogram bar over `[lower, upper)`; the last bin is closed.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Histogram {
    pub column: NumericColumn,
    /// Number of non-null values.
    pub n: usize,
    pub mean: Option<f64>,
    pub median: Option<f64>,
    pub bins: Vec<HistogramBin>,
}

pub fn mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        None
    } else {
        Some(data.iter().sum::<f64>() / data.len() as f64)
    }
}

/// Median of unsorted data.
pub fn median(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    let mut sorted = data.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Equal-width bins spanning `[min, max]` of `data`.
///
/// When every value is the same a single bin holds them all.
pub fn bin_values(data: &[f64], bins: usize) -> Vec<HistogramBin> {
    if data.is_empty() || bins == 0 {
        return Vec::new();
    }
    let min = data.iter().copied().fold(f64::INFINITY, f64::min);
    let max = data.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if min == max {
        return vec![HistogramBin {
            lower: min,
            upper: max,
            count: data.len() as u64,
        }];
    }

    let width = (max - min) / bins as f64;
    let mut counts = vec![0u64; bins];
    for &value in data {
        let idx = (((value - min) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }
    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            lower: min + width * i as f64,
            upper: if i + 1 == bins { max } else { min + width * (i + 1) as f64 },
            count,
        })
        .collect()
}

/// Non-null values of `column` across `incidents`.
pub fn column_values(incidents: &[Incident], column: NumericColumn) -> Vec<f64> {
    incidents.iter().filter_map(|i| i.numeric(column)).collect()
}

/// Histogram of one numeric column with mean and median markers.
pub fn histogram(incidents: &[Incident], column: NumericColumn, bins: usize) -> Histogram {
    let values = column_values(incidents, column);
    log::info!(
        "[JFS] summary: histogram of {} over {} values",
        column,
        values.len()
    );
    Histogram {
        column,
        n: values.len(),
        mean: mean(&values),
        median: median(&values),
        bins: bin_values(&values, bins),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jfs_core::event_date::EventDate;
    use jfs_core::incident::Experience;

    fn with_base_jumps(values: &[Option<u32>]) -> Vec<Incident> {
        values
            .iter()
            .map(|v| Incident {
                date: EventDate::Unparseable,
                age: None,
                location: None,
                cause_of_death: None,
                possible_factors: None,
                description: String::new(),
                name: String::new(),
                experience: Experience {
                    base_jumps: *v,
                    ..Experience::default()
                },
            })
            .collect()
    }

    #[test]
    fn mean_and_median() {
        assert_eq!(mean(&[]), None);
        assert_eq!(median(&[]), None);
        assert_eq!(mean(&[1.0, 2.0, 6.0]), Some(3.0));
        assert_eq!(median(&[6.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
    }

    #[test]
    fn bins_cover_range_and_count_everything() {
        let data = [0.0, 1.0, 2.0, 3.0, 4.0, 10.0];
        let bins = bin_values(&data, 5);
        assert_eq!(bins.len(), 5);
        assert_eq!(bins[0].lower, 0.0);
        assert_eq!(bins[4].upper, 10.0);
        assert_eq!(bins.iter().map(|b| b.count).sum::<u64>(), 6);
        // [0,2) holds 0 and 1; the max lands in the closed last bin.
        assert_eq!(bins[0].count, 2);
        assert_eq!(bins[4].count, 1);
    }

    #[test]
    fn constant_data_single_bin() {
        let bins = bin_values(&[5.0, 5.0, 5.0], 30);
        assert_eq!(bins, vec![HistogramBin { lower: 5.0, upper: 5.0, count: 3 }]);
    }

    #[test]
    fn histogram_skips_nulls() {
        let incidents = with_base_jumps(&[Some(10), None, Some(20), Some(90)]);
        let hist = histogram(&incidents, NumericColumn::BaseJumps, 30);
        assert_eq!(hist.n, 3);
        assert_eq!(hist.mean, Some(40.0));
        assert_eq!(hist.median, Some(20.0));
        assert_eq!(hist.bins.len(), 30);
    }

    #[test]
    fn histogram_of_empty_column() {
        let incidents = with_base_jumps(&[None, None]);
        let hist = histogram(&incidents, NumericColumn::BaseJumps, 30);
        assert_eq!(hist.n, 0);
        assert_eq!(hist.mean, None);
        assert!(hist.bins.is_empty());
        assert_eq!(hist.median, None);
    }
}
