//! Ordinary least squares fit with Pearson correlation for the scatter view.
//!
//! Significance and the slope interval use Student's t distribution with
//! n - 2 degrees of freedom.

use jfs_core::config::DashboardConfig;
use jfs_core::incident::Incident;
use jfs_core::numeric_column::NumericColumn;
use serde::Serialize;
use statrs::distribution::{ContinuousCDF, StudentsT};

/// Result of a simple linear regression of y on x.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LinearFit {
    pub n: usize,
    pub slope: f64,
    pub intercept: f64,
    /// Standard error of the slope.
    pub std_err: f64,
    /// Pearson correlation coefficient.
    pub correlation: f64,
    /// Two-sided p-value for zero correlation.
    pub p_value: f64,
    pub confidence_level: f64,
    pub ci_lower: f64,
    pub ci_upper: f64,
}

/// Fit y = intercept + slope * x.
///
/// Returns `None` with fewer than three points or when either variable is
/// constant (slope or correlation undefined).
pub fn linear_fit(xs: &[f64], ys: &[f64], confidence_level: f64) -> Option<LinearFit> {
    let n = xs.len().min(ys.len());
    if n < 3 {
        return None;
    }
    let (xs, ys) = (&xs[..n], &ys[..n]);
    let nf = n as f64;
    let mean_x = xs.iter().sum::<f64>() / nf;
    let mean_y = ys.iter().sum::<f64>() / nf;

    let mut sxx = 0.0;
    let mut syy = 0.0;
    let mut sxy = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        sxx += dx * dx;
        syy += dy * dy;
        sxy += dx * dy;
    }
    if sxx <= 0.0 || syy <= 0.0 {
        return None;
    }

    let slope = sxy / sxx;
    let intercept = mean_y - slope * mean_x;
    let df = nf - 2.0;
    let rss = (syy - slope * sxy).max(0.0);
    let std_err = (rss / df / sxx).sqrt();

    let dist = StudentsT::new(0.0, 1.0, df).ok()?;
    let correlation = (sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0);
    let one_minus_r2 = 1.0 - correlation * correlation;
    let p_value = if one_minus_r2 <= 0.0 {
        0.0
    } else {
        two_sided_p(&dist, correlation * (df / one_minus_r2).sqrt())
    };

    let t_crit = dist.inverse_cdf(0.5 + confidence_level / 2.0);
    Some(LinearFit {
        n,
        slope,
        intercept,
        std_err,
        correlation,
        p_value,
        confidence_level,
        ci_lower: slope - t_crit * std_err,
        ci_upper: slope + t_crit * std_err,
    })
}

/// Outcome of the scatter-with-regression view.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ScatterOutcome {
    /// The view needs exactly two columns ticked.
    NeedTwoColumns { selected: usize },
    /// Fewer paired rows than the configured minimum.
    InsufficientData {
        x: NumericColumn,
        y: NumericColumn,
        n: usize,
    },
    /// Enough rows, but one of the columns is constant.
    Degenerate {
        x: NumericColumn,
        y: NumericColumn,
        n: usize,
    },
    Fit(ScatterFit),
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ScatterFit {
    pub x: NumericColumn,
    pub y: NumericColumn,
    /// Rows in the whole incident table, for the "n = paired / total" label.
    pub total_rows: usize,
    pub fit: LinearFit,
    pub points: Vec<(f64, f64)>,
}

impl ScatterOutcome {
    pub fn title(&self) -> String {
        match self {
            ScatterOutcome::NeedTwoColumns { .. } => "Please select exactly 2 attributes".to_string(),
            ScatterOutcome::InsufficientData { x, y, .. } => {
                format!("No data available for {} vs. {}", x, y)
            }
            ScatterOutcome::Degenerate { x, y, .. } => {
                format!("No variation to fit for {} vs. {}", x, y)
            }
            ScatterOutcome::Fit(s) => format!("{} vs. {}", s.x, s.y),
        }
    }
}

impl ScatterFit {
    /// Multi-line annotation with the fit statistics.
    pub fn stats_text(&self) -> String {
        let f = &self.fit;
        format!(
            "n={}/{},\nCorr={:.3}, P={:.3},\nSlope={:.3}, SE={:.3},\n{:.0}% CI=[{:.3}, {:.3}]",
            f.n,
            self.total_rows,
            f.correlation,
            f.p_value,
            f.slope,
            f.std_err,
            f.confidence_level * 100.0,
            f.ci_lower,
            f.ci_upper
        )
    }
}

/// Regression of the second selected column on the first.
///
/// Only rows where both columns are present take part.
pub fn scatter(
    incidents: &[Incident],
    selected: &[NumericColumn],
    config: &DashboardConfig,
) -> ScatterOutcome {
    let &[x, y] = selected else {
        return ScatterOutcome::NeedTwoColumns {
            selected: selected.len(),
        };
    };

    let points: Vec<(f64, f64)> = incidents
        .iter()
        .filter_map(|i| Some((i.numeric(x)?, i.numeric(y)?)))
        .collect();
    let n = points.len();
    log::info!("[JFS] regression: {} vs {} has {} paired rows", x, y, n);

    if n < config.min_regression_rows.max(3) {
        return ScatterOutcome::InsufficientData { x, y, n };
    }

    let (xs, ys): (Vec<f64>, Vec<f64>) = points.iter().copied().unzip();
    match linear_fit(&xs, &ys, config.confidence_level) {
        Some(fit) => ScatterOutcome::Fit(ScatterFit {
            x,
            y,
            total_rows: incidents.len(),
            fit,
            points,
        }),
        None => ScatterOutcome::Degenerate { x, y, n },
    }
}

/// Two-sided tail probability of `t` under `dist`.
fn two_sided_p(dist: &StudentsT, t: f64) -> f64 {
    if !t.is_finite() {
        return 0.0;
    }
    (2.0 * (1.0 - dist.cdf(t.abs()))).clamp(0.0, 1.0)
}
