use serde::Serialize;
use tracing::warn;

use crate::model::{DeviationConvention, ScoreMatrix, StandardizeParams, ZeroVariancePolicy};
use crate::stats::{all_identical, mean, std_dev};

/// Deviations at or below this fraction of `|mean|` are rounding noise.
const DEGENERATE_REL_TOL: f64 = 1e-12;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnStats {
    pub label: String,
    pub mean: f64,
    pub std_dev: f64,
    pub degenerate: bool,
}

#[derive(Debug, Clone)]
pub struct Standardized {
    pub matrix: ScoreMatrix,
    /// One entry per input column, including dropped ones.
    pub columns: Vec<ColumnStats>,
}

impl Standardized {
    pub fn degenerate_labels(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| c.degenerate)
            .map(|c| c.label.as_str())
            .collect()
    }
}

/// Column z-score: `(x - mean) / sd` for every column independently.
///
/// A column is degenerate when its values are all identical, its deviation is
/// zero or undefined, or its deviation is negligible next to its mean;
/// `params.zero_variance` decides what it becomes.
pub fn standardize_columns(input: &ScoreMatrix, params: &StandardizeParams) -> Standardized {
    let (n_rows, n_cols) = input.shape();
    let mut columns = Vec::with_capacity(n_cols);
    let mut out_cols: Vec<Vec<f64>> = Vec::with_capacity(n_cols);
    let mut kept_labels = Vec::with_capacity(n_cols);

    for (col, label) in input.col_labels().iter().enumerate() {
        let values = input.column(col);
        let m = mean(&values);
        let sd = std_dev(&values, m, params.convention);
        let degenerate = is_degenerate(&values, m, sd);

        columns.push(ColumnStats {
            label: label.clone(),
            mean: m,
            std_dev: sd,
            degenerate,
        });

        if degenerate {
            warn!(
                column = %label,
                policy = ?params.zero_variance,
                "column has zero or undefined deviation"
            );
            match params.zero_variance {
                ZeroVariancePolicy::Nan => out_cols.push(vec![f64::NAN; n_rows]),
                ZeroVariancePolicy::Zero => out_cols.push(vec![0.0; n_rows]),
                ZeroVariancePolicy::Drop => continue,
            }
        } else {
            out_cols.push(values.iter().map(|v| (v - m) / sd).collect());
        }
        kept_labels.push(label.clone());
    }

    let rows = (0..n_rows)
        .map(|r| out_cols.iter().map(|c| c[r]).collect())
        .collect();

    Standardized {
        matrix: ScoreMatrix::from_rows(input.row_labels().to_vec(), kept_labels, rows),
        columns,
    }
}

fn is_degenerate(values: &[f64], mean: f64, sd: f64) -> bool {
    all_identical(values) || !sd.is_finite() || sd <= DEGENERATE_REL_TOL * mean.abs()
}

pub fn convention_label(convention: DeviationConvention) -> &'static str {
    match convention {
        DeviationConvention::Sample => "sample (n-1)",
        DeviationConvention::Population => "population (n)",
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage4_standardize.rs"]
mod tests;
