pub mod json;
pub mod text;

use serde::Serialize;

use crate::model::{BuildMode, StandardizeParams};
use crate::pipeline::stage4_standardize::ColumnStats;
use crate::render::RenderTarget;
use crate::scoring::NgramMetric;

#[derive(Debug, Clone, Serialize)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
    pub git_hash: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InputMeta {
    pub manifest: String,
    pub n_items: usize,
    pub n_corpus_files: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoringMeta {
    pub mode: BuildMode,
    pub metric: NgramMetric,
    pub ngram: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct MatrixMeta {
    pub n_rows: usize,
    pub n_cols: usize,
    pub nan_cells: usize,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub median: Option<f64>,
    pub p90: Option<f64>,
    pub diagonal_mean: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StandardizationMeta {
    #[serde(flatten)]
    pub params: StandardizeParams,
    pub degenerate_columns: Vec<String>,
    pub columns: Vec<ColumnStats>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RenderMeta {
    pub target: RenderTarget,
    pub center: Option<f64>,
    pub cmap: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairStat {
    pub row: String,
    pub col: String,
    pub score: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryData {
    pub tool: ToolMeta,
    pub input: InputMeta,
    pub scoring: ScoringMeta,
    pub raw: MatrixMeta,
    pub standardization: Option<StandardizationMeta>,
    pub render: RenderMeta,
    pub top_pairs: Vec<PairStat>,
}

pub fn format_f64_6(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else {
        format!("{:.6}", v)
    }
}

/// Nearest-rank quantile over the finite values; `None` when there are none.
pub fn quantile_indexed(values: &[f64], p: f64) -> Option<f64> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(f64::total_cmp);
    let n = sorted.len();
    let idx = ((n - 1) as f64 * p).ceil() as usize;
    Some(sorted[idx])
}

pub fn median(values: &[f64]) -> Option<f64> {
    quantile_indexed(values, 0.5)
}

pub fn p90(values: &[f64]) -> Option<f64> {
    quantile_indexed(values, 0.90)
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
