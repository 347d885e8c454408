//! Heatmap rendering collaborators.
//!
//! The matrix builders only promise a labeled table; drawing it is someone
//! else's job. [`RenderSpec`] is the hand-off contract and [`Renderer`] the
//! seam. Two targets ship with the tool: an inline text heatmap and a
//! `heatmap.json` render request for an external plotter.

pub mod file;
pub mod text;

use clap::ValueEnum;
use serde::Serialize;
use thiserror::Error;

use crate::model::ScoreMatrix;

pub use file::FileRenderer;
pub use text::TextRenderer;

pub const DEFAULT_FIGSIZE: (f64, f64) = (14.0, 9.0);
pub const DEFAULT_FONT_SCALE: f64 = 1.0;

/// Color scale center when none is given: z-scores center on 0, raw 0..=100
/// scores on the self-similarity maximum.
pub fn default_center(standardized: bool) -> f64 {
    if standardized { 0.0 } else { 100.0 }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderTarget {
    /// Shaded text heatmap on stdout.
    Inline,
    /// `heatmap.json` next to the other outputs.
    File,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderSpec {
    pub title: String,
    pub center: Option<f64>,
    pub cmap: Option<String>,
    pub figsize: (f64, f64),
    pub font_scale: f64,
    pub row_labels: Vec<String>,
    pub target: RenderTarget,
}

impl RenderSpec {
    pub fn for_matrix(title: impl Into<String>, matrix: &ScoreMatrix, center: f64) -> Self {
        Self {
            title: title.into(),
            center: Some(center),
            cmap: None,
            figsize: DEFAULT_FIGSIZE,
            font_scale: DEFAULT_FONT_SCALE,
            row_labels: matrix.row_labels().to_vec(),
            target: RenderTarget::File,
        }
    }
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("render IO error")]
    Io(#[from] std::io::Error),
    #[error("render request serialization failed")]
    Json(#[from] serde_json::Error),
    #[error("{labels} row labels for a matrix with {rows} rows")]
    LabelMismatch { labels: usize, rows: usize },
}

pub trait Renderer {
    fn render(&self, matrix: &ScoreMatrix, spec: &RenderSpec) -> Result<(), RenderError>;
}

pub(crate) fn check_labels(matrix: &ScoreMatrix, spec: &RenderSpec) -> Result<(), RenderError> {
    if spec.row_labels.len() != matrix.n_rows() {
        return Err(RenderError::LabelMismatch {
            labels: spec.row_labels.len(),
            rows: matrix.n_rows(),
        });
    }
    Ok(())
}
