use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::input::InputBundle;
use crate::model::{BuildMode, ScoreMatrix, StandardizeParams};
use crate::pipeline::stage4_standardize::Standardized;
use crate::render::RenderSpec;
use crate::report::json::render_summary_json;
use crate::report::text::render_report_text;
use crate::report::{
    InputMeta, MatrixMeta, PairStat, RenderMeta, ScoringMeta, StandardizationMeta, SummaryData,
    ToolMeta, format_f64_6, median, p90,
};
use crate::scoring::NgramMetric;

const TOP_PAIRS: usize = 5;

#[derive(Debug, Clone)]
pub struct Stage5Input<'a> {
    pub bundle: &'a InputBundle,
    pub mode: BuildMode,
    pub metric: NgramMetric,
    pub ngram: usize,
    pub raw: &'a ScoreMatrix,
    pub standardized: Option<(&'a Standardized, StandardizeParams)>,
    pub render: &'a RenderSpec,

    pub tool_name: String,
    pub tool_version: String,
    pub git_hash: Option<String>,
}

impl Stage5Input<'_> {
    /// The matrix that is reported and rendered.
    pub fn final_matrix(&self) -> &ScoreMatrix {
        match &self.standardized {
            Some((s, _)) => &s.matrix,
            None => self.raw,
        }
    }
}

pub fn write_reports(input: &Stage5Input<'_>, out_dir: &Path) -> std::io::Result<()> {
    fs::create_dir_all(out_dir)?;

    write_matrix_tsv(input.final_matrix(), &out_dir.join("matrix.tsv"))?;
    if input.standardized.is_some() {
        write_matrix_tsv(input.raw, &out_dir.join("matrix_raw.tsv"))?;
    }

    let summary = build_summary(input);
    let json = render_summary_json(&summary)?;
    write_text(&out_dir.join("summary.json"), &json)?;

    let report = render_report_text(&summary);
    write_text(&out_dir.join("report.txt"), &report)?;

    info!("wrote reports to {}", out_dir.display());
    Ok(())
}

pub fn build_summary(input: &Stage5Input<'_>) -> SummaryData {
    let standardization = input
        .standardized
        .as_ref()
        .map(|(s, params)| StandardizationMeta {
            params: *params,
            degenerate_columns: s
                .degenerate_labels()
                .into_iter()
                .map(str::to_string)
                .collect(),
            columns: s.columns.clone(),
        });

    let top_pairs = match input.mode {
        BuildMode::Pairwise => top_off_diagonal(input.raw, TOP_PAIRS),
        BuildMode::Vector => Vec::new(),
    };

    SummaryData {
        tool: ToolMeta {
            name: input.tool_name.clone(),
            version: input.tool_version.clone(),
            git_hash: input.git_hash.clone(),
        },
        input: InputMeta {
            manifest: input.bundle.manifest_path.display().to_string(),
            n_items: input.bundle.items.len(),
            n_corpus_files: input.bundle.n_from_files,
        },
        scoring: ScoringMeta {
            mode: input.mode,
            metric: input.metric,
            ngram: input.ngram,
        },
        raw: matrix_meta(input.raw, input.mode),
        standardization,
        render: RenderMeta {
            target: input.render.target,
            center: input.render.center,
            cmap: input.render.cmap.clone(),
        },
        top_pairs,
    }
}

fn matrix_meta(matrix: &ScoreMatrix, mode: BuildMode) -> MatrixMeta {
    let all: Vec<f64> = matrix.rows().flatten().copied().collect();
    let range = matrix.finite_range();
    let diagonal_mean = match mode {
        BuildMode::Pairwise if matrix.n_rows() > 0 => {
            let diag: Vec<f64> = (0..matrix.n_rows()).map(|i| matrix.row(i)[i]).collect();
            Some(crate::stats::mean(&diag))
        }
        _ => None,
    };
    MatrixMeta {
        n_rows: matrix.n_rows(),
        n_cols: matrix.n_cols(),
        nan_cells: matrix.nan_count(),
        min: range.map(|(lo, _)| lo),
        max: range.map(|(_, hi)| hi),
        median: median(&all),
        p90: p90(&all),
        diagonal_mean,
    }
}

/// Highest-scoring cells off the diagonal; ties keep row-major order.
pub fn top_off_diagonal(matrix: &ScoreMatrix, k: usize) -> Vec<PairStat> {
    let mut cells = Vec::new();
    for (r, row) in matrix.rows().enumerate() {
        for (c, &v) in row.iter().enumerate() {
            if r != c && v.is_finite() {
                cells.push((r, c, v));
            }
        }
    }
    cells.sort_by(|a, b| b.2.total_cmp(&a.2).then(a.0.cmp(&b.0)).then(a.1.cmp(&b.1)));
    cells
        .into_iter()
        .take(k)
        .map(|(r, c, v)| PairStat {
            row: matrix.row_labels()[r].clone(),
            col: matrix.col_labels()[c].clone(),
            score: v,
        })
        .collect()
}

fn write_matrix_tsv(matrix: &ScoreMatrix, path: &Path) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    let mut header = vec!["item".to_string()];
    header.extend(matrix.col_labels().iter().cloned());
    writeln!(w, "{}", header.join("\t"))?;
    for (label, row) in matrix.row_labels().iter().zip(matrix.rows()) {
        let mut fields = Vec::with_capacity(row.len() + 1);
        fields.push(label.clone());
        fields.extend(row.iter().map(|&v| format_f64_6(v)));
        writeln!(w, "{}", fields.join("\t"))?;
    }
    w.flush()
}

fn write_text(path: &Path, contents: &str) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    w.write_all(contents.as_bytes())?;
    w.flush()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage5_report.rs"]
mod tests;
