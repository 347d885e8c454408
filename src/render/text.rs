use std::io::Write;

use crate::model::ScoreMatrix;
use crate::render::{RenderError, RenderSpec, Renderer, check_labels};

const ABOVE: [char; 5] = [' ', '+', '*', '#', '@'];
const BELOW: [char; 5] = [' ', '.', ':', '-', '='];
const MISSING: char = '?';

/// Shaded text heatmap written to stdout.
///
/// Cells are shaded by their distance from the center value, on a ramp that
/// is scaled to the largest finite distance in the matrix.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextRenderer;

impl Renderer for TextRenderer {
    fn render(&self, matrix: &ScoreMatrix, spec: &RenderSpec) -> Result<(), RenderError> {
        check_labels(matrix, spec)?;
        let text = render_heatmap_text(matrix, spec);
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        out.write_all(text.as_bytes())?;
        out.flush()?;
        Ok(())
    }
}

pub fn render_heatmap_text(matrix: &ScoreMatrix, spec: &RenderSpec) -> String {
    let mut out = String::new();
    out.push_str(&spec.title);
    out.push('\n');

    let range = matrix.finite_range();
    let center = spec
        .center
        .or_else(|| range.map(|(lo, hi)| (lo + hi) / 2.0))
        .unwrap_or(0.0);
    let span = range
        .map(|(lo, hi)| (hi - center).abs().max((lo - center).abs()))
        .unwrap_or(0.0);

    let label_width = spec
        .row_labels
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(0);

    out.push_str(&" ".repeat(label_width + 1));
    for col in 0..matrix.n_cols() {
        out.push_str(&format!("{:<2}", col % 100));
    }
    out.push('\n');

    for (row, label) in spec.row_labels.iter().enumerate() {
        out.push_str(&format!("{label:<label_width$} "));
        for &v in matrix.row(row) {
            let glyph = shade(v, center, span);
            out.push(glyph);
            out.push(glyph);
        }
        out.push('\n');
    }

    out.push_str(&format!(
        "center={} span={}{}\n",
        format_value(center),
        format_value(span),
        spec.cmap
            .as_deref()
            .map(|c| format!(" cmap={c}"))
            .unwrap_or_default()
    ));
    out.push_str(&format!(
        "above: {} below: {} missing: {}\n",
        ABOVE[1..].iter().collect::<String>(),
        BELOW[1..].iter().collect::<String>(),
        MISSING
    ));
    for (col, label) in matrix.col_labels().iter().enumerate() {
        out.push_str(&format!("{col:>3} {label}\n"));
    }
    out
}

fn shade(v: f64, center: f64, span: f64) -> char {
    if v.is_nan() {
        return MISSING;
    }
    if span <= 0.0 || !span.is_finite() {
        return ABOVE[0];
    }
    let intensity = ((v - center).abs() / span).min(1.0);
    let level = (intensity * (ABOVE.len() - 1) as f64).round() as usize;
    if v >= center {
        ABOVE[level]
    } else {
        BELOW[level]
    }
}

fn format_value(v: f64) -> String {
    format!("{:.3}", v)
}

#[cfg(test)]
#[path = "../../tests/src_inline/render/text.rs"]
mod tests;
