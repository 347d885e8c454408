use crate::pipeline::stage4_standardize::convention_label;
use crate::report::{MatrixMeta, SummaryData, format_f64_6};

pub fn render_report_text(data: &SummaryData) -> String {
    let mut out = String::new();

    out.push_str("Similarity Matrix Report\n");
    out.push_str("========================\n\n");

    out.push_str("1. Input\n");
    out.push_str(&format!("Manifest: {}\n", data.input.manifest));
    out.push_str(&format!(
        "Items: {} ({} read from corpus files)\n\n",
        data.input.n_items, data.input.n_corpus_files
    ));

    out.push_str("2. Scoring\n");
    out.push_str(&format!("Mode: {}\n", data.scoring.mode.label()));
    out.push_str(&format!(
        "Scorer: character {}-grams, {:?}\n\n",
        data.scoring.ngram, data.scoring.metric
    ));

    out.push_str("3. Raw matrix\n");
    push_matrix_meta(&mut out, &data.raw);
    if !data.top_pairs.is_empty() {
        out.push_str("Highest off-diagonal scores:\n");
        for pair in &data.top_pairs {
            out.push_str(&format!(
                "  {} -> {}: {}\n",
                pair.row,
                pair.col,
                format_f64_6(pair.score)
            ));
        }
    }
    out.push('\n');

    out.push_str("4. Standardization\n");
    match &data.standardization {
        None => out.push_str("Not applied.\n\n"),
        Some(s) => {
            out.push_str(&format!(
                "Deviation: {}\nZero-variance policy: {:?}\n",
                convention_label(s.params.convention),
                s.params.zero_variance
            ));
            if s.degenerate_columns.is_empty() {
                out.push_str("Degenerate columns: none\n\n");
            } else {
                out.push_str(&format!(
                    "Degenerate columns: {}\n\n",
                    s.degenerate_columns.join(", ")
                ));
            }
        }
    }

    out.push_str("5. Rendering\n");
    out.push_str(&format!("Target: {:?}\n", data.render.target));
    out.push_str(&format!(
        "Center: {}\n",
        data.render
            .center
            .map(format_f64_6)
            .unwrap_or_else(|| "auto".to_string())
    ));
    if let Some(cmap) = &data.render.cmap {
        out.push_str(&format!("Color map: {cmap}\n"));
    }

    out
}

fn push_matrix_meta(out: &mut String, meta: &MatrixMeta) {
    out.push_str(&format!("Shape: {} x {}\n", meta.n_rows, meta.n_cols));
    let fmt = |v: Option<f64>| v.map(format_f64_6).unwrap_or_else(|| "n/a".to_string());
    out.push_str(&format!(
        "Min: {}  Median: {}  P90: {}  Max: {}\n",
        fmt(meta.min),
        fmt(meta.median),
        fmt(meta.p90),
        fmt(meta.max)
    ));
    if let Some(d) = meta.diagonal_mean {
        out.push_str(&format!("Diagonal mean: {}\n", format_f64_6(d)));
    }
    if meta.nan_cells > 0 {
        out.push_str(&format!("NaN cells: {}\n", meta.nan_cells));
    }
}
