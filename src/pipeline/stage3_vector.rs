use tracing::{debug, warn};

use crate::model::ScoreMatrix;
use crate::pipeline::{BuildError, check_aligned};
use crate::scoring::VectorScorer;

/// Stacks one score vector per corpus entry into an N x M table.
///
/// M is fixed by the first row. Column labels come from the scorer when it
/// reports exactly M of them, otherwise they are the column positions.
pub fn build_vector<C, S>(
    items: &[String],
    corpus: &[C],
    scorer: &S,
) -> Result<ScoreMatrix, BuildError>
where
    S: VectorScorer<C> + ?Sized,
{
    check_aligned(items, corpus)?;
    if items.is_empty() {
        return Ok(ScoreMatrix::empty());
    }

    let mut rows: Vec<Vec<f64>> = Vec::with_capacity(items.len());
    for (row, entry) in corpus.iter().enumerate() {
        let values = scorer
            .score_vector(entry)
            .map_err(|source| BuildError::Scoring {
                row,
                col: None,
                source,
            })?;
        if let Some(first) = rows.first() {
            if values.len() != first.len() {
                return Err(BuildError::ShapeMismatch {
                    row,
                    expected: first.len(),
                    found: values.len(),
                });
            }
        }
        debug!(item = %items[row], width = values.len(), "scored vector");
        rows.push(values);
    }

    let width = rows[0].len();
    let col_labels = match scorer.column_labels() {
        Some(labels) if labels.len() == width => labels,
        Some(labels) => {
            warn!(
                "scorer reported {} column labels for {} columns; using positions",
                labels.len(),
                width
            );
            positional_labels(width)
        }
        None => positional_labels(width),
    };

    Ok(ScoreMatrix::from_rows(items.to_vec(), col_labels, rows))
}

fn positional_labels(width: usize) -> Vec<String> {
    (0..width).map(|i| i.to_string()).collect()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_vector.rs"]
mod tests;
