use tracing::debug;

use crate::model::ScoreMatrix;
use crate::pipeline::{BuildError, check_aligned};
use crate::scoring::PairScorer;

/// Builds the N x N table `T[i][j] = score(corpus[i], items[j])`.
///
/// Cells are scored row by row through [`PairScorer::score_row`], each exactly
/// once. The first scoring failure aborts the build.
pub fn build_pairwise<C, S>(
    items: &[String],
    corpus: &[C],
    scorer: &S,
) -> Result<ScoreMatrix, BuildError>
where
    S: PairScorer<C> + ?Sized,
{
    check_aligned(items, corpus)?;
    let n = items.len();
    if n == 0 {
        return Ok(ScoreMatrix::empty());
    }

    let mut rows = Vec::with_capacity(n);
    for (row, entry) in corpus.iter().enumerate() {
        let values = scorer
            .score_row(entry, items)
            .map_err(|(col, source)| BuildError::Scoring {
                row,
                col: Some(col),
                source,
            })?;
        if values.len() != n {
            return Err(BuildError::ShapeMismatch {
                row,
                expected: n,
                found: values.len(),
            });
        }
        debug!(item = %items[row], "scored row {}/{}", row + 1, n);
        rows.push(values);
    }

    Ok(ScoreMatrix::from_rows(items.to_vec(), items.to_vec(), rows))
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_pairwise.rs"]
mod tests;
