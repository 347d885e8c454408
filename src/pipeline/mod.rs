pub mod stage2_pairwise;
pub mod stage3_vector;
pub mod stage4_standardize;
pub mod stage5_report;

use thiserror::Error;

use crate::scoring::ScoringError;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("{items} items but {corpus} corpus entries")]
    LengthMismatch { items: usize, corpus: usize },
    #[error("scoring failed at row {row}{}", .col.map(|c| format!(", column {c}")).unwrap_or_default())]
    Scoring {
        row: usize,
        col: Option<usize>,
        #[source]
        source: ScoringError,
    },
    #[error("row {row} has {found} columns, expected {expected}")]
    ShapeMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },
}

pub(crate) fn check_aligned<C>(items: &[String], corpus: &[C]) -> Result<(), BuildError> {
    if items.len() != corpus.len() {
        return Err(BuildError::LengthMismatch {
            items: items.len(),
            corpus: corpus.len(),
        });
    }
    Ok(())
}
