//! Scoring collaborators consumed by the matrix builders.
//!
//! A builder never knows what a score means. It only needs one of two narrow
//! capabilities: scoring a corpus entry against an item label, or turning a
//! corpus entry into a fixed-width row of numbers.

pub mod ngram;

use thiserror::Error;

pub use ngram::{NgramMetric, NgramScorer};

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("unknown item: {0}")]
    UnknownItem(String),
    #[error("scorer returned no rows")]
    EmptyRows,
    #[error("scorer training failed: {0}")]
    Training(String),
    #[error("{0}")]
    Failed(String),
}

/// Scores one corpus entry against one item label.
pub trait PairScorer<C: ?Sized> {
    fn score(&self, entry: &C, item: &str) -> Result<f64, ScoringError>;

    /// Scores one entry against every item in order, stopping at the first
    /// failure. The error carries the failing column.
    ///
    /// Scorers that can prepare an entry once override this.
    fn score_row(&self, entry: &C, items: &[String]) -> Result<Vec<f64>, (usize, ScoringError)> {
        let mut row = Vec::with_capacity(items.len());
        for (col, item) in items.iter().enumerate() {
            row.push(self.score(entry, item).map_err(|e| (col, e))?);
        }
        Ok(row)
    }
}

/// Turns one corpus entry into a row of scores.
pub trait VectorScorer<C: ?Sized> {
    fn score_vector(&self, entry: &C) -> Result<Vec<f64>, ScoringError>;

    /// Names of the output columns, when the scorer knows them.
    fn column_labels(&self) -> Option<Vec<String>> {
        None
    }
}

/// Adapts a plain closure into a [`PairScorer`].
pub struct FnPairScorer<F>(pub F);

impl<C, F> PairScorer<C> for FnPairScorer<F>
where
    C: ?Sized,
    F: Fn(&C, &str) -> Result<f64, ScoringError>,
{
    fn score(&self, entry: &C, item: &str) -> Result<f64, ScoringError> {
        (self.0)(entry, item)
    }
}

/// Adapts a plain closure into a [`VectorScorer`].
pub struct FnVectorScorer<F>(pub F);

impl<C, F> VectorScorer<C> for FnVectorScorer<F>
where
    C: ?Sized,
    F: Fn(&C) -> Result<Vec<f64>, ScoringError>,
{
    fn score_vector(&self, entry: &C) -> Result<Vec<f64>, ScoringError> {
        (self.0)(entry)
    }
}

/// Adapts a scorer that returns `(anything, rows)` by keeping only the first
/// row of the second element.
pub struct FirstRow<F>(pub F);

impl<C, T, F> VectorScorer<C> for FirstRow<F>
where
    C: ?Sized,
    F: Fn(&C) -> Result<(T, Vec<Vec<f64>>), ScoringError>,
{
    fn score_vector(&self, entry: &C) -> Result<Vec<f64>, ScoringError> {
        let (_, rows) = (self.0)(entry)?;
        rows.into_iter().next().ok_or(ScoringError::EmptyRows)
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/scoring/mod.rs"]
mod tests;
