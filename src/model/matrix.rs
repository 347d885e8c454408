use serde::Serialize;

/// Dense row-major score table with labels on both axes.
///
/// Built once by a builder and never mutated afterwards; transforms such as
/// column standardization return a new matrix.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreMatrix {
    row_labels: Vec<String>,
    col_labels: Vec<String>,
    values: Vec<f64>,
}

impl ScoreMatrix {
    /// Assembles a matrix from rows that the caller has already checked to be
    /// `col_labels.len()` wide.
    pub(crate) fn from_rows(
        row_labels: Vec<String>,
        col_labels: Vec<String>,
        rows: Vec<Vec<f64>>,
    ) -> Self {
        debug_assert_eq!(row_labels.len(), rows.len());
        let n_cols = col_labels.len();
        let mut values = Vec::with_capacity(rows.len() * n_cols);
        for row in rows {
            debug_assert_eq!(row.len(), n_cols);
            values.extend(row);
        }
        Self {
            row_labels,
            col_labels,
            values,
        }
    }

    pub fn empty() -> Self {
        Self {
            row_labels: Vec::new(),
            col_labels: Vec::new(),
            values: Vec::new(),
        }
    }

    pub fn n_rows(&self) -> usize {
        self.row_labels.len()
    }

    pub fn n_cols(&self) -> usize {
        self.col_labels.len()
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows(), self.n_cols())
    }

    pub fn row_labels(&self) -> &[String] {
        &self.row_labels
    }

    pub fn col_labels(&self) -> &[String] {
        &self.col_labels
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.n_rows() || col >= self.n_cols() {
            return None;
        }
        Some(self.values[row * self.n_cols() + col])
    }

    pub fn row(&self, row: usize) -> &[f64] {
        let n_cols = self.n_cols();
        &self.values[row * n_cols..(row + 1) * n_cols]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        (0..self.n_rows()).map(move |r| self.row(r))
    }

    pub fn column(&self, col: usize) -> Vec<f64> {
        (0..self.n_rows()).map(|r| self.row(r)[col]).collect()
    }

    /// Finite minimum and maximum over all cells, ignoring NaN.
    pub fn finite_range(&self) -> Option<(f64, f64)> {
        let mut range: Option<(f64, f64)> = None;
        for &v in &self.values {
            if !v.is_finite() {
                continue;
            }
            range = Some(match range {
                None => (v, v),
                Some((lo, hi)) => (lo.min(v), hi.max(v)),
            });
        }
        range
    }

    pub fn nan_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_nan()).count()
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/matrix.rs"]
mod tests;
