use std::cell::Cell;

use super::*;
use crate::error::error_chain;
use crate::scoring::{FnPairScorer, ScoringError};

fn labels(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn first_char_scorer() -> FnPairScorer<impl Fn(&String, &str) -> Result<f64, ScoringError>> {
    FnPairScorer(|entry: &String, item: &str| -> Result<f64, ScoringError> {
        let first = entry.chars().next().map(|c| c.to_ascii_uppercase().to_string());
        Ok(if first.as_deref() == Some(item) {
            100.0
        } else {
            50.0
        })
    })
}

#[test]
fn test_two_item_example() {
    let items = labels(&["A", "B"]);
    let corpus = labels(&["a", "b"]);
    let m = build_pairwise(&items, &corpus, &first_char_scorer()).unwrap();
    assert_eq!(m.shape(), (2, 2));
    assert_eq!(m.row(0), &[100.0, 50.0]);
    assert_eq!(m.row(1), &[50.0, 100.0]);
    assert_eq!(m.row_labels(), items.as_slice());
    assert_eq!(m.col_labels(), items.as_slice());
}

#[test]
fn test_shape_for_various_sizes() {
    for n in 0..6 {
        let items: Vec<String> = (0..n).map(|i| format!("L{i}")).collect();
        let corpus: Vec<String> = (0..n).map(|i| format!("text {i}")).collect();
        let m = build_pairwise(&items, &corpus, &first_char_scorer()).unwrap();
        assert_eq!(m.shape(), (n, n));
    }
}

#[test]
fn test_cells_follow_labels_exactly() {
    let items = labels(&["en", "de", "fr", "es"]);
    let corpus = labels(&["hello", "hallo", "bonjour", "hola"]);
    let scorer = FnPairScorer(|entry: &String, item: &str| -> Result<f64, ScoringError> {
        Ok((entry.len() * 10 + item.as_bytes()[0] as usize) as f64)
    });
    let m = build_pairwise(&items, &corpus, &scorer).unwrap();
    for (i, entry) in corpus.iter().enumerate() {
        for (j, item) in items.iter().enumerate() {
            assert_eq!(m.get(i, j), Some(scorer.score(entry, item).unwrap()));
        }
    }
}

#[test]
fn test_length_mismatch_scores_nothing() {
    let calls = Cell::new(0usize);
    let scorer = FnPairScorer(|_: &String, _: &str| -> Result<f64, ScoringError> {
        calls.set(calls.get() + 1);
        Ok(1.0)
    });
    let err = build_pairwise(&labels(&["A", "B"]), &labels(&["a"]), &scorer).unwrap_err();
    assert!(matches!(
        err,
        BuildError::LengthMismatch {
            items: 2,
            corpus: 1
        }
    ));
    assert_eq!(calls.get(), 0);
}

#[test]
fn test_first_failure_aborts() {
    let calls = Cell::new(0usize);
    let scorer = FnPairScorer(|entry: &String, item: &str| -> Result<f64, ScoringError> {
        calls.set(calls.get() + 1);
        if entry == "b" && item == "A" {
            return Err(ScoringError::Failed("bad pair".to_string()));
        }
        Ok(0.0)
    });
    let items = labels(&["A", "B", "C"]);
    let corpus = labels(&["a", "b", "c"]);
    let err = build_pairwise(&items, &corpus, &scorer).unwrap_err();
    match err {
        BuildError::Scoring { row, col, .. } => {
            assert_eq!(row, 1);
            assert_eq!(col, Some(0));
        }
        other => panic!("unexpected error: {other}"),
    }
    // Row 0 (3 calls) plus the failing first call of row 1.
    assert_eq!(calls.get(), 4);
}

#[test]
fn test_scoring_error_message() {
    let scorer = FnPairScorer(|_: &String, _: &str| -> Result<f64, ScoringError> {
        Err(ScoringError::UnknownItem("zz".to_string()))
    });
    let err = build_pairwise(&labels(&["A"]), &labels(&["a"]), &scorer).unwrap_err();
    assert_eq!(err.to_string(), "scoring failed at row 0, column 0");
    assert_eq!(
        error_chain(&err),
        "scoring failed at row 0, column 0: unknown item: zz"
    );
}

struct ShortRows;

impl PairScorer<String> for ShortRows {
    fn score(&self, _: &String, _: &str) -> Result<f64, ScoringError> {
        Ok(1.0)
    }

    fn score_row(&self, _: &String, items: &[String]) -> Result<Vec<f64>, (usize, ScoringError)> {
        Ok(vec![1.0; items.len() - 1])
    }
}

#[test]
fn test_short_row_is_shape_mismatch() {
    let err = build_pairwise(&labels(&["A", "B"]), &labels(&["a", "b"]), &ShortRows).unwrap_err();
    assert!(matches!(
        err,
        BuildError::ShapeMismatch {
            row: 0,
            expected: 2,
            found: 1
        }
    ));
}
