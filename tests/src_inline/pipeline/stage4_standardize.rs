use super::*;
use crate::stats;

const TOL: f64 = 1e-9;

fn matrix(rows: Vec<Vec<f64>>) -> ScoreMatrix {
    let n_cols = rows.first().map(|r| r.len()).unwrap_or(0);
    let row_labels = (0..rows.len()).map(|i| format!("r{i}")).collect();
    let col_labels = (0..n_cols).map(|i| format!("c{i}")).collect();
    ScoreMatrix::from_rows(row_labels, col_labels, rows)
}

#[test]
fn test_two_by_two_example() {
    let input = matrix(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
    let out = standardize_columns(&input, &StandardizeParams::default());
    assert_eq!(out.columns[0].mean, 2.0);
    assert_eq!(out.columns[1].mean, 3.0);
    assert!((out.columns[0].std_dev - 2f64.sqrt()).abs() < TOL);
    assert!((out.columns[1].std_dev - 2f64.sqrt()).abs() < TOL);
    let h = 1.0 / 2f64.sqrt();
    let expected = [[-h, -h], [h, h]];
    for r in 0..2 {
        for c in 0..2 {
            assert!((out.matrix.get(r, c).unwrap() - expected[r][c]).abs() < TOL);
        }
    }
}

#[test]
fn test_columns_have_zero_mean_unit_sd() {
    let input = matrix(vec![
        vec![1.0, 10.0, -3.0],
        vec![4.0, 20.0, 0.5],
        vec![9.0, 15.0, 7.25],
        vec![2.0, 40.0, 1.0],
        vec![0.0, 5.0, -9.0],
    ]);
    for convention in [DeviationConvention::Sample, DeviationConvention::Population] {
        let params = StandardizeParams {
            convention,
            zero_variance: ZeroVariancePolicy::Nan,
        };
        let out = standardize_columns(&input, &params);
        assert_eq!(out.matrix.shape(), (5, 3));
        for c in 0..3 {
            let col = out.matrix.column(c);
            let m = stats::mean(&col);
            let sd = stats::std_dev(&col, m, convention);
            assert!(m.abs() < TOL, "column {c} mean {m}");
            assert!((sd - 1.0).abs() < TOL, "column {c} sd {sd}");
        }
    }
}

#[test]
fn test_degenerate_column_is_nan_by_default() {
    let input = matrix(vec![vec![1.0, 7.0], vec![2.0, 7.0], vec![3.0, 7.0]]);
    let out = standardize_columns(&input, &StandardizeParams::default());
    assert_eq!(out.matrix.shape(), (3, 2));
    assert!(out.matrix.column(1).iter().all(|v| v.is_nan()));
    assert!(out.matrix.column(0).iter().all(|v| v.is_finite()));
    assert_eq!(out.degenerate_labels(), vec!["c1"]);
}

#[test]
fn test_degenerate_column_zero_policy() {
    let input = matrix(vec![vec![1.0, 0.1], vec![2.0, 0.1], vec![3.0, 0.1]]);
    let params = StandardizeParams {
        convention: DeviationConvention::Sample,
        zero_variance: ZeroVariancePolicy::Zero,
    };
    let out = standardize_columns(&input, &params);
    assert_eq!(out.matrix.column(1), vec![0.0, 0.0, 0.0]);
}

#[test]
fn test_degenerate_column_drop_policy() {
    let input = matrix(vec![vec![5.0, 1.0, 2.0], vec![5.0, 3.0, 2.0]]);
    let params = StandardizeParams {
        convention: DeviationConvention::Sample,
        zero_variance: ZeroVariancePolicy::Drop,
    };
    let out = standardize_columns(&input, &params);
    assert_eq!(out.matrix.shape(), (2, 1));
    assert_eq!(out.matrix.col_labels(), &["c1".to_string()]);
    assert_eq!(out.columns.len(), 3);
    assert_eq!(out.degenerate_labels(), vec!["c0", "c2"]);
}

#[test]
fn test_single_row_sample_is_degenerate() {
    let input = matrix(vec![vec![1.0, 2.0]]);
    let out = standardize_columns(&input, &StandardizeParams::default());
    assert_eq!(out.degenerate_labels().len(), 2);
    assert_eq!(out.matrix.nan_count(), 2);
}

#[test]
fn test_row_labels_preserved() {
    let input = matrix(vec![vec![1.0], vec![2.0]]);
    let out = standardize_columns(&input, &StandardizeParams::default());
    assert_eq!(out.matrix.row_labels(), input.row_labels());
}

#[test]
fn test_convention_label() {
    assert_eq!(convention_label(DeviationConvention::Sample), "sample (n-1)");
}

#[test]
fn test_rounding_noise_column_is_degenerate() {
    let input = matrix(vec![
        vec![0.1 + 0.2, 1.0],
        vec![0.3, 2.0],
        vec![0.3, 4.0],
    ]);
    let out = standardize_columns(&input, &StandardizeParams::default());
    assert!(out.columns[0].degenerate);
    assert!(out.matrix.column(0).iter().all(|v| v.is_nan()));
    assert_eq!(out.degenerate_labels(), vec!["c0"]);

    let kept = out.matrix.column(1);
    assert!(stats::mean(&kept).abs() < TOL);
}

#[test]
fn test_small_but_real_spread_is_kept() {
    let input = matrix(vec![vec![1e-9], vec![2e-9], vec![3e-9]]);
    let out = standardize_columns(&input, &StandardizeParams::default());
    assert!(!out.columns[0].degenerate);
    assert!((out.matrix.get(2, 0).unwrap() - 1.0).abs() < TOL);
}
