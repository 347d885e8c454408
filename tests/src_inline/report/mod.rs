use super::*;

#[test]
fn test_quantiles() {
    let v = vec![1.0, 2.0, 3.0, 4.0, 5.0];
    assert_eq!(median(&v), Some(3.0));
    assert_eq!(p90(&v), Some(5.0));
}

#[test]
fn test_quantiles_skip_nan() {
    let v = vec![f64::NAN, 4.0, 2.0];
    assert_eq!(median(&v), Some(4.0));
    assert_eq!(median(&[f64::NAN]), None);
}

#[test]
fn test_format_f64_6() {
    assert_eq!(format_f64_6(1.0 / 3.0), "0.333333");
    assert_eq!(format_f64_6(f64::NAN), "NaN");
}
