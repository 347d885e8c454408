use crate::model::DeviationConvention;

#[inline]
pub fn sum_f64(values: &[f64]) -> f64 {
    let mut sum = 0f64;
    for &v in values {
        sum += v;
    }
    sum
}

/// Arithmetic mean; NaN for an empty slice.
#[inline]
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    sum_f64(values) / values.len() as f64
}

/// Standard deviation about `mean`. NaN when the denominator is not positive
/// (empty input, or a single value under the sample convention).
pub fn std_dev(values: &[f64], mean: f64, convention: DeviationConvention) -> f64 {
    let n = values.len();
    let denom = match convention {
        DeviationConvention::Sample => n.saturating_sub(1),
        DeviationConvention::Population => n,
    };
    if denom == 0 {
        return f64::NAN;
    }
    let mut ss = 0f64;
    for &v in values {
        let d = v - mean;
        ss += d * d;
    }
    (ss / denom as f64).sqrt()
}

/// True when every value is bitwise-equal to the first one.
pub fn all_identical(values: &[f64]) -> bool {
    match values.first() {
        None => true,
        Some(first) => values.iter().all(|v| v.to_bits() == first.to_bits()),
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/stats/mod.rs"]
mod tests;
