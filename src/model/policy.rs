use clap::ValueEnum;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    /// One score per (entry, item) pair; square matrix.
    Pairwise,
    /// One score vector per entry; rows stacked then standardized.
    Vector,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviationConvention {
    /// N - 1 denominator.
    Sample,
    /// N denominator.
    Population,
}

/// What standardization does with a column whose deviation is zero or undefined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ZeroVariancePolicy {
    /// Leave the 0/0 result in place.
    Nan,
    /// Clamp every cell of the column to 0.
    Zero,
    /// Remove the column and its label.
    Drop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StandardizeParams {
    pub convention: DeviationConvention,
    pub zero_variance: ZeroVariancePolicy,
}

impl Default for StandardizeParams {
    fn default() -> Self {
        Self {
            convention: DeviationConvention::Sample,
            zero_variance: ZeroVariancePolicy::Nan,
        }
    }
}

impl BuildMode {
    pub fn label(self) -> &'static str {
        match self {
            BuildMode::Pairwise => "pairwise",
            BuildMode::Vector => "vector",
        }
    }
}
