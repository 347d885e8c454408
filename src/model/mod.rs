pub mod matrix;
pub mod policy;

pub use matrix::ScoreMatrix;
pub use policy::{BuildMode, DeviationConvention, StandardizeParams, ZeroVariancePolicy};
