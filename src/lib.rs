//! Item-by-item similarity matrices built from an aligned corpus.
//!
//! The builders take any [`PairScorer`] or [`VectorScorer`]; closures plug in
//! through [`FnPairScorer`], [`FnVectorScorer`] and [`FirstRow`]. The
//! `kira-simheat` binary wires them to the built-in [`NgramScorer`].

pub mod error;
pub mod input;
pub mod logging;
pub mod model;
pub mod pipeline;
pub mod render;
pub mod report;
pub mod scoring;
pub mod stats;

pub use model::{
    BuildMode, DeviationConvention, ScoreMatrix, StandardizeParams, ZeroVariancePolicy,
};
pub use pipeline::BuildError;
pub use pipeline::stage2_pairwise::build_pairwise;
pub use pipeline::stage3_vector::build_vector;
pub use pipeline::stage4_standardize::{Standardized, standardize_columns};
pub use scoring::{
    FirstRow, FnPairScorer, FnVectorScorer, NgramMetric, NgramScorer, PairScorer, ScoringError,
    VectorScorer,
};
