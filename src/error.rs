use thiserror::Error;

use crate::input::InputError;
use crate::pipeline::BuildError;
use crate::render::RenderError;
use crate::scoring::ScoringError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Scoring(#[from] ScoringError),
    #[error(transparent)]
    Build(#[from] BuildError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("failed to write reports")]
    Report(#[from] std::io::Error),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Renders an error and its source chain on one line.
pub fn error_chain(err: &dyn std::error::Error) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        out.push_str(": ");
        out.push_str(&cause.to_string());
        source = cause.source();
    }
    out
}
