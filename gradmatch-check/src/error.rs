use gradmatch_core::GradMatchError;
use thiserror::Error;

/// Errors that abort a gradient-check run.
#[derive(Error, Debug)]
pub enum CheckError {
    #[error("Tensor error: {0}")]
    Tensor(#[from] GradMatchError),

    #[error("No gradient recorded for {variable}")]
    MissingGradient { variable: &'static str },

    #[error("Failed to write report: {0}")]
    Io(#[from] std::io::Error),
}
