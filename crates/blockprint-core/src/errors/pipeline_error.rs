//! Top-level error of a mining run.

use super::error_code::{self, BlockprintErrorCode};
use super::{ConfigError, SnapshotError};

/// Errors that abort a mining run.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to write output: {message}")]
    Output { message: String },
}

impl BlockprintErrorCode for PipelineError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Snapshot(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
            Self::Output { .. } => error_code::OUTPUT_ERROR,
        }
    }
}
