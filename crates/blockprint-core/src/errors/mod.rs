//! Error handling for blockprint.
//! One error enum per subsystem, `thiserror` only.

pub mod config_error;
pub mod error_code;
pub mod pipeline_error;
pub mod snapshot_error;

pub use config_error::ConfigError;
pub use error_code::BlockprintErrorCode;
pub use pipeline_error::PipelineError;
pub use snapshot_error::SnapshotError;
