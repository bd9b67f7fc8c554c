//! Structured error codes for callers that report failures as text.

/// Every blockprint error enum maps to a stable, machine-readable code.
pub trait BlockprintErrorCode {
    /// Returns the error code string (e.g., "SNAPSHOT_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted error string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const SNAPSHOT_ERROR: &str = "SNAPSHOT_ERROR";
pub const SNAPSHOT_IO: &str = "SNAPSHOT_IO";
pub const DUPLICATE_NODE: &str = "DUPLICATE_NODE";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const OUTPUT_ERROR: &str = "OUTPUT_ERROR";
