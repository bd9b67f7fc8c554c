//! Snapshot input errors. These are the only fatal errors of a mining run.

use super::error_code::{self, BlockprintErrorCode};

/// The node-record collection is absent or malformed.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("Failed to read snapshot {path}: {message}")]
    Io { path: String, message: String },

    #[error("Snapshot parse error: {message}")]
    Parse { message: String },

    #[error("Snapshot has no `records` collection")]
    MissingRecords,

    #[error("Duplicate node id {node_id} at record {index}")]
    DuplicateNodeId { node_id: String, index: usize },
}

impl BlockprintErrorCode for SnapshotError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Io { .. } => error_code::SNAPSHOT_IO,
            Self::DuplicateNodeId { .. } => error_code::DUPLICATE_NODE,
            Self::Parse { .. } | Self::MissingRecords => error_code::SNAPSHOT_ERROR,
        }
    }
}
