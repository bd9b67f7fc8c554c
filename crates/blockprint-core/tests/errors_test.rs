//! Tests for error codes and conversions.

use blockprint_core::errors::{BlockprintErrorCode, ConfigError, PipelineError, SnapshotError};

#[test]
fn test_snapshot_error_codes() {
    let err = SnapshotError::DuplicateNodeId {
        node_id: "n1".to_string(),
        index: 4,
    };
    assert_eq!(err.error_code(), "DUPLICATE_NODE");
    assert_eq!(err.coded_string(), "[DUPLICATE_NODE] Duplicate node id n1 at record 4");

    assert_eq!(SnapshotError::MissingRecords.error_code(), "SNAPSHOT_ERROR");
}

#[test]
fn test_pipeline_error_delegates_code() {
    let err: PipelineError = ConfigError::InvalidValue {
        field: "orientation.mode".to_string(),
        message: "bad".to_string(),
    }
    .into();
    assert_eq!(err.error_code(), "CONFIG_ERROR");

    let err: PipelineError = SnapshotError::Io {
        path: "x.json".to_string(),
        message: "gone".to_string(),
    }
    .into();
    assert_eq!(err.error_code(), "SNAPSHOT_IO");
    assert!(err.to_string().contains("x.json"));
}

#[test]
fn test_output_error_code() {
    let err = PipelineError::Output {
        message: "broken pipe".to_string(),
    };
    assert_eq!(err.coded_string(), "[OUTPUT_ERROR] Failed to write output: broken pipe");
}
