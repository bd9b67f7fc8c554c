//! Structured field names used in tracing events across the pipeline.
//!
//! Using consistent names keeps log queries stable across stages.

/// Records in the input snapshot.
pub const NODE_COUNT: &str = "node_count";

/// Records without a usable path.
pub const PATHLESS_NODES: &str = "pathless_nodes";

/// Repeat groups that reached the repetition threshold.
pub const REPEAT_GROUPS: &str = "repeat_groups";

/// Templates entering or leaving a stage.
pub const TEMPLATE_COUNT: &str = "template_count";

/// Templates removed by a stage.
pub const TEMPLATES_REMOVED: &str = "templates_removed";

/// Wall time of a stage in microseconds.
pub const STAGE_TIME_US: &str = "stage_time_us";
