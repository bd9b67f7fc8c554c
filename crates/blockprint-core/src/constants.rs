//! Compiled defaults for the mining pipeline.

/// Minimum number of same-signature siblings that form a repeat group.
pub const DEFAULT_MIN_K: usize = 3;

/// Keep only the outermost template of a nested family.
pub const DEFAULT_ONLY_OUTER_TEMPLATES: bool = true;

/// Cap on identical slot-path insertions per repeat group.
pub const DEFAULT_MAX_PER_INSTANCE: usize = 2;

/// Minimum internal depth at least one instance of a template must reach.
pub const DEFAULT_MIN_INTERNAL_DEPTH: u32 = 3;

/// Maximum number of example slot paths kept per template.
pub const DEFAULT_MAX_EXAMPLES: usize = 5;

/// Templates with fewer instances than this skip the orientation check.
pub const DEFAULT_ORIENTATION_MIN_INSTANCES: usize = 2;

/// Variance (px²) under which both axes count as "not spread out".
pub const DEFAULT_ORIENTATION_EPSILON: f64 = 4.0;

/// Prefix of every signature id.
pub const SIG_ID_PREFIX: &str = "sig:";

/// Prefix of every stable node key.
pub const NODE_KEY_PREFIX: &str = "node:";

/// Prefix of a content anchor digest.
pub const CONTENT_ANCHOR_PREFIX: &str = "txt:";

/// Project-level config file name.
pub const PROJECT_CONFIG_FILE: &str = "blockprint.toml";

/// Environment variable read by `init_tracing`.
pub const LOG_ENV_VAR: &str = "BLOCKPRINT_LOG";
