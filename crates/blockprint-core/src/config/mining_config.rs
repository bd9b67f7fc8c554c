//! Repeat-mining configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_MAX_EXAMPLES, DEFAULT_MAX_PER_INSTANCE, DEFAULT_MIN_INTERNAL_DEPTH, DEFAULT_MIN_K,
    DEFAULT_ONLY_OUTER_TEMPLATES,
};
use crate::errors::ConfigError;

/// How an outer template is allowed to remove an inner one it dominates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DominancePolicy {
    /// Remove the inner template only when every one of its instances sits at
    /// or below some instance of the outer template.
    #[default]
    Covered,
    /// Remove the inner template on path shape alone.
    ShapeOnly,
}

impl DominancePolicy {
    pub fn name(self) -> &'static str {
        match self {
            Self::Covered => "covered",
            Self::ShapeOnly => "shape_only",
        }
    }
}

impl fmt::Display for DominancePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DominancePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "covered" => Ok(Self::Covered),
            "shape_only" => Ok(Self::ShapeOnly),
            other => Err(ConfigError::InvalidValue {
                field: "mining.dominance_policy".to_string(),
                message: format!("unknown policy '{other}' (expected covered | shape_only)"),
            }),
        }
    }
}

/// Configuration for sibling grouping, template pruning and depth filtering.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MiningConfig {
    /// Minimum same-signature siblings to form a repeat group. Default: 3.
    pub min_k: Option<usize>,
    /// Keep only outermost templates (dominance pruning). Default: true.
    pub only_outer_templates: Option<bool>,
    /// Cap on identical slot-path insertions per group. Default: 2.
    pub max_per_instance: Option<usize>,
    /// Minimum internal depth of the deepest instance. Default: 3.
    pub min_internal_depth: Option<u32>,
    /// Maximum examples kept per template. Default: 5.
    pub max_examples: Option<usize>,
    /// Dominance policy. Default: covered.
    pub dominance_policy: Option<DominancePolicy>,
}

impl MiningConfig {
    /// Returns the effective minimum repeat count, defaulting to 3.
    pub fn effective_min_k(&self) -> usize {
        self.min_k.unwrap_or(DEFAULT_MIN_K)
    }

    /// Returns whether dominance pruning runs, defaulting to true.
    pub fn effective_only_outer_templates(&self) -> bool {
        self.only_outer_templates
            .unwrap_or(DEFAULT_ONLY_OUTER_TEMPLATES)
    }

    /// Returns the effective per-group instance cap, defaulting to 2.
    pub fn effective_max_per_instance(&self) -> usize {
        self.max_per_instance.unwrap_or(DEFAULT_MAX_PER_INSTANCE)
    }

    /// Returns the effective minimum internal depth, defaulting to 3.
    pub fn effective_min_internal_depth(&self) -> u32 {
        self.min_internal_depth
            .unwrap_or(DEFAULT_MIN_INTERNAL_DEPTH)
    }

    /// Returns the effective example cap, defaulting to 5.
    pub fn effective_max_examples(&self) -> usize {
        self.max_examples.unwrap_or(DEFAULT_MAX_EXAMPLES)
    }

    /// Returns the effective dominance policy, defaulting to `Covered`.
    pub fn effective_dominance_policy(&self) -> DominancePolicy {
        self.dominance_policy.unwrap_or_default()
    }
}
