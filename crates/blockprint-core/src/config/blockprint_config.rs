//! Top-level blockprint configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{DominancePolicy, MiningConfig, OrientationConfig, OrientationMode};
use crate::constants::PROJECT_CONFIG_FILE;
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`BLOCKPRINT_*`)
/// 3. Project config (`blockprint.toml` in the given directory)
/// 4. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct BlockprintConfig {
    pub mining: MiningConfig,
    pub orientation: OrientationConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub min_k: Option<usize>,
    pub min_internal_depth: Option<u32>,
    pub only_outer_templates: Option<bool>,
    pub dominance_policy: Option<DominancePolicy>,
    pub orientation_mode: Option<OrientationMode>,
}

impl BlockprintConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        Self::apply_env_overrides(&mut config)?;

        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;

        tracing::debug!(
            min_k = config.mining.effective_min_k(),
            min_internal_depth = config.mining.effective_min_internal_depth(),
            only_outer = config.mining.effective_only_outer_templates(),
            policy = %config.mining.effective_dominance_policy(),
            orientation = %config.orientation.effective_mode(),
            "configuration resolved"
        );

        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &BlockprintConfig) -> Result<(), ConfigError> {
        if let Some(min_k) = config.mining.min_k {
            if min_k < 2 {
                return Err(ConfigError::ValidationFailed {
                    field: "mining.min_k".to_string(),
                    message: "must be at least 2".to_string(),
                });
            }
        }
        if config.mining.max_per_instance == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "mining.max_per_instance".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if config.mining.max_examples == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "mining.max_examples".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if let Some(eps) = config.orientation.epsilon {
            if !eps.is_finite() || eps < 0.0 {
                return Err(ConfigError::ValidationFailed {
                    field: "orientation.epsilon".to_string(),
                    message: "must be a finite, non-negative number".to_string(),
                });
            }
        }
        if let Some(min_instances) = config.orientation.min_instances {
            if min_instances < 2 {
                return Err(ConfigError::ValidationFailed {
                    field: "orientation.min_instances".to_string(),
                    message: "must be at least 2".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored.
    fn merge_toml_file(config: &mut BlockprintConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: BlockprintConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins only where it has a value.
    fn merge(base: &mut BlockprintConfig, other: &BlockprintConfig) {
        let (b, o) = (&mut base.mining, &other.mining);
        if o.min_k.is_some() {
            b.min_k = o.min_k;
        }
        if o.only_outer_templates.is_some() {
            b.only_outer_templates = o.only_outer_templates;
        }
        if o.max_per_instance.is_some() {
            b.max_per_instance = o.max_per_instance;
        }
        if o.min_internal_depth.is_some() {
            b.min_internal_depth = o.min_internal_depth;
        }
        if o.max_examples.is_some() {
            b.max_examples = o.max_examples;
        }
        if o.dominance_policy.is_some() {
            b.dominance_policy = o.dominance_policy;
        }

        let (b, o) = (&mut base.orientation, &other.orientation);
        if o.mode.is_some() {
            b.mode = o.mode;
        }
        if o.min_instances.is_some() {
            b.min_instances = o.min_instances;
        }
        if o.epsilon.is_some() {
            b.epsilon = o.epsilon;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `BLOCKPRINT_MINING_MIN_K`, `BLOCKPRINT_ORIENTATION_MODE`, etc.
    /// Numeric values that fail to parse are ignored; unknown enum names are errors.
    fn apply_env_overrides(config: &mut BlockprintConfig) -> Result<(), ConfigError> {
        if let Some(v) = env_parse::<usize>("BLOCKPRINT_MINING_MIN_K") {
            config.mining.min_k = Some(v);
        }
        if let Some(v) = env_parse::<bool>("BLOCKPRINT_MINING_ONLY_OUTER_TEMPLATES") {
            config.mining.only_outer_templates = Some(v);
        }
        if let Some(v) = env_parse::<usize>("BLOCKPRINT_MINING_MAX_PER_INSTANCE") {
            config.mining.max_per_instance = Some(v);
        }
        if let Some(v) = env_parse::<u32>("BLOCKPRINT_MINING_MIN_INTERNAL_DEPTH") {
            config.mining.min_internal_depth = Some(v);
        }
        if let Ok(val) = std::env::var("BLOCKPRINT_MINING_DOMINANCE_POLICY") {
            config.mining.dominance_policy = Some(val.parse()?);
        }
        if let Ok(val) = std::env::var("BLOCKPRINT_ORIENTATION_MODE") {
            config.orientation.mode = Some(val.parse()?);
        }
        if let Some(v) = env_parse::<usize>("BLOCKPRINT_ORIENTATION_MIN_INSTANCES") {
            config.orientation.min_instances = Some(v);
        }
        Ok(())
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut BlockprintConfig, cli: &CliOverrides) {
        if let Some(v) = cli.min_k {
            config.mining.min_k = Some(v);
        }
        if let Some(v) = cli.min_internal_depth {
            config.mining.min_internal_depth = Some(v);
        }
        if let Some(v) = cli.only_outer_templates {
            config.mining.only_outer_templates = Some(v);
        }
        if let Some(v) = cli.dominance_policy {
            config.mining.dominance_policy = Some(v);
        }
        if let Some(v) = cli.orientation_mode {
            config.orientation.mode = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok()?.trim().parse().ok()
}
