//! Orientation filter configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_ORIENTATION_EPSILON, DEFAULT_ORIENTATION_MIN_INSTANCES};
use crate::errors::ConfigError;

/// Which list layout a template must not contradict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrientationMode {
    /// Drop templates whose instances are laid out horizontally.
    #[default]
    Vertical,
    /// Drop templates whose instances are laid out vertically.
    Horizontal,
    /// Keep everything.
    None,
}

impl OrientationMode {
    pub fn name(self) -> &'static str {
        match self {
            Self::Vertical => "vertical",
            Self::Horizontal => "horizontal",
            Self::None => "none",
        }
    }
}

impl fmt::Display for OrientationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OrientationMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vertical" => Ok(Self::Vertical),
            "horizontal" => Ok(Self::Horizontal),
            "none" | "off" => Ok(Self::None),
            other => Err(ConfigError::InvalidValue {
                field: "orientation.mode".to_string(),
                message: format!("unknown mode '{other}' (expected vertical | horizontal | none)"),
            }),
        }
    }
}

/// Configuration for the geometric orientation filter.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct OrientationConfig {
    /// Required layout. Default: vertical.
    pub mode: Option<OrientationMode>,
    /// Templates with fewer instances bypass the filter. Default: 2.
    pub min_instances: Option<usize>,
    /// Variance under which both axes count as clustered. Default: 4.0.
    pub epsilon: Option<f64>,
}

impl OrientationConfig {
    pub fn effective_mode(&self) -> OrientationMode {
        self.mode.unwrap_or_default()
    }

    pub fn effective_min_instances(&self) -> usize {
        self.min_instances
            .unwrap_or(DEFAULT_ORIENTATION_MIN_INSTANCES)
    }

    pub fn effective_epsilon(&self) -> f64 {
        self.epsilon.unwrap_or(DEFAULT_ORIENTATION_EPSILON)
    }
}
