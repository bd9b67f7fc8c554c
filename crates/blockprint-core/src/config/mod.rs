//! Configuration system for blockprint.
//! TOML-based, 3-layer resolution: CLI > env > project file > defaults.

pub mod blockprint_config;
pub mod mining_config;
pub mod orientation_config;

pub use blockprint_config::{BlockprintConfig, CliOverrides};
pub use mining_config::{DominancePolicy, MiningConfig};
pub use orientation_config::{OrientationConfig, OrientationMode};
