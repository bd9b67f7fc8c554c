use std::path::PathBuf;

use blockprint_core::config::{CliOverrides, DominancePolicy, OrientationMode};
use clap::Parser;

/// Mine repeated structural blocks from a document snapshot.
#[derive(Debug, Parser)]
#[command(name = "blockprint", version)]
pub struct Cli {
    /// Snapshot JSON: `{"doc_id": ..., "records": [...]}`
    pub snapshot: PathBuf,

    /// Directory holding `blockprint.toml` (defaults to the current directory)
    #[arg(long, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    /// Minimum same-signature siblings that form a repeat group
    #[arg(long, value_name = "N")]
    pub min_k: Option<usize>,

    /// Minimum internal depth the deepest instance must reach
    #[arg(long, value_name = "N")]
    pub min_internal_depth: Option<u32>,

    /// Keep nested templates instead of only the outermost ones
    #[arg(long)]
    pub all_templates: bool,

    /// Dominance policy: covered | shape-only
    #[arg(long, value_name = "POLICY")]
    pub dominance: Option<DominancePolicy>,

    /// Required list layout: vertical | horizontal | none
    #[arg(long, value_name = "MODE")]
    pub orientation: Option<OrientationMode>,

    /// Include per-parent group summaries and print a one-line report to stderr
    #[arg(long)]
    pub summary: bool,
}

impl Cli {
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            min_k: self.min_k,
            min_internal_depth: self.min_internal_depth,
            only_outer_templates: self.all_templates.then_some(false),
            dominance_policy: self.dominance,
            orientation_mode: self.orientation,
        }
    }
}
