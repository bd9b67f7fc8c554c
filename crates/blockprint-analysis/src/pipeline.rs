//! Top-level mining pipeline orchestrator.
//!
//! index → repeat groups → templates → dominance → depth → orientation.
//! Each stage consumes the previous stage's output by value.

use std::fmt;
use std::path::Path;
use std::time::{Duration, Instant};

use blockprint_core::config::{BlockprintConfig, DominancePolicy, OrientationMode};
use blockprint_core::errors::PipelineError;
use blockprint_core::tracing::metrics;
use serde::Serialize;

use crate::depth::filter_by_internal_depth;
use crate::dominance::{prune_dominated, Removal};
use crate::grouping::{aggregate_templates, find_repeat_groups, ParentSummary};
use crate::index::SnapshotIndex;
use crate::orientation::filter_by_orientation;
use crate::snapshot::Snapshot;
use crate::template::TemplateSet;

/// Resolved knobs for one pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct MiningSettings {
    pub min_k: usize,
    pub only_outer_templates: bool,
    pub max_per_instance: usize,
    pub min_internal_depth: u32,
    pub max_examples: usize,
    pub dominance_policy: DominancePolicy,
    pub orientation_mode: OrientationMode,
    pub orientation_min_instances: usize,
    pub orientation_epsilon: f64,
}

impl MiningSettings {
    pub fn from_config(config: &BlockprintConfig) -> Self {
        let (m, o) = (&config.mining, &config.orientation);
        Self {
            min_k: m.effective_min_k(),
            only_outer_templates: m.effective_only_outer_templates(),
            max_per_instance: m.effective_max_per_instance(),
            min_internal_depth: m.effective_min_internal_depth(),
            max_examples: m.effective_max_examples(),
            dominance_policy: m.effective_dominance_policy(),
            orientation_mode: o.effective_mode(),
            orientation_min_instances: o.effective_min_instances(),
            orientation_epsilon: o.effective_epsilon(),
        }
    }
}

impl Default for MiningSettings {
    fn default() -> Self {
        Self::from_config(&BlockprintConfig::default())
    }
}

/// What each stage did.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MiningDiagnostics {
    /// Records in the snapshot.
    pub node_count: usize,
    /// Records without a usable path.
    pub pathless_nodes: usize,
    /// Structural digest of the snapshot.
    pub fingerprint: String,
    /// Repeat groups at or above `min_k`.
    pub repeat_groups: usize,
    pub templates_built: usize,
    pub templates_after_dominance: usize,
    pub templates_after_depth: usize,
    pub templates_after_orientation: usize,
    pub dominance_removals: Vec<Removal>,
    pub depth_dropped: Vec<String>,
    pub orientation_dropped: Vec<String>,
    #[serde(skip)]
    pub elapsed: Duration,
}

impl MiningDiagnostics {
    /// Counters under their standard field names.
    pub fn as_fields(&self) -> [(&'static str, u64); 6] {
        [
            (metrics::NODE_COUNT, self.node_count as u64),
            (metrics::PATHLESS_NODES, self.pathless_nodes as u64),
            (metrics::REPEAT_GROUPS, self.repeat_groups as u64),
            (metrics::TEMPLATE_COUNT, self.templates_after_orientation as u64),
            (
                metrics::TEMPLATES_REMOVED,
                self.templates_built
                    .saturating_sub(self.templates_after_orientation) as u64,
            ),
            (metrics::STAGE_TIME_US, self.elapsed.as_micros() as u64),
        ]
    }
}

impl fmt::Display for MiningDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} nodes ({} without path), {} repeat groups, templates {} → {} (dominance) → {} (depth) → {} (orientation) in {:?}",
            self.node_count,
            self.pathless_nodes,
            self.repeat_groups,
            self.templates_built,
            self.templates_after_dominance,
            self.templates_after_depth,
            self.templates_after_orientation,
            self.elapsed,
        )
    }
}

/// Output of one pipeline run.
#[derive(Debug, Clone, Serialize)]
pub struct MiningResult {
    pub templates: TemplateSet,
    pub parents: Vec<ParentSummary>,
    pub diagnostics: MiningDiagnostics,
}

/// The mining pipeline.
pub struct MiningPipeline {
    settings: MiningSettings,
}

impl MiningPipeline {
    pub fn new(settings: MiningSettings) -> Self {
        Self { settings }
    }

    pub fn with_defaults() -> Self {
        Self::new(MiningSettings::default())
    }

    pub fn from_config(config: &BlockprintConfig) -> Self {
        Self::new(MiningSettings::from_config(config))
    }

    pub fn settings(&self) -> &MiningSettings {
        &self.settings
    }

    /// Index a snapshot and run every stage over it.
    pub fn mine(&self, snapshot: &Snapshot) -> MiningResult {
        let index = SnapshotIndex::build(snapshot);
        self.run(&index)
    }

    /// Read a snapshot file and mine it.
    pub fn mine_path(&self, path: &Path) -> Result<MiningResult, PipelineError> {
        let snapshot = Snapshot::from_path(path)?;
        Ok(self.mine(&snapshot))
    }

    /// Run every stage over an existing index.
    pub fn run(&self, index: &SnapshotIndex<'_>) -> MiningResult {
        let s = &self.settings;
        let start = Instant::now();
        let mut diagnostics = MiningDiagnostics {
            node_count: index.len(),
            pathless_nodes: index.pathless_count(),
            fingerprint: index.fingerprint(),
            ..Default::default()
        };

        // Phase 1: repeat groups + template induction
        let parents = find_repeat_groups(index, s.min_k);
        diagnostics.repeat_groups = parents.iter().map(ParentSummary::group_count).sum();
        let templates = aggregate_templates(&parents, s.max_per_instance, s.max_examples);
        diagnostics.templates_built = templates.len();

        // Phase 2: dominance
        let templates = if s.only_outer_templates {
            let outcome = prune_dominated(templates, s.dominance_policy);
            diagnostics.dominance_removals = outcome.removals;
            outcome.kept
        } else {
            templates
        };
        diagnostics.templates_after_dominance = templates.len();

        // Phase 3: internal depth
        let outcome = filter_by_internal_depth(templates, index, s.min_internal_depth);
        diagnostics.depth_dropped = outcome.dropped;
        let templates = outcome.kept;
        diagnostics.templates_after_depth = templates.len();

        // Phase 4: orientation
        let outcome = filter_by_orientation(
            templates,
            index,
            s.orientation_mode,
            s.orientation_min_instances,
            s.orientation_epsilon,
        );
        diagnostics.orientation_dropped = outcome.dropped;
        let templates = outcome.kept;
        diagnostics.templates_after_orientation = templates.len();

        diagnostics.elapsed = start.elapsed();
        tracing::info!(
            node_count = diagnostics.node_count,
            repeat_groups = diagnostics.repeat_groups,
            template_count = diagnostics.templates_after_orientation,
            stage_time_us = diagnostics.elapsed.as_micros() as u64,
            "mining complete"
        );

        MiningResult {
            templates,
            parents,
            diagnostics,
        }
    }
}
