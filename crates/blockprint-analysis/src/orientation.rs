//! Orientation filter: drop templates laid out against the wanted list axis.

use std::fmt;

use blockprint_core::config::OrientationMode;
use serde::Serialize;

use crate::index::SnapshotIndex;
use crate::template::{FilterOutcome, Template, TemplateSet};

/// Layout of a template's instances, from the spread of their rect centers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    Clustered,
    Horizontal,
    Vertical,
    Mixed,
}

impl Orientation {
    pub fn name(self) -> &'static str {
        match self {
            Self::Clustered => "clustered",
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
            Self::Mixed => "mixed",
        }
    }

    /// Whether a template with this layout survives `mode`.
    pub fn allowed_by(self, mode: OrientationMode) -> bool {
        match mode {
            OrientationMode::Vertical => self != Self::Horizontal,
            OrientationMode::Horizontal => self != Self::Vertical,
            OrientationMode::None => true,
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Population variance; `0.0` for an empty slice.
fn variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n
}

/// Classify a set of centers. `None` with fewer than two.
pub fn classify_orientation(centers: &[(f64, f64)], epsilon: f64) -> Option<Orientation> {
    if centers.len() < 2 {
        return None;
    }
    let xs: Vec<f64> = centers.iter().map(|c| c.0).collect();
    let ys: Vec<f64> = centers.iter().map(|c| c.1).collect();
    let (var_x, var_y) = (variance(&xs), variance(&ys));

    let orientation = if var_x < epsilon && var_y < epsilon {
        Orientation::Clustered
    } else if var_x > var_y {
        Orientation::Horizontal
    } else if var_y > var_x {
        Orientation::Vertical
    } else {
        Orientation::Mixed
    };
    Some(orientation)
}

/// Rect centers of a template's resolvable instances, in instance order.
pub fn instance_centers(index: &SnapshotIndex<'_>, template: &Template) -> Vec<(f64, f64)> {
    template
        .instances
        .iter()
        .filter_map(|instance| index.lookup_path(instance))
        .filter_map(|slot| index.record(slot).usable_rect())
        .map(|rect| rect.center())
        .collect()
}

/// Orientation of one template, or `None` if fewer than two centers resolve.
pub fn template_orientation(
    index: &SnapshotIndex<'_>,
    template: &Template,
    epsilon: f64,
) -> Option<Orientation> {
    classify_orientation(&instance_centers(index, template), epsilon)
}

/// Drop templates whose layout contradicts `mode`.
///
/// Templates with fewer than `min_instances` instances, or fewer than two
/// usable rects, pass unchanged.
pub fn filter_by_orientation(
    set: TemplateSet,
    index: &SnapshotIndex<'_>,
    mode: OrientationMode,
    min_instances: usize,
    epsilon: f64,
) -> FilterOutcome {
    if mode == OrientationMode::None {
        return FilterOutcome {
            kept: set,
            dropped: Vec::new(),
        };
    }

    set.partition(|template| {
        if template.instance_count() < min_instances {
            return true;
        }
        match template_orientation(index, template, epsilon) {
            Some(orientation) if !orientation.allowed_by(mode) => {
                tracing::debug!(
                    template = %template.template_path,
                    %orientation,
                    %mode,
                    "template dropped by orientation"
                );
                false
            }
            _ => true,
        }
    })
}
