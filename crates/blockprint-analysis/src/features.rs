//! Per-template feature summaries from pluggable block detectors.
//!
//! Detectors look at the block around each instance (the slot's parent) and
//! report which cues they found; a template's summary is the OR over its
//! instances.

use blockprint_core::types::collections::BTreeMap;
use serde::Serialize;

use crate::index::{NodeView, SnapshotIndex};
use crate::template::TemplateSet;

/// Cues found in a block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct BlockFeatures {
    pub has_related_keyword: bool,
    pub has_microaction: bool,
    pub has_author: bool,
    pub has_avatar: bool,
    pub has_timestamp: bool,
    pub has_comment_count_header: bool,
}

impl BlockFeatures {
    /// OR `other` into `self`.
    pub fn merge(&mut self, other: BlockFeatures) {
        self.has_related_keyword |= other.has_related_keyword;
        self.has_microaction |= other.has_microaction;
        self.has_author |= other.has_author;
        self.has_avatar |= other.has_avatar;
        self.has_timestamp |= other.has_timestamp;
        self.has_comment_count_header |= other.has_comment_count_header;
    }

    /// All six cues set.
    pub fn is_complete(&self) -> bool {
        self.has_related_keyword
            && self.has_microaction
            && self.has_author
            && self.has_avatar
            && self.has_timestamp
            && self.has_comment_count_header
    }
}

/// Inspects a block and reports its cues.
pub trait FeatureDetector {
    fn detect(&self, root: NodeView<'_, '_>) -> BlockFeatures;
}

impl<F> FeatureDetector for F
where
    F: Fn(NodeView<'_, '_>) -> BlockFeatures,
{
    fn detect(&self, root: NodeView<'_, '_>) -> BlockFeatures {
        self(root)
    }
}

/// Detector that never finds anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFeatures;

impl FeatureDetector for NoFeatures {
    fn detect(&self, _root: NodeView<'_, '_>) -> BlockFeatures {
        BlockFeatures::default()
    }
}

/// Feature summary for every template in `templates`.
///
/// Each resolvable instance is inspected through its parent (the slot itself
/// when it has none). Scanning a template stops once every cue is set.
pub fn summarize_features(
    templates: &TemplateSet,
    index: &SnapshotIndex<'_>,
    detector: &dyn FeatureDetector,
) -> BTreeMap<String, BlockFeatures> {
    let mut out = BTreeMap::new();
    for template in templates {
        let mut summary = BlockFeatures::default();
        for instance in &template.instances {
            let Some(slot) = index.lookup_path(instance) else {
                continue;
            };
            let view = index.view(slot);
            let root = view.parent().unwrap_or(view);
            summary.merge(detector.detect(root));
            if summary.is_complete() {
                break;
            }
        }
        out.insert(template.template_path.clone(), summary);
    }
    out
}
