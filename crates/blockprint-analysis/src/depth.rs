//! Internal depth filter: drop templates whose blocks are all shallow.

use crate::index::{NodeIdx, SnapshotIndex};
use crate::template::{FilterOutcome, Template, TemplateSet};

/// Depth of the deepest descendant of `idx`, relative to `idx`.
///
/// Uses the records' `depth` values, so the result is never negative even if
/// a descendant reports a smaller depth than its ancestor.
pub fn internal_depth(index: &SnapshotIndex<'_>, idx: NodeIdx) -> u32 {
    let own = index.record(idx).depth;
    let deepest = index
        .subtree(idx)
        .map(|i| index.record(i).depth)
        .max()
        .unwrap_or(own);
    deepest.saturating_sub(own)
}

/// Best internal depth over a template's resolvable instances.
pub fn best_internal_depth(index: &SnapshotIndex<'_>, template: &Template) -> Option<u32> {
    template
        .instances
        .iter()
        .filter_map(|instance| {
            let slot = index.lookup_path(instance);
            if slot.is_none() {
                tracing::debug!(
                    template = %template.template_path,
                    instance = %instance,
                    "instance does not resolve to a node"
                );
            }
            slot
        })
        .map(|slot| internal_depth(index, slot))
        .max()
}

/// Keep templates with at least one instance reaching `min_internal_depth`.
///
/// Templates with no resolvable instance are dropped.
pub fn filter_by_internal_depth(
    set: TemplateSet,
    index: &SnapshotIndex<'_>,
    min_internal_depth: u32,
) -> FilterOutcome {
    let outcome = set.partition(|template| {
        best_internal_depth(index, template).is_some_and(|d| d >= min_internal_depth)
    });
    for path in &outcome.dropped {
        tracing::debug!(template = %path, min_internal_depth, "template too shallow");
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{NodeRecord, Snapshot};

    fn node(id: &str, parent: Option<&str>, depth: u32, path: Option<&str>) -> NodeRecord {
        NodeRecord {
            parent_id: parent.map(String::from),
            depth,
            xpath: path.map(String::from),
            ..NodeRecord::new(id, "div")
        }
    }

    fn block() -> Snapshot {
        Snapshot::new(
            None,
            vec![
                node("slot", None, 4, Some("/a/b[1]")),
                node("c1", Some("slot"), 5, None),
                node("c2", Some("c1"), 6, None),
                node("c3", Some("slot"), 5, None),
                node("flat", None, 4, Some("/a/b[2]")),
            ],
        )
        .unwrap()
    }

    #[test]
    fn depth_is_relative_to_slot() {
        let snap = block();
        let index = SnapshotIndex::build(&snap);
        assert_eq!(internal_depth(&index, 0), 2);
        assert_eq!(internal_depth(&index, 1), 1);
        assert_eq!(internal_depth(&index, 4), 0);
    }

    #[test]
    fn inconsistent_depths_clamp_to_zero() {
        let snap = Snapshot::new(
            None,
            vec![node("p", None, 9, None), node("c", Some("p"), 3, None)],
        )
        .unwrap();
        let index = SnapshotIndex::build(&snap);
        assert_eq!(internal_depth(&index, 0), 0);
    }

    #[test]
    fn best_instance_decides() {
        let snap = block();
        let index = SnapshotIndex::build(&snap);
        let mut t = Template::new("/a/b[*]");
        t.instances.insert("/a/b[1]".into());
        t.instances.insert("/a/b[2]".into());
        t.instances.insert("/a/b[9]".into());
        assert_eq!(best_internal_depth(&index, &t), Some(2));

        let set: TemplateSet = std::iter::once(t).collect();
        assert_eq!(filter_by_internal_depth(set.clone(), &index, 2).kept.len(), 1);
        let outcome = filter_by_internal_depth(set, &index, 3);
        assert!(outcome.kept.is_empty());
        assert_eq!(outcome.dropped, vec!["/a/b[*]"]);
    }

    #[test]
    fn unresolvable_template_is_dropped() {
        let snap = block();
        let index = SnapshotIndex::build(&snap);
        let mut t = Template::new("/x/y[*]");
        t.instances.insert("/x/y[1]".into());
        let set: TemplateSet = std::iter::once(t).collect();
        assert!(filter_by_internal_depth(set, &index, 0).kept.is_empty());
    }
}
