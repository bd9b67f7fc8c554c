//! Repeat group aggregation: same-signature siblings under one parent.

use blockprint_core::types::collections::{BTreeMap, FxHashMap};
use serde::Serialize;

use crate::index::{NodeIdx, SnapshotIndex};
use crate::template::{build_template, TemplateDraft, TemplateSet};

/// Siblings under one parent sharing a signature, at least `min_k` of them.
#[derive(Debug, Clone, Serialize)]
pub struct RepeatGroup {
    pub parent_id: String,
    pub sig_id: String,
    pub count: usize,
    /// Member node ids in sibling order.
    pub member_ids: Vec<String>,
    #[serde(skip)]
    pub members: Vec<NodeIdx>,
    /// Template this group generalizes to; `None` when no member has a path.
    pub template_path: Option<String>,
    #[serde(skip)]
    pub draft: Option<TemplateDraft>,
}

/// Everything the aggregator saw under one parent.
#[derive(Debug, Clone, Serialize)]
pub struct ParentSummary {
    pub parent_id: String,
    pub child_count: usize,
    pub sig_counts: BTreeMap<String, usize>,
    pub groups: Vec<RepeatGroup>,
}

impl ParentSummary {
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }
}

/// Group every parent's children by signature.
///
/// Parents are visited in record order. Groups below `min_k` are dropped; the
/// rest are ordered by descending count, then ascending sig id.
pub fn find_repeat_groups(index: &SnapshotIndex<'_>, min_k: usize) -> Vec<ParentSummary> {
    let mut summaries = Vec::new();

    for parent in index.parents_with_children() {
        let children = index.children(parent);

        let mut by_sig: FxHashMap<&str, Vec<NodeIdx>> = FxHashMap::default();
        for &child in children {
            by_sig.entry(index.sig_id(child)).or_default().push(child);
        }

        let sig_counts: BTreeMap<String, usize> = by_sig
            .iter()
            .map(|(sig, members)| (sig.to_string(), members.len()))
            .collect();

        let mut ranked: Vec<(&str, Vec<NodeIdx>)> = by_sig
            .into_iter()
            .filter(|(_, members)| members.len() >= min_k)
            .collect();
        ranked.sort_by(|a, b| b.1.len().cmp(&a.1.len()).then_with(|| a.0.cmp(b.0)));

        let parent_id = &index.record(parent).node_id;
        let groups = ranked
            .into_iter()
            .map(|(sig, members)| {
                let paths: Vec<&str> = members
                    .iter()
                    .filter_map(|&m| index.record(m).path())
                    .collect();
                if paths.len() < members.len() {
                    tracing::debug!(
                        parent = %parent_id,
                        sig,
                        pathless = members.len() - paths.len(),
                        "group members without a path skipped"
                    );
                }
                let draft = build_template(paths.as_slice());
                RepeatGroup {
                    parent_id: parent_id.clone(),
                    sig_id: sig.to_string(),
                    count: members.len(),
                    member_ids: members
                        .iter()
                        .map(|&m| index.record(m).node_id.clone())
                        .collect(),
                    members,
                    template_path: draft.as_ref().map(|d| d.template_path.clone()),
                    draft,
                }
            })
            .collect();

        summaries.push(ParentSummary {
            parent_id: parent_id.clone(),
            child_count: children.len(),
            sig_counts,
            groups,
        });
    }

    summaries
}

/// Fold every group's template draft into one template set.
pub fn aggregate_templates(
    summaries: &[ParentSummary],
    max_per_instance: usize,
    max_examples: usize,
) -> TemplateSet {
    let mut set = TemplateSet::new();
    for draft in summaries
        .iter()
        .flat_map(|s| &s.groups)
        .filter_map(|g| g.draft.as_ref())
    {
        set.absorb(draft, max_per_instance, max_examples);
    }
    set
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{NodeRecord, Snapshot};

    fn child(id: &str, parent: &str, tag: &str, path: Option<String>) -> NodeRecord {
        NodeRecord {
            parent_id: Some(parent.into()),
            xpath: path,
            ..NodeRecord::new(id, tag)
        }
    }

    fn list(n_li: usize, n_p: usize) -> Snapshot {
        let mut records = vec![NodeRecord {
            xpath: Some("/html/body/ul[1]".into()),
            ..NodeRecord::new("ul", "ul")
        }];
        for i in 0..n_li {
            records.push(child(&format!("li{i}"), "ul", "li", Some(format!("/html/body/ul[1]/li[{}]", i + 1))));
        }
        for i in 0..n_p {
            records.push(child(&format!("p{i}"), "ul", "p", Some(format!("/html/body/ul[1]/p[{}]", i + 1))));
        }
        Snapshot::new(None, records).unwrap()
    }

    #[test]
    fn below_threshold_forms_no_group() {
        let snap = list(2, 0);
        let index = SnapshotIndex::build(&snap);
        let summaries = find_repeat_groups(&index, 3);
        assert_eq!(summaries.len(), 1);
        assert!(summaries[0].groups.is_empty());
        assert_eq!(summaries[0].child_count, 2);
    }

    #[test]
    fn groups_sorted_by_count_then_sig() {
        let snap = list(3, 4);
        let index = SnapshotIndex::build(&snap);
        let summaries = find_repeat_groups(&index, 3);
        let groups = &summaries[0].groups;
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].count, 4);
        assert_eq!(groups[0].template_path.as_deref(), Some("/html/body/ul[1]/p[*]"));
        assert_eq!(groups[1].member_ids, vec!["li0", "li1", "li2"]);
        assert_eq!(summaries[0].sig_counts.values().sum::<usize>(), 7);
    }

    #[test]
    fn pathless_group_yields_no_template() {
        let mut records = vec![NodeRecord::new("ul", "ul")];
        for i in 0..3 {
            records.push(child(&format!("li{i}"), "ul", "li", None));
        }
        let snap = Snapshot::new(None, records).unwrap();
        let index = SnapshotIndex::build(&snap);
        let summaries = find_repeat_groups(&index, 3);
        assert_eq!(summaries[0].groups.len(), 1);
        assert!(summaries[0].groups[0].draft.is_none());
        assert!(aggregate_templates(&summaries, 2, 5).is_empty());
    }

    #[test]
    fn aggregate_covers_exact_members() {
        let snap = list(3, 0);
        let index = SnapshotIndex::build(&snap);
        let set = aggregate_templates(&find_repeat_groups(&index, 3), 2, 5);
        let t = set.get("/html/body/ul[1]/li[*]").unwrap();
        let expected: Vec<String> = (1..=3).map(|i| format!("/html/body/ul[1]/li[{i}]")).collect();
        assert_eq!(t.instances.iter().cloned().collect::<Vec<_>>(), expected);
    }
}
