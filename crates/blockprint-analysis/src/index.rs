//! Read-only index over a snapshot: adjacency, signatures, sibling ranks and
//! path lookup. Every later stage resolves nodes through this index.

use blockprint_core::hashing::digest;
use blockprint_core::types::collections::{FxHashMap, FxHashSet};
use serde::Serialize;

use crate::identity;
use crate::signature::Signature;
use crate::snapshot::{NodeRecord, Snapshot};

/// Position of a record in the snapshot.
pub type NodeIdx = usize;

/// Rank of a node among siblings that share its signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SiblingRank {
    /// Zero-based position among same-signature siblings.
    pub rank: usize,
    /// Number of same-signature siblings, the node included.
    pub total: usize,
}

impl Default for SiblingRank {
    fn default() -> Self {
        Self { rank: 0, total: 1 }
    }
}

pub struct SnapshotIndex<'s> {
    snapshot: &'s Snapshot,
    by_path: FxHashMap<&'s str, NodeIdx>,
    parents: Vec<Option<NodeIdx>>,
    children: Vec<Vec<NodeIdx>>,
    signatures: Vec<Signature>,
    sig_ids: Vec<String>,
    ranks: Vec<SiblingRank>,
    pathless: usize,
}

impl<'s> SnapshotIndex<'s> {
    /// Index a snapshot. Never fails: broken linkage degrades to roots and
    /// skipped children.
    pub fn build(snapshot: &'s Snapshot) -> Self {
        let records = snapshot.records();
        let n = records.len();

        let mut by_id: FxHashMap<&'s str, NodeIdx> = FxHashMap::default();
        by_id.reserve(n);
        for (i, rec) in records.iter().enumerate() {
            by_id.insert(rec.node_id.as_str(), i);
        }

        let mut by_path: FxHashMap<&'s str, NodeIdx> = FxHashMap::default();
        let mut pathless = 0usize;
        for (i, rec) in records.iter().enumerate() {
            match rec.path() {
                Some(p) => {
                    by_path.entry(p).or_insert(i);
                }
                None => pathless += 1,
            }
        }

        let parents: Vec<Option<NodeIdx>> = records
            .iter()
            .enumerate()
            .map(|(i, rec)| {
                let pid = rec.parent_id.as_deref()?;
                let p = *by_id.get(pid)?;
                (p != i).then_some(p)
            })
            .collect();

        let children = build_children(records, &by_id, &parents);

        let signatures: Vec<Signature> = (0..n)
            .map(|i| Signature::compute(&records[i], children[i].iter().map(|&c| &records[c])))
            .collect();
        let sig_ids: Vec<String> = signatures.iter().map(Signature::sig_id).collect();

        let mut ranks = vec![SiblingRank::default(); n];
        for kids in &children {
            let mut groups: FxHashMap<&str, Vec<NodeIdx>> = FxHashMap::default();
            for &k in kids {
                groups.entry(sig_ids[k].as_str()).or_default().push(k);
            }
            for members in groups.values() {
                for (rank, &k) in members.iter().enumerate() {
                    ranks[k] = SiblingRank {
                        rank,
                        total: members.len(),
                    };
                }
            }
        }

        tracing::debug!(
            node_count = n,
            pathless_nodes = pathless,
            roots = parents.iter().filter(|p| p.is_none()).count(),
            "snapshot indexed"
        );

        Self {
            snapshot,
            by_path,
            parents,
            children,
            signatures,
            sig_ids,
            ranks,
            pathless,
        }
    }

    pub fn snapshot(&self) -> &'s Snapshot {
        self.snapshot
    }

    pub fn len(&self) -> usize {
        self.parents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }

    pub fn record(&self, idx: NodeIdx) -> &'s NodeRecord {
        &self.snapshot.records()[idx]
    }

    /// First record carrying exactly this path.
    pub fn lookup_path(&self, path: &str) -> Option<NodeIdx> {
        self.by_path.get(path).copied()
    }

    pub fn parent(&self, idx: NodeIdx) -> Option<NodeIdx> {
        self.parents[idx]
    }

    pub fn children(&self, idx: NodeIdx) -> &[NodeIdx] {
        &self.children[idx]
    }

    /// Nodes that have at least one child, in record order.
    pub fn parents_with_children(&self) -> impl Iterator<Item = NodeIdx> + '_ {
        (0..self.len()).filter(move |&i| !self.children[i].is_empty())
    }

    pub fn signature(&self, idx: NodeIdx) -> &Signature {
        &self.signatures[idx]
    }

    pub fn sig_id(&self, idx: NodeIdx) -> &str {
        &self.sig_ids[idx]
    }

    pub fn rank(&self, idx: NodeIdx) -> SiblingRank {
        self.ranks[idx]
    }

    /// Records without a usable path.
    pub fn pathless_count(&self) -> usize {
        self.pathless
    }

    /// Signature ids from the root down to and including `idx`.
    ///
    /// A parent cycle ends the walk at the first revisited node.
    pub fn sig_path(&self, idx: NodeIdx) -> Vec<&str> {
        let mut path = Vec::new();
        let mut seen = FxHashSet::default();
        let mut cur = Some(idx);
        while let Some(i) = cur {
            if !seen.insert(i) {
                break;
            }
            path.push(self.sig_ids[i].as_str());
            cur = self.parents[i];
        }
        path.reverse();
        path
    }

    /// Stable key of a node: survives re-scans of the same structure and text.
    pub fn node_key(&self, idx: NodeIdx) -> String {
        let rec = self.record(idx);
        identity::stable_node_key(
            self.snapshot.doc_id(),
            &self.sig_path(idx),
            self.ranks[idx].rank,
            rec.content_anchor_seed.as_deref(),
        )
    }

    /// `idx` and all of its descendants, visited with an explicit stack.
    /// Each node is yielded once even if child links form a cycle.
    pub fn subtree(&self, idx: NodeIdx) -> Subtree<'_, 's> {
        Subtree {
            index: self,
            stack: vec![idx],
            seen: FxHashSet::default(),
        }
    }

    pub fn view(&self, idx: NodeIdx) -> NodeView<'_, 's> {
        NodeView { index: self, idx }
    }

    /// Digest of every record's path and signature, in record order.
    pub fn fingerprint(&self) -> String {
        let mut buf = String::new();
        for (i, sig) in self.sig_ids.iter().enumerate() {
            buf.push_str(self.record(i).path().unwrap_or(""));
            buf.push('|');
            buf.push_str(sig);
            buf.push('\n');
        }
        digest(&buf)
    }
}

/// Parent → ordered children.
///
/// A parent's `children_ids` order wins; records that name the parent but are
/// not listed follow in record order. A node only ever appears under the
/// parent its own `parent_id` names.
fn build_children(
    records: &[NodeRecord],
    by_id: &FxHashMap<&str, NodeIdx>,
    parents: &[Option<NodeIdx>],
) -> Vec<Vec<NodeIdx>> {
    let n = records.len();
    let mut children: Vec<Vec<NodeIdx>> = vec![Vec::new(); n];
    let mut placed = vec![false; n];

    for (p, rec) in records.iter().enumerate() {
        for cid in &rec.children_ids {
            let Some(&c) = by_id.get(cid.as_str()) else {
                tracing::debug!(parent = %rec.node_id, child = %cid, "unknown child id skipped");
                continue;
            };
            if parents[c] == Some(p) && !placed[c] {
                placed[c] = true;
                children[p].push(c);
            }
        }
    }

    for c in 0..n {
        if let Some(p) = parents[c] {
            if !placed[c] {
                placed[c] = true;
                children[p].push(c);
            }
        }
    }

    children
}

/// Iterator over a subtree; see [`SnapshotIndex::subtree`].
pub struct Subtree<'i, 's> {
    index: &'i SnapshotIndex<'s>,
    stack: Vec<NodeIdx>,
    seen: FxHashSet<NodeIdx>,
}

impl Iterator for Subtree<'_, '_> {
    type Item = NodeIdx;

    fn next(&mut self) -> Option<NodeIdx> {
        while let Some(i) = self.stack.pop() {
            if !self.seen.insert(i) {
                continue;
            }
            self.stack.extend(self.index.children(i).iter().rev());
            return Some(i);
        }
        None
    }
}

/// A node plus the index it lives in; what feature detectors receive.
#[derive(Clone, Copy)]
pub struct NodeView<'i, 's> {
    index: &'i SnapshotIndex<'s>,
    idx: NodeIdx,
}

impl<'i, 's> NodeView<'i, 's> {
    pub fn idx(&self) -> NodeIdx {
        self.idx
    }

    pub fn record(&self) -> &'s NodeRecord {
        self.index.record(self.idx)
    }

    pub fn sig_id(&self) -> &'i str {
        self.index.sig_id(self.idx)
    }

    pub fn parent(&self) -> Option<NodeView<'i, 's>> {
        self.index.parent(self.idx).map(|p| self.index.view(p))
    }

    pub fn children(&self) -> impl Iterator<Item = NodeView<'i, 's>> + 'i {
        let index = self.index;
        index.children(self.idx).iter().map(move |&c| index.view(c))
    }

    /// This node and everything below it, depth-first.
    pub fn descendants(&self) -> impl Iterator<Item = NodeView<'i, 's>> + 'i {
        let index = self.index;
        index.subtree(self.idx).map(move |i| index.view(i))
    }
}

impl std::fmt::Debug for NodeView<'_, '_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeView")
            .field("idx", &self.idx)
            .field("node_id", &self.record().node_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(id: &str, parent: Option<&str>, tag: &str, path: Option<&str>) -> NodeRecord {
        NodeRecord {
            parent_id: parent.map(String::from),
            xpath: path.map(String::from),
            ..NodeRecord::new(id, tag)
        }
    }

    fn snapshot(records: Vec<NodeRecord>) -> Snapshot {
        Snapshot::new(Some("doc".into()), records).unwrap()
    }

    #[test]
    fn children_follow_listed_order_then_record_order() {
        let snap = snapshot(vec![
            NodeRecord {
                children_ids: vec!["c".into(), "b".into(), "ghost".into()],
                ..rec("a", None, "ul", Some("/ul[1]"))
            },
            rec("b", Some("a"), "li", Some("/ul[1]/li[1]")),
            rec("c", Some("a"), "li", Some("/ul[1]/li[2]")),
            rec("d", Some("a"), "li", Some("/ul[1]/li[3]")),
        ]);
        let index = SnapshotIndex::build(&snap);
        assert_eq!(index.children(0), &[2, 1, 3]);
    }

    #[test]
    fn listed_child_with_other_parent_is_not_adopted() {
        let snap = snapshot(vec![
            NodeRecord {
                children_ids: vec!["c".into()],
                ..rec("a", None, "div", None)
            },
            rec("b", None, "div", None),
            rec("c", Some("b"), "span", None),
        ]);
        let index = SnapshotIndex::build(&snap);
        assert!(index.children(0).is_empty());
        assert_eq!(index.children(1), &[2]);
    }

    #[test]
    fn unknown_parent_is_root() {
        let snap = snapshot(vec![rec("a", Some("missing"), "div", None)]);
        let index = SnapshotIndex::build(&snap);
        assert_eq!(index.parent(0), None);
        assert_eq!(index.sig_path(0).len(), 1);
    }

    #[test]
    fn ranks_among_same_signature_siblings() {
        let snap = snapshot(vec![
            rec("p", None, "ul", None),
            rec("l1", Some("p"), "li", None),
            rec("x", Some("p"), "hr", None),
            rec("l2", Some("p"), "li", None),
            rec("l3", Some("p"), "li", None),
        ]);
        let index = SnapshotIndex::build(&snap);
        assert_eq!(index.rank(1), SiblingRank { rank: 0, total: 3 });
        assert_eq!(index.rank(3), SiblingRank { rank: 1, total: 3 });
        assert_eq!(index.rank(4), SiblingRank { rank: 2, total: 3 });
        assert_eq!(index.rank(2), SiblingRank { rank: 0, total: 1 });
        assert_eq!(index.rank(0), SiblingRank::default());
    }

    #[test]
    fn sig_path_runs_root_to_node() {
        let snap = snapshot(vec![
            rec("r", None, "html", None),
            rec("b", Some("r"), "body", None),
            rec("d", Some("b"), "div", None),
        ]);
        let index = SnapshotIndex::build(&snap);
        let path = index.sig_path(2);
        assert_eq!(path, vec![index.sig_id(0), index.sig_id(1), index.sig_id(2)]);
    }

    #[test]
    fn parent_cycle_is_guarded() {
        let snap = snapshot(vec![
            rec("a", Some("b"), "div", None),
            rec("b", Some("a"), "div", None),
        ]);
        let index = SnapshotIndex::build(&snap);
        assert_eq!(index.sig_path(0).len(), 2);
        assert_eq!(index.subtree(0).count(), 2);
    }

    #[test]
    fn path_lookup_first_record_wins() {
        let snap = snapshot(vec![
            rec("a", None, "div", Some("/div[1]")),
            rec("b", None, "div", Some("/div[1]")),
            rec("c", None, "div", None),
        ]);
        let index = SnapshotIndex::build(&snap);
        assert_eq!(index.lookup_path("/div[1]"), Some(0));
        assert_eq!(index.pathless_count(), 1);
    }

    #[test]
    fn subtree_is_preorder() {
        let snap = snapshot(vec![
            rec("r", None, "div", None),
            rec("a", Some("r"), "p", None),
            rec("a1", Some("a"), "em", None),
            rec("b", Some("r"), "p", None),
        ]);
        let index = SnapshotIndex::build(&snap);
        let order: Vec<_> = index.subtree(0).collect();
        assert_eq!(order, vec![0, 1, 2, 3]);
        let view = index.view(1);
        assert_eq!(view.parent().map(|p| p.idx()), Some(0));
        assert_eq!(view.children().map(|c| c.record().node_id.clone()).collect::<Vec<_>>(), vec!["a1"]);
    }

    #[test]
    fn fingerprint_tracks_structure() {
        let a = snapshot(vec![rec("r", None, "div", Some("/div[1]"))]);
        let b = snapshot(vec![rec("other-id", None, "div", Some("/div[1]"))]);
        let c = snapshot(vec![rec("r", None, "section", Some("/section[1]"))]);
        let fa = SnapshotIndex::build(&a).fingerprint();
        assert_eq!(fa, SnapshotIndex::build(&b).fingerprint());
        assert_ne!(fa, SnapshotIndex::build(&c).fingerprint());
    }
}
