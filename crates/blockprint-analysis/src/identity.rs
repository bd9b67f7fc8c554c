//! Stable node keys that survive re-scans of the same document.

use blockprint_core::constants::{CONTENT_ANCHOR_PREFIX, NODE_KEY_PREFIX};
use blockprint_core::hashing::digest;
use serde_json::json;

/// Key a node by document, signature path, rank among same-signature siblings,
/// and a digest of its leading text.
///
/// Blank or missing text gives a `null` anchor; the key then rests on
/// structure alone.
pub fn stable_node_key(
    doc_id: Option<&str>,
    sig_path: &[&str],
    rank: usize,
    content_anchor_seed: Option<&str>,
) -> String {
    let anchor = content_anchor_seed
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| format!("{CONTENT_ANCHOR_PREFIX}{}", digest(s)));

    // `json!` builds a BTreeMap-backed object, so keys come out sorted.
    let canonical = json!({
        "doc": doc_id,
        "sigpath": sig_path,
        "rank_among_same_sig": rank,
        "content_anchor": anchor,
    });

    format!("{NODE_KEY_PREFIX}{}", digest(&canonical.to_string()))
}
