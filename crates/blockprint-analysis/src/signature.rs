//! Content-agnostic structural signatures.
//!
//! A signature looks at a node's tag, the *names* of its role/data/aria
//! attributes, and a coarse histogram of its direct children's tags. Text,
//! class names and grandchildren never contribute, so list rows that differ
//! only in content share a signature.

use std::collections::{BTreeMap, BTreeSet};

use blockprint_core::constants::SIG_ID_PREFIX;
use blockprint_core::hashing::digest;
use serde::{Deserialize, Serialize};

use crate::snapshot::NodeRecord;

/// Bucketed child count. Fine counts would split otherwise-identical rows
/// (a comment with 2 replies vs 3) into different groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CountBin {
    #[serde(rename = "0")]
    Zero,
    #[serde(rename = "1")]
    One,
    #[serde(rename = "2-4")]
    Few,
    #[serde(rename = "5+")]
    Many,
}

impl CountBin {
    pub fn from_count(n: usize) -> Self {
        match n {
            0 => Self::Zero,
            1 => Self::One,
            2..=4 => Self::Few,
            _ => Self::Many,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct AttrKeys {
    pub role: Option<String>,
    pub data_keys: BTreeSet<String>,
    pub aria_keys: BTreeSet<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ChildShape {
    pub child_tags_present: BTreeSet<String>,
    pub child_tag_bins: BTreeMap<String, CountBin>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Signature {
    pub tag: String,
    pub attr_keys: AttrKeys,
    pub child_shape: ChildShape,
}

impl Signature {
    /// Build the signature of `record` from its direct children.
    pub fn compute<'a>(
        record: &NodeRecord,
        children: impl IntoIterator<Item = &'a NodeRecord>,
    ) -> Self {
        let attr_keys = AttrKeys {
            role: record
                .role
                .as_deref()
                .map(|r| r.trim().to_ascii_lowercase())
                .filter(|r| !r.is_empty()),
            data_keys: record.data_keys.iter().cloned().collect(),
            aria_keys: record.aria_keys.iter().cloned().collect(),
        };

        let mut histogram: BTreeMap<String, usize> = BTreeMap::new();
        for child in children {
            *histogram.entry(normalize_tag(&child.tag)).or_insert(0) += 1;
        }

        let child_shape = ChildShape {
            child_tags_present: histogram
                .iter()
                .filter(|&(_, &n)| n > 0)
                .map(|(tag, _)| tag.clone())
                .collect(),
            child_tag_bins: histogram
                .into_iter()
                .map(|(tag, n)| (tag, CountBin::from_count(n)))
                .collect(),
        };

        Self {
            tag: normalize_tag(&record.tag),
            attr_keys,
            child_shape,
        }
    }

    /// Canonical encoding: recursively key-sorted JSON with no whitespace.
    pub fn canonical_json(&self) -> String {
        // `serde_json::Map` is BTreeMap-backed, so routing through `Value`
        // sorts struct fields as well as map keys.
        serde_json::to_value(self)
            .map(|v| v.to_string())
            .unwrap_or_default()
    }

    /// `sig:` + digest of the canonical encoding.
    pub fn sig_id(&self) -> String {
        format!("{SIG_ID_PREFIX}{}", digest(&self.canonical_json()))
    }
}

fn normalize_tag(tag: &str) -> String {
    tag.trim().to_ascii_lowercase()
}
