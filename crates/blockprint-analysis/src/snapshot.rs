//! Input model: one immutable snapshot of per-element node records.

use std::path::Path;

use blockprint_core::errors::SnapshotError;
use blockprint_core::types::collections::FxHashMap;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    #[serde(alias = "left")]
    pub x: f64,
    #[serde(alias = "top")]
    pub y: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Center point `(cx, cy)`.
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Non-finite coordinates make a rect unusable for geometry.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite()
    }
}

/// Structural facts about one element, as delivered by the extraction step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub node_id: String,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub children_ids: Vec<String>,
    #[serde(default)]
    pub tag: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub data_keys: Vec<String>,
    #[serde(default)]
    pub aria_keys: Vec<String>,
    /// Absolute indexed path, e.g. `/html/body/div[1]/li[3]`.
    #[serde(default)]
    pub xpath: Option<String>,
    /// Distance from the document root.
    #[serde(default)]
    pub depth: u32,
    #[serde(default)]
    pub rect: Option<Rect>,
    /// Leading text of the element; only feeds stable node keys.
    #[serde(default)]
    pub content_anchor_seed: Option<String>,
    /// Opaque text/ui hints, passed through untouched.
    #[serde(default)]
    pub signals: serde_json::Value,
}

impl NodeRecord {
    /// Minimal record; the remaining fields are filled with struct update syntax.
    pub fn new(node_id: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            node_id: node_id.into(),
            parent_id: None,
            children_ids: Vec::new(),
            tag: tag.into(),
            role: None,
            data_keys: Vec::new(),
            aria_keys: Vec::new(),
            xpath: None,
            depth: 0,
            rect: None,
            content_anchor_seed: None,
            signals: serde_json::Value::Null,
        }
    }

    /// The record's path, if it has a non-blank one.
    pub fn path(&self) -> Option<&str> {
        self.xpath.as_deref().map(str::trim).filter(|p| !p.is_empty())
    }

    /// The record's rect, if present and finite.
    pub fn usable_rect(&self) -> Option<Rect> {
        self.rect.filter(Rect::is_finite)
    }
}

#[derive(Deserialize)]
struct RawSnapshot {
    #[serde(default)]
    doc_id: Option<String>,
    #[serde(default)]
    records: Option<Vec<NodeRecord>>,
}

/// A validated, immutable collection of node records.
#[derive(Debug, Clone)]
pub struct Snapshot {
    doc_id: Option<String>,
    records: Vec<NodeRecord>,
}

impl Snapshot {
    /// Validate and wrap a record collection. Node ids must be unique.
    pub fn new(doc_id: Option<String>, records: Vec<NodeRecord>) -> Result<Self, SnapshotError> {
        let mut seen: FxHashMap<&str, usize> = FxHashMap::default();
        seen.reserve(records.len());
        for (index, record) in records.iter().enumerate() {
            if seen.insert(record.node_id.as_str(), index).is_some() {
                return Err(SnapshotError::DuplicateNodeId {
                    node_id: record.node_id.clone(),
                    index,
                });
            }
        }
        Ok(Self { doc_id, records })
    }

    /// Parse a snapshot document: `{"doc_id": "...", "records": [...]}`.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let raw: RawSnapshot = serde_json::from_str(json).map_err(|e| SnapshotError::Parse {
            message: e.to_string(),
        })?;
        let records = raw.records.ok_or(SnapshotError::MissingRecords)?;
        Self::new(raw.doc_id, records)
    }

    /// Read and parse a snapshot file.
    pub fn from_path(path: &Path) -> Result<Self, SnapshotError> {
        let content = std::fs::read_to_string(path).map_err(|e| SnapshotError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&content)
    }

    pub fn doc_id(&self) -> Option<&str> {
        self.doc_id.as_deref()
    }

    pub fn records(&self) -> &[NodeRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
