//! Document builder shared by the integration tests.
//!
//! Paths, depths and child lists are derived the way an extractor would
//! produce them: `parent_path/tag[n]` with `n` counted per tag among siblings.

#![allow(dead_code)]

use std::collections::HashMap;

use blockprint_analysis::{NodeRecord, Rect, Snapshot};

#[derive(Default)]
pub struct DocBuilder {
    records: Vec<NodeRecord>,
    positions: HashMap<String, usize>,
    tag_counts: HashMap<(Option<String>, String), usize>,
}

impl DocBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(&mut self, tag: &str) -> String {
        self.push(None, tag, false)
    }

    pub fn child(&mut self, parent: &str, tag: &str) -> String {
        self.push(Some(parent), tag, true)
    }

    /// Child whose path step carries no position (`/html/body`).
    pub fn plain_child(&mut self, parent: &str, tag: &str) -> String {
        self.push(Some(parent), tag, false)
    }

    /// Add `n` children with the same tag.
    pub fn children(&mut self, parent: &str, tag: &str, n: usize) -> Vec<String> {
        (0..n).map(|_| self.child(parent, tag)).collect()
    }

    /// Hang a chain of `levels` nested nodes below `parent`.
    pub fn chain(&mut self, parent: &str, levels: usize) -> String {
        let mut cur = parent.to_string();
        for _ in 0..levels {
            cur = self.child(&cur, "span");
        }
        cur
    }

    pub fn rect(&mut self, id: &str, x: f64, y: f64, width: f64, height: f64) {
        let pos = self.positions[id];
        self.records[pos].rect = Some(Rect::new(x, y, width, height));
    }

    pub fn path(&self, id: &str) -> String {
        self.records[self.positions[id]].xpath.clone().unwrap_or_default()
    }

    pub fn build(self) -> Snapshot {
        Snapshot::new(Some("test-doc".into()), self.records).expect("unique ids")
    }

    fn push(&mut self, parent: Option<&str>, tag: &str, indexed: bool) -> String {
        let id = format!("n{}", self.records.len());
        let (parent_path, depth) = match parent {
            Some(p) => {
                let rec = &self.records[self.positions[p]];
                (rec.xpath.clone().unwrap_or_default(), rec.depth + 1)
            }
            None => (String::new(), 0),
        };
        let n = self
            .tag_counts
            .entry((parent.map(String::from), tag.to_string()))
            .or_insert(0);
        *n += 1;
        let step = if indexed {
            format!("{tag}[{n}]")
        } else {
            tag.to_string()
        };

        let record = NodeRecord {
            parent_id: parent.map(String::from),
            xpath: Some(format!("{parent_path}/{step}")),
            depth,
            ..NodeRecord::new(id.clone(), tag)
        };
        if let Some(p) = parent {
            let pos = self.positions[p];
            self.records[pos].children_ids.push(id.clone());
        }
        self.positions.insert(id.clone(), self.records.len());
        self.records.push(record);
        id
    }
}

/// `html > body`, returning the body id.
pub fn page(doc: &mut DocBuilder) -> String {
    let html = doc.root("html");
    doc.plain_child(&html, "body")
}
