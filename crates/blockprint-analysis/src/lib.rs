//! Repeated structural block mining over a rendered-document snapshot.
//!
//! Stages, leaves first: signatures → index → repeat groups → templates →
//! dominance pruning → internal-depth filter → orientation filter.
//! [`pipeline::MiningPipeline`] wires them together.

pub mod depth;
pub mod dominance;
pub mod features;
pub mod grouping;
pub mod identity;
pub mod index;
pub mod orientation;
pub mod path;
pub mod pipeline;
pub mod signature;
pub mod snapshot;
pub mod template;

pub use index::{NodeIdx, NodeView, SnapshotIndex};
pub use pipeline::{MiningDiagnostics, MiningPipeline, MiningResult, MiningSettings};
pub use snapshot::{NodeRecord, Rect, Snapshot};
pub use template::{Template, TemplateSet};
