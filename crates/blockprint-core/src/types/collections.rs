//! Re-exports of performance-oriented collection types.

pub use rustc_hash::{FxHashMap, FxHashSet};
pub use smallvec::SmallVec;
pub use std::collections::{BTreeMap, BTreeSet};

/// SmallVec sized for path step lists (most document paths are shallow).
pub type StepVec<T> = SmallVec<[T; 16]>;
