//! Collection types shared across the workspace.

pub mod collections;

pub use collections::{FxHashMap, FxHashSet};
