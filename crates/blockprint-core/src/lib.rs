//! Shared foundation for the blockprint workspace.
//!
//! Errors, layered configuration, tracing setup, content hashing, and the
//! compiled defaults used by the mining pipeline.

pub mod config;
pub mod constants;
pub mod errors;
pub mod hashing;
pub mod tracing;
pub mod types;
