//! Step-level helpers for absolute indexed paths (`/html/body/div[2]/li[3]`).

use blockprint_core::types::collections::StepVec;

/// Marker suffix of a wildcard step.
pub const WILDCARD_SUFFIX: &str = "[*]";

/// Split a path into its non-empty steps.
pub fn steps(path: &str) -> StepVec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// The tag part of a step: `li[3]` → `li`.
pub fn step_tag(step: &str) -> &str {
    step.split_once('[').map_or(step, |(tag, _)| tag)
}

/// The wildcard form of a step: `li[3]` → `li[*]`.
pub fn wildcard_step(step: &str) -> String {
    format!("{}{}", step_tag(step), WILDCARD_SUFFIX)
}

pub fn is_wildcard(step: &str) -> bool {
    step.ends_with(WILDCARD_SUFFIX)
}

/// Join steps back into an absolute path.
pub fn join<S: AsRef<str>>(steps: &[S]) -> String {
    let mut out = String::new();
    for step in steps {
        out.push('/');
        out.push_str(step.as_ref());
    }
    if out.is_empty() {
        out.push('/');
    }
    out
}

/// Every step-boundary prefix of `path`, shortest first, including `path` itself.
pub fn step_prefixes(path: &str) -> impl Iterator<Item = &str> {
    path.char_indices()
        .filter(|&(i, c)| c == '/' && i > 0)
        .map(move |(i, _)| &path[..i])
        .chain(std::iter::once(path))
}
