//! Dominance pruning: keep only the outermost template of a nested family.
//!
//! `/main/section[*]` dominates `/main/section[2]/ul[1]/li[*]`: the inner
//! path carries a wildcard of its own, agrees with the outer path on every
//! step except the outer wildcard, has a step with the same tag there, and is
//! longer. Under [`DominancePolicy::Covered`] the inner template is only
//! removed when its instances actually sit inside the outer template's
//! instances.

use blockprint_core::config::DominancePolicy;
use blockprint_core::types::collections::StepVec;
use serde::Serialize;

use crate::path;
use crate::template::{Template, TemplateSet};

/// A template path split at its first wildcard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateShape<'a> {
    pub steps: StepVec<&'a str>,
    pub wildcard: usize,
}

impl<'a> TemplateShape<'a> {
    /// `None` for a path without a wildcard step.
    pub fn parse(template_path: &'a str) -> Option<Self> {
        let steps = path::steps(template_path);
        let wildcard = steps.iter().position(|s| path::is_wildcard(s))?;
        Some(Self { steps, wildcard })
    }

    pub fn wildcard_tag(&self) -> &'a str {
        path::step_tag(self.steps[self.wildcard])
    }
}

/// True when `outer` dominates `inner` by path shape alone.
///
/// Both paths need a wildcard and `outer` must be strictly shorter. Each step
/// of `outer` must equal the step of `inner` at the same position, except the
/// outer wildcard, which only needs a step with the same tag.
pub fn dominates(outer: &str, inner: &str) -> bool {
    let (Some(a), Some(b)) = (TemplateShape::parse(outer), TemplateShape::parse(inner)) else {
        return false;
    };
    a.steps.len() < b.steps.len()
        && a.steps.iter().zip(&b.steps).enumerate().all(|(i, (x, y))| {
            if i == a.wildcard {
                path::step_tag(x) == path::step_tag(y)
            } else {
                x == y
            }
        })
}

/// True when every instance of `inner` equals or lies under some instance of
/// `outer` on a step boundary.
pub fn covers(outer: &Template, inner: &Template) -> bool {
    inner.instances.iter().all(|instance| {
        path::step_prefixes(instance).any(|prefix| outer.instances.contains(prefix))
    })
}

/// One removal: `removed` was dominated by `by`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Removal {
    pub removed: String,
    pub by: String,
}

#[derive(Debug, Clone)]
pub struct PruneOutcome {
    pub kept: TemplateSet,
    /// Removals in the order they happened.
    pub removals: Vec<Removal>,
}

/// Remove dominated templates.
///
/// Pairs are visited in ascending template order; a template that has been
/// removed neither removes others nor is removed again. Running this on its
/// own output removes nothing.
pub fn prune_dominated(set: TemplateSet, policy: DominancePolicy) -> PruneOutcome {
    let templates: Vec<Template> = set.into_iter().collect();
    let mut removed = vec![false; templates.len()];
    let mut removals = Vec::new();

    for i in 0..templates.len() {
        for j in 0..templates.len() {
            if i == j || removed[i] || removed[j] {
                continue;
            }
            let (outer, inner) = (&templates[i], &templates[j]);
            if !dominates(&outer.template_path, &inner.template_path) {
                continue;
            }
            let remove = match policy {
                DominancePolicy::ShapeOnly => true,
                DominancePolicy::Covered => covers(outer, inner),
            };
            if remove {
                tracing::debug!(
                    removed = %inner.template_path,
                    by = %outer.template_path,
                    %policy,
                    "dominated template removed"
                );
                removed[j] = true;
                removals.push(Removal {
                    removed: inner.template_path.clone(),
                    by: outer.template_path.clone(),
                });
            } else {
                tracing::debug!(
                    inner = %inner.template_path,
                    outer = %outer.template_path,
                    "dominated template kept: instances not covered"
                );
            }
        }
    }

    let kept = templates
        .into_iter()
        .zip(removed)
        .filter_map(|(t, gone)| (!gone).then_some(t))
        .collect();

    PruneOutcome { kept, removals }
}
