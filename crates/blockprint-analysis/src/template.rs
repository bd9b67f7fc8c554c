//! Path templates: one wildcard slot generalizing a set of sibling paths.
//!
//! `/html/body/ul[1]/li[1]`, `/html/body/ul[1]/li[2]`, … generalize to
//! `/html/body/ul[1]/li[*]` with slot paths truncated at the wildcard.

use std::collections::btree_map;

use blockprint_core::types::collections::{BTreeMap, BTreeSet, FxHashMap, StepVec};
use serde::Serialize;

use crate::path;

/// Output of the template builder for one repeat group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateDraft {
    pub template_path: String,
    /// One slot path per input path, in input order; may repeat.
    pub slot_paths: Vec<String>,
    /// Step index of the wildcard.
    pub wildcard_index: usize,
}

/// First step index where any row differs from the first row.
///
/// `None` when rows have unequal lengths, fewer than one row, or no
/// divergence at all.
pub fn first_divergent_step<S: AsRef<str>>(rows: &[StepVec<S>]) -> Option<usize> {
    let first = rows.first()?;
    let len = first.len();
    if rows.iter().any(|r| r.len() != len) {
        return None;
    }
    (0..len).find(|&i| {
        rows[1..]
            .iter()
            .any(|r| r[i].as_ref() != first[i].as_ref())
    })
}

/// Generalize sibling paths into a template.
///
/// Paths with no steps are ignored; `None` when nothing is left. When rows
/// diverge, the wildcard replaces the first divergent step and every slot
/// path is cut right after it. Otherwise (unequal lengths, or identical
/// paths) the wildcard goes on the first row's last step and slots are the
/// full paths.
pub fn build_template<S: AsRef<str>>(paths: &[S]) -> Option<TemplateDraft> {
    let rows: Vec<StepVec<&str>> = paths
        .iter()
        .map(|p| path::steps(p.as_ref()))
        .filter(|s| !s.is_empty())
        .collect();
    let first = rows.first()?;

    match first_divergent_step(&rows) {
        Some(slot) => {
            let mut steps: StepVec<String> = first.iter().map(|s| s.to_string()).collect();
            steps[slot] = path::wildcard_step(first[slot]);
            Some(TemplateDraft {
                template_path: path::join(steps.as_slice()),
                slot_paths: rows.iter().map(|r| path::join(&r[..=slot])).collect(),
                wildcard_index: slot,
            })
        }
        None => {
            let last = first.len() - 1;
            let mut steps: StepVec<String> = first.iter().map(|s| s.to_string()).collect();
            steps[last] = path::wildcard_step(first[last]);
            Some(TemplateDraft {
                template_path: path::join(steps.as_slice()),
                slot_paths: rows.iter().map(|r| path::join(r.as_slice())).collect(),
                wildcard_index: last,
            })
        }
    }
}

/// A path template with the slot paths it matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Template {
    #[serde(skip)]
    pub template_path: String,
    pub instances: BTreeSet<String>,
    /// Insertion-ordered, duplicate-free, capped.
    pub examples: Vec<String>,
}

impl Template {
    pub fn new(template_path: impl Into<String>) -> Self {
        Self {
            template_path: template_path.into(),
            instances: BTreeSet::new(),
            examples: Vec::new(),
        }
    }

    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }
}

/// Templates keyed by path, iterated in ascending path order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TemplateSet {
    templates: BTreeMap<String, Template>,
}

impl TemplateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one group's draft into the set.
    ///
    /// Each distinct slot path is inserted at most `max_per_instance` times
    /// for this call; examples are appended without duplicates until
    /// `max_examples` are held. Returns the number of accepted insertions.
    pub fn absorb(
        &mut self,
        draft: &TemplateDraft,
        max_per_instance: usize,
        max_examples: usize,
    ) -> usize {
        let template = self
            .templates
            .entry(draft.template_path.clone())
            .or_insert_with(|| Template::new(draft.template_path.clone()));

        let mut per_slot: FxHashMap<&str, usize> = FxHashMap::default();
        let mut accepted = 0;
        for slot in &draft.slot_paths {
            let seen = per_slot.entry(slot.as_str()).or_insert(0);
            if *seen >= max_per_instance {
                continue;
            }
            *seen += 1;
            accepted += 1;
            template.instances.insert(slot.clone());
        }

        for slot in &draft.slot_paths {
            if template.examples.len() >= max_examples {
                break;
            }
            if !template.examples.contains(slot) {
                template.examples.push(slot.clone());
            }
        }

        accepted
    }

    pub fn insert(&mut self, template: Template) {
        self.templates.insert(template.template_path.clone(), template);
    }

    pub fn get(&self, template_path: &str) -> Option<&Template> {
        self.templates.get(template_path)
    }

    pub fn contains(&self, template_path: &str) -> bool {
        self.templates.contains_key(template_path)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Template> {
        self.templates.values()
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }

    /// Split into kept and dropped templates; dropped paths stay in order.
    pub fn partition(self, mut keep: impl FnMut(&Template) -> bool) -> FilterOutcome {
        let mut outcome = FilterOutcome::default();
        for template in self {
            if keep(&template) {
                outcome.kept.insert(template);
            } else {
                outcome.dropped.push(template.template_path);
            }
        }
        outcome
    }

    /// Template path → instance set.
    pub fn instance_map(&self) -> BTreeMap<&str, &BTreeSet<String>> {
        self.templates
            .iter()
            .map(|(k, t)| (k.as_str(), &t.instances))
            .collect()
    }

    /// Template path → examples.
    pub fn example_map(&self) -> BTreeMap<&str, &[String]> {
        self.templates
            .iter()
            .map(|(k, t)| (k.as_str(), t.examples.as_slice()))
            .collect()
    }
}

/// Result of a filter stage.
#[derive(Debug, Clone, Default)]
pub struct FilterOutcome {
    pub kept: TemplateSet,
    pub dropped: Vec<String>,
}

impl FromIterator<Template> for TemplateSet {
    fn from_iter<I: IntoIterator<Item = Template>>(iter: I) -> Self {
        let mut set = Self::new();
        for t in iter {
            set.insert(t);
        }
        set
    }
}

impl IntoIterator for TemplateSet {
    type Item = Template;
    type IntoIter = btree_map::IntoValues<String, Template>;

    fn into_iter(self) -> Self::IntoIter {
        self.templates.into_values()
    }
}

impl<'a> IntoIterator for &'a TemplateSet {
    type Item = &'a Template;
    type IntoIter = btree_map::Values<'a, String, Template>;

    fn into_iter(self) -> Self::IntoIter {
        self.templates.values()
    }
}
