//! JSON rendering of a mining result.

use blockprint_analysis::grouping::ParentSummary;
use blockprint_analysis::{MiningDiagnostics, MiningResult, TemplateSet};
use blockprint_core::errors::PipelineError;
use serde::Serialize;

#[derive(Serialize)]
struct Report<'a> {
    templates: &'a TemplateSet,
    diagnostics: &'a MiningDiagnostics,
    #[serde(skip_serializing_if = "Option::is_none")]
    parents: Option<&'a [ParentSummary]>,
}

/// Pretty JSON: `{templates: {path: {instances, examples}}, diagnostics}`,
/// plus `parents` when `with_parents` is set.
pub fn render(result: &MiningResult, with_parents: bool) -> Result<String, PipelineError> {
    let report = Report {
        templates: &result.templates,
        diagnostics: &result.diagnostics,
        parents: with_parents.then_some(result.parents.as_slice()),
    };
    serde_json::to_string_pretty(&report).map_err(|e| PipelineError::Output {
        message: e.to_string(),
    })
}
