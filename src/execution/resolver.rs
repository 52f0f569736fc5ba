//! Step resolver - merges a pipeline step with its model configuration

use crate::core::error::ReferenceError;
use crate::core::models::ModelsConfig;
use crate::core::pipeline::{PipelineConfig, RoutingRule};
use crate::core::template::{derive_base_path, substitute, TemplateVariable};
use crate::validation::find_entry_points;
use std::collections::HashMap;
use tracing::debug;

/// Ready-to-execute view of a step and the model it calls
///
/// Path templates have `{stepId}` substituted; the per-file variables are
/// left for the executor (see [`ResolvedStep::render_paths`]).
#[derive(Clone, PartialEq, Eq)]
pub struct ResolvedStep {
    pub step_id: String,
    pub model_config: String,

    pub base_url: String,
    pub api_key: String,
    pub implementation: String,
    pub model: String,

    pub input: String,
    pub output: String,
    pub archive: Option<String>,
    pub template: Option<String>,
    pub include: Vec<String>,
    pub routing_aware_output: Vec<RoutingRule>,
    pub description: Option<String>,
}

impl std::fmt::Debug for ResolvedStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedStep")
            .field("step_id", &self.step_id)
            .field("model_config", &self.model_config)
            .field("base_url", &self.base_url)
            .field("api_key", &redact(&self.api_key))
            .field("implementation", &self.implementation)
            .field("model", &self.model)
            .field("input", &self.input)
            .field("output", &self.output)
            .field("archive", &self.archive)
            .field("template", &self.template)
            .field("include", &self.include)
            .field("routing_aware_output", &self.routing_aware_output)
            .field("description", &self.description)
            .finish()
    }
}

/// Masked form of a secret for display
pub fn redact(secret: &str) -> &'static str {
    if secret.is_empty() {
        "<empty>"
    } else {
        "<redacted>"
    }
}

/// Per-file values known only while processing a document
#[derive(Debug, Clone, Default)]
pub struct TemplateContext {
    pub category: Option<String>,
    pub filename: Option<String>,
    pub timestamp: Option<String>,
    pub date: Option<String>,
}

impl TemplateContext {
    fn values(&self, step_id: &str) -> HashMap<TemplateVariable, String> {
        let mut values = HashMap::new();
        values.insert(TemplateVariable::StepId, step_id.to_string());
        let optional = [
            (TemplateVariable::Category, &self.category),
            (TemplateVariable::Filename, &self.filename),
            (TemplateVariable::Timestamp, &self.timestamp),
            (TemplateVariable::Date, &self.date),
        ];
        for (var, value) in optional {
            if let Some(value) = value {
                values.insert(var, value.clone());
            }
        }
        values
    }
}

/// Concrete paths after full substitution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPaths {
    pub input: String,
    pub output: String,
    pub archive: Option<String>,
    pub template: Option<String>,
}

impl ResolvedStep {
    /// Substitute every variable that has a value; others stay as placeholders
    pub fn render_paths(&self, context: &TemplateContext) -> RenderedPaths {
        let values = context.values(&self.step_id);
        RenderedPaths {
            input: substitute(&self.input, &values),
            output: substitute(&self.output, &values),
            archive: self.archive.as_deref().map(|a| substitute(a, &values)),
            template: self.template.as_deref().map(|t| substitute(t, &values)),
        }
    }

    /// Next step ids the executor may route to
    pub fn next_step_ids(&self) -> impl Iterator<Item = &str> {
        self.routing_aware_output
            .iter()
            .filter_map(|rule| rule.target.step_id())
    }
}

/// Merge a step with its referenced model.
///
/// Callers must validate first; an unknown step or dangling model reference
/// is a contract violation reported as [`ReferenceError`].
pub fn resolve_step(
    models: &ModelsConfig,
    pipeline: &PipelineConfig,
    step_id: &str,
) -> Result<ResolvedStep, ReferenceError> {
    let step = pipeline
        .get(step_id)
        .ok_or_else(|| ReferenceError::UnknownStep(step_id.to_string()))?;

    let model = models
        .get(&step.model_config)
        .ok_or_else(|| ReferenceError::UnknownModel {
            step: step.id.clone(),
            model: step.model_config.clone(),
        })?;

    let mut values = HashMap::new();
    values.insert(TemplateVariable::StepId, step.id.clone());

    debug!("Resolved step {} with model config {}", step.id, model.id);

    Ok(ResolvedStep {
        step_id: step.id.clone(),
        model_config: model.id.clone(),
        base_url: model.base_url.clone(),
        api_key: model.api_key.clone(),
        implementation: model.implementation.clone(),
        model: model.model.clone(),
        input: substitute(&step.input, &values),
        output: substitute(&step.output, &values),
        archive: step.archive.as_deref().map(|a| substitute(a, &values)),
        template: step.template.as_deref().map(|t| substitute(t, &values)),
        include: step.include.clone(),
        routing_aware_output: step.routing_aware_output.clone(),
        description: step.description.clone(),
    })
}

/// Folder a folder-setup routine should ensure for one entry point
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryFolder {
    pub step_id: String,
    pub base_path: String,
}

/// Base input folders of every entry point, in document order.
///
/// Entry points whose input has no directory part are skipped. Only call on
/// a validated pipeline.
pub fn plan_entry_folders(pipeline: &PipelineConfig) -> Vec<EntryFolder> {
    find_entry_points(pipeline)
        .into_iter()
        .filter_map(|step_id| {
            let step = pipeline.get(&step_id)?;
            let base_path = derive_base_path(&step.input);
            if base_path.is_empty() {
                None
            } else {
                Some(EntryFolder { step_id, base_path })
            }
        })
        .collect()
}
