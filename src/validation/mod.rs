//! Dual configuration validation
//!
//! Parses both documents, cross-validates them, derives the routing graph
//! and aggregates everything into a [`ConfigValidationResult`]. Nothing here
//! fails or panics on malformed input; every problem ends up in the result.

pub mod cross_ref;
pub mod graph;
pub mod parser;

pub use cross_ref::cross_validate;
pub use graph::{find_entry_points, Edge, PipelineGraph};
pub use parser::{parse_models, parse_pipeline, pipeline_from_value, Parsed};

use crate::core::models::ModelsConfig;
use crate::core::pipeline::PipelineConfig;
use crate::core::template::unknown_placeholders;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Aggregate outcome of one validation pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigValidationResult {
    pub is_valid: bool,
    pub models_errors: Vec<String>,
    pub pipeline_errors: Vec<String>,
    pub cross_ref_errors: Vec<String>,
    /// Non-fatal advisories
    pub warnings: Vec<String>,
    /// Steps with no incoming routing reference (empty unless cross-references resolve)
    pub entry_points: Vec<String>,
}

impl ConfigValidationResult {
    pub fn error_count(&self) -> usize {
        self.models_errors.len() + self.pipeline_errors.len() + self.cross_ref_errors.len()
    }

    /// One-line overview, e.g. "Models: 2 errors | Pipeline: 1 error"
    pub fn summary(&self) -> String {
        if self.is_valid {
            let entries = self.entry_points.len();
            return format!(
                "Configuration valid ({} entry point{})",
                entries,
                if entries == 1 { "" } else { "s" }
            );
        }

        [
            ("Models", self.models_errors.len()),
            ("Pipeline", self.pipeline_errors.len()),
            ("Cross-reference", self.cross_ref_errors.len()),
        ]
        .iter()
        .filter(|(_, count)| *count > 0)
        .map(|(label, count)| {
            format!("{}: {} error{}", label, count, if *count == 1 { "" } else { "s" })
        })
        .collect::<Vec<_>>()
        .join(" | ")
    }
}

/// Validate the current text of both documents from scratch
pub fn validate(models_text: &str, pipeline_text: &str) -> ConfigValidationResult {
    let models = parse_models(models_text);
    let pipeline = parse_pipeline(pipeline_text);

    let mut result = ConfigValidationResult {
        models_errors: models.errors.iter().map(|e| e.to_string()).collect(),
        pipeline_errors: pipeline.errors.iter().map(|e| e.to_string()).collect(),
        ..Default::default()
    };

    let (Some(models), Some(pipeline)) = (models.clean(), pipeline.clean()) else {
        debug!(
            "Skipping cross-reference checks: {} models error(s), {} pipeline error(s)",
            result.models_errors.len(),
            result.pipeline_errors.len()
        );
        return result;
    };

    result.cross_ref_errors = cross_validate(models, pipeline)
        .iter()
        .map(|e| e.to_string())
        .collect();
    result.warnings = reference_warnings(models, pipeline);

    if result.cross_ref_errors.is_empty() {
        let graph = PipelineGraph::build(pipeline);
        result.entry_points = find_entry_points(pipeline);
        result.warnings.extend(topology_warnings(pipeline, &graph, &result.entry_points));
        result.is_valid = true;
        info!(
            "Configuration valid: {} model(s), {} step(s), entry points: {:?}",
            models.len(),
            pipeline.len(),
            result.entry_points
        );
    } else {
        debug!(
            "Cross-reference check failed with {} error(s)",
            result.cross_ref_errors.len()
        );
    }

    result
}

/// Advisories about credentials, unused models and template placeholders
fn reference_warnings(models: &ModelsConfig, pipeline: &PipelineConfig) -> Vec<String> {
    let mut warnings = Vec::new();

    for model in &models.models {
        let used = pipeline.steps.iter().any(|s| s.model_config == model.id);
        if !used {
            warnings.push(format!("Model \"{}\" is not used by any step", model.id));
        } else if !model.has_api_key() {
            warnings.push(format!(
                "Model \"{}\" has no API key yet; steps using it cannot run",
                model.id
            ));
        }
    }

    for step in &pipeline.steps {
        for (field, template) in step.path_templates() {
            for name in unknown_placeholders(template) {
                warnings.push(format!(
                    "Step \"{}\": {} uses unknown placeholder {{{}}}; it will not be substituted",
                    step.id, field, name
                ));
            }
        }
    }

    warnings
}

/// Advisories about the routing graph; only computed once every reference resolves
fn topology_warnings(
    pipeline: &PipelineConfig,
    graph: &PipelineGraph,
    entry_points: &[String],
) -> Vec<String> {
    let mut warnings = Vec::new();

    for step in graph.self_loops() {
        warnings.push(format!(
            "Step \"{}\" routes to itself; execution may repeat without limit",
            step
        ));
    }

    if !pipeline.is_empty() && entry_points.is_empty() {
        warnings.push(
            "Pipeline has no entry point: every step is the routing target of another step".to_string(),
        );
    } else {
        let unreachable = graph.unreachable_steps();
        if !unreachable.is_empty() {
            warnings.push(format!(
                "Steps not reachable from any entry point: {}",
                unreachable.join(", ")
            ));
        }
    }

    warnings
}
