//! Cross-reference checks between and within the two documents

use crate::core::error::CrossRefError;
use crate::core::models::ModelsConfig;
use crate::core::pipeline::PipelineConfig;
use tracing::debug;

/// Check that every step's model reference and routing target resolves.
///
/// Only meaningful when both documents parsed cleanly. Errors accumulate in
/// document order: for each step, its model reference first, then its
/// routing targets.
pub fn cross_validate(models: &ModelsConfig, pipeline: &PipelineConfig) -> Vec<CrossRefError> {
    let mut errors = Vec::new();

    for step in &pipeline.steps {
        if !models.contains(&step.model_config) {
            errors.push(CrossRefError::MissingModel {
                step: step.id.clone(),
                model: step.model_config.clone(),
            });
        }

        // Self-loops resolve like any other reference
        for target in step.next_step_ids() {
            if !pipeline.contains(target) {
                errors.push(CrossRefError::MissingStep {
                    step: step.id.clone(),
                    target: target.to_string(),
                });
            }
        }
    }

    debug!("Cross-reference check found {} error(s)", errors.len());
    errors
}
