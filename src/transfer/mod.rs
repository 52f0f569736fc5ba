//! Export and import of shareable pipeline configurations
//!
//! Exports never carry credentials: a pipeline step only holds the id of
//! its model config, never the config itself. Imports are always re-parsed
//! through the schema parser before they are accepted.

use crate::core::error::{json_type_name, ImportError};
use crate::core::pipeline::PipelineConfig;
use crate::validation::pipeline_from_value;
use chrono::{DateTime, SubsecRound, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

/// Format version written into every export
pub const EXPORT_VERSION: &str = "1.2";

/// Copy of a pipeline for export
pub fn export_pipeline_config(pipeline: &PipelineConfig) -> PipelineConfig {
    pipeline.clone()
}

/// `{version, exported, description, pipeline}` wrapper written to export files
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportEnvelope {
    pub version: String,
    pub exported: DateTime<Utc>,
    pub description: String,
    pub pipeline: PipelineConfig,
}

impl ExportEnvelope {
    pub fn new(pipeline: &PipelineConfig, description: impl Into<String>) -> Self {
        Self {
            version: EXPORT_VERSION.to_string(),
            exported: Utc::now().trunc_subsecs(3),
            description: description.into(),
            pipeline: export_pipeline_config(pipeline),
        }
    }

    pub fn to_value(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }

    /// Pretty-printed JSON for writing to a file
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Restore a pipeline from a decoded export envelope
pub fn import_pipeline_config(envelope: &Value) -> Result<PipelineConfig, ImportError> {
    let fields = envelope.as_object().ok_or_else(|| {
        ImportError::Malformed(format!(
            "expected a JSON object, found {}",
            json_type_name(envelope)
        ))
    })?;

    let pipeline = fields
        .get("pipeline")
        .ok_or_else(|| ImportError::Malformed("missing \"pipeline\" key".to_string()))?;

    pipeline_from_value(pipeline)
        .into_result()
        .map_err(ImportError::InvalidPipeline)
}

/// Everything an import file carries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportBundle {
    pub version: Option<String>,
    pub description: Option<String>,
    pub pipeline: PipelineConfig,
    /// Optional `(path, content)` files shipped alongside the pipeline
    pub example_prompts: Vec<(String, String)>,
}

/// Parse the text of an import file
pub fn parse_import(text: &str) -> Result<ImportBundle, ImportError> {
    let envelope: Value = serde_json::from_str(text)
        .map_err(|e| ImportError::Malformed(format!("invalid JSON: {}", e)))?;

    let pipeline = import_pipeline_config(&envelope)?;

    let string_field = |name: &str| {
        envelope
            .get(name)
            .and_then(Value::as_str)
            .map(str::to_string)
    };
    let version = string_field("version");
    let description = string_field("description");

    if let Some(version) = &version {
        if version != EXPORT_VERSION {
            debug!("Importing pipeline exported with version {}", version);
        }
    }

    let example_prompts = match envelope.get("examplePrompts") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Object(prompts)) => prompts
            .iter()
            .map(|(path, content)| match content {
                Value::String(content) => Ok((path.clone(), content.clone())),
                other => Err(ImportError::Malformed(format!(
                    "examplePrompts entry \"{}\" must be a string, found {}",
                    path,
                    json_type_name(other)
                ))),
            })
            .collect::<Result<Vec<_>, _>>()?,
        Some(other) => {
            return Err(ImportError::Malformed(format!(
                "\"examplePrompts\" must be an object, found {}",
                json_type_name(other)
            )))
        }
    };

    info!(
        "Imported pipeline with {} step(s) and {} example prompt(s)",
        pipeline.len(),
        example_prompts.len()
    );

    Ok(ImportBundle {
        version,
        description,
        pipeline,
        example_prompts,
    })
}
