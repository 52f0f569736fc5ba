//! notepipe - dual configuration engine for audio-to-notes pipelines

pub mod cli;
pub mod core;
pub mod execution;
pub mod transfer;
pub mod validation;

// Re-export commonly used types
pub use crate::core::{ModelConfig, ModelsConfig, PipelineConfig, PipelineStep, RouteTarget, RoutingRule};
pub use crate::core::{CrossRefError, ImportError, ReferenceError, SchemaError};
pub use crate::execution::{plan_entry_folders, resolve_step, ResolvedStep, TemplateContext};
pub use crate::transfer::{export_pipeline_config, import_pipeline_config, parse_import, ExportEnvelope, ImportBundle};
pub use crate::validation::{cross_validate, find_entry_points, parse_models, parse_pipeline, validate, ConfigValidationResult};
