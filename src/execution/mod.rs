//! Execution-facing views of a validated configuration

pub mod resolver;

pub use resolver::{
    plan_entry_folders, redact, resolve_step, EntryFolder, RenderedPaths, ResolvedStep,
    TemplateContext,
};
