//! CLI command definitions

use crate::execution::TemplateContext;
use clap::Args;
use std::path::PathBuf;

/// Validate both configuration documents
#[derive(Debug, Args, Clone)]
pub struct ValidateCommand {
    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// List entry points
#[derive(Debug, Args, Clone)]
pub struct EntryPointsCommand {
    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Show entry point input folders
#[derive(Debug, Args, Clone)]
pub struct FoldersCommand {
    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Resolve a step
#[derive(Debug, Args, Clone)]
pub struct ResolveCommand {
    /// Step id to resolve
    #[arg(short, long)]
    pub step: String,

    /// Per-file template values (category, filename, timestamp, date) as key=value
    #[arg(long, value_parser = parse_key_value)]
    pub var: Vec<(String, String)>,
}

impl ResolveCommand {
    /// Build the template context from `--var` values
    pub fn template_context(&self) -> Result<TemplateContext, String> {
        let mut context = TemplateContext::default();
        for (key, value) in &self.var {
            let slot = match key.as_str() {
                "category" => &mut context.category,
                "filename" => &mut context.filename,
                "timestamp" => &mut context.timestamp,
                "date" => &mut context.date,
                other => {
                    return Err(format!(
                        "Unknown template variable '{}' (expected category, filename, timestamp or date)",
                        other
                    ))
                }
            };
            *slot = Some(value.clone());
        }
        Ok(context)
    }
}

/// Export the pipeline configuration
#[derive(Debug, Args, Clone)]
pub struct ExportCommand {
    /// Description stored in the export envelope
    #[arg(short, long, default_value = "")]
    pub description: String,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Import a pipeline configuration
#[derive(Debug, Args, Clone)]
pub struct ImportCommand {
    /// Path to the exported JSON file
    #[arg(short, long)]
    pub file: PathBuf,

    /// Write the imported pipeline document to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Write default documents
#[derive(Debug, Args, Clone)]
pub struct InitCommand {
    /// Overwrite existing documents
    #[arg(long)]
    pub force: bool,
}

/// Parse key=value pairs
pub fn parse_key_value(s: &str) -> Result<(String, String), String> {
    let parts: Vec<&str> = s.splitn(2, '=').collect();
    if parts.len() != 2 {
        return Err(format!("Invalid key=value pair: {}", s));
    }
    Ok((parts[0].to_string(), parts[1].to_string()))
}
