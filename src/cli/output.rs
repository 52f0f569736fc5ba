//! CLI output formatting

use crate::execution::{redact, EntryFolder, RenderedPaths, ResolvedStep};
use crate::validation::ConfigValidationResult;
use console::Emoji;

// Re-export style
pub use console::style;

// Emojis for output
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "✓ ");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "✗ ");
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "i ");
pub static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "! ");
pub static ARROW: Emoji<'_, '_> = Emoji("→ ", "-> ");

/// Format a full validation report
pub fn format_validation_result(result: &ConfigValidationResult) -> String {
    let mut lines = Vec::new();

    if result.is_valid {
        lines.push(format!("{} {}", CHECK, style(result.summary()).green()));
    } else {
        lines.push(format!("{} {}", CROSS, style(result.summary()).red()));
    }

    let sections = [
        ("Models", &result.models_errors),
        ("Pipeline", &result.pipeline_errors),
        ("Cross-reference", &result.cross_ref_errors),
    ];
    for (label, errors) in sections {
        if errors.is_empty() {
            continue;
        }
        lines.push(format!("\n  {}", style(label).bold()));
        for error in errors {
            lines.push(format!("    {} {}", CROSS, error));
        }
    }

    if !result.warnings.is_empty() {
        lines.push(format!("\n  {}", style("Warnings").bold()));
        for warning in &result.warnings {
            lines.push(format!("    {}{}", WARN, style(warning).yellow()));
        }
    }

    if result.is_valid {
        lines.push(format!("\n  {}", style("Entry points").bold()));
        if result.entry_points.is_empty() {
            lines.push(format!("    {}", style("(none)").dim()));
        }
        for entry in &result.entry_points {
            lines.push(format!("    {}{}", ARROW, style(entry).cyan()));
        }
    }

    lines.join("\n")
}

/// Format entry point folders
pub fn format_entry_folders(folders: &[EntryFolder]) -> String {
    if folders.is_empty() {
        return format!("{} No entry point folders", INFO);
    }

    folders
        .iter()
        .map(|folder| {
            format!(
                "{}{} {}",
                ARROW,
                style(&folder.base_path).bold(),
                style(format!("({})", folder.step_id)).dim()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a resolved step; the API key is never printed
pub fn format_resolved_step(step: &ResolvedStep, rendered: Option<&RenderedPaths>) -> String {
    let mut lines = vec![
        format!("{} {}", INFO, style(&step.step_id).bold()),
        format!("  Model config:   {}", style(&step.model_config).cyan()),
        format!("  Base URL:       {}", step.base_url),
        format!("  API key:        {}", style(redact(&step.api_key)).dim()),
        format!("  Implementation: {}", step.implementation),
        format!("  Model:          {}", step.model),
    ];

    if let Some(description) = &step.description {
        lines.push(format!("  Description:    {}", description));
    }

    lines.push(format!("  Input:          {}", step.input));
    lines.push(format!("  Output:         {}", step.output));
    if let Some(archive) = &step.archive {
        lines.push(format!("  Archive:        {}", archive));
    }
    if let Some(template) = &step.template {
        lines.push(format!("  Template:       {}", template));
    }
    for include in &step.include {
        lines.push(format!("  Include:        {}", include));
    }
    for rule in &step.routing_aware_output {
        lines.push(format!(
            "  Route {}{}: {}",
            ARROW,
            style(rule.target.as_key()).cyan(),
            style(&rule.prompt).dim()
        ));
    }

    if let Some(paths) = rendered {
        lines.push(format!("\n  {}", style("Rendered paths").bold()));
        lines.push(format!("  Input:          {}", paths.input));
        lines.push(format!("  Output:         {}", paths.output));
        if let Some(archive) = &paths.archive {
            lines.push(format!("  Archive:        {}", archive));
        }
        if let Some(template) = &paths.template {
            lines.push(format!("  Template:       {}", template));
        }
    }

    lines.join("\n")
}
