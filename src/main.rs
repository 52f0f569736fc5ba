use anyhow::{anyhow, bail, Context, Result};
use notepipe::cli::commands::{
    EntryPointsCommand, ExportCommand, FoldersCommand, ImportCommand, InitCommand, ResolveCommand,
    ValidateCommand,
};
use notepipe::cli::output::*;
use notepipe::cli::settings::Settings;
use notepipe::cli::{Cli, Command};
use notepipe::core::defaults::{DEFAULT_MODELS_JSON, DEFAULT_PIPELINE_JSON};
use notepipe::transfer::{parse_import, ExportEnvelope};
use notepipe::validation::{parse_models, parse_pipeline, validate, ConfigValidationResult};
use notepipe::{plan_entry_folders, resolve_step, ModelsConfig, PipelineConfig};
use std::path::Path;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    let cli = Cli::from_args();

    // Initialize logging (stderr, so JSON on stdout stays clean)
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(cli.log_filter())
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set logging subscriber")?;

    let settings = Settings::resolve(cli.models.as_deref(), cli.pipeline.as_deref())?;

    match &cli.command {
        Command::Validate(cmd) => validate_config(cmd, &settings)?,
        Command::EntryPoints(cmd) => list_entry_points(cmd, &settings)?,
        Command::Folders(cmd) => list_folders(cmd, &settings)?,
        Command::Resolve(cmd) => show_resolved_step(cmd, &settings)?,
        Command::Export(cmd) => export_pipeline(cmd, &settings)?,
        Command::Import(cmd) => import_pipeline(cmd, &settings)?,
        Command::Init(cmd) => init_config(cmd, &settings)?,
    }

    Ok(())
}

fn validate_config(cmd: &ValidateCommand, settings: &Settings) -> Result<()> {
    let result = validate(&settings.read_models()?, &settings.read_pipeline()?);

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", format_validation_result(&result));
    }

    if !result.is_valid {
        std::process::exit(1);
    }
    Ok(())
}

/// Load both documents and insist they are valid together
fn load_validated(settings: &Settings) -> Result<(ModelsConfig, PipelineConfig, ConfigValidationResult)> {
    let models_text = settings.read_models()?;
    let pipeline_text = settings.read_pipeline()?;

    let result = validate(&models_text, &pipeline_text);
    if !result.is_valid {
        println!("{}", format_validation_result(&result));
        bail!("Configuration is invalid ({})", result.summary());
    }

    let models = parse_models(&models_text)
        .into_result()
        .map_err(|errors| anyhow!("{} models error(s)", errors.len()))?;
    let pipeline = parse_pipeline(&pipeline_text)
        .into_result()
        .map_err(|errors| anyhow!("{} pipeline error(s)", errors.len()))?;

    Ok((models, pipeline, result))
}

fn list_entry_points(cmd: &EntryPointsCommand, settings: &Settings) -> Result<()> {
    let (_, _, result) = load_validated(settings)?;

    if cmd.json {
        let data = serde_json::json!({ "entryPoints": result.entry_points });
        println!("{}", serde_json::to_string_pretty(&data)?);
    } else if result.entry_points.is_empty() {
        println!("{} No entry points", WARN);
    } else {
        for entry in &result.entry_points {
            println!("{}{}", ARROW, style(entry).cyan());
        }
    }

    Ok(())
}

fn list_folders(cmd: &FoldersCommand, settings: &Settings) -> Result<()> {
    let (_, pipeline, _) = load_validated(settings)?;
    let folders = plan_entry_folders(&pipeline);

    if cmd.json {
        let data: Vec<_> = folders
            .iter()
            .map(|f| serde_json::json!({ "stepId": f.step_id, "basePath": f.base_path }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&data)?);
    } else {
        println!("{}", format_entry_folders(&folders));
    }

    Ok(())
}

fn show_resolved_step(cmd: &ResolveCommand, settings: &Settings) -> Result<()> {
    let (models, pipeline, _) = load_validated(settings)?;
    let resolved = resolve_step(&models, &pipeline, &cmd.step)?;

    let rendered = if cmd.var.is_empty() {
        None
    } else {
        let context = cmd.template_context().map_err(|e| anyhow!(e))?;
        Some(resolved.render_paths(&context))
    };

    println!("{}", format_resolved_step(&resolved, rendered.as_ref()));
    Ok(())
}

fn export_pipeline(cmd: &ExportCommand, settings: &Settings) -> Result<()> {
    let (_, pipeline, _) = load_validated(settings)?;
    let envelope = ExportEnvelope::new(&pipeline, cmd.description.clone());
    let json = envelope.to_json()?;

    match &cmd.output {
        Some(path) => {
            write_file(path, &json)?;
            println!(
                "{} Exported {} step(s) to {}",
                CHECK,
                pipeline.len(),
                style(path.display()).bold()
            );
        }
        None => println!("{}", json),
    }

    Ok(())
}

fn import_pipeline(cmd: &ImportCommand, settings: &Settings) -> Result<()> {
    let text = std::fs::read_to_string(&cmd.file)
        .with_context(|| format!("Failed to read {}", cmd.file.display()))?;
    let bundle = parse_import(&text)?;

    info!(
        "Import version {}",
        bundle.version.as_deref().unwrap_or("unknown")
    );

    let pipeline_json = serde_json::to_string_pretty(&bundle.pipeline)?;

    // Check the imported pipeline against the local models
    let result = validate(&settings.read_models()?, &pipeline_json);
    if !result.is_valid {
        eprintln!("{}{}", WARN, style(result.summary()).yellow());
        for error in &result.cross_ref_errors {
            eprintln!("    {}", error);
        }
    }

    match &cmd.output {
        Some(path) => {
            write_file(path, &pipeline_json)?;
            println!(
                "{} Imported {} step(s) to {}",
                CHECK,
                bundle.pipeline.len(),
                style(path.display()).bold()
            );
        }
        None => println!("{}", pipeline_json),
    }

    if !bundle.example_prompts.is_empty() {
        eprintln!("{} Bundled example prompts:", INFO);
        for (path, _) in &bundle.example_prompts {
            eprintln!("    {}", path);
        }
    }

    Ok(())
}

fn init_config(cmd: &InitCommand, settings: &Settings) -> Result<()> {
    let documents = [
        (&settings.models_path, DEFAULT_MODELS_JSON),
        (&settings.pipeline_path, DEFAULT_PIPELINE_JSON),
    ];

    for (path, contents) in documents {
        if path.exists() && !cmd.force {
            println!(
                "{} {} already exists (use --force to overwrite)",
                WARN,
                style(path.display()).bold()
            );
            continue;
        }
        write_file(path, contents)?;
        println!("{} Wrote {}", CHECK, style(path.display()).bold());
    }

    Ok(())
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))
}
