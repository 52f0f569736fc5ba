//! Command-line interface

pub mod commands;
pub mod output;
pub mod settings;

use clap::{Parser, Subcommand};
use commands::{
    EntryPointsCommand, ExportCommand, FoldersCommand, ImportCommand, InitCommand, ResolveCommand,
    ValidateCommand,
};
use std::ffi::OsString;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Validate and inspect audio-to-notes pipeline configurations
#[derive(Debug, Parser, Clone)]
#[command(name = "notepipe")]
#[command(author = "notepipe contributors")]
#[command(version = "0.1.0")]
#[command(about = "Validate, resolve and share audio-to-notes pipeline configurations", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to the models configuration (credentials) JSON file
    #[arg(short, long, global = true)]
    pub models: Option<PathBuf>,

    /// Path to the pipeline configuration JSON file
    #[arg(short, long, global = true)]
    pub pipeline: Option<PathBuf>,
}

/// Available commands
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Validate both configuration documents
    Validate(ValidateCommand),

    /// List the pipeline's entry points
    EntryPoints(EntryPointsCommand),

    /// Show the input folders entry points read from
    Folders(FoldersCommand),

    /// Show a step merged with its model configuration
    Resolve(ResolveCommand),

    /// Export the pipeline configuration without credentials
    Export(ExportCommand),

    /// Import a shared pipeline configuration
    Import(ImportCommand),

    /// Write the built-in default configuration documents
    Init(InitCommand),
}

impl Cli {
    /// Parse CLI arguments from environment
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Parse CLI arguments from a slice
    pub fn try_parse_from<I, T>(itr: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(itr)
    }

    /// Filter used when `RUST_LOG` is not set
    pub fn default_log_directive(&self) -> &'static str {
        if self.verbose {
            "notepipe=debug"
        } else {
            "notepipe=info"
        }
    }

    /// Log filter from `RUST_LOG`, falling back to the `--verbose` level
    pub fn log_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(self.default_log_directive()))
    }
}
