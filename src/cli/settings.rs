//! Locations of the two configuration documents

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default file names inside the config directory
pub const MODELS_FILE: &str = "models.json";
pub const PIPELINE_FILE: &str = "pipeline.json";

/// Where the models and pipeline documents live
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub models_path: PathBuf,
    pub pipeline_path: PathBuf,
}

impl Settings {
    /// `<config dir>/notepipe`, if the platform has a config dir
    pub fn default_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("notepipe"))
    }

    /// Use explicit paths where given, otherwise the default config dir
    pub fn resolve(models: Option<&Path>, pipeline: Option<&Path>) -> Result<Self> {
        Self::resolve_in(Self::default_dir(), models, pipeline)
    }

    fn resolve_in(
        default_dir: Option<PathBuf>,
        models: Option<&Path>,
        pipeline: Option<&Path>,
    ) -> Result<Self> {
        let default_path = |file: &str| {
            default_dir
                .as_ref()
                .map(|dir| dir.join(file))
                .context("No config directory found; pass --models and --pipeline explicitly")
        };

        let models_path = match models {
            Some(path) => path.to_path_buf(),
            None => default_path(MODELS_FILE)?,
        };
        let pipeline_path = match pipeline {
            Some(path) => path.to_path_buf(),
            None => default_path(PIPELINE_FILE)?,
        };

        Ok(Self {
            models_path,
            pipeline_path,
        })
    }

    pub fn read_models(&self) -> Result<String> {
        read_document(&self.models_path)
    }

    pub fn read_pipeline(&self) -> Result<String> {
        read_document(&self.pipeline_path)
    }
}

/// Read a document; a file that does not exist yet is the empty document
pub fn read_document(path: &Path) -> Result<String> {
    if !path.exists() {
        debug!("{} does not exist, using empty document", path.display());
        return Ok("{}".to_string());
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_paths_win() {
        let settings = Settings::resolve_in(
            Some(PathBuf::from("/config/notepipe")),
            Some(Path::new("m.json")),
            None,
        )
        .unwrap();

        assert_eq!(settings.models_path, PathBuf::from("m.json"));
        assert_eq!(settings.pipeline_path, PathBuf::from("/config/notepipe/pipeline.json"));
    }

    #[test]
    fn test_no_config_dir_requires_paths() {
        assert!(Settings::resolve_in(None, None, Some(Path::new("p.json"))).is_err());
        assert!(Settings::resolve_in(None, Some(Path::new("m.json")), Some(Path::new("p.json"))).is_ok());
    }

    #[test]
    fn test_missing_file_reads_as_empty_document() {
        let text = read_document(Path::new("/nonexistent/notepipe/models.json")).unwrap();
        assert_eq!(text, "{}");
    }
}
