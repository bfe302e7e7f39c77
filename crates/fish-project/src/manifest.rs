//! Run manifest (`fish.toml`) parsing.

use crate::error::ManifestError;
use serde::Deserialize;
use std::path::Path;

/// A parsed run manifest.
#[derive(Debug, Clone, Deserialize)]
pub struct Manifest {
    /// What to run.
    pub program: ProgramSection,

    /// Execution limits.
    #[serde(default)]
    pub limits: LimitsSection,
}

/// The `[program]` section of the manifest.
#[derive(Debug, Clone, Deserialize)]
pub struct ProgramSection {
    /// Program name (required).
    pub name: String,

    /// Source file, relative to the manifest (required).
    pub entry: String,

    /// Values pushed before the first step, bottom first.
    #[serde(default)]
    pub initial_stack: Vec<f64>,

    /// Text queued as input before running.
    #[serde(default)]
    pub input: String,
}

/// The `[limits]` section of the manifest.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LimitsSection {
    /// Step budget; the host default applies when absent.
    #[serde(default)]
    pub max_steps: Option<u64>,

    /// Seed for the `x` instruction's random directions.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Manifest {
    /// Load a manifest from a file path.
    pub fn from_file(path: &Path) -> Result<Self, ManifestError> {
        let content = std::fs::read_to_string(path).map_err(|e| ManifestError::Io {
            path: path.to_owned(),
            source: e,
        })?;

        Self::from_str(&content, path)
    }

    /// Parse a manifest from a string. `path` is only used in errors.
    pub fn from_str(content: &str, path: &Path) -> Result<Self, ManifestError> {
        let manifest: Manifest = toml::from_str(content).map_err(|e| ManifestError::Parse {
            path: path.to_owned(),
            source: e,
        })?;

        manifest.validate(path)?;
        Ok(manifest)
    }

    fn validate(&self, path: &Path) -> Result<(), ManifestError> {
        if self.program.name.trim().is_empty() {
            return Err(ManifestError::MissingField {
                path: path.to_owned(),
                field: "program.name",
            });
        }
        if self.program.entry.trim().is_empty() {
            return Err(ManifestError::MissingField {
                path: path.to_owned(),
                field: "program.entry",
            });
        }
        Ok(())
    }
}
