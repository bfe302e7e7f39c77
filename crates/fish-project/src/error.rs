//! Error types for manifest and project loading.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when parsing a `fish.toml` manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read manifest at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse manifest at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("missing required field '{field}' in {path}")]
    MissingField { path: PathBuf, field: &'static str },
}

/// Errors that can occur when loading a project.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error("entry point '{entry}' not found in project at {project_dir}")]
    MissingEntry { entry: String, project_dir: PathBuf },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
