//! ><> Run Manifests
//!
//! This crate loads ><> programs from directories with a `fish.toml`
//! manifest naming the entry source and how to run it.
//!
//! # Project Structure
//!
//! ```text
//! sqrt/
//! ├── fish.toml     # Manifest
//! └── sqrt.fish     # Entry point
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use fish_project::Project;
//!
//! let project = Project::load("path/to/sqrt")?;
//! println!("{}", project.source.source);
//! ```

pub mod error;
pub mod manifest;

pub use error::{LoadError, ManifestError};
pub use manifest::Manifest;

use std::path::{Path, PathBuf};

/// Name of the manifest file inside a project directory.
pub const MANIFEST_FILE: &str = "fish.toml";

/// Everything needed to start a run.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectSource {
    /// Path of the entry file.
    pub path: PathBuf,
    /// Program text with one trailing newline removed.
    pub source: String,
    pub initial_stack: Vec<f64>,
    pub input: String,
    pub max_steps: Option<u64>,
    pub seed: Option<u64>,
}

/// A loaded project ready for execution.
#[derive(Debug, Clone)]
pub struct Project {
    /// The project manifest.
    pub manifest: Manifest,

    /// The resolved entry source.
    pub source: ProjectSource,
}

impl Project {
    /// Load a project from a directory containing `fish.toml`.
    pub fn load(project_dir: impl AsRef<Path>) -> Result<Self, LoadError> {
        let project_dir = project_dir.as_ref();
        let manifest = Manifest::from_file(&project_dir.join(MANIFEST_FILE))?;

        let path = project_dir.join(&manifest.program.entry);
        if !path.is_file() {
            return Err(LoadError::MissingEntry {
                entry: manifest.program.entry.clone(),
                project_dir: project_dir.to_owned(),
            });
        }
        let text = std::fs::read_to_string(&path).map_err(|e| LoadError::Io {
            path: path.clone(),
            source: e,
        })?;

        let source = ProjectSource {
            path,
            source: strip_trailing_newline(&text).to_string(),
            initial_stack: manifest.program.initial_stack.clone(),
            input: manifest.program.input.clone(),
            max_steps: manifest.limits.max_steps,
            seed: manifest.limits.seed,
        };
        Ok(Project { manifest, source })
    }

    /// Get a reference to the manifest.
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Get a reference to the loaded source.
    pub fn source(&self) -> &ProjectSource {
        &self.source
    }
}

/// Remove a single trailing `\n` or `\r\n`, as left by most editors.
pub fn strip_trailing_newline(text: &str) -> &str {
    text.strip_suffix("\r\n")
        .or_else(|| text.strip_suffix('\n'))
        .unwrap_or(text)
}
