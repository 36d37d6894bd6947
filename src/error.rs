//! Error taxonomy for project generation.
//!
//! Every failure inside the engine is returned as a [`GenError`] that names the
//! file, template or directory involved. Nothing is retried; the caller decides
//! whether to roll back the output root (see [`crate::generator::OutputRoot`]).

use std::io;
use std::path::PathBuf;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, GenError>;

/// Errors produced while validating, resolving, rendering or writing a project.
#[derive(Debug, thiserror::Error)]
pub enum GenError {
    /// Descriptor rejected by the command layer (bad name, transport, ...).
    #[error("validation failed: {0}")]
    Validation(String),

    /// Language outside the closed set `{go, java, javascript, python}`.
    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// Output root already exists and overwriting was not requested.
    #[error("output directory {} already exists, use --force to overwrite", path.display())]
    DirectoryConflict { path: PathBuf },

    /// Any create/write/remove failure on disk.
    #[error("failed to {action} {}: {source}", path.display())]
    FileSystem {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The asset store has no template under this logical path.
    #[error("template not found: {key}")]
    TemplateNotFound { key: String },

    /// Template failed to parse or to render against its context.
    #[error("failed to render template {key}: {source}")]
    TemplateRender {
        key: String,
        #[source]
        source: minijinja::Error,
    },

    /// Descriptor or config file could not be read or parsed.
    #[error("invalid descriptor {}: {message}", path.display())]
    Descriptor { path: PathBuf, message: String },

    /// Failure while talking to a server under test.
    #[error("harness error: {0}")]
    Harness(String),
}

impl GenError {
    /// Wrap an I/O error with the action and path that produced it.
    pub fn fs(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        GenError::FileSystem {
            action,
            path: path.into(),
            source,
        }
    }
}
