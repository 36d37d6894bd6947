use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::types::ProjectDescriptor;
use crate::error::{GenError, Result};

/// Document formats accepted for descriptor and config files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
    Toml,
}

impl DocumentFormat {
    /// Pick a format from the file extension; JSON when unknown.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("yaml") | Some("yml") => DocumentFormat::Yaml,
            Some("toml") => DocumentFormat::Toml,
            _ => DocumentFormat::Json,
        }
    }
}

/// Parse `content` as `T`, reporting failures against `path`.
///
/// serde_json and serde_yaml both include line/column in their messages, so the
/// error text is enough to locate the problem.
pub fn parse_document<T: DeserializeOwned>(
    path: &Path,
    content: &str,
    format: DocumentFormat,
) -> Result<T> {
    let parsed = match format {
        DocumentFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
        DocumentFormat::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
        DocumentFormat::Toml => toml::from_str(content).map_err(|e| e.to_string()),
    };
    parsed.map_err(|message| GenError::Descriptor {
        path: path.to_path_buf(),
        message,
    })
}

/// Read a file from disk, wrapping I/O failures with the path.
pub fn read_document(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| GenError::fs("read", path, e))
}

#[derive(Deserialize)]
struct Stamp {
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
}

/// Load a project descriptor from a JSON, YAML or TOML file.
///
/// A file without `created_at` is stamped with its modification time, so
/// loading an unchanged file always yields the same descriptor.
pub fn load_descriptor(path: &Path) -> Result<ProjectDescriptor> {
    let content = read_document(path)?;
    let format = DocumentFormat::from_path(path);
    let mut descriptor: ProjectDescriptor = parse_document(path, &content, format)?;
    if descriptor.name.trim().is_empty() {
        return Err(GenError::Descriptor {
            path: path.to_path_buf(),
            message: "project name is required".to_string(),
        });
    }
    let stamp: Stamp = parse_document(path, &content, format)?;
    if stamp.created_at.is_none() {
        let modified = fs::metadata(path)
            .and_then(|m| m.modified())
            .map_err(|e| GenError::fs("stat", path, e))?;
        descriptor.created_at = DateTime::<Utc>::from(modified);
    }
    Ok(descriptor)
}
