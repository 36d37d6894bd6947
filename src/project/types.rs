use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::GenError;

/// Version stamped into generated projects when the descriptor gives none.
pub const DEFAULT_PROJECT_VERSION: &str = "0.1.0";

/// Target language of a generated project.
///
/// The set is closed; anything else is rejected with
/// [`GenError::UnsupportedLanguage`] when parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[serde(alias = "golang")]
    Go,
    Java,
    #[serde(alias = "node")]
    JavaScript,
    Python,
}

impl Language {
    /// All supported languages, in the order they are offered to users.
    pub const ALL: [Language; 4] = [
        Language::Go,
        Language::Java,
        Language::JavaScript,
        Language::Python,
    ];

    /// Canonical identifier (`go`, `java`, `javascript`, `python`).
    pub fn as_str(self) -> &'static str {
        match self {
            Language::Go => "go",
            Language::Java => "java",
            Language::JavaScript => "javascript",
            Language::Python => "python",
        }
    }

    /// Directory segment under `templates/` holding this language's assets.
    pub fn template_dir(self) -> &'static str {
        match self {
            Language::Go => "go",
            Language::Java => "java",
            Language::JavaScript => "node",
            Language::Python => "python",
        }
    }

    /// Source file extension, dot included.
    pub fn extension(self) -> &'static str {
        match self {
            Language::Go => ".go",
            Language::Java => ".java",
            Language::JavaScript => ".js",
            Language::Python => ".py",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = GenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "go" | "golang" => Ok(Language::Go),
            "java" => Ok(Language::Java),
            "javascript" | "node" => Ok(Language::JavaScript),
            "python" => Ok(Language::Python),
            _ => Err(GenError::UnsupportedLanguage(s.to_string())),
        }
    }
}

/// Transport the generated server speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    #[default]
    Stdio,
    Rest,
    #[serde(alias = "ws")]
    WebSocket,
}

impl Transport {
    pub const ALL: [Transport; 3] = [Transport::Stdio, Transport::Rest, Transport::WebSocket];

    pub fn as_str(self) -> &'static str {
        match self {
            Transport::Stdio => "stdio",
            Transport::Rest => "rest",
            Transport::WebSocket => "websocket",
        }
    }
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Transport {
    type Err = GenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stdio" => Ok(Transport::Stdio),
            "rest" => Ok(Transport::Rest),
            "websocket" | "ws" => Ok(Transport::WebSocket),
            other => Err(GenError::Validation(format!(
                "invalid transport: {other}, valid options are: stdio, rest, websocket"
            ))),
        }
    }
}

/// Anything that expands into its own generated file.
pub trait Named {
    fn name(&self) -> &str;
}

/// A tool the generated server exposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tool {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Backing store kind for a declared resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Database,
    #[default]
    Filesystem,
    Time,
}

impl ResourceType {
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceType::Database => "database",
            ResourceType::Filesystem => "filesystem",
            ResourceType::Time => "time",
        }
    }
}

impl FromStr for ResourceType {
    type Err = GenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "database" => Ok(ResourceType::Database),
            "filesystem" => Ok(ResourceType::Filesystem),
            "time" => Ok(ResourceType::Time),
            other => Err(GenError::Validation(format!(
                "invalid resource type: {other}, valid options are: database, filesystem, time"
            ))),
        }
    }
}

/// A resource the generated server exposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: ResourceType,
}

/// A named server capability toggle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capability {
    pub name: String,
    #[serde(default)]
    pub enabled: bool,
}

impl Named for Tool {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for Resource {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for Capability {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Everything needed to scaffold one project.
///
/// Built by the command layer (flags or a descriptor file) and
/// handed to a generator read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectDescriptor {
    pub name: String,
    pub language: Language,
    #[serde(default)]
    pub transport: Transport,
    #[serde(default)]
    pub docker: bool,
    #[serde(default)]
    pub examples: bool,
    /// Output root; the project name when absent.
    #[serde(default)]
    pub output: Option<PathBuf>,
    #[serde(default)]
    pub force: bool,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub tools: Vec<Tool>,
    #[serde(default)]
    pub resources: Vec<Resource>,
    #[serde(default)]
    pub capabilities: Vec<Capability>,
}

fn default_version() -> String {
    DEFAULT_PROJECT_VERSION.to_string()
}

impl ProjectDescriptor {
    /// Descriptor with defaults for everything but name, language and transport.
    pub fn new(name: impl Into<String>, language: Language, transport: Transport) -> Self {
        Self {
            name: name.into(),
            language,
            transport,
            docker: false,
            examples: false,
            output: None,
            force: false,
            description: String::new(),
            author: None,
            version: default_version(),
            created_at: Utc::now(),
            tools: Vec::new(),
            resources: Vec::new(),
            capabilities: Vec::new(),
        }
    }

    /// Directory the project is written to.
    pub fn output_dir(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(&self.name))
    }
}
