//! Template resolution: which logical templates a project needs and where
//! each rendered file lands.
//!
//! Resolution is pure. It never touches an asset store or the filesystem;
//! a key that does not exist surfaces later as `TemplateNotFound`.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::assets::TEMPLATE_PREFIX;
use crate::config::ViewModel;
use crate::error::Result;
use crate::project::{Language, Transport};

/// Variant segment used by every template that does not depend on the
/// transport. Entry points are the only transport-specific templates.
pub const SHARED_VARIANT: &str = "stdio";

const DOCKER_FILES: &[(&str, &str)] = &[
    ("Dockerfile.tmpl", "Dockerfile"),
    ("dockerignore.tmpl", ".dockerignore"),
];

const GO_FILES: &[(&str, &str)] = &[
    ("go.mod.tmpl", "go.mod"),
    ("internal/handlers/mcp.go.tmpl", "internal/handlers/mcp.go"),
    ("internal/resources/registry.go.tmpl", "internal/resources/registry.go"),
    ("internal/resources/filesystem.go.tmpl", "internal/resources/filesystem.go"),
    ("internal/tools/calculator.go.tmpl", "internal/tools/calculator.go"),
    ("pkg/mcp/mcp.go.tmpl", "pkg/mcp/mcp.go"),
    ("pkg/mcp/client.go.tmpl", "pkg/mcp/client.go"),
    ("README.md.tmpl", "README.md"),
    ("configs/mcp-config.json.tmpl", "configs/mcp-config.json"),
    ("examples/example.go.tmpl", "examples/example.go"),
];

const JAVASCRIPT_FILES: &[(&str, &str)] = &[
    ("package.json.tmpl", "package.json"),
    ("src/handlers/mcp.js.tmpl", "src/handlers/mcp.js"),
    ("src/resources/registry.js.tmpl", "src/resources/registry.js"),
    ("README.md.tmpl", "README.md"),
    ("configs/mcp-config.json.tmpl", "configs/mcp-config.json"),
    ("examples/example.js.tmpl", "examples/example.js"),
];

const PYTHON_FILES: &[(&str, &str)] = &[
    ("pyproject.toml.tmpl", "pyproject.toml"),
    ("src/handlers/mcp.py.tmpl", "src/handlers/mcp.py"),
    ("src/resources/registry.py.tmpl", "src/resources/registry.py"),
    ("README.md.tmpl", "README.md"),
    ("configs/mcp-config.json.tmpl", "configs/mcp-config.json"),
    ("examples/example.py.tmpl", "examples/example.py"),
];

const JAVA_FILES: &[(&str, &str)] = &[
    ("pom.xml.tmpl", "pom.xml"),
    (
        "src/main/java/handlers/MCPHandler.java.tmpl",
        "src/main/java/handlers/MCPHandler.java",
    ),
    (
        "src/main/java/resources/Registry.java.tmpl",
        "src/main/java/resources/Registry.java",
    ),
    ("README.md.tmpl", "README.md"),
    ("configs/mcp-config.json.tmpl", "configs/mcp-config.json"),
    ("examples/Example.java.tmpl", "examples/Example.java"),
];

/// Ordered mapping from logical template key to output path relative to
/// the project root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateMap {
    entries: BTreeMap<String, PathBuf>,
}

impl TemplateMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, output: impl Into<PathBuf>) {
        self.entries.insert(key.into(), output.into());
    }

    pub fn get(&self, key: &str) -> Option<&Path> {
        self.entries.get(key).map(PathBuf::as_path)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.entries
            .iter()
            .map(|(key, output)| (key.as_str(), output.as_path()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

fn template_key(language: Language, variant: &str, file: &str) -> String {
    format!(
        "{TEMPLATE_PREFIX}{}/{variant}/{file}",
        language.template_dir()
    )
}

fn base_files(language: Language) -> &'static [(&'static str, &'static str)] {
    match language {
        Language::Go => GO_FILES,
        Language::Java => JAVA_FILES,
        Language::JavaScript => JAVASCRIPT_FILES,
        Language::Python => PYTHON_FILES,
    }
}

/// Entry-point template file and output path for a language.
pub fn entry_point(language: Language) -> (&'static str, &'static str) {
    match language {
        Language::Go => ("cmd/server/main.go.tmpl", "cmd/server/main.go"),
        Language::Java => ("src/main/java/Main.java.tmpl", "src/main/java/Main.java"),
        Language::JavaScript => ("src/index.js.tmpl", "src/index.js"),
        Language::Python => ("src/main.py.tmpl", "src/main.py"),
    }
}

/// Logical key of the entry point for a language and transport. The key
/// itself changes with the transport, so each transport gets its own body.
pub fn entry_point_key(language: Language, transport: Transport) -> String {
    template_key(language, transport.as_str(), entry_point(language).0)
}

/// Template map for a known language.
///
/// Always holds the build manifest, the entry point, handler registration,
/// the resource registry, the README, the server configuration and one
/// example; Docker files are added when the project asks for them.
pub fn base_template_map(language: Language, view: &ViewModel<'_>) -> TemplateMap {
    let mut map = TemplateMap::new();
    for (file, output) in base_files(language) {
        map.insert(template_key(language, SHARED_VARIANT, file), *output);
    }
    let (_, entry_output) = entry_point(language);
    map.insert(
        entry_point_key(language, view.config.transport),
        entry_output,
    );
    if view.has_docker {
        for (file, output) in DOCKER_FILES {
            map.insert(template_key(language, SHARED_VARIANT, file), *output);
        }
    }
    map
}

/// Resolve the template map for a language given by name.
///
/// Fails with `UnsupportedLanguage` for anything outside the closed set;
/// a map is never returned for an unknown language.
pub fn resolve_template_map(language: &str, view: &ViewModel<'_>) -> Result<TemplateMap> {
    let language: Language = language.parse()?;
    Ok(base_template_map(language, view))
}

/// The three kinds of entity that expand into one file each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Tool,
    Resource,
    Capability,
}

impl EntityKind {
    pub const ALL: [EntityKind; 3] = [EntityKind::Tool, EntityKind::Resource, EntityKind::Capability];

    /// Name of the entity in its render context.
    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Tool => "tool",
            EntityKind::Resource => "resource",
            EntityKind::Capability => "capability",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Single-entity template plus the directory its files are written to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityTemplate {
    pub key: String,
    pub directory: &'static str,
}

/// Single-entity template for a known language.
pub fn entity_template(language: Language, kind: EntityKind) -> EntityTemplate {
    let (file, directory) = match (language, kind) {
        (Language::Go, EntityKind::Tool) => ("internal/tools/tool.go.tmpl", "internal/tools"),
        (Language::Go, EntityKind::Resource) => {
            ("internal/resources/resource.go.tmpl", "internal/resources")
        }
        (Language::Go, EntityKind::Capability) => (
            "internal/capabilities/capability.go.tmpl",
            "internal/capabilities",
        ),
        (Language::JavaScript, EntityKind::Tool) => ("src/tools/tool.js.tmpl", "src/tools"),
        (Language::JavaScript, EntityKind::Resource) => {
            ("src/resources/resource.js.tmpl", "src/resources")
        }
        (Language::JavaScript, EntityKind::Capability) => {
            ("src/capabilities/capability.js.tmpl", "src/capabilities")
        }
        (Language::Python, EntityKind::Tool) => ("src/tools/tool.py.tmpl", "src/tools"),
        (Language::Python, EntityKind::Resource) => {
            ("src/resources/resource.py.tmpl", "src/resources")
        }
        (Language::Python, EntityKind::Capability) => {
            ("src/capabilities/capability.py.tmpl", "src/capabilities")
        }
        (Language::Java, EntityKind::Tool) => {
            ("src/main/java/tools/Tool.java.tmpl", "src/main/java/tools")
        }
        (Language::Java, EntityKind::Resource) => (
            "src/main/java/resources/Resource.java.tmpl",
            "src/main/java/resources",
        ),
        (Language::Java, EntityKind::Capability) => (
            "src/main/java/capabilities/Capability.java.tmpl",
            "src/main/java/capabilities",
        ),
    };
    EntityTemplate {
        key: template_key(language, SHARED_VARIANT, file),
        directory,
    }
}

fn entity_key(language: &str, kind: EntityKind) -> Option<String> {
    let language: Language = language.parse().ok()?;
    Some(entity_template(language, kind).key)
}

/// Tool template key for a language name; `None` when unknown.
pub fn tool_template(language: &str) -> Option<String> {
    entity_key(language, EntityKind::Tool)
}

/// Resource template key for a language name; `None` when unknown.
pub fn resource_template(language: &str) -> Option<String> {
    entity_key(language, EntityKind::Resource)
}

/// Capability template key for a language name; `None` when unknown.
pub fn capability_template(language: &str) -> Option<String> {
    entity_key(language, EntityKind::Capability)
}
