//! # Assets Module
//!
//! Read-only template storage addressed by logical path, e.g.
//! `templates/go/stdio/go.mod.tmpl`. The generator only ever asks for one
//! asset at a time through [`AssetStore::read_asset`]; it never lists or
//! mutates a store.
//!
//! Three backends:
//!
//! - [`EmbeddedAssets`] - the `templates/` tree compiled into the binary
//! - [`DirAssets`] - a template directory on disk (`--template-dir`)
//! - [`MemoryAssets`] - an in-memory map, handy for overrides and tests

use std::borrow::Cow;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Prefix shared by every logical template path.
pub const TEMPLATE_PREFIX: &str = "templates/";

/// Failure to produce an asset.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("asset not found: {0}")]
    NotFound(String),
    #[error("failed to read asset {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: io::Error,
    },
}

/// Lookup of template bytes by logical path.
///
/// Implementations must be safe to share between threads; nothing in the
/// generator mutates a store.
pub trait AssetStore: Send + Sync {
    fn read_asset(&self, logical_path: &str) -> Result<Cow<'_, [u8]>, AssetError>;
}

macro_rules! embedded_templates {
    ($($path:literal),* $(,)?) => {
        &[$(
            (
                concat!("templates/", $path),
                include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/templates/", $path)),
            )
        ),*]
    };
}

static EMBEDDED: &[(&str, &str)] = embedded_templates![
    // Go
    "go/stdio/go.mod.tmpl",
    "go/stdio/cmd/server/main.go.tmpl",
    "go/rest/cmd/server/main.go.tmpl",
    "go/websocket/cmd/server/main.go.tmpl",
    "go/stdio/internal/handlers/mcp.go.tmpl",
    "go/stdio/internal/resources/filesystem.go.tmpl",
    "go/stdio/internal/resources/registry.go.tmpl",
    "go/stdio/internal/tools/calculator.go.tmpl",
    "go/stdio/pkg/mcp/client.go.tmpl",
    "go/stdio/pkg/mcp/mcp.go.tmpl",
    "go/stdio/README.md.tmpl",
    "go/stdio/configs/mcp-config.json.tmpl",
    "go/stdio/examples/example.go.tmpl",
    "go/stdio/Dockerfile.tmpl",
    "go/stdio/dockerignore.tmpl",
    "go/stdio/internal/tools/tool.go.tmpl",
    "go/stdio/internal/resources/resource.go.tmpl",
    "go/stdio/internal/capabilities/capability.go.tmpl",
    // JavaScript
    "node/stdio/package.json.tmpl",
    "node/stdio/src/index.js.tmpl",
    "node/websocket/src/index.js.tmpl",
    "node/stdio/src/handlers/mcp.js.tmpl",
    "node/stdio/src/resources/registry.js.tmpl",
    "node/stdio/README.md.tmpl",
    "node/stdio/configs/mcp-config.json.tmpl",
    "node/stdio/examples/example.js.tmpl",
    "node/stdio/Dockerfile.tmpl",
    "node/stdio/dockerignore.tmpl",
    "node/stdio/src/tools/tool.js.tmpl",
    "node/stdio/src/resources/resource.js.tmpl",
    "node/stdio/src/capabilities/capability.js.tmpl",
    // Python
    "python/stdio/pyproject.toml.tmpl",
    "python/stdio/src/main.py.tmpl",
    "python/rest/src/main.py.tmpl",
    "python/stdio/src/handlers/mcp.py.tmpl",
    "python/stdio/src/resources/registry.py.tmpl",
    "python/stdio/README.md.tmpl",
    "python/stdio/configs/mcp-config.json.tmpl",
    "python/stdio/examples/example.py.tmpl",
    "python/stdio/Dockerfile.tmpl",
    "python/stdio/dockerignore.tmpl",
    "python/stdio/src/tools/tool.py.tmpl",
    "python/stdio/src/resources/resource.py.tmpl",
    "python/stdio/src/capabilities/capability.py.tmpl",
    // Java
    "java/stdio/pom.xml.tmpl",
    "java/stdio/src/main/java/Main.java.tmpl",
    "java/rest/src/main/java/Main.java.tmpl",
    "java/stdio/src/main/java/handlers/MCPHandler.java.tmpl",
    "java/stdio/src/main/java/resources/Registry.java.tmpl",
    "java/stdio/README.md.tmpl",
    "java/stdio/configs/mcp-config.json.tmpl",
    "java/stdio/examples/Example.java.tmpl",
    "java/stdio/Dockerfile.tmpl",
    "java/stdio/dockerignore.tmpl",
    "java/stdio/src/main/java/tools/Tool.java.tmpl",
    "java/stdio/src/main/java/resources/Resource.java.tmpl",
    "java/stdio/src/main/java/capabilities/Capability.java.tmpl",
];

/// Templates compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedAssets;

impl EmbeddedAssets {
    /// Every embedded `(logical path, body)` pair.
    pub fn entries() -> impl Iterator<Item = (&'static str, &'static str)> {
        EMBEDDED.iter().copied()
    }

    pub fn contains(logical_path: &str) -> bool {
        EMBEDDED.iter().any(|(key, _)| *key == logical_path)
    }
}

impl AssetStore for EmbeddedAssets {
    fn read_asset(&self, logical_path: &str) -> Result<Cow<'_, [u8]>, AssetError> {
        EMBEDDED
            .iter()
            .find(|(key, _)| *key == logical_path)
            .map(|(_, body)| Cow::Borrowed(body.as_bytes()))
            .ok_or_else(|| AssetError::NotFound(logical_path.to_string()))
    }
}

/// Templates read from a directory on disk.
///
/// The directory mirrors the embedded layout without the leading
/// `templates/`, so `templates/go/stdio/go.mod.tmpl` resolves to
/// `<root>/go/stdio/go.mod.tmpl`.
#[derive(Debug, Clone)]
pub struct DirAssets {
    root: PathBuf,
}

impl DirAssets {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a logical path under the root, refusing anything that would
    /// escape it (`..`, absolute paths).
    fn map_path(&self, logical_path: &str) -> Option<PathBuf> {
        let relative = logical_path
            .strip_prefix(TEMPLATE_PREFIX)
            .unwrap_or(logical_path);
        let mut pb = self.root.clone();
        for comp in Path::new(relative).components() {
            match comp {
                Component::Normal(s) => pb.push(s),
                Component::CurDir => {}
                _ => return None,
            }
        }
        Some(pb)
    }
}

impl AssetStore for DirAssets {
    fn read_asset(&self, logical_path: &str) -> Result<Cow<'_, [u8]>, AssetError> {
        let path = self
            .map_path(logical_path)
            .ok_or_else(|| AssetError::NotFound(logical_path.to_string()))?;
        if !path.is_file() {
            return Err(AssetError::NotFound(logical_path.to_string()));
        }
        fs::read(&path).map(Cow::Owned).map_err(|source| AssetError::Io {
            key: logical_path.to_string(),
            source,
        })
    }
}

/// Templates held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryAssets {
    entries: HashMap<String, Vec<u8>>,
}

impl MemoryAssets {
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of the embedded templates, ready to be overridden.
    pub fn from_embedded() -> Self {
        Self {
            entries: EmbeddedAssets::entries()
                .map(|(key, body)| (key.to_string(), body.as_bytes().to_vec()))
                .collect(),
        }
    }

    pub fn insert(&mut self, logical_path: impl Into<String>, body: impl Into<Vec<u8>>) {
        self.entries.insert(logical_path.into(), body.into());
    }

    pub fn remove(&mut self, logical_path: &str) -> Option<Vec<u8>> {
        self.entries.remove(logical_path)
    }

    pub fn with(mut self, logical_path: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        self.insert(logical_path, body);
        self
    }
}

impl AssetStore for MemoryAssets {
    fn read_asset(&self, logical_path: &str) -> Result<Cow<'_, [u8]>, AssetError> {
        self.entries
            .get(logical_path)
            .map(|body| Cow::Borrowed(body.as_slice()))
            .ok_or_else(|| AssetError::NotFound(logical_path.to_string()))
    }
}
