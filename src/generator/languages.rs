use std::sync::Arc;

use super::layout::ProjectLayout;
use super::project::{generate_project, GenerationReport};
use crate::assets::AssetStore;
use crate::error::Result;
use crate::project::{Language, ProjectDescriptor, Transport};

/// A language-specific project generator.
///
/// Variants differ only in data: their language, the transports they ship
/// entry points for, their directory skeleton and the asset store they read
/// templates from. The orchestration in [`Generator::generate`] is shared.
pub trait Generator: Send + Sync {
    fn language(&self) -> Language;

    fn supported_transports(&self) -> &'static [Transport];

    fn layout(&self) -> ProjectLayout;

    fn assets(&self) -> &dyn AssetStore;

    fn supports(&self, transport: Transport) -> bool {
        self.supported_transports().contains(&transport)
    }

    /// Write the project described by `descriptor` below its output root.
    ///
    /// Partial output is left in place on failure; rolling back is the
    /// caller's job (see [`OutputRoot`](super::OutputRoot)).
    fn generate(&self, descriptor: &ProjectDescriptor) -> Result<GenerationReport> {
        generate_project(self, descriptor)
    }
}

/// Go servers: `go.mod`, `cmd/server`, `internal/*` and a client package.
pub struct GoGenerator {
    assets: Arc<dyn AssetStore>,
}

impl GoGenerator {
    pub fn new(assets: Arc<dyn AssetStore>) -> Self {
        Self { assets }
    }
}

impl Generator for GoGenerator {
    fn language(&self) -> Language {
        Language::Go
    }

    fn supported_transports(&self) -> &'static [Transport] {
        &[Transport::Stdio, Transport::Rest, Transport::WebSocket]
    }

    fn layout(&self) -> ProjectLayout {
        ProjectLayout::new([
            "cmd/server",
            "internal/handlers",
            "internal/resources",
            "internal/tools",
            "internal/capabilities",
            "pkg/mcp",
            "examples",
            "configs",
        ])
    }

    fn assets(&self) -> &dyn AssetStore {
        self.assets.as_ref()
    }
}

/// Java servers built with Maven.
pub struct JavaGenerator {
    assets: Arc<dyn AssetStore>,
}

impl JavaGenerator {
    pub fn new(assets: Arc<dyn AssetStore>) -> Self {
        Self { assets }
    }
}

impl Generator for JavaGenerator {
    fn language(&self) -> Language {
        Language::Java
    }

    fn supported_transports(&self) -> &'static [Transport] {
        &[Transport::Stdio, Transport::Rest]
    }

    fn layout(&self) -> ProjectLayout {
        ProjectLayout::new([
            "src/main/java/handlers",
            "src/main/java/resources",
            "src/main/java/tools",
            "src/main/java/capabilities",
            "src/test/java",
            "examples",
            "configs",
        ])
    }

    fn assets(&self) -> &dyn AssetStore {
        self.assets.as_ref()
    }
}

/// Node.js servers.
pub struct JavaScriptGenerator {
    assets: Arc<dyn AssetStore>,
}

impl JavaScriptGenerator {
    pub fn new(assets: Arc<dyn AssetStore>) -> Self {
        Self { assets }
    }
}

impl Generator for JavaScriptGenerator {
    fn language(&self) -> Language {
        Language::JavaScript
    }

    fn supported_transports(&self) -> &'static [Transport] {
        &[Transport::Stdio, Transport::WebSocket]
    }

    fn layout(&self) -> ProjectLayout {
        ProjectLayout::new([
            "src/handlers",
            "src/resources",
            "src/tools",
            "src/capabilities",
            "examples",
            "configs",
        ])
    }

    fn assets(&self) -> &dyn AssetStore {
        self.assets.as_ref()
    }
}

/// Python servers packaged with `pyproject.toml`.
pub struct PythonGenerator {
    assets: Arc<dyn AssetStore>,
}

impl PythonGenerator {
    pub fn new(assets: Arc<dyn AssetStore>) -> Self {
        Self { assets }
    }
}

impl Generator for PythonGenerator {
    fn language(&self) -> Language {
        Language::Python
    }

    fn supported_transports(&self) -> &'static [Transport] {
        &[Transport::Stdio, Transport::Rest]
    }

    fn layout(&self) -> ProjectLayout {
        ProjectLayout::new([
            "src/handlers",
            "src/resources",
            "src/tools",
            "src/capabilities",
            "examples",
            "configs",
        ])
    }

    fn assets(&self) -> &dyn AssetStore {
        self.assets.as_ref()
    }
}

/// The generator for `language`, reading templates from `assets`.
pub fn select_generator(language: Language, assets: Arc<dyn AssetStore>) -> Box<dyn Generator> {
    match language {
        Language::Go => Box::new(GoGenerator::new(assets)),
        Language::Java => Box::new(JavaGenerator::new(assets)),
        Language::JavaScript => Box::new(JavaScriptGenerator::new(assets)),
        Language::Python => Box::new(PythonGenerator::new(assets)),
    }
}

/// Like [`select_generator`] for a language given by name (`golang` and
/// `node` are accepted as aliases).
pub fn generator_for(language: &str, assets: Arc<dyn AssetStore>) -> Result<Box<dyn Generator>> {
    Ok(select_generator(language.parse()?, assets))
}
