//! # Generator Module
//!
//! The generator module turns a [`ProjectDescriptor`](crate::project::ProjectDescriptor)
//! into a ready-to-build MCP server project in Go, Java, JavaScript or Python.
//!
//! ## Overview
//!
//! One [`Generator`] per language. All four share the same orchestration and
//! differ only in their directory skeleton, the transports they support and
//! the templates they resolve:
//!
//! ```text
//! Descriptor → ViewModel → Directory skeleton → Template map → Render + write → Entity files
//! ```
//!
//! 1. **Config Transformer** - [`transform`](crate::config::transform) derives the view model
//! 2. **Directory Builder** - [`ProjectLayout::create`] builds the fixed skeleton
//! 3. **Template Resolver** - [`base_template_map`] picks logical templates and output paths
//! 4. **Rendering** - [`TemplateRenderer`] renders each template from the asset store
//! 5. **Entity Expander** - [`expand_entities`] writes one file per tool, resource and capability
//!
//! ## Generated Structure
//!
//! A Go project generated with `--docker` and one tool looks like this:
//!
//! ```text
//! demo/
//! ├── go.mod
//! ├── Dockerfile
//! ├── .dockerignore
//! ├── README.md
//! ├── cmd/server/main.go          # transport-specific entry point
//! ├── configs/mcp-config.json     # server configuration
//! ├── examples/example.go
//! ├── internal/
//! │   ├── handlers/mcp.go
//! │   ├── resources/{registry,filesystem}.go
//! │   ├── tools/{calculator,Hammer}.go
//! │   └── capabilities/
//! └── pkg/mcp/{mcp,client}.go
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use mcpcli::assets::EmbeddedAssets;
//! use mcpcli::generator::scaffold;
//! use mcpcli::project::{Language, ProjectDescriptor, Transport};
//!
//! let descriptor = ProjectDescriptor::new("demo", Language::Go, Transport::Stdio);
//! let report = scaffold(&descriptor, Arc::new(EmbeddedAssets))?;
//! println!("wrote {} files", report.file_count());
//! ```
//!
//! ## Failure Handling
//!
//! A generator stops at the first error and returns it with the file,
//! template or entity involved. It does not clean up after itself:
//! [`scaffold`] holds an [`OutputRoot`] that removes the output root again
//! unless generation succeeded.

mod expand;
mod languages;
mod layout;
mod output;
mod project;
mod render;
mod templates;
#[cfg(test)]
mod tests;

pub use expand::{check_reserved_paths, check_unique_names, entity_file_name, expand_entities};
pub use languages::*;
pub use layout::ProjectLayout;
pub use output::{scaffold, OutputRoot};
pub use project::{check_descriptor, generate_project, GenerationReport};
pub use render::TemplateRenderer;
pub use templates::*;
