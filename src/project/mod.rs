//! # Project Module
//!
//! The project descriptor: what the user asked for. A descriptor names the
//! project, picks a [`Language`] and [`Transport`], toggles Docker and example
//! files, and lists the tools, resources and capabilities that each get their
//! own generated source file.
//!
//! Descriptors are usually assembled by the CLI from flags, but can also be
//! loaded from a JSON, YAML or TOML file with [`load_descriptor`]:
//!
//! ```yaml
//! name: inventory
//! language: go
//! transport: rest
//! docker: true
//! tools:
//!   - name: Hammer
//!     description: Hits things
//! resources:
//!   - name: clock
//!     type: time
//! ```

mod load;
mod naming;
mod types;

pub use load::{load_descriptor, parse_document, read_document, DocumentFormat};
pub use naming::{sanitize_identifier, PLACEHOLDER_PREFIX};
pub use types::*;
