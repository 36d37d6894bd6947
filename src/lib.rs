//! # mcpcli
//!
//! **mcpcli** scaffolds [Model Context Protocol](https://modelcontextprotocol.io) server
//! projects in Go, Java, JavaScript and Python, and ships a small stdio harness for
//! poking at a running server.
//!
//! ## Architecture
//!
//! - **[`project`]** - The project descriptor and its vocabulary (languages, transports, entities)
//! - **[`config`]** - Server configuration and the view model handed to templates
//! - **[`assets`]** - Template stores: embedded in the binary, on disk, or in memory
//! - **[`generator`]** - Per-language generators, template resolution, rendering and rollback
//! - **[`harness`]** - Line-delimited JSON-RPC client used by `mcpcli test`
//! - **[`cli`]** - The `mcpcli` command line
//! - **[`logging`]** - `tracing` subscriber setup
//!
//! ### Generation Flow
//!
//! ```text
//! flags / descriptor file
//!        │
//!        ▼
//! GenerateOptions::validate ──► ProjectDescriptor
//!                                     │
//!                                     ▼
//!                       scaffold: OutputRoot::prepare
//!                                     │
//!                                     ▼
//!            Generator::generate (layout, templates, entities)
//!                                     │
//!                       ok ──► commit │ err ──► output root removed
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! mcpcli generate --name weather --language python --transport rest --docker
//! cd weather && pip install -e . && python src/main.py
//! ```
//!
//! ## Templates
//!
//! Templates are [minijinja](https://docs.rs/minijinja) sources under `templates/`, keyed as
//! `templates/<language>/<variant>/<file>.tmpl`. They are compiled into the binary; pass
//! `--template-dir` (or set `MCPCLI_TEMPLATE_DIR`) to render from a checkout instead.

pub mod assets;
pub mod cli;
pub mod config;
pub mod error;
pub mod generator;
pub mod harness;
pub mod logging;
pub mod project;

pub use error::{GenError, Result};
