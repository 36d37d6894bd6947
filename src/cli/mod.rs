//! # CLI Module
//!
//! Command-line interface of the `mcpcli` binary.
//!
//! ## Commands
//!
//! ### `generate`
//!
//! Scaffold a new MCP server project:
//!
//! ```bash
//! mcpcli generate --name weather --language go --transport rest --docker
//! ```
//!
//! Options:
//! - `-n, --name <NAME>` - Project name, also the default output directory
//! - `-l, --language <LANG>` - go, java, javascript or python (`golang`, `node` accepted)
//! - `-t, --transport <TRANSPORT>` - stdio (default), rest or websocket
//! - `-d, --docker` / `-e, --examples` - Optional extras
//! - `-o, --output <DIR>` - Output directory
//! - `-f, --force` - Replace an existing output directory
//! - `--tool`, `--resource`, `--capability` - Declare entities, repeatable
//! - `--descriptor <FILE>` - Read the project from a JSON, YAML or TOML file
//! - `--template-dir <DIR>` - Use templates from disk (`MCPCLI_TEMPLATE_DIR`)
//!
//! ### `test`
//!
//! Send `resources/list` and `tools/list` to a server over stdio:
//!
//! ```bash
//! mcpcli test --config weather/configs/mcp-config.json --all
//! ```
//!
//! When the config's stdio transport names a `command`, the server is
//! spawned as a child process; otherwise the harness talks over its own
//! stdin and stdout.
//!
//! ## Usage from Code
//!
//! ```rust,ignore
//! use clap::Parser;
//! use mcpcli::cli::{run_cli, Cli};
//!
//! let cli = Cli::parse();
//! run_cli(&cli)?;
//! ```

mod commands;
mod options;


pub use commands::{next_steps, run_cli, Cli, Commands, GenerateArgs, TestArgs};
pub use options::{
    check_project_name, parse_capability, parse_resource, parse_tool, GenerateOptions,
};
