//! # Harness Module
//!
//! A small client for poking at a running MCP server, used by `mcpcli test`.
//!
//! The wire format is one JSON object per line in each direction:
//!
//! ```text
//! → {"method":"tools/list","id":1}
//! ← {"result":["calculator"],"id":1}
//! ```
//!
//! [`run_checks`] spawns the server named by the stdio transport's
//! `command` option when there is one, and otherwise talks over this
//! process's stdin/stdout.

mod checks;
mod client;
mod protocol;

pub use checks::{
    load_server_config, run_checks, run_with_client, Check, CheckOptions, CheckOutcome,
    CheckReport,
};
pub use client::{sanitize_uri, McpClient, MAX_RESPONSE_BYTES};
pub use protocol::{Request, RequestId, Response, RpcError};
