//! # Config Module
//!
//! Turns a [`ProjectDescriptor`](crate::project::ProjectDescriptor) into the
//! data templates are rendered with.
//!
//! - [`ServerConfig`] is the JSON document the *generated* server reads at
//!   runtime (`configs/mcp-config.json`). It combines constant defaults
//!   (schema URL, MIT license), descriptor fields, default transport options
//!   and capability flags.
//! - [`ViewModel`] wraps the descriptor, the server config and a few derived
//!   fields (sanitized package name, timestamp, Docker/examples flags).
//!   [`transform`] builds it and cannot fail.
//!
//! | Transport   | Default options                     |
//! |-------------|-------------------------------------|
//! | `stdio`     | none                                |
//! | `rest`      | `{"port": 8080, "host": "localhost"}` |
//! | `websocket` | `{"port": 8081, "path": "/ws"}`     |

mod server;
mod transform;

pub use server::{
    default_transport_options, Capabilities, CapabilityFlag, ServerConfig, TransportConfig,
    DEFAULT_LICENSE, SERVER_CONFIG_SCHEMA,
};
pub use transform::{transform, ViewModel};
