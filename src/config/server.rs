use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::project::{Capability, ProjectDescriptor, Resource, Tool, Transport};

/// `$schema` written into every server configuration.
pub const SERVER_CONFIG_SCHEMA: &str =
    "https://schemas.modelcontextprotocol.org/server-config.json";

/// License used when the descriptor does not name one.
pub const DEFAULT_LICENSE: &str = "MIT";

/// The configuration document a generated server reads at startup
/// (`configs/mcp-config.json`). Also the input format of `mcpcli test`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(rename = "$schema")]
    pub schema: String,
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
    pub transport: TransportConfig,
    #[serde(default)]
    pub capabilities: Capabilities,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<Tool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<Resource>,
}

/// Transport section: the kind plus kind-specific options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportConfig {
    #[serde(rename = "type")]
    pub kind: Transport,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Map<String, Value>>,
}

impl TransportConfig {
    /// Transport section with the default options for `kind`.
    pub fn with_defaults(kind: Transport) -> Self {
        Self {
            kind,
            options: default_transport_options(kind),
        }
    }

    /// String option lookup, e.g. the server `command` used by the harness.
    pub fn option_str(&self, key: &str) -> Option<&str> {
        self.options.as_ref()?.get(key)?.as_str()
    }
}

/// Default transport options: `rest` listens on localhost:8080, `websocket`
/// on port 8081 at `/ws`, `stdio` has none.
pub fn default_transport_options(kind: Transport) -> Option<Map<String, Value>> {
    let options = match kind {
        Transport::Rest => json!({ "port": 8080, "host": "localhost" }),
        Transport::WebSocket => json!({ "port": 8081, "path": "/ws" }),
        Transport::Stdio => return None,
    };
    match options {
        Value::Object(map) => Some(map),
        _ => None,
    }
}

/// What the generated server advertises.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    #[serde(default)]
    pub resources: CapabilityFlag,
    #[serde(default)]
    pub tools: CapabilityFlag,
    #[serde(default)]
    pub prompts: CapabilityFlag,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            resources: CapabilityFlag::enabled(0),
            tools: CapabilityFlag::enabled(0),
            prompts: CapabilityFlag::enabled(0),
        }
    }
}

impl Capabilities {
    /// Apply a declared capability whose name matches a category.
    ///
    /// Returns `false` when the name is not one of `resources`, `tools`,
    /// `prompts`; such capabilities only produce their own source file.
    pub fn apply_override(&mut self, capability: &Capability) -> bool {
        let flag = match capability.name.trim().to_ascii_lowercase().as_str() {
            "resources" => &mut self.resources,
            "tools" => &mut self.tools,
            "prompts" => &mut self.prompts,
            _ => return false,
        };
        flag.enabled = capability.enabled;
        true
    }
}

/// Enabled flag plus an optional item count (omitted when zero).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityFlag {
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub count: usize,
}

impl CapabilityFlag {
    pub fn enabled(count: usize) -> Self {
        Self {
            enabled: true,
            count,
        }
    }
}

impl Default for CapabilityFlag {
    fn default() -> Self {
        Self::enabled(0)
    }
}

fn is_zero(n: &usize) -> bool {
    *n == 0
}

impl ServerConfig {
    /// Build the server configuration for a descriptor.
    ///
    /// Constant defaults (schema, license) first, then the descriptor's fields,
    /// then transport defaults and capability overrides.
    pub fn from_descriptor(descriptor: &ProjectDescriptor) -> Self {
        let mut capabilities = Capabilities {
            resources: CapabilityFlag::enabled(descriptor.resources.len()),
            tools: CapabilityFlag::enabled(descriptor.tools.len()),
            prompts: CapabilityFlag::enabled(0),
        };
        for capability in &descriptor.capabilities {
            capabilities.apply_override(capability);
        }

        Self {
            schema: SERVER_CONFIG_SCHEMA.to_string(),
            name: descriptor.name.clone(),
            version: descriptor.version.clone(),
            description: descriptor.description.clone(),
            author: descriptor.author.clone().filter(|a| !a.is_empty()),
            license: Some(DEFAULT_LICENSE.to_string()),
            repository: None,
            transport: TransportConfig::with_defaults(descriptor.transport),
            capabilities,
            tools: descriptor.tools.clone(),
            resources: descriptor.resources.clone(),
        }
    }

    /// Pretty-printed JSON, as written to `configs/mcp-config.json`.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
