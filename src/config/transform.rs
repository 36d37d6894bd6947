use chrono::SecondsFormat;
use serde::Serialize;

use super::server::ServerConfig;
use crate::project::{sanitize_identifier, ProjectDescriptor};

/// Render context for one generation run.
///
/// Derived from the descriptor alone; building it twice from equal
/// descriptors yields equal view models.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewModel<'a> {
    /// The descriptor this view was built from.
    pub config: &'a ProjectDescriptor,
    /// Configuration document of the generated server.
    pub server_config: ServerConfig,
    /// Identifier-safe project name, used for packages and namespaces.
    pub package_name: String,
    /// Project name as given, used where the build tool accepts it verbatim.
    pub module_name: String,
    pub has_docker: bool,
    pub has_examples: bool,
    /// Descriptor creation time, RFC 3339.
    pub timestamp: String,
}

/// Build the view model for a validated descriptor. Never fails.
pub fn transform(descriptor: &ProjectDescriptor) -> ViewModel<'_> {
    ViewModel {
        config: descriptor,
        server_config: ServerConfig::from_descriptor(descriptor),
        package_name: sanitize_identifier(&descriptor.name),
        module_name: descriptor.name.clone(),
        has_docker: descriptor.docker,
        has_examples: descriptor.examples,
        timestamp: descriptor
            .created_at
            .to_rfc3339_opts(SecondsFormat::Secs, true),
    }
}
