use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use crate::assets::EmbeddedAssets;
use crate::error::{GenError, Result};
use crate::generator::select_generator;
use crate::project::{
    Capability, Language, ProjectDescriptor, Resource, ResourceType, Tool, Transport,
};

/// Raw generate options as collected from flags and an optional descriptor
/// file. Nothing here has been checked yet; see [`GenerateOptions::validate`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerateOptions {
    pub name: String,
    pub language: String,
    pub transport: String,
    pub docker: bool,
    pub examples: bool,
    pub output: Option<PathBuf>,
    pub force: bool,
    pub description: String,
    pub author: Option<String>,
    pub version: Option<String>,
    pub tools: Vec<Tool>,
    pub resources: Vec<Resource>,
    pub capabilities: Vec<Capability>,
    /// Descriptor loaded from `--descriptor`; supplies everything the flags
    /// leave unset.
    pub base: Option<ProjectDescriptor>,
}

impl GenerateOptions {
    /// Check the options and turn them into a descriptor. Touches no disk.
    ///
    /// Fills in defaults on the way: transport `stdio`, output = name.
    pub fn validate(&mut self) -> Result<ProjectDescriptor> {
        self.inherit_from_base();

        self.name = self.name.trim().to_string();
        check_project_name(&self.name)?;

        if self.language.trim().is_empty() {
            return Err(GenError::Validation(format!(
                "language is required, valid options are: {}",
                Language::ALL.map(Language::as_str).join(", ")
            )));
        }
        let language: Language = self.language.parse()?;

        if self.transport.trim().is_empty() {
            self.transport = Transport::default().as_str().to_string();
        }
        let transport: Transport = self.transport.parse()?;

        let generator = select_generator(language, Arc::new(EmbeddedAssets));
        if !generator.supports(transport) {
            let valid: Vec<&str> = generator
                .supported_transports()
                .iter()
                .map(|t| t.as_str())
                .collect();
            return Err(GenError::Validation(format!(
                "transport {transport} is not supported for {language}, valid options are: {}",
                valid.join(", ")
            )));
        }

        if self.output.is_none() {
            self.output = Some(PathBuf::from(&self.name));
        }

        let mut descriptor = match self.base.take() {
            Some(base) => base,
            None => ProjectDescriptor::new(self.name.clone(), language, transport),
        };
        descriptor.name = self.name.clone();
        descriptor.language = language;
        descriptor.transport = transport;
        descriptor.docker = self.docker;
        descriptor.examples = self.examples;
        descriptor.output = self.output.clone();
        descriptor.force = self.force;
        descriptor.description = self.description.clone();
        descriptor.author = self.author.clone().filter(|a| !a.trim().is_empty());
        if let Some(version) = self.version.as_ref().filter(|v| !v.trim().is_empty()) {
            descriptor.version = version.clone();
        }
        descriptor.tools = self.tools.clone();
        descriptor.resources = self.resources.clone();
        descriptor.capabilities = self.capabilities.clone();
        Ok(descriptor)
    }

    /// Copy fields the flags left empty from the loaded descriptor.
    fn inherit_from_base(&mut self) {
        let Some(base) = self.base.as_ref() else {
            return;
        };
        if self.name.trim().is_empty() {
            self.name = base.name.clone();
        }
        if self.language.trim().is_empty() {
            self.language = base.language.as_str().to_string();
        }
        if self.transport.trim().is_empty() {
            self.transport = base.transport.as_str().to_string();
        }
        self.docker |= base.docker;
        self.examples |= base.examples;
        self.force |= base.force;
        if self.output.is_none() {
            self.output = base.output.clone();
        }
        if self.description.is_empty() {
            self.description = base.description.clone();
        }
        if self.author.is_none() {
            self.author = base.author.clone();
        }
        if self.version.is_none() {
            self.version = Some(base.version.clone());
        }
        if self.tools.is_empty() {
            self.tools = base.tools.clone();
        }
        if self.resources.is_empty() {
            self.resources = base.resources.clone();
        }
        if self.capabilities.is_empty() {
            self.capabilities = base.capabilities.clone();
        }
    }
}

/// A project name must be usable as a single directory name.
pub fn check_project_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(GenError::Validation("project name is required".to_string()));
    }
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) if !name.contains(['/', '\\']) => Ok(()),
        _ => Err(GenError::Validation(format!(
            "project name {name:?} must be a plain directory name"
        ))),
    }
}

/// `NAME[:DESCRIPTION]`
pub fn parse_tool(flag: &str) -> Result<Tool> {
    let (name, description) = flag.split_once(':').unwrap_or((flag, ""));
    let name = non_empty(name, "tool")?;
    Ok(Tool {
        name,
        description: description.trim().to_string(),
    })
}

/// `NAME[:TYPE]`, type defaulting to `filesystem`.
pub fn parse_resource(flag: &str) -> Result<Resource> {
    let (name, kind) = flag.split_once(':').unwrap_or((flag, ""));
    let name = non_empty(name, "resource")?;
    let kind = if kind.trim().is_empty() {
        ResourceType::default()
    } else {
        kind.parse()?
    };
    Ok(Resource { name, kind })
}

/// `NAME[=true|false]`, enabled unless stated otherwise.
pub fn parse_capability(flag: &str) -> Result<Capability> {
    let (name, enabled) = flag.split_once('=').unwrap_or((flag, "true"));
    let name = non_empty(name, "capability")?;
    let enabled = match enabled.trim().to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => true,
        "false" | "off" | "no" | "0" => false,
        other => {
            return Err(GenError::Validation(format!(
                "invalid value {other:?} for capability {name}, expected true or false"
            )))
        }
    };
    Ok(Capability { name, enabled })
}

fn non_empty(name: &str, what: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(GenError::Validation(format!("{what} name must not be empty")));
    }
    Ok(name.to_string())
}
