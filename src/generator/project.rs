use std::path::PathBuf;

use tracing::{debug, info};

use super::expand::{check_reserved_paths, check_unique_names, expand_entities};
use super::languages::Generator;
use super::render::TemplateRenderer;
use super::templates::{base_template_map, entity_template, EntityKind};
use crate::config::transform;
use crate::error::{GenError, Result};
use crate::project::ProjectDescriptor;

/// What a generation run put on disk, relative to [`root`](Self::root).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    pub root: PathBuf,
    /// Skeleton directories in creation order.
    pub directories: Vec<PathBuf>,
    /// Files in write order: template map entries first, then tools,
    /// resources and capabilities.
    pub files: Vec<PathBuf>,
}

impl GenerationReport {
    pub fn file_count(&self) -> usize {
        self.files.len()
    }
}

/// Reject descriptors this generator cannot honour before anything is
/// written: wrong language, unsupported transport, and entities whose files
/// would collide with each other or with a templated file.
pub fn check_descriptor<G: Generator + ?Sized>(
    generator: &G,
    descriptor: &ProjectDescriptor,
) -> Result<()> {
    if descriptor.language != generator.language() {
        return Err(GenError::Validation(format!(
            "{} generator cannot produce a {} project",
            generator.language(),
            descriptor.language
        )));
    }
    if !generator.supports(descriptor.transport) {
        let supported: Vec<&str> = generator
            .supported_transports()
            .iter()
            .map(|t| t.as_str())
            .collect();
        return Err(GenError::Validation(format!(
            "transport {} is not supported for {}, valid options are: {}",
            descriptor.transport,
            descriptor.language,
            supported.join(", ")
        )));
    }
    check_unique_names(EntityKind::Tool, &descriptor.tools)?;
    check_unique_names(EntityKind::Resource, &descriptor.resources)?;
    check_unique_names(EntityKind::Capability, &descriptor.capabilities)?;

    let language = descriptor.language;
    let extension = language.extension();
    let map = base_template_map(language, &transform(descriptor));
    check_reserved_paths(
        EntityKind::Tool,
        &entity_template(language, EntityKind::Tool),
        extension,
        &descriptor.tools,
        &map,
    )?;
    check_reserved_paths(
        EntityKind::Resource,
        &entity_template(language, EntityKind::Resource),
        extension,
        &descriptor.resources,
        &map,
    )?;
    check_reserved_paths(
        EntityKind::Capability,
        &entity_template(language, EntityKind::Capability),
        extension,
        &descriptor.capabilities,
        &map,
    )?;
    Ok(())
}

/// Shared orchestration behind [`Generator::generate`].
///
/// View model, directory skeleton, template map, then tools, resources and
/// capabilities in that order. The first failure is returned as is.
pub fn generate_project<G: Generator + ?Sized>(
    generator: &G,
    descriptor: &ProjectDescriptor,
) -> Result<GenerationReport> {
    check_descriptor(generator, descriptor)?;

    let language = generator.language();
    let view = transform(descriptor);
    let root = descriptor.output_dir();
    info!(
        project = %descriptor.name,
        language = %language,
        transport = %descriptor.transport,
        root = %root.display(),
        "generating project"
    );

    let directories = generator.layout().create(&root)?;

    let map = base_template_map(language, &view);
    debug!(templates = ?map, "resolved template map");

    let renderer = TemplateRenderer::new(generator.assets());
    let mut files = Vec::with_capacity(
        map.len() + descriptor.tools.len() + descriptor.resources.len() + descriptor.capabilities.len(),
    );
    for (key, output) in map.iter() {
        renderer.render_to_file(key, &view, &root.join(output))?;
        files.push(output.to_path_buf());
    }

    let extension = language.extension();
    files.extend(expand_entities(
        &renderer,
        &root,
        EntityKind::Tool,
        &entity_template(language, EntityKind::Tool),
        extension,
        &descriptor.tools,
        &view,
    )?);
    files.extend(expand_entities(
        &renderer,
        &root,
        EntityKind::Resource,
        &entity_template(language, EntityKind::Resource),
        extension,
        &descriptor.resources,
        &view,
    )?);
    files.extend(expand_entities(
        &renderer,
        &root,
        EntityKind::Capability,
        &entity_template(language, EntityKind::Capability),
        extension,
        &descriptor.capabilities,
        &view,
    )?);

    info!(files = files.len(), root = %root.display(), "project generated");
    Ok(GenerationReport {
        root,
        directories,
        files,
    })
}
