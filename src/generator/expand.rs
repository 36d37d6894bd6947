use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::info;

use super::render::TemplateRenderer;
use super::templates::{EntityKind, EntityTemplate, TemplateMap};
use crate::config::ViewModel;
use crate::error::{GenError, Result};
use crate::project::{sanitize_identifier, Named};

/// One entity serialized under its kind, e.g. `{"tool": {...}}`.
struct Keyed<'a, T> {
    kind: EntityKind,
    item: &'a T,
}

impl<T: Serialize> Serialize for Keyed<'_, T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.kind.as_str(), self.item)?;
        map.end()
    }
}

/// Render context of a single-entity template.
#[derive(serde::Serialize)]
struct EntityContext<'a, T> {
    module_name: &'a str,
    package_name: &'a str,
    #[serde(flatten)]
    entity: Keyed<'a, T>,
}

/// Output file name of an entity: sanitized name plus source extension.
pub fn entity_file_name<T: Named + ?Sized>(item: &T, extension: &str) -> String {
    format!("{}{extension}", sanitize_identifier(item.name()))
}

/// Reject entity lists whose sanitized names collide, since each entity
/// must land in a file of its own.
pub fn check_unique_names<T: Named>(kind: EntityKind, items: &[T]) -> Result<()> {
    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        if item.name().trim().is_empty() {
            return Err(GenError::Validation(format!("{kind} name must not be empty")));
        }
        let file = sanitize_identifier(item.name());
        if !seen.insert(file.clone()) {
            return Err(GenError::Validation(format!(
                "{kind} {:?} collides with another {kind} named {file}",
                item.name()
            )));
        }
    }
    Ok(())
}

/// Reject entities whose file would replace one written from the template
/// map, e.g. a Go tool named `calculator`.
pub fn check_reserved_paths<T: Named>(
    kind: EntityKind,
    template: &EntityTemplate,
    extension: &str,
    items: &[T],
    map: &TemplateMap,
) -> Result<()> {
    let reserved: HashSet<&Path> = map.iter().map(|(_, output)| output).collect();
    for item in items {
        let relative = Path::new(template.directory).join(entity_file_name(item, extension));
        if reserved.contains(relative.as_path()) {
            return Err(GenError::Validation(format!(
                "{kind} {:?} would overwrite generated file {}",
                item.name(),
                relative.display()
            )));
        }
    }
    Ok(())
}

/// Write one file per item into `template.directory`, in declaration
/// order. Stops at the first failure.
///
/// Returns the written paths relative to `root`.
pub fn expand_entities<T>(
    renderer: &TemplateRenderer<'_>,
    root: &Path,
    kind: EntityKind,
    template: &EntityTemplate,
    extension: &str,
    items: &[T],
    view: &ViewModel<'_>,
) -> Result<Vec<PathBuf>>
where
    T: Named + Serialize,
{
    if items.is_empty() {
        return Ok(Vec::new());
    }
    let dir = root.join(template.directory);
    fs::create_dir_all(&dir).map_err(|err| GenError::fs("create directory", &dir, err))?;

    let mut written = Vec::with_capacity(items.len());
    for item in items {
        let relative = Path::new(template.directory).join(entity_file_name(item, extension));
        let ctx = EntityContext {
            module_name: &view.module_name,
            package_name: &view.package_name,
            entity: Keyed { kind, item },
        };
        renderer
            .render_to_file(&template.key, &ctx, &root.join(&relative))
            .map_err(|err| match err {
                GenError::TemplateRender { key, source } => GenError::TemplateRender {
                    key: format!("{key} ({kind} {})", item.name()),
                    source,
                },
                other => other,
            })?;
        written.push(relative);
    }
    info!(kind = %kind, count = written.len(), "expanded entities");
    Ok(written)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

    use super::*;
    use crate::assets::MemoryAssets;
    use crate::config::transform;
    use crate::project::{Language, ProjectDescriptor, Resource, ResourceType, Tool, Transport};

    fn tool(name: &str) -> Tool {
        Tool {
            name: name.into(),
            description: String::new(),
        }
    }

    fn template() -> EntityTemplate {
        EntityTemplate {
            key: "t/tool".into(),
            directory: "tools",
        }
    }

    #[test]
    fn one_file_per_item_in_declaration_order() {
        let dir = tempfile::tempdir().unwrap();
        let assets = MemoryAssets::new().with("t/tool", "{{ package_name }}.{{ tool.name }}");
        let renderer = TemplateRenderer::new(&assets);
        let d = ProjectDescriptor::new("my-app", Language::Go, Transport::Stdio);
        let view = transform(&d);
        let items = [tool("Zeta"), tool("alpha"), tool("my tool")];
        let written = expand_entities(
            &renderer,
            dir.path(),
            EntityKind::Tool,
            &template(),
            ".go",
            &items,
            &view,
        )
        .unwrap();
        assert_eq!(
            written,
            vec![
                PathBuf::from("tools/Zeta.go"),
                PathBuf::from("tools/alpha.go"),
                PathBuf::from("tools/my_tool.go"),
            ]
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("tools/my_tool.go")).unwrap(),
            "my_app.my tool"
        );
    }

    #[test]
    fn resources_render_their_type() {
        let dir = tempfile::tempdir().unwrap();
        let assets = MemoryAssets::new().with("t/res", "{{ resource.name }}={{ resource.type }}");
        let renderer = TemplateRenderer::new(&assets);
        let d = ProjectDescriptor::new("app", Language::Python, Transport::Stdio);
        let view = transform(&d);
        let items = [Resource {
            name: "clock".into(),
            kind: ResourceType::Time,
        }];
        let tmpl = EntityTemplate {
            key: "t/res".into(),
            directory: "res",
        };
        expand_entities(&renderer, dir.path(), EntityKind::Resource, &tmpl, ".py", &items, &view)
            .unwrap();
        assert_eq!(
            fs::read_to_string(dir.path().join("res/clock.py")).unwrap(),
            "clock=time"
        );
    }

    #[test]
    fn empty_list_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let assets = MemoryAssets::new();
        let renderer = TemplateRenderer::new(&assets);
        let d = ProjectDescriptor::new("app", Language::Go, Transport::Stdio);
        let view = transform(&d);
        let written = expand_entities::<Tool>(
            &renderer,
            dir.path(),
            EntityKind::Tool,
            &template(),
            ".go",
            &[],
            &view,
        )
        .unwrap();
        assert!(written.is_empty());
        assert!(!dir.path().join("tools").exists());
    }

    #[test]
    fn first_failure_aborts_and_names_the_entity() {
        let dir = tempfile::tempdir().unwrap();
        let assets = MemoryAssets::new()
            .with("t/tool", "{% if tool.name == 'bad' %}{{ missing }}{% endif %}ok");
        let renderer = TemplateRenderer::new(&assets);
        let d = ProjectDescriptor::new("app", Language::Go, Transport::Stdio);
        let view = transform(&d);
        let items = [tool("good"), tool("bad"), tool("never")];
        let err = expand_entities(
            &renderer,
            dir.path(),
            EntityKind::Tool,
            &template(),
            ".go",
            &items,
            &view,
        )
        .unwrap_err();
        match err {
            GenError::TemplateRender { key, .. } => assert_eq!(key, "t/tool (tool bad)"),
            other => panic!("unexpected error: {other}"),
        }
        assert!(dir.path().join("tools/good.go").exists());
        assert!(!dir.path().join("tools/never.go").exists());
    }

    #[test]
    fn entity_may_not_replace_a_mapped_file() {
        let mut map = TemplateMap::new();
        map.insert("t/calculator", "tools/calculator.go");
        let err = check_reserved_paths(
            EntityKind::Tool,
            &template(),
            ".go",
            &[tool("Hammer"), tool("calculator")],
            &map,
        )
        .unwrap_err();
        match err {
            GenError::Validation(message) => {
                assert!(message.contains("tools/calculator.go"), "{message}")
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(check_reserved_paths(
            EntityKind::Tool,
            &template(),
            ".go",
            &[tool("Calculator"), tool("calc")],
            &map
        )
        .is_ok());
    }

    #[test]
    fn colliding_names_are_rejected() {
        assert!(check_unique_names(EntityKind::Tool, &[tool("a-b"), tool("c")]).is_ok());
        let err = check_unique_names(EntityKind::Tool, &[tool("a-b"), tool("a_b")]).unwrap_err();
        assert!(matches!(err, GenError::Validation(_)));
        let err = check_unique_names(EntityKind::Tool, &[tool("  ")]).unwrap_err();
        assert!(matches!(err, GenError::Validation(_)));
    }
}
