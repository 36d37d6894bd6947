#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use crate::assets::{EmbeddedAssets, MemoryAssets};
use crate::config::transform;
use crate::error::GenError;
use crate::project::{Capability, Language, ProjectDescriptor, Resource, ResourceType, Tool, Transport};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

fn descriptor_in(dir: &Path, language: Language, transport: Transport) -> ProjectDescriptor {
    let mut d = ProjectDescriptor::new("demo", language, transport);
    d.output = Some(dir.join("demo"));
    d
}

fn embedded() -> Arc<dyn crate::assets::AssetStore> {
    Arc::new(EmbeddedAssets)
}

#[test]
fn test_map_has_required_entries_for_every_language() {
    for language in Language::ALL {
        let d = ProjectDescriptor::new("demo", language, Transport::Stdio);
        let view = transform(&d);
        let map = base_template_map(language, &view);
        let outputs: Vec<String> = map
            .iter()
            .map(|(_, out)| out.to_string_lossy().into_owned())
            .collect();
        assert!(outputs.contains(&"README.md".to_string()), "{language}");
        assert!(outputs.contains(&"configs/mcp-config.json".to_string()), "{language}");
        assert!(outputs.iter().any(|o| o.starts_with("examples/")), "{language}");
        assert!(outputs.contains(&entry_point(language).1.to_string()), "{language}");
        assert!(!outputs.contains(&"Dockerfile".to_string()), "{language}");
    }
}

#[test]
fn test_docker_adds_two_entries() {
    for language in Language::ALL {
        let mut d = ProjectDescriptor::new("demo", language, Transport::Stdio);
        let plain = base_template_map(language, &transform(&d));
        d.docker = true;
        let docker = base_template_map(language, &transform(&d));
        assert_eq!(docker.len(), plain.len() + 2);
        let outputs: Vec<&Path> = docker.iter().map(|(_, out)| out).collect();
        assert!(outputs.contains(&Path::new("Dockerfile")));
        assert!(outputs.contains(&Path::new(".dockerignore")));
    }
}

#[test]
fn test_entry_point_key_changes_with_transport() {
    let mut d = ProjectDescriptor::new("demo", Language::Go, Transport::Stdio);
    let stdio = base_template_map(Language::Go, &transform(&d));
    d.transport = Transport::Rest;
    let rest = base_template_map(Language::Go, &transform(&d));
    assert!(stdio.contains_key("templates/go/stdio/cmd/server/main.go.tmpl"));
    assert!(!stdio.contains_key("templates/go/rest/cmd/server/main.go.tmpl"));
    assert!(rest.contains_key("templates/go/rest/cmd/server/main.go.tmpl"));
    assert_eq!(
        rest.get("templates/go/rest/cmd/server/main.go.tmpl"),
        Some(Path::new("cmd/server/main.go"))
    );
    assert_eq!(stdio.len(), rest.len());
}

#[test]
fn test_resolve_rejects_unknown_language() {
    let d = ProjectDescriptor::new("demo", Language::Go, Transport::Stdio);
    let view = transform(&d);
    let err = resolve_template_map("cobol", &view).unwrap_err();
    assert!(matches!(err, GenError::UnsupportedLanguage(ref l) if l == "cobol"));
    let map = resolve_template_map("golang", &view).unwrap();
    assert_eq!(map, base_template_map(Language::Go, &view));
}

#[test]
fn test_entity_helpers() {
    assert_eq!(
        tool_template("go").as_deref(),
        Some("templates/go/stdio/internal/tools/tool.go.tmpl")
    );
    assert_eq!(
        resource_template("javascript").as_deref(),
        Some("templates/node/stdio/src/resources/resource.js.tmpl")
    );
    assert_eq!(
        capability_template("java").as_deref(),
        Some("templates/java/stdio/src/main/java/capabilities/Capability.java.tmpl")
    );
    assert_eq!(tool_template("cobol"), None);
    assert_eq!(resource_template(""), None);
    assert_eq!(capability_template("rust"), None);
}

#[test]
fn test_every_supported_combination_resolves_to_embedded_templates() {
    for language in Language::ALL {
        let generator = select_generator(language, embedded());
        for &transport in generator.supported_transports() {
            let mut d = ProjectDescriptor::new("demo", language, transport);
            d.docker = true;
            let map = base_template_map(language, &transform(&d));
            for key in map.keys() {
                assert!(EmbeddedAssets::contains(key), "missing template {key}");
            }
        }
        for kind in EntityKind::ALL {
            let key = entity_template(language, kind).key;
            assert!(EmbeddedAssets::contains(&key), "missing template {key}");
        }
    }
}

#[test]
fn test_layout_covers_every_output_parent() {
    for language in Language::ALL {
        let generator = select_generator(language, embedded());
        let layout = generator.layout();
        let dirs: Vec<&Path> = layout.directories().iter().map(PathBuf::as_path).collect();
        let d = ProjectDescriptor::new("demo", language, Transport::Stdio);
        let map = base_template_map(language, &transform(&d));
        for (key, output) in map.iter() {
            let parent = output.parent().unwrap_or(Path::new(""));
            if parent.as_os_str().is_empty() {
                continue;
            }
            assert!(
                dirs.iter().any(|dir| dir.starts_with(parent)),
                "{key} writes into {} which the {language} layout does not create",
                parent.display()
            );
        }
    }
}

#[test]
fn test_select_generator_matches_language() {
    for language in Language::ALL {
        assert_eq!(select_generator(language, embedded()).language(), language);
    }
    assert_eq!(generator_for("golang", embedded()).unwrap().language(), Language::Go);
    assert_eq!(
        generator_for("node", embedded()).unwrap().language(),
        Language::JavaScript
    );
    assert!(matches!(
        generator_for("cobol", embedded()),
        Err(GenError::UnsupportedLanguage(_))
    ));
}

#[test]
fn test_transport_support_table() {
    let supports = |language, transport| select_generator(language, embedded()).supports(transport);
    assert!(supports(Language::Go, Transport::WebSocket));
    assert!(supports(Language::Go, Transport::Rest));
    assert!(supports(Language::JavaScript, Transport::WebSocket));
    assert!(!supports(Language::JavaScript, Transport::Rest));
    assert!(supports(Language::Python, Transport::Rest));
    assert!(!supports(Language::Python, Transport::WebSocket));
    assert!(supports(Language::Java, Transport::Rest));
    assert!(!supports(Language::Java, Transport::WebSocket));
}

#[test]
fn test_unsupported_transport_fails_before_writing() {
    let dir = tempfile::tempdir().unwrap();
    let d = descriptor_in(dir.path(), Language::Python, Transport::WebSocket);
    let err = select_generator(Language::Python, embedded())
        .generate(&d)
        .unwrap_err();
    assert!(matches!(err, GenError::Validation(_)));
    assert!(!dir.path().join("demo").exists());
}

#[test]
fn test_generate_every_language_and_transport() {
    for language in Language::ALL {
        let generator = select_generator(language, embedded());
        for &transport in generator.supported_transports() {
            let dir = tempfile::tempdir().unwrap();
            let mut d = descriptor_in(dir.path(), language, transport);
            d.docker = true;
            d.examples = true;
            d.description = "A demo server".into();
            d.author = Some("Dev".into());
            d.tools.push(Tool {
                name: "Hammer".into(),
                description: "Hits things".into(),
            });
            d.resources.push(Resource {
                name: "clock".into(),
                kind: ResourceType::Time,
            });
            d.resources.push(Resource {
                name: "docs".into(),
                kind: ResourceType::Filesystem,
            });
            d.capabilities.push(Capability {
                name: "sampling".into(),
                enabled: true,
            });
            let report = generator
                .generate(&d)
                .unwrap_or_else(|e| panic!("{language}/{transport}: {e}"));
            let map = base_template_map(language, &transform(&d));
            assert_eq!(report.file_count(), map.len() + 4, "{language}/{transport}");
            for file in &report.files {
                assert!(
                    report.root.join(file).is_file(),
                    "{language}/{transport}: {} missing",
                    file.display()
                );
            }
            let ext = language.extension();
            let tool_dir = entity_template(language, EntityKind::Tool).directory;
            assert!(report
                .root
                .join(tool_dir)
                .join(format!("Hammer{ext}"))
                .is_file());
        }
    }
}

#[test]
fn test_config_file_matches_server_config() {
    let dir = tempfile::tempdir().unwrap();
    let d = descriptor_in(dir.path(), Language::Go, Transport::WebSocket);
    let report = select_generator(Language::Go, embedded()).generate(&d).unwrap();
    let raw = fs::read_to_string(report.root.join("configs/mcp-config.json")).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let expected = serde_json::to_value(transform(&d).server_config).unwrap();
    assert_eq!(parsed, expected);
    assert_eq!(parsed["transport"]["options"]["path"], "/ws");
}

#[test]
fn test_rest_entry_point_uses_port() {
    let dir = tempfile::tempdir().unwrap();
    let d = descriptor_in(dir.path(), Language::Python, Transport::Rest);
    let report = select_generator(Language::Python, embedded()).generate(&d).unwrap();
    let main = fs::read_to_string(report.root.join("src/main.py")).unwrap();
    assert!(main.contains("PORT = 8080"));
    assert!(main.contains("HOST = \"localhost\""));
}

#[test]
fn test_missing_template_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let mut assets = MemoryAssets::from_embedded();
    assets.remove("templates/go/stdio/README.md.tmpl");
    let d = descriptor_in(dir.path(), Language::Go, Transport::Stdio);
    let err = GoGenerator::new(Arc::new(assets)).generate(&d).unwrap_err();
    assert!(matches!(err, GenError::TemplateNotFound { ref key } if key == "templates/go/stdio/README.md.tmpl"));
}

#[test]
fn test_broken_entity_template_aborts_expansion() {
    let dir = tempfile::tempdir().unwrap();
    let assets = MemoryAssets::from_embedded().with(
        "templates/go/stdio/internal/resources/resource.go.tmpl",
        "{{ resource.nope }}",
    );
    let mut d = descriptor_in(dir.path(), Language::Go, Transport::Stdio);
    d.tools.push(Tool {
        name: "Hammer".into(),
        description: String::new(),
    });
    d.resources.push(Resource {
        name: "db".into(),
        kind: ResourceType::Database,
    });
    d.capabilities.push(Capability {
        name: "sampling".into(),
        enabled: true,
    });
    let err = GoGenerator::new(Arc::new(assets)).generate(&d).unwrap_err();
    assert!(matches!(err, GenError::TemplateRender { .. }));
    let root = dir.path().join("demo");
    assert!(root.join("internal/tools/Hammer.go").exists());
    assert!(!root.join("internal/capabilities/sampling.go").exists());
}

#[test]
fn test_scaffold_rolls_back_on_failure() {
    let dir = tempfile::tempdir().unwrap();
    let assets = MemoryAssets::from_embedded().with("templates/go/stdio/go.mod.tmpl", "{{ broken");
    let d = descriptor_in(dir.path(), Language::Go, Transport::Stdio);
    let err = scaffold(&d, Arc::new(assets)).unwrap_err();
    assert!(matches!(err, GenError::TemplateRender { .. }));
    assert!(!dir.path().join("demo").exists());
}

#[test]
fn test_scaffold_conflict_and_force() {
    let dir = tempfile::tempdir().unwrap();
    let mut d = descriptor_in(dir.path(), Language::JavaScript, Transport::Stdio);
    scaffold(&d, embedded()).unwrap();
    let err = scaffold(&d, embedded()).unwrap_err();
    assert!(matches!(err, GenError::DirectoryConflict { .. }));
    assert!(dir.path().join("demo/package.json").is_file());

    fs::write(dir.path().join("demo/stale.txt"), "old").unwrap();
    d.force = true;
    scaffold(&d, embedded()).unwrap();
    assert!(!dir.path().join("demo/stale.txt").exists());
    assert!(dir.path().join("demo/package.json").is_file());
}

#[test]
fn test_generation_is_deterministic() {
    let dir = tempfile::tempdir().unwrap();
    let mut d = descriptor_in(dir.path(), Language::Java, Transport::Rest);
    d.tools.push(Tool {
        name: "Hammer".into(),
        description: String::new(),
    });
    let first = select_generator(Language::Java, embedded()).generate(&d).unwrap();
    let pom = fs::read_to_string(first.root.join("pom.xml")).unwrap();
    let again = select_generator(Language::Java, embedded()).generate(&d).unwrap();
    assert_eq!(first, again);
    assert_eq!(pom, fs::read_to_string(again.root.join("pom.xml")).unwrap());
}
