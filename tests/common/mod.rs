#![allow(dead_code, clippy::unwrap_used)]

use std::fs;
use std::path::{Path, PathBuf};

use mcpcli::project::{Language, ProjectDescriptor, Transport};

/// Descriptor whose output root is `<dir>/<name>`.
pub fn descriptor(dir: &Path, name: &str, language: Language, transport: Transport) -> ProjectDescriptor {
    let mut d = ProjectDescriptor::new(name, language, transport);
    d.output = Some(dir.join(name));
    d
}

/// Every regular file under `root`, relative to it, sorted.
pub fn list_files(root: &Path) -> Vec<PathBuf> {
    let mut out = Vec::new();
    walk(root, root, &mut out);
    out.sort();
    out
}

fn walk(root: &Path, dir: &Path, out: &mut Vec<PathBuf>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            walk(root, &path, out);
        } else if let Ok(rel) = path.strip_prefix(root) {
            out.push(rel.to_path_buf());
        }
    }
}

/// Parse the generated `configs/mcp-config.json`.
pub fn read_config(root: &Path) -> serde_json::Value {
    let body = fs::read_to_string(root.join("configs/mcp-config.json")).unwrap();
    serde_json::from_str(&body).unwrap()
}
