use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, warn};

use super::languages::select_generator;
use super::project::{check_descriptor, GenerationReport};
use crate::assets::AssetStore;
use crate::error::{GenError, Result};
use crate::project::ProjectDescriptor;

/// Output root of one generation run.
///
/// Removed again on drop unless [`commit`](Self::commit) was called, so an
/// early return leaves nothing half-written behind.
#[derive(Debug)]
pub struct OutputRoot {
    path: PathBuf,
    committed: bool,
}

impl OutputRoot {
    /// Claim `path` for a new project.
    ///
    /// An existing path is a `DirectoryConflict` unless `force` is set, in
    /// which case it is removed first.
    pub fn prepare(path: impl Into<PathBuf>, force: bool) -> Result<Self> {
        let path = path.into();
        match fs::symlink_metadata(&path) {
            Ok(meta) => {
                if !force {
                    return Err(GenError::DirectoryConflict { path });
                }
                let removed = if meta.is_dir() {
                    fs::remove_dir_all(&path)
                } else {
                    fs::remove_file(&path)
                };
                removed.map_err(|err| GenError::fs("remove", &path, err))?;
                info!(path = %path.display(), "removed existing output");
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => return Err(GenError::fs("inspect", &path, err)),
        }
        fs::create_dir_all(&path).map_err(|err| GenError::fs("create directory", &path, err))?;
        Ok(Self {
            path,
            committed: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Keep the output and hand back its path.
    pub fn commit(mut self) -> PathBuf {
        self.committed = true;
        std::mem::take(&mut self.path)
    }
}

impl Drop for OutputRoot {
    fn drop(&mut self) {
        if self.committed {
            return;
        }
        match fs::remove_dir_all(&self.path) {
            Ok(()) => info!(path = %self.path.display(), "rolled back partial output"),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => warn!(
                path = %self.path.display(),
                error = %err,
                "failed to roll back partial output"
            ),
        }
    }
}

/// Validate, prepare the output root, generate, and keep the result only
/// if every step succeeded.
pub fn scaffold(
    descriptor: &ProjectDescriptor,
    assets: Arc<dyn AssetStore>,
) -> Result<GenerationReport> {
    let generator = select_generator(descriptor.language, assets);
    check_descriptor(generator.as_ref(), descriptor)?;

    let root = OutputRoot::prepare(descriptor.output_dir(), descriptor.force)?;
    let report = generator.generate(descriptor)?;
    root.commit();
    Ok(report)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn conflict_without_force_leaves_existing_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("demo");
        fs::create_dir_all(&path).unwrap();
        fs::write(path.join("keep.txt"), "x").unwrap();
        let err = OutputRoot::prepare(&path, false).unwrap_err();
        assert!(matches!(err, GenError::DirectoryConflict { .. }));
        assert!(path.join("keep.txt").exists());
    }

    #[test]
    fn force_replaces_existing_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("demo");
        fs::create_dir_all(&path).unwrap();
        fs::write(path.join("stale.txt"), "x").unwrap();
        let root = OutputRoot::prepare(&path, true).unwrap();
        assert!(root.path().is_dir());
        assert!(!path.join("stale.txt").exists());
        root.commit();
        assert!(path.is_dir());
    }

    #[test]
    fn dropped_root_is_removed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("demo");
        {
            let root = OutputRoot::prepare(&path, false).unwrap();
            fs::write(root.path().join("partial.txt"), "x").unwrap();
        }
        assert!(!path.exists());
    }
}
