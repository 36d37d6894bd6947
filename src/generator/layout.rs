use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{GenError, Result};

/// Fixed directory skeleton of a generated project, relative to its root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    directories: Vec<PathBuf>,
}

impl ProjectLayout {
    pub fn new<I, P>(directories: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            directories: directories.into_iter().map(Into::into).collect(),
        }
    }

    pub fn directories(&self) -> &[PathBuf] {
        &self.directories
    }

    /// Create the root and every skeleton directory below it.
    ///
    /// Returns the relative directories in creation order. Fails with
    /// `FileSystem` when a component cannot be created, for instance because
    /// a regular file already occupies its name.
    pub fn create(&self, root: &Path) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(root).map_err(|err| GenError::fs("create directory", root, err))?;
        let mut created = Vec::with_capacity(self.directories.len());
        for dir in &self.directories {
            let path = root.join(dir);
            fs::create_dir_all(&path)
                .map_err(|err| GenError::fs("create directory", &path, err))?;
            debug!(path = %path.display(), "created directory");
            created.push(dir.clone());
        }
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

    use super::*;

    #[test]
    fn creates_nested_directories() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("demo");
        let layout = ProjectLayout::new(["cmd/server", "pkg/mcp", "configs"]);
        let created = layout.create(&root).unwrap();
        assert_eq!(created.len(), 3);
        assert!(root.join("cmd/server").is_dir());
        assert!(root.join("pkg/mcp").is_dir());
        assert!(root.join("configs").is_dir());
    }

    #[test]
    fn file_in_the_way_is_filesystem_error() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("demo");
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join("cmd"), "not a directory").unwrap();
        let layout = ProjectLayout::new(["cmd/server"]);
        let err = layout.create(&root).unwrap_err();
        match err {
            GenError::FileSystem { action, path, .. } => {
                assert_eq!(action, "create directory");
                assert_eq!(path, root.join("cmd/server"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn existing_directories_are_fine() {
        let dir = tempfile::tempdir().unwrap();
        let layout = ProjectLayout::new(["a/b"]);
        layout.create(dir.path()).unwrap();
        layout.create(dir.path()).unwrap();
        assert!(dir.path().join("a/b").is_dir());
    }
}
