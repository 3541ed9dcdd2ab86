//! In-memory filesystem adapter for testing.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use quickejs_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{QuickError, QuickResult},
};

/// In-memory filesystem for testing.
///
/// Clones share state, so a test can hand one clone to the service and
/// inspect the other.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, String>,
    directories: BTreeSet<PathBuf>,
    /// Number of successful writes allowed before every write fails.
    write_budget: Option<usize>,
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// A filesystem whose `write_file` fails once `n` files were written.
    pub fn failing_after(n: usize) -> Self {
        let fs = Self::new();
        if let Ok(mut inner) = fs.inner.write() {
            inner.write_budget = Some(n);
        }
        fs
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: &Path) -> Option<String> {
        self.read().ok()?.files.get(path).cloned()
    }

    /// All files, sorted by path.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// All directories, sorted by path.
    pub fn list_directories(&self) -> Vec<PathBuf> {
        self.read()
            .map(|inner| inner.directories.iter().cloned().collect())
            .unwrap_or_default()
    }

    fn read(&self) -> QuickResult<RwLockReadGuard<'_, MemoryFilesystemInner>> {
        self.inner.read().map_err(|_| lock_poisoned())
    }

    fn write(&self) -> QuickResult<RwLockWriteGuard<'_, MemoryFilesystemInner>> {
        self.inner.write().map_err(|_| lock_poisoned())
    }
}

fn lock_poisoned() -> QuickError {
    QuickError::Internal {
        message: "memory filesystem lock poisoned".into(),
    }
}

impl Filesystem for MemoryFilesystem {
    fn create_dir_all(&self, path: &Path) -> QuickResult<()> {
        let mut inner = self.write()?;

        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            inner.directories.insert(current.clone());
        }

        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> QuickResult<()> {
        let mut inner = self.write()?;

        let parent_missing = path
            .parent()
            .is_some_and(|parent| !parent.as_os_str().is_empty() && !inner.directories.contains(parent));
        if parent_missing {
            return Err(ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "Parent directory does not exist".into(),
            }
            .into());
        }

        match inner.write_budget {
            Some(0) => {
                return Err(ApplicationError::FilesystemError {
                    path: path.to_path_buf(),
                    reason: "No space left on device".into(),
                }
                .into());
            }
            Some(ref mut left) => *left -= 1,
            None => {}
        }

        inner.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.read()
            .map(|inner| inner.files.contains_key(path) || inner.directories.contains(path))
            .unwrap_or(false)
    }

    fn remove_dir_all(&self, path: &Path) -> QuickResult<()> {
        let mut inner = self.write()?;

        inner.directories.retain(|p| !p.starts_with(path));
        inner.files.retain(|p, _| !p.starts_with(path));

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_dir_all_registers_ancestors() {
        let fs = MemoryFilesystem::new();
        fs.create_dir_all(Path::new("app/views/partials")).unwrap();
        assert!(fs.exists(Path::new("app")));
        assert!(fs.exists(Path::new("app/views")));
    }

    #[test]
    fn write_requires_parent() {
        let fs = MemoryFilesystem::new();
        assert!(fs.write_file(Path::new("app/server.js"), "").is_err());
        fs.create_dir_all(Path::new("app")).unwrap();
        fs.write_file(Path::new("app/server.js"), "x").unwrap();
        assert_eq!(fs.read_file(Path::new("app/server.js")).as_deref(), Some("x"));
    }

    #[test]
    fn remove_dir_all_drops_subtree_only() {
        let fs = MemoryFilesystem::new();
        fs.create_dir_all(Path::new("a/b")).unwrap();
        fs.create_dir_all(Path::new("ab")).unwrap();
        fs.write_file(Path::new("a/b/f"), "").unwrap();

        fs.remove_dir_all(Path::new("a")).unwrap();
        assert!(fs.list_files().is_empty());
        assert_eq!(fs.list_directories(), vec![PathBuf::from("ab")]);
    }

    #[test]
    fn failing_after_allows_n_writes() {
        let fs = MemoryFilesystem::failing_after(1);
        fs.create_dir_all(Path::new("app")).unwrap();
        fs.write_file(Path::new("app/one"), "").unwrap();
        assert!(fs.write_file(Path::new("app/two"), "").is_err());
    }
}
