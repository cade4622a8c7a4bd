//! In-memory filesystem adapter for testing.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use stackseed_core::{
    application::{ApplicationError, ports::Filesystem},
    domain::ExistingEntry,
    error::StackseedResult,
};

/// In-memory filesystem for testing.
///
/// Clones share the same tree, so a test can keep a handle after boxing one
/// into a service.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, Vec<u8>>,
    directories: BTreeSet<PathBuf>,
}

impl MemoryFilesystemInner {
    fn insert_dir_all(&mut self, path: &Path) {
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            self.directories.insert(current.clone());
        }
    }

    fn parent_exists(&self, path: &Path) -> bool {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => self.directories.contains(parent),
            _ => true,
        }
    }
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a file in place, creating its parents (test setup).
    pub fn seed_file(&self, path: impl AsRef<Path>, bytes: impl Into<Vec<u8>>) {
        let path = path.as_ref();
        if let Ok(mut inner) = self.inner.write() {
            if let Some(parent) = path.parent() {
                inner.insert_dir_all(parent);
            }
            inner.files.insert(path.to_path_buf(), bytes.into());
        }
    }

    /// Read a file's bytes (testing helper).
    pub fn read_file(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path.as_ref()).cloned()
    }

    /// Read a file as UTF-8 (testing helper).
    pub fn read_to_string(&self, path: impl AsRef<Path>) -> Option<String> {
        self.read_file(path)
            .and_then(|bytes| String::from_utf8(bytes).ok())
    }

    /// All file paths, sorted.
    pub fn files(&self) -> Vec<PathBuf> {
        self.inner
            .read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// All directory paths, sorted.
    pub fn directories(&self) -> Vec<PathBuf> {
        self.inner
            .read()
            .map(|inner| inner.directories.iter().cloned().collect())
            .unwrap_or_default()
    }

    fn read(&self, path: &Path) -> StackseedResult<RwLockReadGuard<'_, MemoryFilesystemInner>> {
        self.inner
            .read()
            .map_err(|_| ApplicationError::filesystem(path, "memory filesystem lock poisoned").into())
    }

    fn write(&self, path: &Path) -> StackseedResult<RwLockWriteGuard<'_, MemoryFilesystemInner>> {
        self.inner
            .write()
            .map_err(|_| ApplicationError::filesystem(path, "memory filesystem lock poisoned").into())
    }
}

impl Filesystem for MemoryFilesystem {
    fn entry_kind(&self, path: &Path) -> StackseedResult<ExistingEntry> {
        let inner = self.read(path)?;
        Ok(if inner.directories.contains(path) {
            ExistingEntry::Directory
        } else if inner.files.contains_key(path) {
            ExistingEntry::File
        } else {
            ExistingEntry::Absent
        })
    }

    fn is_empty_dir(&self, path: &Path) -> StackseedResult<bool> {
        let inner = self.read(path)?;
        if !inner.directories.contains(path) {
            return Err(ApplicationError::filesystem(path, "not a directory").into());
        }
        let has_child = inner
            .directories
            .iter()
            .chain(inner.files.keys())
            .any(|p| p.parent() == Some(path));
        Ok(!has_child)
    }

    fn create_dir_all(&self, path: &Path) -> StackseedResult<()> {
        let mut inner = self.write(path)?;
        if inner.files.contains_key(path) {
            return Err(ApplicationError::filesystem(path, "a file exists at this path").into());
        }
        inner.insert_dir_all(path);
        Ok(())
    }

    fn write_new_file(&self, path: &Path, bytes: &[u8]) -> StackseedResult<()> {
        let mut inner = self.write(path)?;

        if inner.files.contains_key(path) || inner.directories.contains(path) {
            return Err(ApplicationError::UnexpectedExistingFile {
                path: path.to_path_buf(),
            }
            .into());
        }
        if !inner.parent_exists(path) {
            return Err(
                ApplicationError::filesystem(path, "Parent directory does not exist").into(),
            );
        }

        inner.files.insert(path.to_path_buf(), bytes.to_vec());
        Ok(())
    }

    fn append_file(&self, path: &Path, bytes: &[u8]) -> StackseedResult<()> {
        let mut inner = self.write(path)?;

        if inner.directories.contains(path) {
            return Err(ApplicationError::filesystem(path, "is a directory").into());
        }
        if !inner.parent_exists(path) {
            return Err(
                ApplicationError::filesystem(path, "Parent directory does not exist").into(),
            );
        }

        inner
            .files
            .entry(path.to_path_buf())
            .or_default()
            .extend_from_slice(bytes);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directories_are_created_with_parents() {
        let fs = MemoryFilesystem::new();
        fs.create_dir_all(Path::new("/p/a/b")).unwrap();
        assert_eq!(fs.entry_kind(Path::new("/p/a")).unwrap(), ExistingEntry::Directory);
        assert!(!fs.is_empty_dir(Path::new("/p")).unwrap());
        assert!(fs.is_empty_dir(Path::new("/p/a/b")).unwrap());
    }

    #[test]
    fn write_new_file_needs_parent_and_never_overwrites() {
        let fs = MemoryFilesystem::new();
        assert!(fs.write_new_file(Path::new("/p/x.txt"), b"x").is_err());

        fs.seed_file("/p/x.txt", "old");
        let err = fs.write_new_file(Path::new("/p/x.txt"), b"new").unwrap_err();
        assert!(err.to_string().contains("Refusing to overwrite"));
        assert_eq!(fs.read_to_string("/p/x.txt").as_deref(), Some("old"));
    }

    #[test]
    fn append_accumulates() {
        let fs = MemoryFilesystem::new();
        fs.create_dir_all(Path::new("/p/log")).unwrap();
        fs.append_file(Path::new("/p/log/setup.log"), b"a\n").unwrap();
        fs.append_file(Path::new("/p/log/setup.log"), b"b\n").unwrap();
        assert_eq!(fs.read_to_string("/p/log/setup.log").as_deref(), Some("a\nb\n"));
    }

    #[test]
    fn clones_share_state() {
        let fs = MemoryFilesystem::new();
        let handle = fs.clone();
        fs.seed_file("/p/a", "1");
        assert_eq!(handle.files(), vec![PathBuf::from("/p/a")]);
    }
}
