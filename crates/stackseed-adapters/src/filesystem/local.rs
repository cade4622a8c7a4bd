//! Local filesystem adapter using std::fs.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use stackseed_core::{
    application::{ApplicationError, ports::Filesystem},
    domain::ExistingEntry,
    error::{StackseedError, StackseedResult},
};
use tracing::trace;

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn entry_kind(&self, path: &Path) -> StackseedResult<ExistingEntry> {
        match fs::symlink_metadata(path) {
            Ok(metadata) if metadata.is_dir() => Ok(ExistingEntry::Directory),
            Ok(_) => Ok(ExistingEntry::File),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(ExistingEntry::Absent),
            Err(e) => Err(map_io_error(path, e, "inspect")),
        }
    }

    fn is_empty_dir(&self, path: &Path) -> StackseedResult<bool> {
        let mut entries =
            fs::read_dir(path).map_err(|e| map_io_error(path, e, "read directory"))?;
        Ok(entries.next().is_none())
    }

    fn create_dir_all(&self, path: &Path) -> StackseedResult<()> {
        trace!(path = %path.display(), "create_dir_all");
        fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn write_new_file(&self, path: &Path, bytes: &[u8]) -> StackseedResult<()> {
        trace!(path = %path.display(), bytes = bytes.len(), "write_new_file");
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map_err(|e| {
                if e.kind() == io::ErrorKind::AlreadyExists {
                    ApplicationError::UnexpectedExistingFile {
                        path: path.to_path_buf(),
                    }
                    .into()
                } else {
                    map_io_error(path, e, "create file")
                }
            })?;
        file.write_all(bytes)
            .map_err(|e| map_io_error(path, e, "write file"))
    }

    fn append_file(&self, path: &Path, bytes: &[u8]) -> StackseedResult<()> {
        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(path)
            .map_err(|e| map_io_error(path, e, "open for append"))?;
        file.write_all(bytes)
            .and_then(|()| file.sync_all())
            .map_err(|e| map_io_error(path, e, "append to file"))
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> StackseedError {
    ApplicationError::filesystem(path, format!("Failed to {operation}: {e}")).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn entry_kind_distinguishes_files_and_directories() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("a.txt");
        fs::write(&file, "x").unwrap();

        let fs_adapter = LocalFilesystem::new();
        assert_eq!(fs_adapter.entry_kind(dir.path()).unwrap(), ExistingEntry::Directory);
        assert_eq!(fs_adapter.entry_kind(&file).unwrap(), ExistingEntry::File);
        assert_eq!(
            fs_adapter.entry_kind(&dir.path().join("missing")).unwrap(),
            ExistingEntry::Absent
        );
    }

    #[test]
    fn write_new_file_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("keep.txt");
        fs::write(&file, "original").unwrap();

        let err = LocalFilesystem::new()
            .write_new_file(&file, b"replacement")
            .unwrap_err();

        assert!(matches!(
            err,
            StackseedError::Application(ApplicationError::UnexpectedExistingFile { .. })
        ));
        assert_eq!(fs::read_to_string(&file).unwrap(), "original");
    }

    #[test]
    fn append_file_creates_then_appends() {
        let dir = TempDir::new().unwrap();
        let log = dir.path().join("setup.log");
        let fs_adapter = LocalFilesystem::new();

        fs_adapter.append_file(&log, b"").unwrap();
        assert_eq!(fs::read_to_string(&log).unwrap(), "");
        fs_adapter.append_file(&log, b"one\n").unwrap();
        fs_adapter.append_file(&log, b"two\n").unwrap();
        assert_eq!(fs::read_to_string(&log).unwrap(), "one\ntwo\n");
    }

    #[test]
    fn is_empty_dir_sees_any_entry() {
        let dir = TempDir::new().unwrap();
        let fs_adapter = LocalFilesystem::new();
        assert!(fs_adapter.is_empty_dir(dir.path()).unwrap());

        fs::create_dir(dir.path().join(".git")).unwrap();
        assert!(!fs_adapter.is_empty_dir(dir.path()).unwrap());
    }

    #[test]
    fn io_errors_name_the_path() {
        let dir = TempDir::new().unwrap();
        let missing_parent = dir.path().join("nope").join("file.txt");

        let err = LocalFilesystem::new()
            .write_new_file(&missing_parent, b"x")
            .unwrap_err();
        assert_eq!(err.path(), Some(missing_parent.as_path()));
        assert!(err.to_string().contains("Failed to create file"));
    }
}
