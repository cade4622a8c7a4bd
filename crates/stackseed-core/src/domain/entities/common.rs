use super::DomainError;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// A POSIX-style, project-root-relative path (`frontend/src/App.jsx`).
///
/// Invariants, enforced at construction:
/// - never absolute, never empty
/// - `/` is the only separator (no `\`)
/// - no `.` / `..` / empty segments, so joining onto a root can never escape it
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RelativePath(String);

impl RelativePath {
    /// Create a new relative path.
    ///
    /// # Panics
    /// Panics if the path breaks an invariant (use `try_new` for fallible).
    /// Catalog paths are compile-time literals, so a panic here is an
    /// authoring bug caught by the first test run.
    pub fn new(path: impl Into<String>) -> Self {
        match Self::try_new(path) {
            Ok(path) => path,
            Err(e) => panic!("{e}"),
        }
    }

    /// Fallible constructor.
    pub fn try_new(path: impl Into<String>) -> Result<Self, DomainError> {
        let path = path.into();
        let invalid = |reason: &str| DomainError::InvalidPath {
            path: path.clone(),
            reason: reason.into(),
        };

        if path.is_empty() {
            return Err(invalid("path is empty"));
        }
        if path.starts_with('/') {
            return Err(invalid("absolute paths are not allowed"));
        }
        if path.contains('\\') {
            return Err(invalid("use '/' as the separator"));
        }
        if path
            .split('/')
            .any(|segment| segment.is_empty() || segment == "." || segment == "..")
        {
            return Err(invalid("empty, '.' and '..' segments are not allowed"));
        }

        Ok(Self(path))
    }

    /// Parent directory, or `None` for a top-level entry.
    pub fn parent(&self) -> Option<RelativePath> {
        self.0
            .rsplit_once('/')
            .map(|(parent, _)| Self(parent.to_string()))
    }

    /// Join a single segment or sub-path, maintaining the invariants.
    pub fn join(&self, segment: &str) -> Result<Self, DomainError> {
        Self::try_new(format!("{}/{}", self.0, segment))
    }

    /// Whether `self` lies strictly below `ancestor`.
    pub fn is_under(&self, ancestor: &RelativePath) -> bool {
        self.0
            .strip_prefix(ancestor.as_str())
            .is_some_and(|rest| rest.starts_with('/'))
    }

    /// First segment (`frontend` for `frontend/src/App.jsx`).
    pub fn top_level(&self) -> &str {
        self.0.split('/').next().unwrap_or(&self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Resolve against a native root directory, segment by segment.
    pub fn to_native(&self, root: &Path) -> PathBuf {
        self.0
            .split('/')
            .fold(root.to_path_buf(), |acc, segment| acc.join(segment))
    }
}

impl From<&str> for RelativePath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl AsRef<str> for RelativePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
