use serde::Serialize;

use crate::domain::entities::common::RelativePath;

/// Rendered bytes for one file descriptor.
///
/// Produced by the renderer and consumed immediately by the tree builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    pub path: RelativePath,
    pub bytes: Vec<u8>,
}

impl RenderedFile {
    pub fn new(path: RelativePath, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            path,
            bytes: bytes.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// What a completed build did, in the order it did it.
///
/// Paths are relative to the project root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildResult {
    /// `false` when an existing empty root was reused.
    pub root_created: bool,
    pub created_paths: Vec<RelativePath>,
    pub skipped_paths: Vec<RelativePath>,
}

impl BuildResult {
    pub(crate) fn created(&mut self, path: RelativePath) {
        self.created_paths.push(path);
    }

    pub(crate) fn skipped(&mut self, path: RelativePath) {
        self.skipped_paths.push(path);
    }

    pub fn created_count(&self) -> usize {
        self.created_paths.len()
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped_paths.len()
    }

    pub fn was_created(&self, path: &str) -> bool {
        self.created_paths.iter().any(|p| p.as_str() == path)
    }
}
