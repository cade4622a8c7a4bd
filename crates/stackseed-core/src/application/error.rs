//! Application layer errors.
//!
//! These errors represent failures of a scaffold run, not bad input.
//! Input errors are `DomainError` from `crate::domain`.

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that end a scaffold run.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// The project root exists and is not an empty directory.
    #[error("Project root already exists and is not empty: {path}")]
    RootAlreadyExists { path: PathBuf },

    /// Something already occupies a path the run was about to write.
    #[error("Refusing to overwrite existing entry: {path}")]
    UnexpectedExistingFile { path: PathBuf },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// A catalog entry could not be rendered.
    #[error("Template defect in {path}: {reason}")]
    TemplateRenderDefect { path: String, reason: String },

    /// The audit log could not be written.
    #[error("Could not write audit log {path}: {reason}")]
    LogFlushFailed { path: PathBuf, reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::RootAlreadyExists { path } => vec![
                format!("Directory already exists: {}", path.display()),
                "Choose a different project name".into(),
                "Or remove the directory and run again".into(),
            ],
            Self::UnexpectedExistingFile { path } => vec![
                format!("Inspect {} and move it out of the way", path.display()),
                "Files written before this point were kept".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions and free disk space".into(),
            ],
            Self::TemplateRenderDefect { .. } => vec![
                "The built-in template catalog is inconsistent".into(),
                "Run `stackseed check` and please report this issue".into(),
            ],
            Self::LogFlushFailed { path, .. } => vec![
                format!("The project was generated but {} is incomplete", path.display()),
                "Check permissions on the project's log/ directory".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::RootAlreadyExists { .. } | Self::UnexpectedExistingFile { .. } => {
                ErrorCategory::Conflict
            }
            Self::FilesystemError { .. }
            | Self::TemplateRenderDefect { .. }
            | Self::LogFlushFailed { .. } => ErrorCategory::Internal,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::RootAlreadyExists { path }
            | Self::UnexpectedExistingFile { path }
            | Self::FilesystemError { path, .. }
            | Self::LogFlushFailed { path, .. } => Some(path),
            Self::TemplateRenderDefect { .. } => None,
        }
    }

    /// `FilesystemError` for `path` with `reason` as the cause.
    pub fn filesystem(path: &Path, reason: impl std::fmt::Display) -> Self {
        Self::FilesystemError {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }
}
