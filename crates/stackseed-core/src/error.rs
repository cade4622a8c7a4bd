//! The error type every public core operation returns.
//!
//! Domain errors are raised before anything touches the filesystem;
//! application errors come out of a scaffold run. The CLI only needs
//! `category()`, `suggestions()` and `path()` to report either.

use std::path::Path;

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

#[derive(Debug, Error, Clone)]
pub enum StackseedError {
    /// Invalid input or a broken catalog invariant.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// A failed scaffold run.
    #[error(transparent)]
    Application(#[from] ApplicationError),
}

impl StackseedError {
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
        }
    }

    /// Filesystem path the failure is about, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Domain(_) => None,
            Self::Application(e) => e.path(),
        }
    }
}

/// How a failure should be presented and which exit code it maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad input; asking again fixes it.
    Validation,
    /// The target already exists or holds unexpected content.
    Conflict,
    /// A catalog defect or a filesystem failure.
    Internal,
}

pub type StackseedResult<T> = Result<T, StackseedError>;

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn selection_errors_are_validation_without_a_path() {
        let err: StackseedError = DomainError::InvalidSelection {
            field: "database",
            value: "3".into(),
            expected: "1 (SQL), 2 (MongoDB)",
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert!(err.path().is_none());
        assert!(!err.suggestions().is_empty());
    }

    #[test]
    fn existing_file_is_a_conflict_on_that_path() {
        let path = PathBuf::from("/work/demo/backend/app.js");
        let err: StackseedError =
            ApplicationError::UnexpectedExistingFile { path: path.clone() }.into();
        assert_eq!(err.category(), ErrorCategory::Conflict);
        assert_eq!(err.path(), Some(path.as_path()));
    }

    #[test]
    fn catalog_defects_are_internal() {
        let err: StackseedError = DomainError::DuplicatePath {
            path: "frontend".into(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Internal);
    }
}
