// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (the CLI re-prompts with the same error in hand)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Selection Errors (raised before any filesystem action)
    // ========================================================================
    #[error("invalid {field} selection '{value}': expected one of {expected}")]
    InvalidSelection {
        field: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("invalid {field} '{value}': {reason}")]
    InvalidName {
        field: &'static str,
        value: String,
        reason: String,
    },

    // ========================================================================
    // Catalog Authoring Defects
    // ========================================================================
    #[error("Invalid template: {0}")]
    InvalidTemplate(String),

    #[error("Duplicate path in template: {path}")]
    DuplicatePath { path: String },

    #[error("Invalid template path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("'{path}' is declared before its parent directory '{parent}'")]
    ParentNotDeclared { path: String, parent: String },

    #[error("unresolved placeholder(s) in '{path}': {}", placeholders.join(", "))]
    UnresolvedPlaceholder {
        path: String,
        placeholders: Vec<String>,
    },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidSelection {
                field, expected, ..
            } => vec![
                format!("Choose a {field} from: {expected}"),
                "The numeric menu choices 1 and 2 are accepted too".into(),
            ],
            Self::InvalidName { field, .. } => vec![
                format!("The {field} must be non-empty after trimming"),
                "Path separators ('/', '\\') and '..' are not allowed".into(),
                "Quotes, backticks, '$', braces and angle brackets are not allowed".into(),
                "Examples: my-project, shop_db, demo".into(),
            ],
            Self::UnresolvedPlaceholder { .. }
            | Self::InvalidTemplate(_)
            | Self::DuplicatePath { .. }
            | Self::InvalidPath { .. }
            | Self::ParentNotDeclared { .. } => vec![
                "The built-in template catalog is inconsistent".into(),
                "Run `stackseed check` and please report this issue".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidSelection { .. } | Self::InvalidName { .. } => ErrorCategory::Validation,
            _ => ErrorCategory::Internal,
        }
    }

    /// Whether this error means the catalog itself is broken (a bug), as
    /// opposed to bad user input.
    pub fn is_authoring_defect(&self) -> bool {
        self.category() == ErrorCategory::Internal
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Internal,
}
