//! The `ProjectConfig` value: everything the engine needs to know about a run.
//!
//! Built once, from validated input, and never mutated. Construction goes
//! through [`ProjectConfig::new`] (typed choices) or
//! [`SelectionResolver`](crate::domain::SelectionResolver) (raw answers);
//! both apply the same name validation, so every `ProjectConfig` in
//! existence is safe to join onto a filesystem root.

use std::fmt;

use serde::Serialize;

use crate::domain::{
    error::DomainError,
    value_objects::{BackendFramework, DatabaseKind, Variant},
};

pub const SAMPLE_PROJECT_NAME: &str = "sample-project";
pub const SAMPLE_DATABASE_NAME: &str = "sample_db";

/// A fully-validated scaffolding request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ProjectConfig {
    name: String,
    backend: BackendFramework,
    database: DatabaseKind,
    database_name: String,
}

impl ProjectConfig {
    /// Validate names and build the config.
    ///
    /// Names are trimmed first; see [`validate_name`] for the rules.
    pub fn new(
        name: &str,
        backend: BackendFramework,
        database: DatabaseKind,
        database_name: &str,
    ) -> Result<Self, DomainError> {
        let name = validate_name("project name", name)?;
        let database_name = validate_name("database name", database_name)?;

        Ok(Self {
            name,
            backend,
            database,
            database_name,
        })
    }

    /// Fixed, known-valid config for a variant; used to inspect the catalog
    /// without user input.
    pub fn sample(variant: Variant) -> Self {
        Self {
            name: SAMPLE_PROJECT_NAME.to_string(),
            backend: variant.backend,
            database: variant.database,
            database_name: SAMPLE_DATABASE_NAME.to_string(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
    pub const fn backend(&self) -> BackendFramework {
        self.backend
    }
    pub const fn database(&self) -> DatabaseKind {
        self.database
    }
    pub fn database_name(&self) -> &str {
        &self.database_name
    }
    pub const fn variant(&self) -> Variant {
        Variant::new(self.backend, self.database)
    }
}

impl fmt::Display for ProjectConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} + {}, database '{}')",
            self.name, self.backend, self.database, self.database_name
        )
    }
}

/// Characters that would end a string literal or start an interpolation in a
/// generated file.
const RESERVED_CHARS: &[char] = &['"', '\'', '`', '$', '{', '}', '<', '>'];

/// Trim and validate a user-supplied name.
///
/// A name must be usable as a single path segment: non-empty, no separators,
/// not `.`/`..`, no parent-directory sequence, no control characters, and not
/// a hidden (dot-prefixed) name. Names are pasted into JS, Python, JSX and
/// HTML payloads, so quoting and interpolation characters are refused too.
pub fn validate_name(field: &'static str, raw: &str) -> Result<String, DomainError> {
    let name = raw.trim();
    let invalid = |reason: &str| DomainError::InvalidName {
        field,
        value: name.to_string(),
        reason: reason.into(),
    };

    if name.is_empty() {
        return Err(invalid("cannot be empty"));
    }
    if name.contains('/') || name.contains('\\') {
        return Err(invalid("cannot contain path separators"));
    }
    if name.contains("..") {
        return Err(invalid("cannot contain '..'"));
    }
    if name.starts_with('.') {
        return Err(invalid("cannot start with '.'"));
    }
    if name.chars().any(char::is_control) {
        return Err(invalid("cannot contain control characters"));
    }
    if let Some(c) = name.chars().find(|c| RESERVED_CHARS.contains(c)) {
        return Err(invalid(&format!("cannot contain '{c}'")));
    }

    Ok(name.to_string())
}
