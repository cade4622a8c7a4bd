use crate::domain::{
    entities::project_config::ProjectConfig,
    error::DomainError,
    value_objects::{BackendFramework, DatabaseKind},
};

/// Turns raw answers into a [`ProjectConfig`].
///
/// Pure: no I/O, no logging. Callers recover from its errors by asking again.
pub struct SelectionResolver;

impl SelectionResolver {
    /// Validate and normalise the four user choices.
    ///
    /// Choices are checked in prompt order (backend, database, then names),
    /// so the first reported error is the first wrong answer.
    pub fn resolve(
        raw_backend: &str,
        raw_database: &str,
        raw_name: &str,
        raw_database_name: &str,
    ) -> Result<ProjectConfig, DomainError> {
        let backend: BackendFramework = raw_backend.parse()?;
        let database: DatabaseKind = raw_database.parse()?;
        ProjectConfig::new(raw_name, backend, database, raw_database_name)
    }
}
