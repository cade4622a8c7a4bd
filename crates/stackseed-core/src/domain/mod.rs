// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Stackseed.
//!
//! Pure data and rules: no filesystem, no clock, no logging. Everything that
//! touches the outside world goes through the ports in
//! [`crate::application::ports`].
//!
//! - **Selection**: raw answers to a validated [`ProjectConfig`]
//! - **Templates**: descriptors, per-component sets, placeholder rendering
//! - **Policy**: create / skip / abort per path
//! - **Log entries**: the audit line model
pub mod entities;
pub mod error;
pub mod policy;
pub mod selection;
pub mod value_objects;

pub use entities::{
    build_result::{BuildResult, RenderedFile},
    common::RelativePath,
    log_entry::LogEntry,
    project_config::{ProjectConfig, validate_name},
    template::{
        CatalogResolution, DescriptorKind, RenderContext, TemplateDescriptor, TemplateSet,
        TemplateSource, placeholders,
    },
};

pub use error::{DomainError, ErrorCategory};

pub use policy::{ConflictPolicy, Decision, DeclaredEntry, ExistingEntry};
pub use selection::SelectionResolver;

pub use value_objects::{BackendFramework, Component, DatabaseKind, LogLevel, LogStream, Variant};

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // Cross-type behaviour
    // ========================================================================

    #[test]
    fn every_variant_is_enumerated_once() {
        let variants: Vec<Variant> = Variant::all().collect();
        assert_eq!(variants.len(), 4);
        assert_eq!(
            variants[0],
            Variant::new(BackendFramework::FastApi, DatabaseKind::Sql)
        );
        assert_eq!(
            variants[3],
            Variant::new(BackendFramework::ExpressJs, DatabaseKind::MongoDb)
        );
    }

    #[test]
    fn components_map_to_their_own_streams() {
        assert_eq!(Component::Frontend.stream(), LogStream::Frontend);
        assert_eq!(Component::Backend.stream(), LogStream::Backend);
    }

    #[test]
    fn stream_for_path_classifies_by_top_level() {
        use std::path::Path;
        let root = Path::new("/work/demo");
        assert_eq!(
            LogStream::for_path(root, &root.join("frontend").join("index.html")),
            LogStream::Frontend
        );
        assert_eq!(
            LogStream::for_path(root, &root.join("backend").join("db.js")),
            LogStream::Backend
        );
        assert_eq!(LogStream::for_path(root, root), LogStream::Setup);
        assert_eq!(
            LogStream::for_path(root, &root.join("log").join("setup.log")),
            LogStream::Setup
        );
    }

    #[test]
    fn connection_urls_embed_database_name() {
        assert_eq!(
            DatabaseKind::Sql.connection_url("demo_db"),
            "sqlite:///./demo_db.db"
        );
        assert_eq!(
            DatabaseKind::MongoDb.connection_url("demo_db"),
            "mongodb://localhost:27017/demo_db"
        );
    }

    #[test]
    fn selection_errors_are_validation_errors() {
        let err = SelectionResolver::resolve("3", "1", "demo", "db").unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert!(!err.is_authoring_defect());
        assert!(!err.suggestions().is_empty());
    }

    #[test]
    fn catalog_errors_are_authoring_defects() {
        let err = DomainError::DuplicatePath {
            path: "frontend".into(),
        };
        assert!(err.is_authoring_defect());
    }
}
