//! Application services - orchestrate use cases.
//!
//! `ScaffoldService` is the entry point; it drives a `TreeBuilder` that
//! records into an `AuditLogger`. `CatalogService` answers catalog queries
//! and runs the self-check.

pub mod audit_logger;
pub mod catalog_service;
pub mod scaffold_service;
pub mod tree_builder;

pub use audit_logger::{AuditLogger, Clock};
pub use catalog_service::{CatalogDefect, CatalogService};
pub use scaffold_service::{ScaffoldReport, ScaffoldService};
pub use tree_builder::{LOG_DIR, TreeBuilder};
