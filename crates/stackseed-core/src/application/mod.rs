//! Application layer for Stackseed.
//!
//! This layer contains:
//! - **Services**: use case orchestration (scaffold, tree building, audit
//!   logging, catalog self-check)
//! - **Ports**: traits for the catalog, renderer and filesystem
//! - **Errors**: failures of a scaffold run
//!
//! Business rules (selection, conflict policy, placeholder syntax) live in
//! `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{
    AuditLogger, CatalogDefect, CatalogService, LOG_DIR, ScaffoldReport, ScaffoldService,
    TreeBuilder,
};

pub use ports::{Filesystem, TemplateCatalog, TemplateRenderer};

pub use error::ApplicationError;
