//! Stackseed Core - full-stack project scaffolding engine.
//!
//! Domain and application layers, in ports-and-adapters shape.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          stackseed-cli (CLI)            │
//! │   prompts, flags, config, exit codes    │
//! └──────────────────┬──────────────────────┘
//!                    │ SelectionResolver -> ProjectConfig
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  ScaffoldService, TreeBuilder,          │
//! │  AuditLogger, CatalogService            │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Application Ports (Traits)       │
//! │  TemplateCatalog, TemplateRenderer,     │
//! │  Filesystem                             │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    stackseed-adapters (Infrastructure)  │
//! │  BuiltinCatalog, SimpleRenderer,        │
//! │  LocalFilesystem, MemoryFilesystem      │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stackseed_core::prelude::*;
//!
//! let config = SelectionResolver::resolve("fastapi", "sql", "demo", "demo_db")?;
//! let service = ScaffoldService::new(catalog, renderer, filesystem);
//! let report = service.scaffold(&config, "./")?;
//! println!("{} paths created", report.result.created_count());
//! ```

pub mod domain;

pub mod application;

pub mod error;

pub mod prelude {
    pub use crate::application::{
        AuditLogger, CatalogService, ScaffoldReport, ScaffoldService, TreeBuilder,
        ports::{Filesystem, TemplateCatalog, TemplateRenderer},
    };
    pub use crate::domain::{
        BackendFramework, BuildResult, CatalogResolution, DatabaseKind, LogStream, ProjectConfig,
        RenderContext, SelectionResolver, TemplateDescriptor, TemplateSet, Variant,
    };
    pub use crate::error::{StackseedError, StackseedResult};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
