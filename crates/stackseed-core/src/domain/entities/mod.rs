pub mod build_result;
pub mod common;
pub mod log_entry;
pub mod project_config;
pub mod template;

pub use crate::domain::DomainError;
pub use build_result::{BuildResult, RenderedFile};
pub use log_entry::LogEntry;
pub use project_config::ProjectConfig;
pub use template::{CatalogResolution, RenderContext, TemplateDescriptor, TemplateSet};
