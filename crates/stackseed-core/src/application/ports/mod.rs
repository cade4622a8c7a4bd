//! Application ports (traits) for external dependencies.
//!
//! Driven ports only: the application calls them, `stackseed-adapters`
//! implements them.
//!
//! - `TemplateCatalog`: variant to descriptor sets
//! - `TemplateRenderer`: descriptor to bytes
//! - `Filesystem`: inspect and create entries

pub mod output;

pub use output::{Filesystem, TemplateCatalog, TemplateRenderer};

#[cfg(test)]
pub use output::{MockFilesystem, MockTemplateCatalog, MockTemplateRenderer};
