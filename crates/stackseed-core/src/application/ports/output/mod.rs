//! Driven (output) ports - implemented by infrastructure.

use crate::domain::{
    CatalogResolution, DomainError, ExistingEntry, ProjectConfig, RenderContext, RenderedFile,
    TemplateDescriptor,
};
use crate::error::StackseedResult;
use std::path::Path;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `stackseed_adapters::filesystem::LocalFilesystem` (production)
/// - `stackseed_adapters::filesystem::MemoryFilesystem` (testing)
///
/// Errors are `ApplicationError::FilesystemError` tagged with the failing
/// path, except where noted.
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// What currently occupies `path`. Symlinks are not followed.
    fn entry_kind(&self, path: &Path) -> StackseedResult<ExistingEntry>;

    /// Whether `path` is a directory with no entries.
    fn is_empty_dir(&self, path: &Path) -> StackseedResult<bool>;

    /// Create a directory and any missing parents.
    fn create_dir_all(&self, path: &Path) -> StackseedResult<()>;

    /// Create `path` and write `bytes`, failing if anything exists there.
    ///
    /// An existing entry yields `ApplicationError::UnexpectedExistingFile`
    /// and is left untouched.
    fn write_new_file(&self, path: &Path, bytes: &[u8]) -> StackseedResult<()>;

    /// Append to `path`, creating it if missing.
    fn append_file(&self, path: &Path, bytes: &[u8]) -> StackseedResult<()>;
}

/// Port for the template registry.
///
/// Implemented by `stackseed_adapters::catalog::BuiltinCatalog`.
#[cfg_attr(test, mockall::automock)]
pub trait TemplateCatalog: Send + Sync {
    /// Descriptor sets for the config's variant.
    ///
    /// Infallible: every valid config maps to a set. A catalog that cannot
    /// serve one is a defect caught by `CatalogService::self_check`.
    fn resolve(&self, config: &ProjectConfig) -> CatalogResolution;
}

/// Port for template rendering.
///
/// Implemented by `stackseed_adapters::renderer::SimpleRenderer`.
#[cfg_attr(test, mockall::automock)]
pub trait TemplateRenderer: Send + Sync {
    /// Produce the bytes for a file descriptor.
    ///
    /// Pure: the same descriptor and context always give the same bytes.
    /// Directory descriptors and unresolved placeholders are authoring
    /// defects.
    fn render(
        &self,
        descriptor: &TemplateDescriptor,
        context: &RenderContext,
    ) -> Result<RenderedFile, DomainError>;
}
