//! Scaffold Service - main application orchestrator.
//!
//! Coordinates the scaffolding workflow:
//! 1. Resolve descriptor sets for the config's variant
//! 2. Validate them
//! 3. Hand them to the tree builder with a fresh audit logger

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    application::{
        ports::{Filesystem, TemplateCatalog, TemplateRenderer},
        services::{AuditLogger, CatalogService, TreeBuilder},
    },
    domain::{BuildResult, CatalogResolution, ProjectConfig},
    error::{StackseedError, StackseedResult},
};

/// Outcome of a successful scaffold run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScaffoldReport {
    pub run_id: Uuid,
    pub root: PathBuf,
    #[serde(flatten)]
    pub result: BuildResult,
}

impl ScaffoldReport {
    pub fn log_dir(&self) -> PathBuf {
        self.root.join(super::tree_builder::LOG_DIR)
    }
}

/// Main scaffolding service.
pub struct ScaffoldService {
    catalog: Box<dyn TemplateCatalog>,
    renderer: Box<dyn TemplateRenderer>,
    filesystem: Box<dyn Filesystem>,
}

impl ScaffoldService {
    /// Create a new scaffold service with the given adapters.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use stackseed_core::application::ScaffoldService;
    ///
    /// let service = ScaffoldService::new(
    ///     Box::new(catalog),    // impl TemplateCatalog
    ///     Box::new(renderer),   // impl TemplateRenderer
    ///     Box::new(filesystem), // impl Filesystem
    /// );
    /// ```
    pub fn new(
        catalog: Box<dyn TemplateCatalog>,
        renderer: Box<dyn TemplateRenderer>,
        filesystem: Box<dyn Filesystem>,
    ) -> Self {
        Self {
            catalog,
            renderer,
            filesystem,
        }
    }

    /// `<parent>/<project name>`.
    pub fn project_root(config: &ProjectConfig, parent_dir: &Path) -> PathBuf {
        parent_dir.join(config.name())
    }

    /// Resolve and validate the descriptor sets for `config`. Writes nothing.
    pub fn plan(&self, config: &ProjectConfig) -> StackseedResult<CatalogResolution> {
        let resolution = self.catalog.resolve(config);
        resolution.validate().map_err(StackseedError::Domain)?;
        Ok(resolution)
    }

    /// Scaffold a new project under `parent_dir`.
    #[instrument(
        skip_all,
        fields(project = %config.name(), parent = %parent_dir.as_ref().display())
    )]
    pub fn scaffold(
        &self,
        config: &ProjectConfig,
        parent_dir: impl AsRef<Path>,
    ) -> StackseedResult<ScaffoldReport> {
        self.scaffold_with_logger(config, parent_dir.as_ref(), AuditLogger::new())
    }

    /// Like [`Self::scaffold`], with a caller-supplied logger (e.g. with a
    /// fixed clock).
    pub fn scaffold_with_logger(
        &self,
        config: &ProjectConfig,
        parent_dir: &Path,
        mut logger: AuditLogger,
    ) -> StackseedResult<ScaffoldReport> {
        info!("Scaffolding {config}");

        let resolution = self.plan(config)?;
        let root = Self::project_root(config, parent_dir);

        let result = TreeBuilder::new(&*self.renderer, &*self.filesystem, &mut logger)
            .build(&root, &resolution, config)?;

        info!(
            created = result.created_count(),
            skipped = result.skipped_count(),
            "Scaffold completed successfully"
        );

        Ok(ScaffoldReport {
            run_id: logger.run_id(),
            root,
            result,
        })
    }

    /// Catalog queries and the self-check, using this service's adapters.
    pub fn catalog(&self) -> CatalogService<'_> {
        CatalogService::new(&*self.catalog, &*self.renderer)
    }
}
