//! Catalog Service - consistency checks over the whole template catalog.
//!
//! Catalog mistakes (duplicate paths, a file before its directory, a
//! placeholder nobody fills) are authoring bugs. They are found here, over
//! every variant, instead of in the middle of a user's scaffold run.

use std::fmt;

use serde::Serialize;
use tracing::{debug, instrument};

use crate::{
    application::ports::{TemplateCatalog, TemplateRenderer},
    domain::{
        CatalogResolution, DescriptorKind, ProjectConfig, RenderContext, TemplateSet, Variant,
    },
};

/// One problem found by [`CatalogService::self_check`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogDefect {
    pub variant: Variant,
    pub path: Option<String>,
    pub reason: String,
}

impl fmt::Display for CatalogDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.path {
            Some(path) => write!(f, "[{}] {path}: {}", self.variant, self.reason),
            None => write!(f, "[{}] {}", self.variant, self.reason),
        }
    }
}

/// Read-only queries over the catalog.
pub struct CatalogService<'a> {
    catalog: &'a dyn TemplateCatalog,
    renderer: &'a dyn TemplateRenderer,
}

impl<'a> CatalogService<'a> {
    pub fn new(catalog: &'a dyn TemplateCatalog, renderer: &'a dyn TemplateRenderer) -> Self {
        Self { catalog, renderer }
    }

    /// Descriptor sets for a variant, resolved with sample names.
    pub fn describe(&self, variant: Variant) -> CatalogResolution {
        self.catalog.resolve(&ProjectConfig::sample(variant))
    }

    /// Check every variant. An empty result means the catalog is sound.
    ///
    /// Per variant: structural validation, every file renders with no
    /// unresolved placeholder, static files carry no placeholders. Across
    /// variants: the rendered frontend is byte-identical.
    #[instrument(skip_all)]
    pub fn self_check(&self) -> Vec<CatalogDefect> {
        let mut defects = Vec::new();
        let mut reference: Option<(Variant, Vec<(String, Vec<u8>)>)> = None;

        for variant in Variant::all() {
            let config = ProjectConfig::sample(variant);
            let resolution = self.catalog.resolve(&config);

            if let Err(e) = resolution.validate() {
                defects.push(CatalogDefect {
                    variant,
                    path: None,
                    reason: e.to_string(),
                });
                continue;
            }

            let context = RenderContext::from_config(&config);
            self.check_set(variant, &resolution.backend, &context, &mut defects);
            let frontend = self.check_set(variant, &resolution.frontend, &context, &mut defects);

            match &reference {
                None => reference = Some((variant, frontend)),
                Some((first, expected)) if *expected != frontend => defects.push(CatalogDefect {
                    variant,
                    path: Some(resolution.frontend.component().to_string()),
                    reason: format!("frontend output differs from {first}"),
                }),
                Some(_) => {}
            }
        }

        debug!(defects = defects.len(), "Catalog self-check finished");
        defects
    }

    /// Render every file of `set`, recording defects; returns what rendered.
    fn check_set(
        &self,
        variant: Variant,
        set: &TemplateSet,
        context: &RenderContext,
        defects: &mut Vec<CatalogDefect>,
    ) -> Vec<(String, Vec<u8>)> {
        let mut rendered = Vec::new();

        for descriptor in set {
            let defect = |reason: String| CatalogDefect {
                variant,
                path: Some(descriptor.path.to_string()),
                reason,
            };

            if let DescriptorKind::StaticFile(source) = &descriptor.kind {
                if source.contains_placeholder() {
                    defects.push(defect(
                        "static file contains placeholders; declare it as rendered".into(),
                    ));
                }
            }
            if descriptor.is_directory() {
                continue;
            }

            match self.renderer.render(descriptor, context) {
                Ok(file) => rendered.push((file.path.to_string(), file.bytes)),
                Err(e) => defects.push(defect(e.to_string())),
            }
        }

        rendered
    }
}
