//! Simple variable substitution renderer.

use stackseed_core::{
    application::ports::TemplateRenderer,
    domain::{DescriptorKind, DomainError, RenderContext, RenderedFile, TemplateDescriptor},
};
use tracing::instrument;

/// Renderer using `{{VAR}}` substitution from the [`RenderContext`].
///
/// Static files are copied verbatim. Rendered files must resolve every
/// placeholder.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleRenderer;

impl SimpleRenderer {
    /// Create a new simple renderer.
    pub fn new() -> Self {
        Self
    }
}

impl TemplateRenderer for SimpleRenderer {
    #[instrument(skip_all, fields(path = %descriptor.path))]
    fn render(
        &self,
        descriptor: &TemplateDescriptor,
        context: &RenderContext,
    ) -> Result<RenderedFile, DomainError> {
        let path = descriptor.path.clone();
        match &descriptor.kind {
            DescriptorKind::StaticFile(source) => {
                Ok(RenderedFile::new(path, source.as_str().as_bytes()))
            }
            DescriptorKind::RenderedFile(source) => {
                let text = context.render_strict(path.as_str(), source.as_str())?;
                Ok(RenderedFile::new(path, text))
            }
            DescriptorKind::Directory => Err(DomainError::InvalidTemplate(format!(
                "'{path}' is a directory and has no content"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stackseed_core::domain::{BackendFramework, DatabaseKind, ProjectConfig};

    fn context(database: DatabaseKind) -> RenderContext {
        let config =
            ProjectConfig::new("demo", BackendFramework::FastApi, database, "demo_db").unwrap();
        RenderContext::from_config(&config)
    }

    #[test]
    fn static_files_ignore_the_context() {
        let descriptor = TemplateDescriptor::static_file("frontend/.gitignore", "node_modules\n");
        let sql = SimpleRenderer.render(&descriptor, &context(DatabaseKind::Sql)).unwrap();
        let mongo = SimpleRenderer
            .render(&descriptor, &context(DatabaseKind::MongoDb))
            .unwrap();
        assert_eq!(sql, mongo);
        assert_eq!(sql.bytes, b"node_modules\n");
    }

    #[test]
    fn rendered_files_substitute_placeholders() {
        let descriptor =
            TemplateDescriptor::rendered_file("backend/db.js", "connect('{{DATABASE_URL}}')");
        let file = SimpleRenderer
            .render(&descriptor, &context(DatabaseKind::MongoDb))
            .unwrap();
        assert_eq!(
            String::from_utf8(file.bytes).unwrap(),
            "connect('mongodb://localhost:27017/demo_db')"
        );
    }

    #[test]
    fn unresolved_placeholder_is_a_defect() {
        let descriptor = TemplateDescriptor::rendered_file("backend/x", "{{SECRET}}");
        let err = SimpleRenderer
            .render(&descriptor, &context(DatabaseKind::Sql))
            .unwrap_err();
        assert!(err.is_authoring_defect());
    }

    #[test]
    fn directories_have_no_content() {
        let descriptor = TemplateDescriptor::directory("backend");
        assert!(
            SimpleRenderer
                .render(&descriptor, &context(DatabaseKind::Sql))
                .is_err()
        );
    }
}
