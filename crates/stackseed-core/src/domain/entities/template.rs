//! Template descriptors and the rendering context.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CatalogResolution (per ProjectConfig)                      │
//! │  ├── frontend: TemplateSet  (identical for every variant)   │
//! │  └── backend:  TemplateSet  (branches on backend, database) │
//! │       └── Vec<TemplateDescriptor>                           │
//! │            ├── Directory                                    │
//! │            ├── StaticFile(TemplateSource)    copied as-is   │
//! │            └── RenderedFile(TemplateSource)  {{VAR}} subst  │
//! ├─────────────────────────────────────────────────────────────┤
//! │  RenderContext (Value Object)                               │
//! │  └── {{PROJECT_NAME}} -> "demo", {{DATABASE_URL}} -> ...    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Descriptors are pure data, defined statically per variant and never
//! mutated at generation time.
//!
//! ## Placeholders
//!
//! A placeholder is `{{` + an upper-case identifier + `}}`. Anything else
//! between double braces (`{{ theme, toggleTheme }}` in JSX) is payload text.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use serde::Serialize;

use crate::domain::{
    entities::{common::RelativePath, project_config::ProjectConfig},
    error::DomainError,
    value_objects::Component,
};

// ============================================================================
// Content
// ============================================================================

/// Template payload text.
///
/// `Static` references compile-time strings without allocation; `Owned`
/// covers payloads produced at runtime (tests, generated manifests).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    Static(&'static str),
    Owned(String),
}

impl From<&'static str> for TemplateSource {
    fn from(s: &'static str) -> Self {
        Self::Static(s)
    }
}

impl From<String> for TemplateSource {
    fn from(s: String) -> Self {
        Self::Owned(s)
    }
}

impl TemplateSource {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Static(s) => s,
            Self::Owned(s) => s,
        }
    }

    pub fn contains_placeholder(&self) -> bool {
        !placeholders(self.as_str()).is_empty()
    }
}

/// How a descriptor produces its output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DescriptorKind {
    Directory,
    /// Copied byte-for-byte, independent of the config.
    StaticFile(TemplateSource),
    /// Placeholders substituted from the [`RenderContext`].
    RenderedFile(TemplateSource),
}

impl DescriptorKind {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Directory => "dir",
            Self::StaticFile(_) => "static",
            Self::RenderedFile(_) => "rendered",
        }
    }
}

// ============================================================================
// Descriptor
// ============================================================================

/// One catalog entry: an output path and how to produce it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateDescriptor {
    pub path: RelativePath,
    pub kind: DescriptorKind,
}

impl TemplateDescriptor {
    pub fn directory(path: impl Into<RelativePath>) -> Self {
        Self {
            path: path.into(),
            kind: DescriptorKind::Directory,
        }
    }

    pub fn static_file(path: impl Into<RelativePath>, content: impl Into<TemplateSource>) -> Self {
        Self {
            path: path.into(),
            kind: DescriptorKind::StaticFile(content.into()),
        }
    }

    pub fn rendered_file(
        path: impl Into<RelativePath>,
        content: impl Into<TemplateSource>,
    ) -> Self {
        Self {
            path: path.into(),
            kind: DescriptorKind::RenderedFile(content.into()),
        }
    }

    pub fn is_directory(&self) -> bool {
        matches!(self.kind, DescriptorKind::Directory)
    }
}

impl fmt::Display for TemplateDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_directory() {
            write!(f, "{}/", self.path)
        } else {
            write!(f, "{}", self.path)
        }
    }
}

// ============================================================================
// TemplateSet - ordered descriptors for one component
// ============================================================================

/// Ordered descriptors for one component.
///
/// ## Invariants (enforced by `validate()`)
///
/// 1. Every path lies under the component's top-level directory
/// 2. All paths are unique
/// 3. A directory precedes anything nested under it
#[derive(Debug, Clone)]
pub struct TemplateSet {
    component: Component,
    descriptors: Vec<TemplateDescriptor>,
}

impl TemplateSet {
    pub fn new(component: Component) -> Self {
        Self {
            component,
            descriptors: Vec::new(),
        }
    }

    pub fn push(&mut self, descriptor: TemplateDescriptor) {
        self.descriptors.push(descriptor);
    }

    pub fn with(mut self, descriptor: TemplateDescriptor) -> Self {
        self.push(descriptor);
        self
    }

    pub fn extend(&mut self, descriptors: impl IntoIterator<Item = TemplateDescriptor>) {
        self.descriptors.extend(descriptors);
    }

    pub const fn component(&self) -> Component {
        self.component
    }

    pub fn iter(&self) -> impl Iterator<Item = &TemplateDescriptor> {
        self.descriptors.iter()
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    pub fn file_count(&self) -> usize {
        self.iter().filter(|d| !d.is_directory()).count()
    }

    pub fn directory_count(&self) -> usize {
        self.iter().filter(|d| d.is_directory()).count()
    }

    pub fn get(&self, path: &str) -> Option<&TemplateDescriptor> {
        self.iter().find(|d| d.path.as_str() == path)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.descriptors.is_empty() {
            return Err(DomainError::InvalidTemplate(format!(
                "{} template set is empty",
                self.component
            )));
        }

        let mut declared_dirs: HashSet<&str> = HashSet::new();
        let mut seen: HashSet<&str> = HashSet::new();

        for descriptor in &self.descriptors {
            let path = descriptor.path.as_str();

            if descriptor.path.top_level() != self.component.as_str() {
                return Err(DomainError::InvalidPath {
                    path: path.to_string(),
                    reason: format!("must live under '{}/'", self.component),
                });
            }

            if !seen.insert(path) {
                return Err(DomainError::DuplicatePath {
                    path: path.to_string(),
                });
            }

            if let Some(parent) = descriptor.path.parent() {
                if !declared_dirs.contains(parent.as_str()) {
                    return Err(DomainError::ParentNotDeclared {
                        path: path.to_string(),
                        parent: parent.to_string(),
                    });
                }
            }

            if descriptor.is_directory() {
                declared_dirs.insert(path);
            }
        }

        Ok(())
    }
}

impl<'a> IntoIterator for &'a TemplateSet {
    type Item = &'a TemplateDescriptor;
    type IntoIter = std::slice::Iter<'a, TemplateDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.descriptors.iter()
    }
}

/// What the catalog resolves a config to.
#[derive(Debug, Clone)]
pub struct CatalogResolution {
    pub frontend: TemplateSet,
    pub backend: TemplateSet,
}

impl CatalogResolution {
    /// Validate both sets; paths must also be unique across them.
    pub fn validate(&self) -> Result<(), DomainError> {
        self.frontend.validate()?;
        self.backend.validate()?;

        let mut seen = HashSet::new();
        for descriptor in self.frontend.iter().chain(self.backend.iter()) {
            if !seen.insert(descriptor.path.as_str()) {
                return Err(DomainError::DuplicatePath {
                    path: descriptor.path.to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn sets(&self) -> [&TemplateSet; 2] {
        [&self.frontend, &self.backend]
    }

    pub fn file_count(&self) -> usize {
        self.frontend.file_count() + self.backend.file_count()
    }
}

// ============================================================================
// RenderContext
// ============================================================================

/// Context for template rendering.
///
/// ## Built-in Variables
///
/// | Variable | Example | Source |
/// |----------|---------|--------|
/// | `PROJECT_NAME` | "demo" | User input |
/// | `DATABASE_NAME` | "demo_db" | User input |
/// | `DATABASE_KIND` | "SQL" / "MongoDB" | Database choice |
/// | `DATABASE_URL` | "sqlite:///./demo_db.db" | Derived from kind + name |
///
/// Variables live in a `BTreeMap` so iteration (e.g. for diagnostics) is
/// ordered and rendering is reproducible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderContext {
    variables: BTreeMap<String, String>,
}

impl RenderContext {
    pub fn from_config(config: &ProjectConfig) -> Self {
        let mut variables = BTreeMap::new();
        variables.insert("PROJECT_NAME".to_string(), config.name().to_string());
        variables.insert(
            "DATABASE_NAME".to_string(),
            config.database_name().to_string(),
        );
        variables.insert(
            "DATABASE_KIND".to_string(),
            config.database().display_name().to_string(),
        );
        variables.insert(
            "DATABASE_URL".to_string(),
            config.database().connection_url(config.database_name()),
        );
        Self { variables }
    }

    /// Add or override a variable.
    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }

    pub fn variables(&self) -> impl Iterator<Item = (&str, &str)> {
        self.variables.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Substitute placeholders in a single left-to-right pass.
    ///
    /// Substituted values are never rescanned, so a project named
    /// `{{DATABASE_NAME}}` renders literally. Unknown placeholders are left
    /// in place; see [`Self::render_strict`].
    pub fn render(&self, template: &str) -> String {
        self.substitute(template).0
    }

    /// Like [`Self::render`], but unknown placeholders are an error.
    pub fn render_strict(&self, path: &str, template: &str) -> Result<String, DomainError> {
        let (rendered, unresolved) = self.substitute(template);
        if unresolved.is_empty() {
            Ok(rendered)
        } else {
            Err(DomainError::UnresolvedPlaceholder {
                path: path.to_string(),
                placeholders: unresolved,
            })
        }
    }

    fn substitute(&self, template: &str) -> (String, Vec<String>) {
        let mut out = String::with_capacity(template.len());
        let mut unresolved = Vec::new();
        let mut rest = template;

        while let Some(start) = rest.find("{{") {
            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];

            match placeholder_at(after) {
                Some(name) => {
                    match self.variables.get(name) {
                        Some(value) => out.push_str(value),
                        None => {
                            if !unresolved.iter().any(|u| u == name) {
                                unresolved.push(name.to_string());
                            }
                            out.push_str("{{");
                            out.push_str(name);
                            out.push_str("}}");
                        }
                    }
                    rest = &after[name.len() + 2..];
                }
                None => {
                    out.push_str("{{");
                    rest = after;
                }
            }
        }
        out.push_str(rest);

        (out, unresolved)
    }
}

/// If `s` starts with `IDENT}}`, return `IDENT`.
fn placeholder_at(s: &str) -> Option<&str> {
    let end = s.find("}}")?;
    let name = &s[..end];
    let mut chars = name.chars();
    let first = chars.next()?;
    let valid = first.is_ascii_uppercase()
        && chars.all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_');
    valid.then_some(name)
}

/// All placeholder names in `template`, in order of first appearance.
pub fn placeholders(template: &str) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        let after = &rest[start + 2..];
        match placeholder_at(after) {
            Some(name) => {
                if !found.iter().any(|f| f == name) {
                    found.push(name.to_string());
                }
                rest = &after[name.len() + 2..];
            }
            None => rest = after,
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{BackendFramework, DatabaseKind};

    fn context() -> RenderContext {
        let config =
            ProjectConfig::new("demo", BackendFramework::FastApi, DatabaseKind::Sql, "demo_db")
                .unwrap();
        RenderContext::from_config(&config)
    }

    #[test]
    fn context_derives_database_variables() {
        let ctx = context();
        assert_eq!(ctx.get("PROJECT_NAME"), Some("demo"));
        assert_eq!(ctx.get("DATABASE_NAME"), Some("demo_db"));
        assert_eq!(ctx.get("DATABASE_KIND"), Some("SQL"));
        assert_eq!(ctx.get("DATABASE_URL"), Some("sqlite:///./demo_db.db"));
    }

    #[test]
    fn render_replaces_every_occurrence() {
        let rendered = context().render("{{PROJECT_NAME}}/{{PROJECT_NAME}}: {{DATABASE_URL}}");
        assert_eq!(rendered, "demo/demo: sqlite:///./demo_db.db");
    }

    #[test]
    fn jsx_double_braces_are_not_placeholders() {
        let jsx = "<Ctx.Provider value={{ theme, toggleTheme }}>{{PROJECT_NAME}}";
        assert_eq!(
            context().render(jsx),
            "<Ctx.Provider value={{ theme, toggleTheme }}>demo"
        );
        assert_eq!(placeholders(jsx), vec!["PROJECT_NAME".to_string()]);
    }

    #[test]
    fn substituted_values_are_not_rescanned() {
        let ctx = context().with_variable("PROJECT_NAME", "{{DATABASE_NAME}}");
        assert_eq!(ctx.render("{{PROJECT_NAME}}"), "{{DATABASE_NAME}}");
    }

    #[test]
    fn render_strict_reports_unknown_placeholders_once() {
        let err = context()
            .render_strict("x.txt", "{{AUTHOR}} {{AUTHOR}} {{PROJECT_NAME}}")
            .unwrap_err();
        assert_eq!(
            err,
            DomainError::UnresolvedPlaceholder {
                path: "x.txt".into(),
                placeholders: vec!["AUTHOR".into()],
            }
        );
    }

    #[test]
    fn lenient_render_leaves_unknown_placeholders() {
        assert_eq!(context().render("{{AUTHOR}}!"), "{{AUTHOR}}!");
    }

    #[test]
    fn set_validation_requires_parent_first() {
        let set = TemplateSet::new(Component::Backend)
            .with(TemplateDescriptor::directory("backend"))
            .with(TemplateDescriptor::static_file("backend/app/main.py", "x"))
            .with(TemplateDescriptor::directory("backend/app"));
        assert!(matches!(
            set.validate(),
            Err(DomainError::ParentNotDeclared { .. })
        ));
    }

    #[test]
    fn set_validation_rejects_duplicates() {
        let set = TemplateSet::new(Component::Frontend)
            .with(TemplateDescriptor::directory("frontend"))
            .with(TemplateDescriptor::static_file("frontend/a.txt", "a"))
            .with(TemplateDescriptor::static_file("frontend/a.txt", "b"));
        assert!(matches!(set.validate(), Err(DomainError::DuplicatePath { .. })));
    }

    #[test]
    fn set_validation_rejects_foreign_top_level() {
        let set = TemplateSet::new(Component::Frontend).with(TemplateDescriptor::directory("backend"));
        assert!(matches!(set.validate(), Err(DomainError::InvalidPath { .. })));
    }

    #[test]
    fn set_counts_files_and_directories() {
        let set = TemplateSet::new(Component::Frontend)
            .with(TemplateDescriptor::directory("frontend"))
            .with(TemplateDescriptor::static_file("frontend/a.txt", "a"))
            .with(TemplateDescriptor::rendered_file("frontend/b.txt", "{{PROJECT_NAME}}"));
        assert!(set.validate().is_ok());
        assert_eq!(set.file_count(), 2);
        assert_eq!(set.directory_count(), 1);
    }
}
