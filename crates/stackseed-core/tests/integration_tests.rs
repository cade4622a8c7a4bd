//! Integration tests for stackseed-core's public API.

use stackseed_core::{
    domain::{
        ConflictPolicy, Decision, DeclaredEntry, DomainError, ExistingEntry, RenderContext,
        SelectionResolver, TemplateDescriptor, Variant, placeholders,
    },
    error::{ErrorCategory, StackseedError},
    prelude::*,
};

#[test]
fn raw_answers_flow_into_render_context() {
    let config = SelectionResolver::resolve(" 2 ", "mongo", " demo ", "demo_db").unwrap();
    assert_eq!(config.backend(), BackendFramework::ExpressJs);
    assert_eq!(config.database(), DatabaseKind::MongoDb);

    let context = RenderContext::from_config(&config);
    assert_eq!(
        context.render("mongoose.connect('{{DATABASE_URL}}')"),
        "mongoose.connect('mongodb://localhost:27017/demo_db')"
    );
}

#[test]
fn invalid_database_choice_is_a_validation_error() {
    let err: StackseedError = SelectionResolver::resolve("1", "3", "demo", "demo_db")
        .unwrap_err()
        .into();
    assert_eq!(err.category(), ErrorCategory::Validation);
    assert!(err.to_string().contains("database"));
    assert!(err.path().is_none());
}

#[test]
fn traversal_names_never_reach_a_config() {
    for name in ["../x", "a/b", ".."] {
        let err = SelectionResolver::resolve("1", "1", name, "db").unwrap_err();
        assert!(matches!(err, DomainError::InvalidName { .. }), "{name}");
    }
}

#[test]
fn sample_configs_cover_every_variant() {
    let names: Vec<String> = Variant::all()
        .map(|v| ProjectConfig::sample(v).to_string())
        .collect();
    assert_eq!(names.len(), 4);
    assert!(names[0].contains("FastAPI + SQL"));
    assert!(names[3].contains("Express.js + MongoDB"));
}

#[test]
fn policy_never_allows_writing_over_a_file() {
    for declared in [DeclaredEntry::Directory, DeclaredEntry::File] {
        assert_eq!(
            ConflictPolicy::decide(declared, ExistingEntry::File),
            Decision::Abort
        );
    }
}

#[test]
fn descriptor_display_marks_directories() {
    assert_eq!(
        TemplateDescriptor::directory("backend/app").to_string(),
        "backend/app/"
    );
    assert_eq!(
        TemplateDescriptor::static_file("backend/app.js", "").to_string(),
        "backend/app.js"
    );
}

#[test]
fn placeholder_scan_ignores_lowercase_and_spaced_braces() {
    let text = "{{ value }} {{lower}} {{PROJECT_NAME}} {{DB_2}}";
    assert_eq!(placeholders(text), ["PROJECT_NAME", "DB_2"]);
}
