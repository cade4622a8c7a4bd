//! The built-in template catalog.
//!
//! Payload text lives under `templates/` in this crate and is embedded at
//! compile time. The registry is a set of immutable static tables:
//!
//! ```text
//! FRONTEND                       every variant
//! FASTAPI  + FASTAPI_{SQL,MONGODB}   backend = FastAPI
//! EXPRESS  + EXPRESS_{SQL,MONGODB}   backend = Express.js
//! ```
//!
//! Each backend is a shared table plus a database table holding the
//! database-setup file and the dependency manifest.

use stackseed_core::{
    application::ports::TemplateCatalog,
    domain::{
        BackendFramework, CatalogResolution, Component, DatabaseKind, ProjectConfig,
        TemplateDescriptor, TemplateSet, Variant,
    },
};
use tracing::debug;

macro_rules! payload {
    ($path:literal) => {
        include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/templates/", $path))
    };
}

/// One registry row. `const`-constructible so the tables can be `static`.
#[derive(Debug, Clone, Copy)]
enum Entry {
    Dir(&'static str),
    Static(&'static str, &'static str),
    Rendered(&'static str, &'static str),
}

use Entry::{Dir, Rendered, Static};

impl Entry {
    fn descriptor(self) -> TemplateDescriptor {
        match self {
            Dir(path) => TemplateDescriptor::directory(path),
            Static(path, text) => TemplateDescriptor::static_file(path, text),
            Rendered(path, text) => TemplateDescriptor::rendered_file(path, text),
        }
    }
}

// ── Frontend ─────────────────────────────────────────────────────────────────

static FRONTEND: &[Entry] = &[
    Dir("frontend"),
    Dir("frontend/public"),
    Dir("frontend/src"),
    Dir("frontend/src/assets"),
    Dir("frontend/src/components"),
    Dir("frontend/src/config"),
    Dir("frontend/src/lib"),
    Dir("frontend/src/pages"),
    Dir("frontend/src/store"),
    Static("frontend/.gitignore", payload!("frontend/gitignore")),
    Static("frontend/eslint.config.js", payload!("frontend/eslint.config.js")),
    Rendered("frontend/index.html", payload!("frontend/index.html")),
    Static("frontend/package.json", payload!("frontend/package.json")),
    Static("frontend/postcss.config.js", payload!("frontend/postcss.config.js")),
    Static("frontend/README.md", payload!("frontend/README.md")),
    Static("frontend/tailwind.config.js", payload!("frontend/tailwind.config.js")),
    Static("frontend/vite.config.js", payload!("frontend/vite.config.js")),
    Static("frontend/src/App.jsx", payload!("frontend/src/App.jsx")),
    Static("frontend/src/index.css", payload!("frontend/src/index.css")),
    Static("frontend/src/main.jsx", payload!("frontend/src/main.jsx")),
    Rendered(
        "frontend/src/pages/HomePage.jsx",
        payload!("frontend/src/pages/HomePage.jsx"),
    ),
    Static(
        "frontend/src/store/ThemeContext.jsx",
        payload!("frontend/src/store/ThemeContext.jsx"),
    ),
    Static("frontend/src/lib/axios.js", payload!("frontend/src/lib/axios.js")),
    Static(
        "frontend/src/components/ToggleThemeButtons.jsx",
        payload!("frontend/src/components/ToggleThemeButtons.jsx"),
    ),
];

// ── FastAPI ──────────────────────────────────────────────────────────────────

static FASTAPI: &[Entry] = &[
    Dir("backend"),
    Dir("backend/app"),
    Dir("backend/app/models"),
    Dir("backend/app/schemas"),
    Dir("backend/app/routers"),
    Dir("backend/app/core"),
    Static("backend/app/main.py", payload!("fastapi/app/main.py")),
    Static("backend/app/__init__.py", payload!("fastapi/app/__init__.py")),
    Static(
        "backend/app/models/__init__.py",
        payload!("fastapi/app/models/__init__.py"),
    ),
    Static(
        "backend/app/schemas/__init__.py",
        payload!("fastapi/app/schemas/__init__.py"),
    ),
    Static(
        "backend/app/routers/__init__.py",
        payload!("fastapi/app/routers/__init__.py"),
    ),
    Static(
        "backend/app/core/__init__.py",
        payload!("fastapi/app/core/__init__.py"),
    ),
    Static("backend/app/models/user.py", payload!("fastapi/app/models/user.py")),
    Static("backend/app/schemas/user.py", payload!("fastapi/app/schemas/user.py")),
    Static("backend/app/routers/user.py", payload!("fastapi/app/routers/user.py")),
    Static("backend/app/core/config.py", payload!("fastapi/app/core/config.py")),
    Static("backend/README.md", payload!("fastapi/README.md")),
];

static FASTAPI_SQL: &[Entry] = &[
    Rendered(
        "backend/app/core/database.py",
        payload!("fastapi/app/core/database.sql.py"),
    ),
    Static("backend/requirements.txt", payload!("fastapi/requirements.sql.txt")),
];

static FASTAPI_MONGODB: &[Entry] = &[
    Rendered(
        "backend/app/core/database.py",
        payload!("fastapi/app/core/database.mongodb.py"),
    ),
    Static(
        "backend/requirements.txt",
        payload!("fastapi/requirements.mongodb.txt"),
    ),
];

// ── Express.js ───────────────────────────────────────────────────────────────

static EXPRESS: &[Entry] = &[
    Dir("backend"),
    Dir("backend/routes"),
    Dir("backend/models"),
    Dir("backend/controllers"),
    Static("backend/app.js", payload!("express/app.js")),
    Static("backend/routes/index.js", payload!("express/routes/index.js")),
    Static("backend/routes/users.js", payload!("express/routes/users.js")),
    Static("backend/models/user.js", payload!("express/models/user.js")),
    Static(
        "backend/controllers/userController.js",
        payload!("express/controllers/userController.js"),
    ),
    Static("backend/README.md", payload!("express/README.md")),
];

static EXPRESS_SQL: &[Entry] = &[
    Rendered("backend/db.js", payload!("express/db.sql.js")),
    Static("backend/package.json", payload!("express/package.sql.json")),
];

static EXPRESS_MONGODB: &[Entry] = &[
    Rendered("backend/db.js", payload!("express/db.mongodb.js")),
    Static("backend/package.json", payload!("express/package.mongodb.json")),
];

/// Shared backend table and database table for a variant.
fn backend_tables(variant: Variant) -> (&'static [Entry], &'static [Entry]) {
    match (variant.backend, variant.database) {
        (BackendFramework::FastApi, DatabaseKind::Sql) => (FASTAPI, FASTAPI_SQL),
        (BackendFramework::FastApi, DatabaseKind::MongoDb) => (FASTAPI, FASTAPI_MONGODB),
        (BackendFramework::ExpressJs, DatabaseKind::Sql) => (EXPRESS, EXPRESS_SQL),
        (BackendFramework::ExpressJs, DatabaseKind::MongoDb) => (EXPRESS, EXPRESS_MONGODB),
    }
}

fn build_set(component: Component, tables: &[&[Entry]]) -> TemplateSet {
    let mut set = TemplateSet::new(component);
    set.extend(
        tables
            .iter()
            .flat_map(|table| table.iter())
            .map(|entry| entry.descriptor()),
    );
    set
}

/// Catalog backed by the payloads compiled into this crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinCatalog;

impl BuiltinCatalog {
    pub fn new() -> Self {
        Self
    }
}

impl TemplateCatalog for BuiltinCatalog {
    fn resolve(&self, config: &ProjectConfig) -> CatalogResolution {
        let variant = config.variant();
        let (shared, database) = backend_tables(variant);

        let resolution = CatalogResolution {
            frontend: build_set(Component::Frontend, &[FRONTEND]),
            backend: build_set(Component::Backend, &[shared, database]),
        };
        debug!(
            %variant,
            frontend = resolution.frontend.len(),
            backend = resolution.backend.len(),
            "Resolved built-in catalog"
        );
        resolution
    }
}
