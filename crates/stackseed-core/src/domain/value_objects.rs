//! Domain value objects: BackendFramework, DatabaseKind, Component, LogStream,
//! LogLevel.
//!
//! # Design
//!
//! Pure value types: `Copy`, compared by value, no identity. Each has a
//! string form and a `FromStr` parser.
//!
//! Parsers accept the numeric menu answers (`1`, `2`) as well as names, so
//! that a prompt and a flag go through exactly the same validation.

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

// ── BackendFramework ─────────────────────────────────────────────────────────

/// Backend framework for the generated `backend/` tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendFramework {
    FastApi,
    #[serde(rename = "express")]
    ExpressJs,
}

impl BackendFramework {
    pub const ALL: [Self; 2] = [Self::FastApi, Self::ExpressJs];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::FastApi => "fastapi",
            Self::ExpressJs => "express",
        }
    }

    /// Human-facing name, as shown in menus and logs.
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::FastApi => "FastAPI",
            Self::ExpressJs => "Express.js",
        }
    }

    /// Runtime the backend runs on, shown next to the menu entry.
    pub const fn runtime(&self) -> &'static str {
        match self {
            Self::FastApi => "Python",
            Self::ExpressJs => "Node.js",
        }
    }
}

impl fmt::Display for BackendFramework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for BackendFramework {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "fastapi" | "fast-api" => Ok(Self::FastApi),
            "2" | "express" | "expressjs" | "express.js" | "express-js" => Ok(Self::ExpressJs),
            _ => Err(DomainError::InvalidSelection {
                field: "backend",
                value: s.trim().to_string(),
                expected: "1 (FastAPI), 2 (Express.js)",
            }),
        }
    }
}

// ── DatabaseKind ─────────────────────────────────────────────────────────────

/// Database flavour wired into the backend's database-setup file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseKind {
    Sql,
    MongoDb,
}

impl DatabaseKind {
    pub const ALL: [Self; 2] = [Self::Sql, Self::MongoDb];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sql => "sql",
            Self::MongoDb => "mongodb",
        }
    }

    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Sql => "SQL",
            Self::MongoDb => "MongoDB",
        }
    }

    /// Connection URL for a database of this kind named `database_name`.
    ///
    /// SQL is backed by a SQLite file next to the backend; MongoDB points at
    /// a local server.
    pub fn connection_url(&self, database_name: &str) -> String {
        match self {
            Self::Sql => format!("sqlite:///./{database_name}.db"),
            Self::MongoDb => format!("mongodb://localhost:27017/{database_name}"),
        }
    }
}

impl fmt::Display for DatabaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for DatabaseKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "sql" | "sqlite" => Ok(Self::Sql),
            "2" | "mongodb" | "mongo" => Ok(Self::MongoDb),
            _ => Err(DomainError::InvalidSelection {
                field: "database",
                value: s.trim().to_string(),
                expected: "1 (SQL), 2 (MongoDB)",
            }),
        }
    }
}

// ── Variant ──────────────────────────────────────────────────────────────────

/// A (backend, database) combination; the catalog's lookup key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Variant {
    pub backend: BackendFramework,
    pub database: DatabaseKind,
}

impl Variant {
    pub const fn new(backend: BackendFramework, database: DatabaseKind) -> Self {
        Self { backend, database }
    }

    /// Every combination, in menu order.
    pub fn all() -> impl Iterator<Item = Variant> {
        BackendFramework::ALL.into_iter().flat_map(|backend| {
            DatabaseKind::ALL
                .into_iter()
                .map(move |database| Variant::new(backend, database))
        })
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} + {}", self.backend, self.database)
    }
}

// ── Component ────────────────────────────────────────────────────────────────

/// Which half of the scaffold a descriptor belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Component {
    Frontend,
    Backend,
}

impl Component {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Frontend => "frontend",
            Self::Backend => "backend",
        }
    }

    /// The audit stream that records this component's actions.
    pub const fn stream(self) -> LogStream {
        match self {
            Self::Frontend => LogStream::Frontend,
            Self::Backend => LogStream::Backend,
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── LogStream / LogLevel ─────────────────────────────────────────────────────

/// One of the three independent audit log destinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogStream {
    Setup,
    Frontend,
    Backend,
}

impl LogStream {
    pub const ALL: [Self; 3] = [Self::Setup, Self::Frontend, Self::Backend];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Setup => "setup",
            Self::Frontend => "frontend",
            Self::Backend => "backend",
        }
    }

    /// File name inside the project's `log/` directory.
    pub const fn file_name(&self) -> &'static str {
        match self {
            Self::Setup => "setup.log",
            Self::Frontend => "frontend.log",
            Self::Backend => "backend.log",
        }
    }

    /// The stream that explains what happened at `path` under `root`.
    ///
    /// Anything outside the frontend and backend subtrees is a setup concern.
    pub fn for_path(root: &Path, path: &Path) -> Self {
        let relative = path.strip_prefix(root).unwrap_or(path);
        match relative.components().next() {
            Some(first) if first.as_os_str() == Component::Frontend.as_str() => Self::Frontend,
            Some(first) if first.as_os_str() == Component::Backend.as_str() => Self::Backend,
            _ => Self::Setup,
        }
    }
}

impl fmt::Display for LogStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity of an audit entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
