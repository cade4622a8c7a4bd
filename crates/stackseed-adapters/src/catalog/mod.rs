//! Template catalogs.

mod builtin;

pub use builtin::BuiltinCatalog;
