//! Command handlers, one module per subcommand.

pub mod check;
pub mod completions;
pub mod config;
pub mod init;
pub mod list;
pub mod new;
pub mod prompt;

use stackseed_adapters::{BuiltinCatalog, LocalFilesystem, SimpleRenderer};
use stackseed_core::application::ScaffoldService;

/// The service wired to the built-in catalog and the real filesystem.
pub(crate) fn scaffold_service() -> ScaffoldService {
    ScaffoldService::new(
        Box::new(BuiltinCatalog::new()),
        Box::new(SimpleRenderer::new()),
        Box::new(LocalFilesystem::new()),
    )
}
