//! `stackseed check` - self-check of the built-in templates.

use serde_json::json;
use stackseed_core::domain::Variant;
use tracing::instrument;

use crate::{
    error::{CliError, CliResult},
    output::OutputManager,
};

#[instrument(skip_all)]
pub fn execute(output: OutputManager) -> CliResult<()> {
    let service = super::scaffold_service();
    let catalog = service.catalog();
    let defects = catalog.self_check();
    let variants = Variant::all().count();

    if output.is_json() {
        output.json(&json!({
            "variants": variants,
            "defects": defects,
        }))?;
    } else if defects.is_empty() {
        output.success(&format!(
            "Template catalog is consistent across all {variants} combinations"
        ))?;
    } else {
        for defect in &defects {
            output.warning(&defect.to_string())?;
        }
    }

    if defects.is_empty() {
        Ok(())
    } else {
        Err(CliError::CatalogDefects {
            count: defects.len(),
        })
    }
}
