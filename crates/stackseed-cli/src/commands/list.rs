//! `stackseed list` - show what each backend/database combination generates.

use serde_json::{Value, json};
use stackseed_core::{
    domain::{BackendFramework, CatalogResolution, DatabaseKind, TemplateDescriptor, Variant},
    error::StackseedError,
};

use crate::{
    cli::{ListArgs, ListFormat},
    error::CliResult,
    output::OutputManager,
};

pub fn execute(args: ListArgs, output: OutputManager) -> CliResult<()> {
    let backend = parse_filter::<BackendFramework>(args.backend.as_deref())?;
    let database = parse_filter::<DatabaseKind>(args.database.as_deref())?;

    let service = super::scaffold_service();
    let catalog = service.catalog();
    let plans: Vec<(Variant, CatalogResolution)> = Variant::all()
        .filter(|v| backend.is_none_or(|b| v.backend == b))
        .filter(|v| database.is_none_or(|d| v.database == d))
        .map(|v| (v, catalog.describe(v)))
        .collect();

    if args.format == ListFormat::Json || output.is_json() {
        let document: Vec<Value> = plans
            .iter()
            .map(|(variant, plan)| variant_json(*variant, plan))
            .collect();
        output.json(&document)?;
        return Ok(());
    }

    for (variant, plan) in &plans {
        output.header(&format!(
            "{variant} ({} files, {} entries)",
            plan.file_count(),
            plan.frontend.len() + plan.backend.len()
        ))?;
        print_plan(plan, args.format, &output)?;
        output.print("")?;
    }
    Ok(())
}

/// Print a plan as a tree or as a flat path list.
pub(crate) fn print_plan(
    plan: &CatalogResolution,
    format: ListFormat,
    output: &OutputManager,
) -> CliResult<()> {
    for descriptor in plan.sets().into_iter().flat_map(|set| set.iter()) {
        let line = match format {
            ListFormat::Paths => descriptor.to_string(),
            ListFormat::Tree | ListFormat::Json => tree_line(descriptor, output),
        };
        output.print(&line)?;
    }
    Ok(())
}

pub(crate) fn descriptors_json(plan: &CatalogResolution) -> Vec<Value> {
    plan.sets()
        .into_iter()
        .flat_map(|set| set.iter())
        .map(|d| json!({ "path": d.path.as_str(), "kind": d.kind.label() }))
        .collect()
}

fn variant_json(variant: Variant, plan: &CatalogResolution) -> Value {
    json!({
        "backend": variant.backend,
        "database": variant.database,
        "entries": descriptors_json(plan),
    })
}

fn tree_line(descriptor: &TemplateDescriptor, output: &OutputManager) -> String {
    let path = descriptor.path.as_str();
    let depth = path.matches('/').count();
    let name = path.rsplit('/').next().unwrap_or(path);
    let indent = "  ".repeat(depth + 1);
    if descriptor.is_directory() {
        format!("{indent}{name}/")
    } else {
        format!("{indent}{name} {}", output.dim(&format!("[{}]", descriptor.kind.label())))
    }
}

fn parse_filter<T>(raw: Option<&str>) -> CliResult<Option<T>>
where
    T: std::str::FromStr<Err = stackseed_core::domain::DomainError>,
{
    raw.map(str::parse::<T>)
        .transpose()
        .map_err(|e| StackseedError::from(e).into())
}
