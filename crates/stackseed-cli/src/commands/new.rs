//! Implementation of the `stackseed new` command.
//!
//! Turns flags, config defaults and prompt answers into a `ProjectConfig`,
//! then hands it to the core scaffold service and reports the outcome.
//!
//! 1. Collect and validate the four answers (re-prompting when possible)
//! 2. Resolve the plan; `--dry-run` stops here
//! 3. Confirm, unless `--yes` or no terminal
//! 4. Scaffold, then point the user at `log/`

#[cfg(feature = "interactive")]
use std::io::IsTerminal as _;
use std::path::Path;

use serde_json::json;
use stackseed_core::{
    application::{ScaffoldReport, ScaffoldService},
    domain::{BackendFramework, LogStream, ProjectConfig},
};
use tracing::{debug, info, instrument};

use super::prompt::{self, Prompter, Provided};
use crate::{
    cli::{ListFormat, NewArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[instrument(skip_all)]
pub fn execute(args: NewArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let provided = Provided {
        project_name: args.name,
        backend: args.backend.or(config.defaults.backend),
        database: args.database.or(config.defaults.database),
        database_name: args.db_name,
    };

    #[cfg(feature = "interactive")]
    let mut terminal = (!args.yes
        && !output.is_json()
        && std::io::stdin().is_terminal()
        && std::io::stderr().is_terminal())
    .then(prompt::TerminalPrompter::new);
    #[cfg(feature = "interactive")]
    let prompter = terminal.as_mut().map(|p| p as &mut dyn Prompter);
    #[cfg(not(feature = "interactive"))]
    let prompter: Option<&mut dyn Prompter> = None;

    let project = prompt::collect(provided, prompter, &output)?;
    let service = super::scaffold_service();
    let plan = service.plan(&project)?;
    let root = ScaffoldService::project_root(&project, &args.output_dir);

    debug!(%project, root = %root.display(), files = plan.file_count(), "Selection resolved");

    if args.dry_run {
        if output.is_json() {
            output.json(&json!({
                "dry_run": true,
                "root": root,
                "config": project,
                "entries": super::list::descriptors_json(&plan),
            }))?;
        } else {
            output.header(&format!("Dry run: would create {}", root.display()))?;
            show_configuration(&project, &output)?;
            super::list::print_plan(&plan, ListFormat::Tree, &output)?;
            output.info("Nothing was written.")?;
        }
        return Ok(());
    }

    #[cfg(feature = "interactive")]
    let confirmed = match terminal.as_mut() {
        Some(terminal) => {
            show_configuration(&project, &output)?;
            terminal.confirm(&format!("Create {}?", root.display()))?
        }
        None => true,
    };
    #[cfg(not(feature = "interactive"))]
    let confirmed = true;
    if !confirmed {
        return Err(CliError::Cancelled);
    }

    output.header(&format!("Creating '{}'...", project.name()))?;
    info!(project = %project.name(), root = %root.display(), "Scaffold started");

    let report = service
        .scaffold(&project, &args.output_dir)
        .map_err(|source| CliError::Scaffold {
            root: root.clone(),
            source,
        })?;

    report_success(&report, &project, &output)
}

fn show_configuration(project: &ProjectConfig, output: &OutputManager) -> CliResult<()> {
    output.print(&format!("  Project:   {}", project.name()))?;
    output.print(&format!(
        "  Backend:   {} ({})",
        project.backend(),
        project.backend().runtime()
    ))?;
    output.print(&format!("  Database:  {}", project.database()))?;
    output.print(&format!("  DB name:   {}", project.database_name()))?;
    output.print("")?;
    Ok(())
}

fn report_success(
    report: &ScaffoldReport,
    project: &ProjectConfig,
    output: &OutputManager,
) -> CliResult<()> {
    if output.is_json() {
        output.json(report)?;
        return Ok(());
    }

    output.success(&format!(
        "Project '{}' created at {} ({} paths)",
        project.name(),
        report.root.display(),
        report.result.created_count()
    ))?;
    output.info(&format!(
        "Setup log written to {}",
        log_files(&report.log_dir())
    ))?;

    output.print("")?;
    output.print("Next steps:")?;
    for step in next_steps(project) {
        output.print(&format!("  {step}"))?;
    }
    Ok(())
}

fn log_files(log_dir: &Path) -> String {
    let names: Vec<&str> = LogStream::ALL.iter().map(LogStream::file_name).collect();
    format!("{} ({})", log_dir.display(), names.join(", "))
}

fn next_steps(project: &ProjectConfig) -> Vec<String> {
    let name = project.name();
    let backend = match project.backend() {
        BackendFramework::FastApi => {
            "pip install -r requirements.txt && uvicorn app.main:app --reload"
        }
        BackendFramework::ExpressJs => "npm install && node app.js",
    };
    vec![
        format!("cd {name}/frontend && npm install && npm run dev"),
        format!("cd {name}/backend && {backend}"),
    ]
}
