//! Collecting the four answers for `stackseed new`.
//!
//! A value can come from a flag, a config default, or a prompt. Every value
//! passes the same check before it is accepted; a rejected flag or answer is
//! asked again when a [`Prompter`] is available and is an error otherwise.

use stackseed_core::{
    domain::{
        BackendFramework, DatabaseKind, DomainError, ProjectConfig, SelectionResolver,
        validate_name,
    },
    error::StackseedError,
};
use tracing::debug;

use crate::error::{CliError, CliResult};
use crate::output::OutputManager;

/// One of the answers `stackseed new` needs, in prompt order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    ProjectName,
    Backend,
    Database,
    DatabaseName,
}

impl Field {
    pub const fn flag(&self) -> &'static str {
        match self {
            Self::ProjectName => "NAME",
            Self::Backend => "--backend",
            Self::Database => "--database",
            Self::DatabaseName => "--db-name",
        }
    }

    pub const fn question(&self) -> &'static str {
        match self {
            Self::ProjectName => "Enter the project name",
            Self::Backend => "Choose your backend framework",
            Self::Database => "Choose your database",
            Self::DatabaseName => "Enter the database name",
        }
    }

    /// Menu entries for choice fields; their 1-based position is the answer.
    pub fn choices(&self) -> Vec<String> {
        match self {
            Self::Backend => BackendFramework::ALL
                .iter()
                .map(|b| format!("{} ({})", b.display_name(), b.runtime()))
                .collect(),
            Self::Database => DatabaseKind::ALL
                .iter()
                .map(|d| d.display_name().to_string())
                .collect(),
            Self::ProjectName | Self::DatabaseName => Vec::new(),
        }
    }

    pub fn check(&self, raw: &str) -> Result<(), DomainError> {
        match self {
            Self::ProjectName => validate_name("project name", raw).map(drop),
            Self::Backend => raw.parse::<BackendFramework>().map(drop),
            Self::Database => raw.parse::<DatabaseKind>().map(drop),
            Self::DatabaseName => validate_name("database name", raw).map(drop),
        }
    }
}

/// Source of answers when a value is missing or rejected.
pub trait Prompter {
    fn ask(&mut self, field: Field) -> CliResult<String>;
}

/// Values known before prompting, by field.
#[derive(Debug, Clone, Default)]
pub struct Provided {
    pub project_name: Option<String>,
    pub backend: Option<String>,
    pub database: Option<String>,
    pub database_name: Option<String>,
}

impl Provided {
    fn take(&mut self, field: Field) -> Option<String> {
        match field {
            Field::ProjectName => self.project_name.take(),
            Field::Backend => self.backend.take(),
            Field::Database => self.database.take(),
            Field::DatabaseName => self.database_name.take(),
        }
    }
}

/// Resolve every field in prompt order, then build the config.
pub fn collect(
    mut provided: Provided,
    mut prompter: Option<&mut dyn Prompter>,
    output: &OutputManager,
) -> CliResult<ProjectConfig> {
    let mut answer = |field: Field| -> CliResult<String> {
        let accepted = match provided.take(field) {
            Some(raw) => match field.check(&raw) {
                Ok(()) => Some(raw),
                Err(e) if prompter.is_some() => {
                    output.warning(&e.to_string())?;
                    None
                }
                Err(e) => return Err(StackseedError::from(e).into()),
            },
            None => None,
        };

        match (accepted, prompter.as_mut()) {
            (Some(value), _) => Ok(value),
            (None, Some(prompter)) => ask_until_valid(field, &mut **prompter, output),
            (None, None) => Err(CliError::InvalidInput {
                message: format!("missing {} and no terminal to ask on", field.flag()),
                source: None,
            }),
        }
    };

    let name = answer(Field::ProjectName)?;
    let backend = answer(Field::Backend)?;
    let database = answer(Field::Database)?;
    let database_name = answer(Field::DatabaseName)?;

    SelectionResolver::resolve(&backend, &database, &name, &database_name)
        .map_err(|e| StackseedError::from(e).into())
}

fn ask_until_valid(
    field: Field,
    prompter: &mut dyn Prompter,
    output: &OutputManager,
) -> CliResult<String> {
    loop {
        let raw = prompter.ask(field)?;
        match field.check(&raw) {
            Ok(()) => return Ok(raw),
            Err(e) => {
                debug!(?field, "Answer rejected: {e}");
                output.warning(&e.to_string())?;
            }
        }
    }
}

/// Terminal prompts through `dialoguer`.
#[cfg(feature = "interactive")]
pub struct TerminalPrompter {
    theme: dialoguer::theme::ColorfulTheme,
}

#[cfg(feature = "interactive")]
impl TerminalPrompter {
    pub fn new() -> Self {
        Self {
            theme: dialoguer::theme::ColorfulTheme::default(),
        }
    }

    /// Yes/no question; Esc counts as no.
    pub fn confirm(&mut self, question: &str) -> CliResult<bool> {
        dialoguer::Confirm::with_theme(&self.theme)
            .with_prompt(question)
            .default(true)
            .interact_opt()
            .map(|answer| answer.unwrap_or(false))
            .map_err(|e| CliError::IoError {
                message: "Failed to read confirmation".into(),
                source: std::io::Error::other(e),
            })
    }
}

#[cfg(feature = "interactive")]
impl Prompter for TerminalPrompter {
    fn ask(&mut self, field: Field) -> CliResult<String> {
        let choices = field.choices();
        let answer = if choices.is_empty() {
            dialoguer::Input::<String>::with_theme(&self.theme)
                .with_prompt(field.question())
                .allow_empty(true)
                .interact_text()
                .map(|s| Some(s.trim().to_string()))
        } else {
            dialoguer::Select::with_theme(&self.theme)
                .with_prompt(field.question())
                .items(&choices)
                .default(0)
                .interact_opt()
                .map(|choice| choice.map(|i| (i + 1).to_string()))
        };

        match answer {
            Ok(Some(value)) => Ok(value),
            Ok(None) => Err(CliError::Cancelled),
            Err(e) => Err(CliError::IoError {
                message: format!("Failed to read the {} answer", field.flag()),
                source: std::io::Error::other(e),
            }),
        }
    }
}
