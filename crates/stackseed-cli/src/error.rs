//! CLI error type: user-facing messages, suggestions and exit codes.

use std::error::Error as _;
use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;
use thiserror::Error;

use stackseed_core::{
    application::{ApplicationError, LOG_DIR},
    domain::LogStream,
    error::{ErrorCategory as CoreCategory, StackseedError},
};

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// A required answer is missing and prompting is not possible.
    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A scaffold run failed after selection succeeded.
    ///
    /// `root` is kept so the message can point at the right audit log.
    #[error("Scaffolding failed: {source}")]
    Scaffold {
        root: PathBuf,
        #[source]
        source: StackseedError,
    },

    /// Any other error from `stackseed-core`.
    #[error(transparent)]
    Core(#[from] StackseedError),

    /// `stackseed check` found problems in the built-in templates.
    #[error("Template catalog self-check found {count} defect(s)")]
    CatalogDefects { count: usize },

    #[error("Unknown configuration key '{key}'")]
    UnknownConfigKey { key: String },

    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Operation cancelled")]
    Cancelled,
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

impl CliError {
    /// The audit log stream that explains this failure, if one was written.
    ///
    /// Nothing is written when the root was never claimed.
    pub fn log_stream(&self) -> Option<(PathBuf, LogStream)> {
        let Self::Scaffold { root, source } = self else {
            return None;
        };
        let stream = match source {
            StackseedError::Domain(_)
            | StackseedError::Application(ApplicationError::RootAlreadyExists { .. }) => {
                return None;
            }
            StackseedError::Application(ApplicationError::TemplateRenderDefect { path, .. }) => {
                LogStream::for_path(Path::new(""), Path::new(path))
            }
            other => other
                .path()
                .map_or(LogStream::Setup, |path| LogStream::for_path(root, path)),
        };
        Some((root.join(LOG_DIR).join(stream.file_name()), stream))
    }

    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidInput { message, .. } => vec![
                format!("Check your input: {message}"),
                "Pass every value as a flag when running without a terminal".into(),
                "Use --help for usage information".into(),
            ],
            Self::Scaffold { source, .. } | Self::Core(source) => {
                let mut suggestions = source.suggestions();
                if let Some((log, stream)) = self.log_stream() {
                    suggestions.push(format!("See the {stream} log: {}", log.display()));
                }
                suggestions
            }
            Self::CatalogDefects { .. } => vec![
                "The built-in templates are inconsistent".into(),
                "Please report this issue with the output above".into(),
            ],
            Self::UnknownConfigKey { .. } => vec![
                "Known keys: defaults.backend, defaults.database, output.no_color, output.format"
                    .into(),
                "List every value: stackseed config list".into(),
            ],
            Self::ConfigError { message, .. } => vec![
                format!("Configuration issue: {message}"),
                format!(
                    "Check your config file at {}",
                    crate::config::AppConfig::config_path().display()
                ),
                "Create a default one with: stackseed init".into(),
            ],
            Self::IoError { message, .. } => vec![
                format!("I/O operation failed: {message}"),
                "Check file permissions and available disk space".into(),
            ],
            Self::Cancelled => vec!["No changes were made".into()],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput { .. } | Self::Cancelled => ErrorCategory::UserError,
            Self::Scaffold { source, .. } | Self::Core(source) => match source.category() {
                CoreCategory::Validation | CoreCategory::Conflict => ErrorCategory::UserError,
                CoreCategory::Internal => ErrorCategory::Internal,
            },
            Self::UnknownConfigKey { .. } => ErrorCategory::NotFound,
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::CatalogDefects { .. } | Self::IoError { .. } => ErrorCategory::Internal,
        }
    }

    /// Exit code to pass to the OS.
    ///
    /// | Category      | Code |
    /// |---------------|------|
    /// | User error    |  2   |
    /// | Not found     |  3   |
    /// | Configuration |  4   |
    /// | Internal      |  1   |
    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::UserError => 2,
            ErrorCategory::NotFound => 3,
            ErrorCategory::Configuration => 4,
            ErrorCategory::Internal => 1,
        }
    }

    pub fn format_colored(&self, verbose: bool) -> String {
        let mut output = format!(
            "\n{} {}\n\n  {}\n",
            "\u{2717}".red().bold(),
            "Error:".red().bold(),
            self.to_string().red()
        );

        if verbose {
            let mut source = self.source();
            while let Some(err) = source {
                output.push_str(&format!(
                    "\n  {} {}\n",
                    "\u{2192}".dimmed(),
                    err.to_string().dimmed()
                ));
                source = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            output.push_str(&format!("\n{}\n", "Suggestions:".yellow().bold()));
            for suggestion in suggestions {
                output.push_str(&format!("  {suggestion}\n"));
            }
        }

        if !verbose {
            output.push_str(&format!(
                "\n{} {}\n",
                "\u{2139}".blue(),
                "Use -v / --verbose for more details.".dimmed(),
            ));
        }

        output
    }

    /// [`Self::format_colored`] without ANSI codes.
    pub fn format_plain(&self, verbose: bool) -> String {
        let mut out = format!("\nError: {self}\n");

        if verbose {
            let mut source = self.source();
            while let Some(err) = source {
                out.push_str(&format!("  Caused by: {err}\n"));
                source = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            out.push_str("\nSuggestions:\n");
            for s in &suggestions {
                out.push_str(&format!("  {s}\n"));
            }
        }

        if !verbose {
            out.push_str("\nUse -v / --verbose for more details.\n");
        }

        out
    }

    pub fn log(&self) {
        match self.category() {
            ErrorCategory::UserError => tracing::warn!("User error: {self}"),
            ErrorCategory::NotFound => tracing::warn!("Not found: {self}"),
            ErrorCategory::Configuration => tracing::error!("Configuration error: {self}"),
            ErrorCategory::Internal => tracing::error!("Internal error: {self}"),
        }

        if let Some(source) = self.source() {
            tracing::debug!("Caused by: {source}");
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    UserError,
    NotFound,
    Configuration,
    Internal,
}

/// Attach a context message while converting a foreign error.
pub trait IntoCli<T> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> IntoCli<T> for Result<T, std::io::Error> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| CliError::IoError {
            message: f().into(),
            source: e,
        })
    }
}

impl<T> IntoCli<T> for anyhow::Result<T> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| CliError::ConfigError {
            message: format!("{}: {e:#}", f().into()),
            source: Some(e.into()),
        })
    }
}
