//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value. The core
//! crate never sees it: defaults only pre-fill answers that then go through
//! the same validation as flags and prompts.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (applied at the call-site, not here)
//! 2. `STACKSEED_*` environment variables, `__` between nested keys
//!    (`STACKSEED_DEFAULTS__BACKEND=express`)
//! 3. The config file (`--config FILE`, or [`AppConfig::config_path`])
//! 4. Built-in defaults

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::cli::OutputFormat;

pub const ENV_PREFIX: &str = "STACKSEED";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Pre-filled answers for `stackseed new`.
    pub defaults: Defaults,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    /// `fastapi`, `express`, `1` or `2`.
    pub backend: Option<String>,
    /// `sql`, `mongodb`, `1` or `2`.
    pub database: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    /// `auto`, `human`, `plain` or `json`; used when `--output-format` is `auto`.
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "auto".into(),
        }
    }
}

impl AppConfig {
    /// Load configuration from file and environment over the built-in defaults.
    ///
    /// An explicit `config_file` must exist; the default location is optional.
    pub fn load(config_file: Option<&Path>) -> anyhow::Result<Self> {
        let file = match config_file {
            Some(path) => File::from(path).required(true),
            None => File::from(Self::config_path()).required(false),
        };

        Config::builder()
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration values")
    }

    /// Default config file location, falling back to `.stackseed.toml` in the
    /// current directory when no home directory is known.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "stackseed", "stackseed")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".stackseed.toml"))
    }

    /// `output.format` as an [`OutputFormat`], if it names one.
    pub fn output_format(&self) -> Option<OutputFormat> {
        OutputFormat::from_config(&self.output.format)
    }

    pub fn to_toml(&self) -> anyhow::Result<String> {
        toml::to_string_pretty(self).context("Failed to serialise configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn defaults_leave_answers_open() {
        let cfg = AppConfig::default();
        assert!(cfg.defaults.backend.is_none());
        assert!(cfg.defaults.database.is_none());
        assert_eq!(cfg.output_format(), Some(OutputFormat::Auto));
    }

    #[test]
    fn explicit_file_is_loaded() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("stackseed.toml");
        fs::write(
            &path,
            "[defaults]\nbackend = \"express\"\n\n[output]\nformat = \"plain\"\n",
        )
        .unwrap();

        let cfg = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(cfg.defaults.backend.as_deref(), Some("express"));
        assert!(cfg.defaults.database.is_none());
        assert_eq!(cfg.output_format(), Some(OutputFormat::Plain));
        assert!(!cfg.output.no_color);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(AppConfig::load(Some(&dir.path().join("absent.toml"))).is_err());
    }

    #[test]
    fn toml_output_reloads_to_the_same_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let mut cfg = AppConfig::default();
        cfg.defaults.database = Some("mongodb".into());
        fs::write(&path, cfg.to_toml().unwrap()).unwrap();

        assert_eq!(AppConfig::load(Some(&path)).unwrap(), cfg);
    }

    #[test]
    fn config_path_is_a_toml_file() {
        assert_eq!(
            AppConfig::config_path().extension().and_then(|e| e.to_str()),
            Some("toml")
        );
    }
}
