//! `stackseed config` - inspect configuration values.

use crate::{
    cli::ConfigCommands,
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

pub fn execute(cmd: ConfigCommands, config: AppConfig, output: OutputManager) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = config_value(&config, &key)?;
            if output.is_json() {
                output.json(&serde_json::json!({ "key": key, "value": value }))?;
            } else {
                output.print(&format!("{key} = {value}"))?;
            }
        }
        ConfigCommands::List => {
            if output.is_json() {
                output.json(&config)?;
            } else {
                output.header("Current configuration:")?;
                let text = config.to_toml().with_cli_context(|| "Listing configuration")?;
                output.print(text.trim_end())?;
            }
        }
        ConfigCommands::Path => {
            output.print(&AppConfig::config_path().display().to_string())?;
        }
    }

    Ok(())
}

/// Unset optional values print as an empty string.
fn config_value(config: &AppConfig, key: &str) -> CliResult<String> {
    match key {
        "defaults.backend" => Ok(config.defaults.backend.clone().unwrap_or_default()),
        "defaults.database" => Ok(config.defaults.database.clone().unwrap_or_default()),
        "output.no_color" => Ok(config.output.no_color.to_string()),
        "output.format" => Ok(config.output.format.clone()),
        _ => Err(CliError::UnknownConfigKey { key: key.into() }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_keys_resolve() {
        let mut cfg = AppConfig::default();
        cfg.defaults.backend = Some("express".into());
        assert_eq!(config_value(&cfg, "defaults.backend").unwrap(), "express");
        assert_eq!(config_value(&cfg, "defaults.database").unwrap(), "");
        assert_eq!(config_value(&cfg, "output.no_color").unwrap(), "false");
        assert_eq!(config_value(&cfg, "output.format").unwrap(), "auto");
    }

    #[test]
    fn unknown_key_is_not_found() {
        let err = config_value(&AppConfig::default(), "defaults.lang").unwrap_err();
        assert!(matches!(err, CliError::UnknownConfigKey { .. }));
        assert_eq!(err.exit_code(), 3);
    }
}
