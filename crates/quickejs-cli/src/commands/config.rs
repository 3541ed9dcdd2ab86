//! `quick-ejs config`: inspect the effective defaults.
//!
//! Values shown are after layering (built-ins, file, `QUICK_EJS_*`), so
//! `config get` answers "what would `new --yes` use right now".

use std::path::Path;

use serde_json::Value;

use crate::{
    cli::{ConfigCommands, OutputFormat},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

pub fn execute(
    cmd: ConfigCommands,
    config: AppConfig,
    config_file: Option<&Path>,
    output: OutputManager,
) -> CliResult<()> {
    let json = output.format() == OutputFormat::Json;
    match cmd {
        ConfigCommands::Get { key } => {
            let value = lookup(&config, &key)?;
            if json {
                output.json(&value)?;
            } else {
                output.print(&scalar(&value))?;
            }
        }
        ConfigCommands::List if json => output.json(&config)?,
        ConfigCommands::List => {
            let text = toml::to_string_pretty(&config).map_err(|e| CliError::ConfigError {
                message: format!("Failed to serialise config: {e}"),
                source: Some(Box::new(e)),
            })?;
            output.print(text.trim_end())?;
        }
        ConfigCommands::Path => {
            let path = config_file.map_or_else(AppConfig::config_path, Path::to_path_buf);
            output.print(&path.display().to_string())?;
        }
    }
    Ok(())
}

/// Dotted-key lookup (`defaults.package_manager`) into the serialised config.
/// Only leaf values are addressable.
fn lookup(config: &AppConfig, key: &str) -> CliResult<Value> {
    let unknown = || CliError::ConfigError {
        message: format!("Unknown config key: '{key}'"),
        source: None,
    };

    let mut value = serde_json::to_value(config).map_err(|e| CliError::ConfigError {
        message: format!("Failed to serialise config: {e}"),
        source: Some(Box::new(e)),
    })?;
    for segment in key.split('.') {
        value = match value {
            Value::Object(mut map) => map.remove(segment).ok_or_else(unknown)?,
            _ => return Err(unknown()),
        };
    }
    if value.is_object() {
        return Err(unknown());
    }
    Ok(value)
}

/// Strings print bare, everything else as JSON.
fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
