//! Configuration commands for managing flowset settings.
//!
//! - `config show`: Display current configuration
//! - `config get`: Print a single value
//! - `config set`: Set a configuration value

use std::env;

use owo_colors::OwoColorize;
use serde_json::json;

use super::CommandOutput;
use crate::cli::OutputOptions;
use crate::config::{API_URL_ENV, Config};
use crate::error::{FlowsetError, Result};

const VALID_KEYS: &str = "api.url, api.timeout, client.id";

/// Validate a config key, suggesting dot notation for underscore keys
fn validate_config_key(key: &str) -> Result<&str> {
    if let Some(pos) = key.find('_') {
        let dot_version = format!("{}.{}", &key[..pos], &key[pos + 1..]);
        return Err(FlowsetError::Config(format!(
            "invalid config key '{key}'. Use dot notation: '{dot_version}'"
        )));
    }
    Ok(key)
}

fn unknown_key(key: &str) -> FlowsetError {
    FlowsetError::Config(format!(
        "unknown config key '{key}'. Valid keys: {VALID_KEYS}"
    ))
}

/// Where the effective API URL comes from
fn api_url_source() -> &'static str {
    match env::var(API_URL_ENV) {
        Ok(url) if !url.is_empty() => "env",
        _ => "config",
    }
}

/// Show current configuration
pub fn cmd_config_show(output: OutputOptions) -> Result<()> {
    let config = Config::load()?;

    let json_output = json!({
        "api": {
            "url": config.api_url(),
            "url_source": api_url_source(),
            "timeout": config.timeout,
        },
        "client": {
            "id": config.client_id,
        },
        "config_file": Config::config_path().to_string_lossy(),
    });

    let mut text_output = String::new();
    text_output.push_str(&format!("{}\n\n", "Configuration:".cyan().bold()));

    text_output.push_str(&format!("{}:\n", "api".cyan()));
    let source = if api_url_source() == "env" {
        format!(" ({API_URL_ENV})").dimmed().to_string()
    } else {
        String::new()
    };
    text_output.push_str(&format!("  url: {}{}\n", config.api_url(), source));
    text_output.push_str(&format!("  timeout: {}s\n", config.timeout));

    text_output.push('\n');
    text_output.push_str(&format!("{}:\n", "client".cyan()));
    match &config.client_id {
        Some(id) => text_output.push_str(&format!("  id: {id}\n")),
        None => text_output.push_str(&format!("  id: {}\n", "not generated yet".dimmed())),
    }

    text_output.push('\n');
    text_output.push_str(&format!(
        "{}",
        format!("Config file: {}", Config::config_path().display()).dimmed()
    ));

    CommandOutput::new(json_output)
        .with_text(text_output)
        .print(output)
}

/// Set a configuration value
pub fn cmd_config_set(key: &str, value: &str, output: OutputOptions) -> Result<()> {
    validate_config_key(key)?;

    let mut config = Config::load()?;

    match key {
        "api.url" => config.set_api_url(value)?,
        "api.timeout" => {
            let seconds = value.parse::<u64>().ok().filter(|s| *s > 0).ok_or_else(|| {
                FlowsetError::Config(format!(
                    "invalid value '{value}' for api.timeout. Expected a positive number of seconds"
                ))
            })?;
            config.timeout = seconds;
        }
        "client.id" => {
            if value.trim().is_empty() {
                return Err(FlowsetError::Config("client.id cannot be empty".to_string()));
            }
            config.client_id = Some(value.to_string());
        }
        _ => return Err(unknown_key(key)),
    }
    config.save()?;

    CommandOutput::new(json!({
        "action": "config_set",
        "key": key,
        "value": value,
        "success": true,
    }))
    .with_text(format!("Set {} to {}", key.cyan(), value))
    .print(output)
}

/// Get a specific configuration value
pub fn cmd_config_get(key: &str, output: OutputOptions) -> Result<()> {
    validate_config_key(key)?;

    let config = Config::load()?;

    let value = match key {
        "api.url" => json!(config.api_url()),
        "api.timeout" => json!(config.timeout),
        "client.id" => match &config.client_id {
            Some(id) => json!(id),
            None => return Err(FlowsetError::Config("client.id not set".to_string())),
        },
        _ => return Err(unknown_key(key)),
    };

    let text = match &value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    };

    CommandOutput::new(json!({
        "key": key,
        "value": value,
    }))
    .with_text(text)
    .print(output)
}
