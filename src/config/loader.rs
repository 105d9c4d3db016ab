//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::config::schema::PhonebookConfig;
use crate::config::validation::{validate_config, ConfigValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {var}: {value}")]
    Env { var: &'static str, value: String },

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ConfigValidationError>),
}

fn join(errors: &[ConfigValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse configuration from a TOML file without validating it.
pub fn read_config(path: &Path) -> Result<PhonebookConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Apply environment overrides using the given lookup.
///
/// Recognized variables:
/// - `PORT`: listener port
/// - `MONGODB_URI`: MongoDB connection string
pub fn apply_env_overrides<F>(config: &mut PhonebookConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(port) = lookup("PORT") {
        config.listener.port = port.trim().parse().map_err(|_| ConfigError::Env {
            var: "PORT",
            value: port.clone(),
        })?;
    }
    if let Some(url) = lookup("MONGODB_URI") {
        if !url.is_empty() {
            config.storage.database_url = url;
        }
    }
    Ok(())
}

/// Load configuration: file (optional) → process environment → `overrides` → validation.
///
/// `overrides` runs last so command-line flags win over both file and environment.
pub fn load_config<F>(path: Option<&Path>, overrides: F) -> Result<PhonebookConfig, ConfigError>
where
    F: FnOnce(&mut PhonebookConfig),
{
    let mut config = match path {
        Some(path) => read_config(path)?,
        None => PhonebookConfig::default(),
    };

    apply_env_overrides(&mut config, |var| std::env::var(var).ok())?;
    overrides(&mut config);
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}
