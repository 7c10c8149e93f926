mod schema;

pub use schema::{Config, SourceConfig};

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::scoring::validate_conversion;

/// Get the config directory path (~/.config/tadoku-stats/)
pub fn get_config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("tadoku-stats"))
}

/// Get the default config file path (~/.config/tadoku-stats/config.yaml)
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.yaml"))
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses the default path
///   (~/.config/tadoku-stats/config.yaml), falling back to built-in defaults
///   when that file does not exist.
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found at {}", path.display());
            }
            path
        }
        None => {
            let default_path = get_config_path()?;
            if !default_path.exists() {
                tracing::debug!(
                    "no config at {}, using built-in defaults",
                    default_path.display()
                );
                return Ok(Config::default());
            }
            default_path
        }
    };

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content).with_context(|| {
        format!("Failed to parse config: invalid YAML in {}", config_path.display())
    })?;

    tracing::debug!("loaded config from {}", config_path.display());
    Ok(config)
}

/// Parse the source request timeout
pub fn request_timeout(source: &SourceConfig) -> Result<Duration> {
    humantime::parse_duration(source.timeout.trim())
        .with_context(|| format!("Invalid timeout '{}'", source.timeout))
}

/// Validate the whole configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(ref table) = config.conversion {
        if let Err(conversion_errors) = validate_conversion(table) {
            errors.extend(conversion_errors);
        }
    }

    let source = &config.source;
    if source.base_url.trim().is_empty() {
        errors.push("source.base_url: must not be empty".to_string());
    }
    if source.languages.is_empty() {
        errors.push("source.languages: at least one language is required".to_string());
    }
    for (i, language) in source.languages.iter().enumerate() {
        if language.trim().is_empty() {
            errors.push(format!("source.languages[{}]: must not be empty", i));
        }
    }
    if let Err(e) = request_timeout(source) {
        errors.push(format!("source.timeout: {:#}", e));
    }
    if source.concurrency == 0 {
        errors.push("source.concurrency: must be at least 1".to_string());
    }
    for (medium, unit) in &source.units {
        if unit.is_blank() {
            errors.push(format!("source.units.{}: unit must not be empty", medium));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
