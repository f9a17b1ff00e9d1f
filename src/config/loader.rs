//! Configuration loading utilities
//!
//! This module provides utilities for loading configuration from the YAML file,
//! the environment, and command-line flags.

use super::Config;
use super::models::*;
use crate::utils::error::{IngestError, Result};
use std::env;
use std::path::Path;
use tracing::debug;

/// Values given on the command line; they win over file and environment
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub base_url: Option<String>,
    pub log_level: Option<String>,
    pub log_format: Option<LogFormat>,
}

impl ConsoleConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key lookup, starting from defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        config.apply_lookup(lookup)?;
        Ok(config)
    }

    /// Overwrite exactly the keys the lookup provides
    pub fn apply_lookup<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        debug!("Loading configuration from environment variables");

        if let Some(base_url) = lookup("INGEST_BASE_URL") {
            self.service.base_url = base_url;
        }
        if let Some(timeout) = lookup("INGEST_TIMEOUT") {
            self.service.timeout = parse_number("INGEST_TIMEOUT", &timeout)?;
        }
        if let Some(delay) = lookup("INGEST_POLL_FIRST_DELAY_MS") {
            self.polling.first_delay_ms = parse_number("INGEST_POLL_FIRST_DELAY_MS", &delay)?;
        }
        if let Some(interval) = lookup("INGEST_POLL_INTERVAL_MS") {
            self.polling.interval_ms = parse_number("INGEST_POLL_INTERVAL_MS", &interval)?;
        }
        if let Some(interval) = lookup("INGEST_CSVGEN_INTERVAL_MS") {
            self.polling.csvgen_interval_ms =
                parse_number("INGEST_CSVGEN_INTERVAL_MS", &interval)?;
        }
        if let Some(level) = lookup("INGEST_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("INGEST_LOG_FORMAT") {
            self.logging.format = format.parse().map_err(IngestError::Config)?;
        }

        Ok(())
    }
}

fn parse_number(key: &str, value: &str) -> Result<u64> {
    value
        .trim()
        .parse()
        .map_err(|e| IngestError::Config(format!("Invalid {}: {}", key, e)))
}

/// Read and parse a YAML configuration file, expanding `${VAR}` references
pub async fn read_config_file(path: &Path) -> Result<ConsoleConfig> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| IngestError::Config(format!("Failed to read config file: {}", e)))?;

    let expanded = expand_env_vars(&content);
    serde_yaml::from_str(&expanded)
        .map_err(|e| IngestError::Config(format!("Failed to parse config: {}", e)))
}

/// Merge configuration from multiple sources
pub fn merge_configs(base: ConsoleConfig, overrides: Vec<ConsoleConfig>) -> ConsoleConfig {
    overrides.into_iter().fold(base, |acc, config| acc.merge(config))
}

/// Load configuration with precedence: defaults -> file -> env -> cli args
pub async fn load_config_with_precedence(
    config_file: Option<&Path>,
    env_override: bool,
    cli: &CliOverrides,
) -> Result<Config> {
    let lookup = |key: &str| env_override.then(|| env::var(key).ok()).flatten();
    load_config_with_lookup(config_file, lookup, cli).await
}

/// Same as [`load_config_with_precedence`], reading the environment layer from `lookup`
pub async fn load_config_with_lookup<F>(
    config_file: Option<&Path>,
    lookup: F,
    cli: &CliOverrides,
) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let mut console = ConsoleConfig::default();

    // 1. Load from file if provided; a named file that cannot be read is an error
    if let Some(file_path) = config_file {
        let file_config = read_config_file(file_path).await?;
        console = merge_configs(console, vec![file_config]);
        debug!("Loaded configuration from file: {:?}", file_path);
    }

    // 2. Environment keys that are set replace file values, even when equal to a default
    console.apply_lookup(lookup)?;

    // 3. Command-line flags
    if let Some(base_url) = &cli.base_url {
        console.service.base_url = base_url.clone();
    }
    if let Some(level) = &cli.log_level {
        console.logging.level = level.clone();
    }
    if let Some(format) = cli.log_format {
        console.logging.format = format;
    }

    let config = Config { console };
    config.validate()?;
    Ok(config)
}

/// Expand `${VAR_NAME}` references using the process environment
pub fn expand_env_vars(input: &str) -> String {
    expand_vars_with(input, |key| env::var(key).ok())
}

/// Expand `${VAR_NAME}` references; unknown variables are left untouched
pub fn expand_vars_with<F>(input: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut result = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find("${") {
        result.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find('}') {
            Some(end) => {
                let name = &after[..end];
                match lookup(name) {
                    Some(value) => result.push_str(&value),
                    None => {
                        result.push_str("${");
                        result.push_str(name);
                        result.push('}');
                    }
                }
                rest = &after[end + 1..];
            }
            None => {
                result.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    result.push_str(rest);

    result
}
