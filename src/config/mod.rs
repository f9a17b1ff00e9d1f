//! Configuration management for the console
//!
//! This module handles loading, validation, and management of the console configuration.

pub mod loader;
pub mod models;
pub mod validation;

pub use loader::{
    CliOverrides, expand_env_vars, load_config_with_lookup, load_config_with_precedence,
};
pub use models::*;
pub use validation::Validate;

use crate::utils::error::{IngestError, Result};
use std::path::Path;
use tracing::{debug, info};

/// Main configuration struct for the console
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Console configuration
    pub console: ConsoleConfig,
}

impl Config {
    /// Load configuration from file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let console = loader::read_config_file(path).await?;
        let config = Self { console };

        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let console = ConsoleConfig::from_env()?;
        let config = Self { console };

        config.validate()?;
        Ok(config)
    }

    /// Get service configuration
    pub fn service(&self) -> &ServiceConfig {
        &self.console.service
    }

    /// Get polling configuration
    pub fn polling(&self) -> &PollingConfig {
        &self.console.polling
    }

    /// Get logging configuration
    pub fn logging(&self) -> &LoggingConfig {
        &self.console.logging
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.console
            .service
            .validate()
            .map_err(|e| IngestError::Config(format!("Service config error: {}", e)))?;

        self.console
            .polling
            .validate()
            .map_err(|e| IngestError::Config(format!("Polling config error: {}", e)))?;

        self.console
            .logging
            .validate()
            .map_err(|e| IngestError::Config(format!("Logging config error: {}", e)))?;

        debug!("Configuration validation completed");
        Ok(())
    }

    /// Merge with another configuration (other takes precedence)
    pub fn merge(mut self, other: Self) -> Self {
        self.console = self.console.merge(other.console);
        self
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(&self.console)
            .map_err(|e| IngestError::Config(format!("Failed to serialize config to YAML: {}", e)))
    }
}
