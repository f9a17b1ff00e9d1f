//! Console configuration validators

use super::trait_def::Validate;
use super::url_validators::validate_base_url;
use crate::config::models::*;
use tracing::debug;

impl Validate for ConsoleConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating console configuration");

        self.service.validate()?;
        self.polling.validate()?;
        self.logging.validate()?;

        Ok(())
    }
}

impl Validate for ServiceConfig {
    fn validate(&self) -> Result<(), String> {
        validate_base_url(&self.base_url, "Service base_url").map_err(|e| e.to_string())?;

        if self.timeout == 0 {
            return Err("Service timeout must be greater than 0".to_string());
        }

        self.endpoints.validate()
    }
}

impl Validate for EndpointsConfig {
    fn validate(&self) -> Result<(), String> {
        for (name, path) in self.named_paths() {
            if path.is_empty() {
                return Err(format!("Endpoint '{}' cannot be empty", name));
            }
            if !path.starts_with('/') {
                return Err(format!("Endpoint '{}' must start with '/'", name));
            }
        }
        Ok(())
    }
}

impl Validate for PollingConfig {
    fn validate(&self) -> Result<(), String> {
        if self.first_delay_ms == 0 {
            return Err("Polling first_delay_ms must be greater than 0".to_string());
        }
        if self.interval_ms == 0 {
            return Err("Polling interval_ms must be greater than 0".to_string());
        }
        if self.csvgen_interval_ms == 0 {
            return Err("Polling csvgen_interval_ms must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Validate for LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        if self.level.trim().is_empty() {
            return Err("Log level cannot be empty".to_string());
        }
        tracing_subscriber::EnvFilter::try_new(&self.level)
            .map_err(|e| format!("Invalid log level '{}': {}", self.level, e))?;
        Ok(())
    }
}
