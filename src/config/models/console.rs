//! Top-level console configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Top-level console configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConsoleConfig {
    /// Ingestion service connection
    #[serde(default)]
    pub service: ServiceConfig,
    /// Progress polling cadence
    #[serde(default)]
    pub polling: PollingConfig,
    /// Logging output
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ConsoleConfig {
    /// Merge two configurations, with other taking precedence
    pub fn merge(mut self, other: Self) -> Self {
        self.service = self.service.merge(other.service);
        self.polling = self.polling.merge(other.polling);
        self.logging = self.logging.merge(other.logging);
        self
    }
}
