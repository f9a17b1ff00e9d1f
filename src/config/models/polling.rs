//! Progress polling configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Polling cadence for the progress monitors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollingConfig {
    /// Delay between a successful submission and the first status poll
    #[serde(default = "default_first_delay_ms")]
    pub first_delay_ms: u64,
    /// Delay between an unfinished status and the next poll
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
    /// Flat delay used by the CSV generation monitor
    #[serde(default = "default_csvgen_interval_ms")]
    pub csvgen_interval_ms: u64,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            first_delay_ms: default_first_delay_ms(),
            interval_ms: default_interval_ms(),
            csvgen_interval_ms: default_csvgen_interval_ms(),
        }
    }
}

impl PollingConfig {
    /// Merge polling configurations
    pub fn merge(mut self, other: Self) -> Self {
        if other.first_delay_ms != default_first_delay_ms() {
            self.first_delay_ms = other.first_delay_ms;
        }
        if other.interval_ms != default_interval_ms() {
            self.interval_ms = other.interval_ms;
        }
        if other.csvgen_interval_ms != default_csvgen_interval_ms() {
            self.csvgen_interval_ms = other.csvgen_interval_ms;
        }
        self
    }

    pub fn first_delay(&self) -> Duration {
        Duration::from_millis(self.first_delay_ms)
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn csvgen_interval(&self) -> Duration {
        Duration::from_millis(self.csvgen_interval_ms)
    }
}
