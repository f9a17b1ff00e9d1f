//! Ingestion service connection configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Ingestion service connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Base URL the endpoint paths are joined onto
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Endpoint paths
    #[serde(default)]
    pub endpoints: EndpointsConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout: default_timeout(),
            endpoints: EndpointsConfig::default(),
        }
    }
}

impl ServiceConfig {
    /// Merge service configurations
    pub fn merge(mut self, other: Self) -> Self {
        if other.base_url != default_base_url() {
            self.base_url = other.base_url;
        }
        if other.timeout != default_timeout() {
            self.timeout = other.timeout;
        }
        self.endpoints = self.endpoints.merge(other.endpoints);
        self
    }

    /// Request timeout as a duration
    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

/// Endpoint paths exposed by the ingestion service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointsConfig {
    pub auth: String,
    pub preferences: String,
    pub csv_upload: String,
    pub dir_upload: String,
    pub progress: String,
    pub results: String,
    pub last_batch: String,
    pub history: String,
    pub csv_generation: String,
    pub csv_generation_progress: String,
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            auth: "/services/auth".to_string(),
            preferences: "/services/config".to_string(),
            csv_upload: "/services/csv".to_string(),
            dir_upload: "/services".to_string(),
            progress: "/services/progress".to_string(),
            results: "/services/result".to_string(),
            last_batch: "/services/batch".to_string(),
            history: "/services/history".to_string(),
            csv_generation: "/services/generatecsv".to_string(),
            csv_generation_progress: "/services/csvgenprogress".to_string(),
        }
    }
}

impl EndpointsConfig {
    /// Merge endpoint paths, keeping any path the other side changed
    pub fn merge(self, other: Self) -> Self {
        let defaults = Self::default();
        let pick = |mine: String, theirs: String, default: &str| {
            if theirs != default { theirs } else { mine }
        };
        Self {
            auth: pick(self.auth, other.auth, &defaults.auth),
            preferences: pick(self.preferences, other.preferences, &defaults.preferences),
            csv_upload: pick(self.csv_upload, other.csv_upload, &defaults.csv_upload),
            dir_upload: pick(self.dir_upload, other.dir_upload, &defaults.dir_upload),
            progress: pick(self.progress, other.progress, &defaults.progress),
            results: pick(self.results, other.results, &defaults.results),
            last_batch: pick(self.last_batch, other.last_batch, &defaults.last_batch),
            history: pick(self.history, other.history, &defaults.history),
            csv_generation: pick(
                self.csv_generation,
                other.csv_generation,
                &defaults.csv_generation,
            ),
            csv_generation_progress: pick(
                self.csv_generation_progress,
                other.csv_generation_progress,
                &defaults.csv_generation_progress,
            ),
        }
    }

    /// All paths with their names, for validation
    pub fn named_paths(&self) -> [(&'static str, &str); 10] {
        [
            ("auth", &self.auth),
            ("preferences", &self.preferences),
            ("csv_upload", &self.csv_upload),
            ("dir_upload", &self.dir_upload),
            ("progress", &self.progress),
            ("results", &self.results),
            ("last_batch", &self.last_batch),
            ("history", &self.history),
            ("csv_generation", &self.csv_generation),
            ("csv_generation_progress", &self.csv_generation_progress),
        ]
    }
}
