//! Configuration data models
//!
//! This module defines all configuration structures used by the console.

#![allow(missing_docs)]

pub mod console;
pub mod logging;
pub mod polling;
pub mod service;

// Re-export all configuration types
pub use console::*;
pub use logging::*;
pub use polling::*;
pub use service::*;

/// Default ingestion service base URL
pub fn default_base_url() -> String {
    "http://127.0.0.1:8080".to_string()
}

/// Default timeout in seconds
pub fn default_timeout() -> u64 {
    30
}

/// Delay before the first status poll
pub fn default_first_delay_ms() -> u64 {
    1000
}

/// Delay between subsequent status polls
pub fn default_interval_ms() -> u64 {
    4000
}

/// Delay between CSV generation polls
pub fn default_csvgen_interval_ms() -> u64 {
    100
}

/// Default log level
pub fn default_log_level() -> String {
    "info".to_string()
}
