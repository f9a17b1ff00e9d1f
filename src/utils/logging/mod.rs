//! Logging utilities
//!
//! This module wires `tracing` output for the console binary.

pub mod subscriber;

pub use subscriber::{build_filter, init_logging};
