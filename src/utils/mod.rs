//! Utility modules for the ingestion console
//!
//! - **error**: Error type, result alias, and HTTP status mapping
//! - **logging**: Tracing subscriber setup

pub mod error;
pub mod logging;
