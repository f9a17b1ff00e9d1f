//! Integration tests for ingest-console
//!
//! These run the HTTP client and the monitors against a mock ingestion service.

pub mod config_tests;
pub mod http_client_tests;
pub mod monitor_tests;
