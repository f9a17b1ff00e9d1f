//! Common test utilities for ingest-console

pub mod fixtures;
pub mod server;

pub use server::{MockIngestService, form_fields};
