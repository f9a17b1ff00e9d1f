//! # ingest-console
//!
//! Client library and command-line console for a batch media ingestion service.
//!
//! A batch (every image under a directory, or the images listed in a CSV file)
//! is submitted to the service, which processes it asynchronously. The
//! [`BatchMonitor`] then polls the service on a fixed schedule, publishes
//! progress as typed [`MonitorEvent`]s and fetches the per-item results once
//! the batch finishes.
//!
//! ```rust,no_run
//! use ingest_console::core::types::DirectoryUploadRequest;
//! use ingest_console::{BatchMonitor, Config, HttpIngestClient, PollSchedule};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/ingest.yaml").await?;
//!     let client = HttpIngestClient::new(config.service())?;
//!     let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
//!     let mut monitor = BatchMonitor::new(client, PollSchedule::from_config(config.polling()), tx);
//!
//!     tokio::spawn(async move {
//!         while let Some(event) = rx.recv().await {
//!             println!("{:?}", event);
//!         }
//!     });
//!
//!     let outcome = monitor
//!         .submit_and_watch(DirectoryUploadRequest::new("/data/images").into())
//!         .await?;
//!     println!("Batch ended: {}", outcome);
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod cli;
pub mod config;
pub mod core;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use core::{
    BatchMonitor, BatchOutcome, CsvGenMonitor, CsvGenOutcome, HttpIngestClient, MonitorEvent,
    MonitorState, PollSchedule,
};
pub use utils::error::{IngestError, Result};

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Git commit the binary was built from
pub const GIT_HASH: &str = env!("GIT_HASH");

/// Version line shown by `--version`, including the git commit
pub const LONG_VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), ")");
