//! Core functionality for the console
//!
//! Wire types, the service abstraction and the two progress monitors.

pub mod csvgen;
pub mod monitor;
pub mod preferences;
pub mod service;
pub mod types;

pub use csvgen::{CsvGenMonitor, CsvGenOutcome};
pub use monitor::{BatchMonitor, BatchOutcome, MonitorEvent, MonitorState, PollSchedule};
pub use preferences::{PreferenceKey, Preferences};
pub use service::{
    AuthService, BatchService, CsvGenService, HistoryService, HttpIngestClient, PreferenceService,
};
