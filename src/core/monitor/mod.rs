//! Batch progress monitor
//!
//! Drives a submitted batch to a terminal state by polling the service on a
//! fixed schedule and reports everything it does as [`MonitorEvent`]s.

mod events;
mod monitor;
mod outcome;
mod schedule;
mod state;

pub use events::{Alert, AlertLevel, EventSender, MonitorEvent};
pub use monitor::{BatchMonitor, PollStep};
pub use outcome::{
    BatchOutcome, EMPTY_BATCH_TEXT, FATAL_SERVER_ERROR_TEXT, INPUT_FORMAT_ERROR_TEXT,
    PARTIAL_ABORT_TEXT, PARTIAL_FAILURE_TEXT,
};
pub use schedule::PollSchedule;
pub use state::MonitorState;
