//! Terminal classification of a batch and the wording shown for it

use super::events::{Alert, AlertLevel};
use crate::core::types::{BatchStatus, ErrorFlag};
use std::fmt;

pub const PARTIAL_FAILURE_TEXT: &str =
    "Warning! This upload was not entirely successful. You can retry it at a later time.";
pub const PARTIAL_ABORT_TEXT: &str = " Upload aborted before all images are tried due to continuing erroneous network conditions.";
pub const EMPTY_BATCH_TEXT: &str = "Warning! Nothing was uploaded.";
pub const FATAL_SERVER_ERROR_TEXT: &str =
    "The ingestion service hit a fatal error. Check the service log before uploading again.";
pub const INPUT_FORMAT_ERROR_TEXT: &str =
    "The input CSV file is malformed. Please fix it and start a new upload.";

/// How a batch ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOutcome {
    /// Finished without failures
    Success,
    /// Finished with at least one failed item
    PartialFailure,
    /// Finished with nothing to upload
    Empty { error_code: Option<String> },
    /// The service flagged an unrecoverable condition
    FatalError(ErrorFlag),
    /// Polling stopped on a transport error
    Aborted,
}

impl BatchOutcome {
    /// Terminal outcome for a status, or `None` while the batch is still running
    ///
    /// Error flags end the batch even when `finished` is not yet set.
    pub fn classify(status: &BatchStatus) -> Option<Self> {
        if let Some(flag) = status.terminal_flag() {
            return Some(BatchOutcome::FatalError(flag));
        }
        if !status.finished {
            return None;
        }
        Some(if status.total == 0 {
            BatchOutcome::Empty { error_code: None }
        } else if status.fails == 0 {
            BatchOutcome::Success
        } else {
            BatchOutcome::PartialFailure
        })
    }

    /// Whether the console should offer to resume the batch
    pub fn retry_offered(&self) -> bool {
        matches!(
            self,
            BatchOutcome::PartialFailure | BatchOutcome::Empty { .. }
        )
    }

    /// Outcomes that make the command fail
    pub fn is_failure(&self) -> bool {
        matches!(self, BatchOutcome::FatalError(_) | BatchOutcome::Aborted)
    }

    /// Alert for a batch that ended with this outcome
    ///
    /// `Aborted` alerts carry the transport error and are built by the monitor.
    pub fn alert(&self, status: &BatchStatus) -> Alert {
        let alert = match self {
            BatchOutcome::Success => Alert::new(
                AlertLevel::Success,
                format!(
                    "Upload finished: {} of {} items uploaded successfully.",
                    status.successes, status.total
                ),
            ),
            BatchOutcome::PartialFailure => {
                let mut message = PARTIAL_FAILURE_TEXT.to_string();
                if status.percent() < 100 {
                    message.push_str(PARTIAL_ABORT_TEXT);
                }
                Alert::new(AlertLevel::Warning, message)
            }
            BatchOutcome::Empty {
                error_code: Some(code),
            } => Alert::new(
                AlertLevel::Warning,
                format!("Warning! {} Please fix it and retry the upload.", code),
            ),
            BatchOutcome::Empty { error_code: None } => {
                Alert::new(AlertLevel::Warning, EMPTY_BATCH_TEXT)
            }
            BatchOutcome::FatalError(ErrorFlag::FatalServerError) => {
                Alert::new(AlertLevel::Error, FATAL_SERVER_ERROR_TEXT)
            }
            BatchOutcome::FatalError(ErrorFlag::InputFormatError) => {
                Alert::new(AlertLevel::Error, INPUT_FORMAT_ERROR_TEXT)
            }
            BatchOutcome::Aborted => Alert::new(AlertLevel::Error, "Error! Upload aborted."),
        };
        alert.with_retry(self.retry_offered())
    }
}

impl fmt::Display for BatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatchOutcome::Success => write!(f, "success"),
            BatchOutcome::PartialFailure => write!(f, "partial failure"),
            BatchOutcome::Empty { .. } => write!(f, "empty"),
            BatchOutcome::FatalError(ErrorFlag::FatalServerError) => {
                write!(f, "fatal server error")
            }
            BatchOutcome::FatalError(ErrorFlag::InputFormatError) => write!(f, "malformed input"),
            BatchOutcome::Aborted => write!(f, "aborted"),
        }
    }
}
