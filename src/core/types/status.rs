//! Batch status as reported by the progress endpoint

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Server-side error conditions that end a batch without a normal outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorFlag {
    /// The ingestion service hit an unrecoverable error
    FatalServerError,
    /// The submitted CSV could not be parsed
    InputFormatError,
}

/// Progress counters for one batch
///
/// `successes + fails + skips` never exceeds `total` on a well-behaved
/// service; [`BatchStatus::is_consistent`] checks it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StatusWire", into = "StatusWire")]
pub struct BatchStatus {
    pub total: u64,
    pub successes: u64,
    pub fails: u64,
    pub skips: u64,
    pub finished: bool,
    pub error_flags: BTreeSet<ErrorFlag>,
}

impl BatchStatus {
    /// Items the service has tried so far
    pub fn processed(&self) -> u64 {
        self.successes
            .saturating_add(self.fails)
            .saturating_add(self.skips)
    }

    /// Whole-number completion percentage, 0..=100
    ///
    /// A batch with nothing to upload counts as complete.
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 100;
        }
        let pct = self.processed().saturating_mul(100) / self.total;
        pct.min(100) as u8
    }

    /// One-line progress summary in the console's wording
    pub fn progress_text(&self) -> String {
        format!(
            "Progress: (Successful:{}, Skipped: {}, Failed: {}, Total to upload: {})",
            self.successes, self.skips, self.fails, self.total
        )
    }

    pub fn has_flag(&self, flag: ErrorFlag) -> bool {
        self.error_flags.contains(&flag)
    }

    /// The flag that ends the batch, fatal server errors first
    pub fn terminal_flag(&self) -> Option<ErrorFlag> {
        self.error_flags.iter().next().copied()
    }

    pub fn is_consistent(&self) -> bool {
        self.processed() <= self.total
    }
}

/// JSON shape of the progress endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StatusWire {
    #[serde(default)]
    fatal_server_error: bool,
    #[serde(default)]
    input_csv_error: bool,
    #[serde(default)]
    total: u64,
    #[serde(default)]
    successes: u64,
    #[serde(default)]
    skips: u64,
    #[serde(default)]
    fails: u64,
    #[serde(default)]
    finished: bool,
}

impl From<StatusWire> for BatchStatus {
    fn from(wire: StatusWire) -> Self {
        let mut error_flags = BTreeSet::new();
        if wire.fatal_server_error {
            error_flags.insert(ErrorFlag::FatalServerError);
        }
        if wire.input_csv_error {
            error_flags.insert(ErrorFlag::InputFormatError);
        }
        Self {
            total: wire.total,
            successes: wire.successes,
            fails: wire.fails,
            skips: wire.skips,
            finished: wire.finished,
            error_flags,
        }
    }
}

impl From<BatchStatus> for StatusWire {
    fn from(status: BatchStatus) -> Self {
        Self {
            fatal_server_error: status.has_flag(ErrorFlag::FatalServerError),
            input_csv_error: status.has_flag(ErrorFlag::InputFormatError),
            total: status.total,
            successes: status.successes,
            skips: status.skips,
            fails: status.fails,
            finished: status.finished,
        }
    }
}
