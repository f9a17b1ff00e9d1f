use super::outcome::BatchOutcome;
use std::fmt;

/// Lifecycle of one batch as seen by the console
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonitorState {
    Idle,
    Submitting,
    /// Submitted; waiting for the service to report completion
    Polling,
    /// Terminal until the next submission
    Finished(BatchOutcome),
}

impl MonitorState {
    /// Whether a batch is in flight
    pub fn is_busy(&self) -> bool {
        matches!(self, MonitorState::Submitting | MonitorState::Polling)
    }

    pub fn outcome(&self) -> Option<&BatchOutcome> {
        match self {
            MonitorState::Finished(outcome) => Some(outcome),
            _ => None,
        }
    }
}

impl fmt::Display for MonitorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonitorState::Idle => write!(f, "idle"),
            MonitorState::Submitting => write!(f, "submitting"),
            MonitorState::Polling => write!(f, "polling"),
            MonitorState::Finished(outcome) => write!(f, "finished ({})", outcome),
        }
    }
}
