use super::state::MonitorState;
use crate::core::types::{BatchStatus, ResultRow};
use std::fmt;
use tokio::sync::mpsc::UnboundedSender;

/// Channel the monitors publish on
pub type EventSender = UnboundedSender<MonitorEvent>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertLevel::Info => write!(f, "info"),
            AlertLevel::Success => write!(f, "success"),
            AlertLevel::Warning => write!(f, "warning"),
            AlertLevel::Error => write!(f, "error"),
        }
    }
}

/// User-facing message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub level: AlertLevel,
    pub message: String,
    /// Whether a "retry failed uploads" action applies
    pub retry_offered: bool,
}

impl Alert {
    pub fn new(level: AlertLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            retry_offered: false,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(AlertLevel::Error, message)
    }

    pub fn with_retry(mut self, retry_offered: bool) -> Self {
        self.retry_offered = retry_offered;
        self
    }
}

/// Everything a monitor reports to its front end
#[derive(Debug, Clone, PartialEq)]
pub enum MonitorEvent {
    StateChanged(MonitorState),
    /// Whether new submissions are accepted
    FormEnabled(bool),
    Progress {
        percent: u8,
        text: String,
        status: Option<BatchStatus>,
    },
    Alert(Alert),
    Results(Vec<ResultRow>),
}
