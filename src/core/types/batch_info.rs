//! Information about the most recent batch

use serde::{Deserialize, Serialize};

/// Last batch as reported by the service
///
/// An empty JSON object, or one with `Empty: true`, means no batch has run yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastBatchInfo {
    #[serde(rename = "Empty", default)]
    pub empty: bool,
    #[serde(default)]
    pub finished: bool,
    #[serde(default, alias = "root")]
    pub path: Option<String>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(rename = "ErrorCode", default)]
    pub error_code: Option<String>,
}

impl LastBatchInfo {
    pub fn exists(&self) -> bool {
        !self.empty && (self.path.is_some() || self.start_time.is_some())
    }

    /// A batch that started but did not finish cleanly
    pub fn needs_retry(&self) -> bool {
        self.exists() && !self.finished
    }

    /// Warning shown when the last batch was left unfinished
    pub fn unfinished_warning(&self) -> Option<String> {
        if !self.needs_retry() {
            return None;
        }
        Some(format!(
            "Warning! Your last upload from directory/CSV file {} which started at {} was not entirely successful.",
            self.path.as_deref().unwrap_or("(unknown)"),
            self.start_time.as_deref().unwrap_or("(unknown)")
        ))
    }
}
