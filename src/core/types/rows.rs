//! Per-item result rows and batch history rows

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Text shown for a row that has neither a URL nor an error
pub const NOT_UPLOADED_TEXT: &str = "This image is not successfully uploaded.";

// Column positions in the positional row format
const COL_ORIGINAL_FILE_NAME: usize = 0;
const COL_MEDIA_ERROR: usize = 1;
const COL_MEDIA_GUID: usize = 2;
const COL_MEDIA_URL: usize = 7;

/// Outcome of one item in a finished batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RowWire")]
pub struct ResultRow {
    /// Local file name or path of the item
    pub local_identifier: String,
    /// Where the item ended up, when the upload succeeded
    pub remote_url: Option<String>,
    /// Why the item failed
    pub error_message: Option<String>,
    /// Identifier the service assigned, passed through untouched
    pub media_guid: Option<String>,
}

/// Classified view of a [`ResultRow`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowOutcome<'a> {
    Uploaded(&'a str),
    Failed(&'a str),
    NotUploaded,
}

impl ResultRow {
    /// An error wins over a URL, matching how the service reports retried items
    pub fn outcome(&self) -> RowOutcome<'_> {
        match (&self.error_message, &self.remote_url) {
            (Some(err), _) => RowOutcome::Failed(err),
            (None, Some(url)) => RowOutcome::Uploaded(url),
            (None, None) => RowOutcome::NotUploaded,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome(), RowOutcome::Uploaded(_))
    }

    /// "Online Path or Error Message" column text
    pub fn online_path_or_error(&self) -> &str {
        match self.outcome() {
            RowOutcome::Uploaded(url) => url,
            RowOutcome::Failed(err) => err,
            RowOutcome::NotUploaded => NOT_UPLOADED_TEXT,
        }
    }
}

impl fmt::Display for ResultRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}", self.local_identifier, self.online_path_or_error())
    }
}

/// Rows arrive either as positional arrays or as keyed objects
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RowWire {
    Positional(Vec<Value>),
    Keyed(KeyedRow),
}

#[derive(Debug, Deserialize)]
struct KeyedRow {
    #[serde(rename = "OriginalFileName", alias = "local_identifier", default)]
    original_file_name: Option<Value>,
    #[serde(rename = "MediaError", alias = "error_message", default)]
    media_error: Option<Value>,
    #[serde(rename = "MediaGUID", alias = "media_guid", default)]
    media_guid: Option<Value>,
    #[serde(rename = "MediaURL", alias = "remote_url", default)]
    media_url: Option<Value>,
}

impl From<RowWire> for ResultRow {
    fn from(wire: RowWire) -> Self {
        match wire {
            RowWire::Positional(cols) => Self {
                local_identifier: text_at(&cols, COL_ORIGINAL_FILE_NAME).unwrap_or_default(),
                error_message: text_at(&cols, COL_MEDIA_ERROR),
                media_guid: text_at(&cols, COL_MEDIA_GUID),
                remote_url: text_at(&cols, COL_MEDIA_URL),
            },
            RowWire::Keyed(row) => Self {
                local_identifier: row
                    .original_file_name
                    .as_ref()
                    .and_then(value_text)
                    .unwrap_or_default(),
                error_message: row.media_error.as_ref().and_then(value_text),
                media_guid: row.media_guid.as_ref().and_then(value_text),
                remote_url: row.media_url.as_ref().and_then(value_text),
            },
        }
    }
}

/// One past batch as listed by the history endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "HistoryWire")]
pub struct BatchHistoryEntry {
    pub id: String,
    pub csv_path: Option<String>,
    pub record_set_guid: Option<String>,
    pub start_time: Option<String>,
    pub finish_time: Option<String>,
    pub records: Option<String>,
}

impl BatchHistoryEntry {
    pub fn is_finished(&self) -> bool {
        self.finish_time.is_some()
    }
}

impl fmt::Display for BatchHistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dash = "-";
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}\t{}",
            self.id,
            self.csv_path.as_deref().unwrap_or(dash),
            self.record_set_guid.as_deref().unwrap_or(dash),
            self.start_time.as_deref().unwrap_or(dash),
            self.finish_time.as_deref().unwrap_or(dash),
            self.records.as_deref().unwrap_or(dash),
        )
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum HistoryWire {
    Positional(Vec<Value>),
    Keyed(KeyedHistory),
}

#[derive(Debug, Deserialize)]
struct KeyedHistory {
    #[serde(rename = "ID", alias = "id")]
    id: Value,
    #[serde(rename = "CSVfilePath", default)]
    csv_path: Option<Value>,
    #[serde(rename = "RecordSetGUID", default)]
    record_set_guid: Option<Value>,
    #[serde(default)]
    start_time: Option<Value>,
    #[serde(default)]
    finish_time: Option<Value>,
    #[serde(rename = "Records", default)]
    records: Option<Value>,
}

impl From<HistoryWire> for BatchHistoryEntry {
    fn from(wire: HistoryWire) -> Self {
        match wire {
            HistoryWire::Positional(cols) => Self {
                id: text_at(&cols, 0).unwrap_or_default(),
                csv_path: text_at(&cols, 1),
                record_set_guid: text_at(&cols, 6),
                start_time: text_at(&cols, 8),
                finish_time: text_at(&cols, 9),
                records: text_at(&cols, 15),
            },
            HistoryWire::Keyed(row) => Self {
                id: value_text(&row.id).unwrap_or_default(),
                csv_path: row.csv_path.as_ref().and_then(value_text),
                record_set_guid: row.record_set_guid.as_ref().and_then(value_text),
                start_time: row.start_time.as_ref().and_then(value_text),
                finish_time: row.finish_time.as_ref().and_then(value_text),
                records: row.records.as_ref().and_then(value_text),
            },
        }
    }
}

fn text_at(cols: &[Value], index: usize) -> Option<String> {
    cols.get(index).and_then(value_text)
}

/// Null and empty strings read as absent; numbers and booleans keep their text
fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}
