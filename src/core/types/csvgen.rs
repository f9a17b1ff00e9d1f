//! CSV generation requests and status

use crate::utils::error::{IngestError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the generator derives each record's GUID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuidSyntax {
    /// Hash of the record information; no prefix
    #[default]
    Hash,
    /// `{prefix}{file name}`
    Filename,
    /// `{prefix}{full path}`
    Fullpath,
}

impl GuidSyntax {
    pub fn all() -> [GuidSyntax; 3] {
        [GuidSyntax::Hash, GuidSyntax::Filename, GuidSyntax::Fullpath]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GuidSyntax::Hash => "hash",
            GuidSyntax::Filename => "filename",
            GuidSyntax::Fullpath => "fullpath",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            GuidSyntax::Hash => "GUID = hash of record information",
            GuidSyntax::Filename => "GUID = \"{GUID Prefix}{File Name}\"",
            GuidSyntax::Fullpath => "GUID = \"{GUID Prefix}{Full Path}\"",
        }
    }

    pub fn uses_prefix(&self) -> bool {
        !matches!(self, GuidSyntax::Hash)
    }
}

impl fmt::Display for GuidSyntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GuidSyntax {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', '_'], "").as_str() {
            "hash" => Ok(GuidSyntax::Hash),
            "filename" => Ok(GuidSyntax::Filename),
            "fullpath" => Ok(GuidSyntax::Fullpath),
            other => Err(format!(
                "Unknown GUID syntax '{}', expected hash, filename or fullpath",
                other
            )),
        }
    }
}

/// Parameters for generating a CSV from a directory of images
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvGenerationRequest {
    #[serde(rename = "g-imagedir")]
    pub image_dir: String,
    #[serde(rename = "g-recursive", with = "bool_text")]
    pub recursive: bool,
    #[serde(rename = "g-guidsyntax")]
    pub guid_syntax: GuidSyntax,
    #[serde(rename = "g-guidprefix", skip_serializing_if = "Option::is_none")]
    pub guid_prefix: Option<String>,
    #[serde(rename = "g-save-path", skip_serializing_if = "Option::is_none")]
    pub save_path: Option<String>,
    #[serde(rename = "g-desc", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "g-lang", skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,
    #[serde(rename = "g-title", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "g-digdev", skip_serializing_if = "Option::is_none")]
    pub digitization_device: Option<String>,
    #[serde(rename = "g-pixres", skip_serializing_if = "Option::is_none")]
    pub pixel_resolution: Option<String>,
    #[serde(rename = "g-mag", skip_serializing_if = "Option::is_none")]
    pub magnification: Option<String>,
    #[serde(rename = "g-ocr-output", skip_serializing_if = "Option::is_none")]
    pub ocr_output: Option<String>,
    #[serde(rename = "g-ocr-tech", skip_serializing_if = "Option::is_none")]
    pub ocr_technology: Option<String>,
    #[serde(rename = "g-info-wh", skip_serializing_if = "Option::is_none")]
    pub information_withheld: Option<String>,
    #[serde(rename = "g-col-obj-guid", skip_serializing_if = "Option::is_none")]
    pub collection_object_guid: Option<String>,
}

impl CsvGenerationRequest {
    pub fn new(image_dir: impl Into<String>) -> Self {
        Self {
            image_dir: image_dir.into(),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.image_dir.trim().is_empty() {
            return Err(IngestError::validation(
                "The upload directory cannot be empty.",
            ));
        }
        Ok(())
    }

    /// The prefix is meaningless for hashed GUIDs and is dropped
    pub fn normalized(mut self) -> Self {
        if !self.guid_syntax.uses_prefix() {
            self.guid_prefix = None;
        }
        self
    }
}

/// The generator reads booleans as the strings "true"/"false"
mod bool_text {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(if *value { "true" } else { "false" })
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum BoolOrText {
            Bool(bool),
            Text(String),
        }
        Ok(match BoolOrText::deserialize(deserializer)? {
            BoolOrText::Bool(b) => b,
            BoolOrText::Text(s) => s.eq_ignore_ascii_case("true"),
        })
    }
}

/// Generation progress as reported by the service
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvGenStatus {
    /// Files processed so far
    #[serde(default)]
    pub count: u64,
    /// 0 while running, 1 when saved, anything else on failure
    #[serde(default)]
    pub result: i64,
    #[serde(default)]
    pub targetfile: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Classified view of [`CsvGenStatus::result`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CsvGenState {
    Running,
    Saved { target_file: String },
    Failed { error: String },
}

impl CsvGenStatus {
    pub fn state(&self) -> CsvGenState {
        match self.result {
            0 => CsvGenState::Running,
            1 => CsvGenState::Saved {
                target_file: self
                    .targetfile
                    .as_deref()
                    .map(collapse_backslashes)
                    .unwrap_or_default(),
            },
            _ => CsvGenState::Failed {
                error: self
                    .error
                    .clone()
                    .unwrap_or_else(|| "CSV generation failed.".to_string()),
            },
        }
    }

    pub fn progress_text(&self) -> String {
        format!("Processed: {} files.", self.count)
    }
}

/// Windows paths come back with doubled separators
fn collapse_backslashes(path: &str) -> String {
    path.replace("\\\\", "\\")
}
