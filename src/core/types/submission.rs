//! Batch submission requests

use crate::utils::error::{IngestError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which upload flow a batch belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobKind {
    /// Images listed in a CSV file
    Csv,
    /// Every image under a root directory
    Directory,
}

impl fmt::Display for JobKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobKind::Csv => write!(f, "CSV"),
            JobKind::Directory => write!(f, "directory"),
        }
    }
}

/// Parameters for a CSV-driven upload
///
/// Field names on the wire are the ones the ingestion service stores per batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvUploadRequest {
    #[serde(rename = "CSVfilePath")]
    pub csv_path: String,
    #[serde(rename = "RecordSetGUID")]
    pub record_set_guid: String,
    #[serde(rename = "RightsLicense", skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    #[serde(rename = "MediaContentKeyword", skip_serializing_if = "Option::is_none")]
    pub media_content_keyword: Option<String>,
    #[serde(rename = "iDigbioProviderGUID", skip_serializing_if = "Option::is_none")]
    pub provider_guid: Option<String>,
    #[serde(rename = "iDigbioPublisherGUID", skip_serializing_if = "Option::is_none")]
    pub publisher_guid: Option<String>,
    #[serde(rename = "FundingSource", skip_serializing_if = "Option::is_none")]
    pub funding_source: Option<String>,
    #[serde(rename = "FundingPurpose", skip_serializing_if = "Option::is_none")]
    pub funding_purpose: Option<String>,
}

impl CsvUploadRequest {
    pub fn new(csv_path: impl Into<String>, record_set_guid: impl Into<String>) -> Self {
        Self {
            csv_path: csv_path.into(),
            record_set_guid: record_set_guid.into(),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        let license_blank = matches!(&self.license, Some(l) if l.trim().is_empty());
        if self.csv_path.trim().is_empty()
            || self.record_set_guid.trim().is_empty()
            || license_blank
        {
            return Err(IngestError::validation(
                "The Image License, Record Set GUID and CSV File Path cannot be empty.",
            ));
        }
        Ok(())
    }
}

/// Parameters for a directory upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryUploadRequest {
    #[serde(rename = "rootPath")]
    pub root_path: String,
}

impl DirectoryUploadRequest {
    pub fn new(root_path: impl Into<String>) -> Self {
        Self {
            root_path: root_path.into(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.root_path.trim().is_empty() {
            return Err(IngestError::validation("The path cannot be empty."));
        }
        Ok(())
    }
}

/// A new batch's parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadRequest {
    Csv(CsvUploadRequest),
    Directory(DirectoryUploadRequest),
}

impl UploadRequest {
    pub fn kind(&self) -> JobKind {
        match self {
            UploadRequest::Csv(_) => JobKind::Csv,
            UploadRequest::Directory(_) => JobKind::Directory,
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            UploadRequest::Csv(req) => req.validate(),
            UploadRequest::Directory(req) => req.validate(),
        }
    }

    /// Path the batch reads from, for display
    pub fn source_path(&self) -> &str {
        match self {
            UploadRequest::Csv(req) => &req.csv_path,
            UploadRequest::Directory(req) => &req.root_path,
        }
    }
}

impl From<CsvUploadRequest> for UploadRequest {
    fn from(req: CsvUploadRequest) -> Self {
        UploadRequest::Csv(req)
    }
}

impl From<DirectoryUploadRequest> for UploadRequest {
    fn from(req: DirectoryUploadRequest) -> Self {
        UploadRequest::Directory(req)
    }
}

/// What the client sends to the submit endpoint
///
/// `Resume` carries no parameters; the service decides what is left to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    New(UploadRequest),
    Resume(JobKind),
}

impl Submission {
    pub fn kind(&self) -> JobKind {
        match self {
            Submission::New(req) => req.kind(),
            Submission::Resume(kind) => *kind,
        }
    }

    pub fn is_resume(&self) -> bool {
        matches!(self, Submission::Resume(_))
    }
}

/// Acknowledgement that the service queued the batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionAck {
    pub kind: JobKind,
    pub resumed: bool,
}
