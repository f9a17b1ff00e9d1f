//! Ingestion service abstraction
//!
//! The console only ever talks to the ingestion service through these traits,
//! so the monitors can be driven by an in-memory fake as easily as by
//! [`HttpIngestClient`].

pub mod http;

pub use http::HttpIngestClient;

use crate::core::types::{
    BatchHistoryEntry, BatchStatus, CsvGenStatus, CsvGenerationRequest, LastBatchInfo, ResultRow,
    Submission, SubmissionAck,
};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Batch job endpoints
#[async_trait]
pub trait BatchService: Send + Sync {
    /// Start a new batch or ask the service to resume the last one
    async fn submit(&self, submission: &Submission) -> Result<SubmissionAck>;

    /// Read the current batch status; never changes server state
    async fn status(&self) -> Result<BatchStatus>;

    /// Per-item outcomes of the current batch
    async fn results(&self) -> Result<Vec<ResultRow>>;

    /// Summary of the most recent batch
    async fn last_batch(&self) -> Result<LastBatchInfo>;
}

/// Key-value user preferences stored by the service
#[async_trait]
pub trait PreferenceService: Send + Sync {
    /// `None` when the preference was never set
    async fn get_preference(&self, name: &str) -> Result<Option<String>>;

    async fn set_preference(&self, name: &str, value: &str) -> Result<()>;

    /// Remove every stored preference
    async fn clear_preferences(&self) -> Result<()>;
}

/// Session sign-in
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Whether the service holds valid credentials
    async fn is_signed_in(&self) -> Result<bool>;

    async fn sign_in(&self, account_uuid: &str, api_key: &str) -> Result<()>;
}

/// Upload history
#[async_trait]
pub trait HistoryService: Send + Sync {
    async fn batches(&self) -> Result<Vec<BatchHistoryEntry>>;

    /// Media records of one past batch
    async fn batch_records(&self, batch_id: &str) -> Result<Vec<ResultRow>>;
}

/// CSV generation endpoints
#[async_trait]
pub trait CsvGenService: Send + Sync {
    async fn start_generation(&self, request: &CsvGenerationRequest) -> Result<()>;

    async fn generation_status(&self) -> Result<CsvGenStatus>;
}

#[async_trait]
impl<T: BatchService + ?Sized> BatchService for Arc<T> {
    async fn submit(&self, submission: &Submission) -> Result<SubmissionAck> {
        (**self).submit(submission).await
    }

    async fn status(&self) -> Result<BatchStatus> {
        (**self).status().await
    }

    async fn results(&self) -> Result<Vec<ResultRow>> {
        (**self).results().await
    }

    async fn last_batch(&self) -> Result<LastBatchInfo> {
        (**self).last_batch().await
    }
}

#[async_trait]
impl<T: PreferenceService + ?Sized> PreferenceService for Arc<T> {
    async fn get_preference(&self, name: &str) -> Result<Option<String>> {
        (**self).get_preference(name).await
    }

    async fn set_preference(&self, name: &str, value: &str) -> Result<()> {
        (**self).set_preference(name, value).await
    }

    async fn clear_preferences(&self) -> Result<()> {
        (**self).clear_preferences().await
    }
}

#[async_trait]
impl<T: CsvGenService + ?Sized> CsvGenService for Arc<T> {
    async fn start_generation(&self, request: &CsvGenerationRequest) -> Result<()> {
        (**self).start_generation(request).await
    }

    async fn generation_status(&self) -> Result<CsvGenStatus> {
        (**self).generation_status().await
    }
}

#[async_trait]
impl<T: AuthService + ?Sized> AuthService for Arc<T> {
    async fn is_signed_in(&self) -> Result<bool> {
        (**self).is_signed_in().await
    }

    async fn sign_in(&self, account_uuid: &str, api_key: &str) -> Result<()> {
        (**self).sign_in(account_uuid, api_key).await
    }
}

#[async_trait]
impl<T: HistoryService + ?Sized> HistoryService for Arc<T> {
    async fn batches(&self) -> Result<Vec<BatchHistoryEntry>> {
        (**self).batches().await
    }

    async fn batch_records(&self, batch_id: &str) -> Result<Vec<ResultRow>> {
        (**self).batch_records(batch_id).await
    }
}
