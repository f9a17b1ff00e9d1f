//! reqwest implementation of the service traits

use super::{AuthService, BatchService, CsvGenService, HistoryService, PreferenceService};
use crate::config::validation::validate_base_url;
use crate::config::{EndpointsConfig, ServiceConfig};
use crate::core::types::{
    BatchHistoryEntry, BatchStatus, CsvGenStatus, CsvGenerationRequest, LastBatchInfo, ResultRow,
    JobKind, Submission, SubmissionAck, UploadRequest, WRONG_COMBINATION,
};
use crate::utils::error::{HttpErrorMapper, IngestError, Result};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};
use url::Url;

/// HTTP client for the ingestion service
#[derive(Debug, Clone)]
pub struct HttpIngestClient {
    http: Client,
    base_url: Url,
    endpoints: EndpointsConfig,
    mapper: HttpErrorMapper,
}

impl HttpIngestClient {
    /// Create
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        let mut base_url = validate_base_url(&config.base_url, "Service base URL")?;
        // Endpoint paths are joined relative to the base path
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http = Client::builder()
            .timeout(config.timeout_duration())
            .build()
            .map_err(|e| IngestError::Config(format!("Failed to create HTTP client: {}", e)))?;

        debug!("Ingestion client created for {}", base_url);

        Ok(Self {
            http,
            base_url,
            endpoints: config.endpoints.clone(),
            mapper: HttpErrorMapper,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Absolute URL of an endpoint path
    pub fn endpoint_url(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = self.endpoint_url(path)?;
        debug!("{} {}", method, url);
        Ok(self.http.request(method, url))
    }

    /// Send and turn non-success statuses into errors
    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let err = self.mapper.map_http_error(status.as_u16(), &body);
        warn!("Ingestion service error {}: {}", status, err);
        Err(err)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        let request = self.request(Method::GET, path)?.query(query);
        let response = self.send(request).await?;
        Ok(response.json::<T>().await?)
    }

    async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> Result<()> {
        let request = self.request(Method::POST, path)?.form(form);
        self.send(request).await?;
        Ok(())
    }
}

#[async_trait]
impl BatchService for HttpIngestClient {
    async fn submit(&self, submission: &Submission) -> Result<SubmissionAck> {
        let kind = submission.kind();
        let path = match kind {
            JobKind::Csv => &self.endpoints.csv_upload,
            JobKind::Directory => &self.endpoints.dir_upload,
        };

        match submission {
            Submission::New(UploadRequest::Csv(request)) => {
                let values = serde_json::to_string(request)?;
                self.post_form(path, &[("values", values.as_str())]).await?;
            }
            Submission::New(UploadRequest::Directory(request)) => {
                self.post_form(path, &[("rootPath", request.root_path.as_str())])
                    .await?;
            }
            Submission::Resume(_) => {
                self.post_form(path, &[]).await?;
            }
        }

        info!(
            "{} batch {} accepted",
            kind,
            if submission.is_resume() { "resume" } else { "upload" }
        );
        Ok(SubmissionAck {
            kind,
            resumed: submission.is_resume(),
        })
    }

    async fn status(&self) -> Result<BatchStatus> {
        self.get_json(&self.endpoints.progress, &[]).await
    }

    async fn results(&self) -> Result<Vec<ResultRow>> {
        self.get_json(&self.endpoints.results, &[]).await
    }

    async fn last_batch(&self) -> Result<LastBatchInfo> {
        self.get_json(&self.endpoints.last_batch, &[]).await
    }
}

#[async_trait]
impl PreferenceService for HttpIngestClient {
    async fn get_preference(&self, name: &str) -> Result<Option<String>> {
        let value: serde_json::Value = match self
            .get_json(&self.endpoints.preferences, &[("name", name)])
            .await
        {
            Ok(value) => value,
            Err(IngestError::NotFound(_)) => return Ok(None),
            Err(e) => return Err(e),
        };

        Ok(match value {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => Some(s),
            other => Some(other.to_string()),
        })
    }

    async fn set_preference(&self, name: &str, value: &str) -> Result<()> {
        self.post_form(&self.endpoints.preferences, &[("name", name), ("value", value)])
            .await
    }

    async fn clear_preferences(&self) -> Result<()> {
        let request = self.request(Method::DELETE, &self.endpoints.preferences)?;
        self.send(request).await?;
        Ok(())
    }
}

#[async_trait]
impl AuthService for HttpIngestClient {
    async fn is_signed_in(&self) -> Result<bool> {
        self.get_json(&self.endpoints.auth, &[]).await
    }

    async fn sign_in(&self, account_uuid: &str, api_key: &str) -> Result<()> {
        let form = [("user", account_uuid), ("password", api_key)];
        match self.post_form(&self.endpoints.auth, &form).await {
            Ok(()) => Ok(()),
            Err(e) if e.status() == Some(409) => Err(IngestError::Unauthorized(
                WRONG_COMBINATION.to_string(),
            )),
            Err(e) if e.is_transport() => Err(e),
            Err(e) => Err(IngestError::ServiceUnavailable(e.to_string())),
        }
    }
}

#[async_trait]
impl HistoryService for HttpIngestClient {
    async fn batches(&self) -> Result<Vec<BatchHistoryEntry>> {
        self.get_json(&self.endpoints.history, &[("table_id", "")])
            .await
    }

    async fn batch_records(&self, batch_id: &str) -> Result<Vec<ResultRow>> {
        self.get_json(&self.endpoints.history, &[("table_id", batch_id)])
            .await
    }
}

#[async_trait]
impl CsvGenService for HttpIngestClient {
    async fn start_generation(&self, request: &CsvGenerationRequest) -> Result<()> {
        let values = serde_json::to_string(request)?;
        self.post_form(&self.endpoints.csv_generation, &[("values", values.as_str())])
            .await
    }

    async fn generation_status(&self) -> Result<CsvGenStatus> {
        self.get_json(&self.endpoints.csv_generation_progress, &[])
            .await
    }
}
