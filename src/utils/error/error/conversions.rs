//! Type conversions for IngestError

use super::types::IngestError;

impl From<reqwest::Error> for IngestError {
    fn from(err: reqwest::Error) -> Self {
        // Bodies that fail to decode are protocol problems, not transport ones
        if err.is_decode() {
            return IngestError::Rejected {
                status: err.status().map(|s| s.as_u16()).unwrap_or(200),
                message: format!("Malformed response from ingestion service: {}", err),
            };
        }
        if let Some(status) = err.status() {
            return IngestError::Rejected {
                status: status.as_u16(),
                message: err.to_string(),
            };
        }
        IngestError::Network(err.to_string())
    }
}

impl From<url::ParseError> for IngestError {
    fn from(err: url::ParseError) -> Self {
        IngestError::Config(format!("Invalid URL: {}", err))
    }
}
