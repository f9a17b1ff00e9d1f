//! HTTP error mapping
//!
//! Turns non-success responses from the ingestion service into [`IngestError`] values.

use super::error::IngestError;

/// Maps HTTP status codes and bodies from the ingestion service to errors
#[derive(Debug, Default, Clone, Copy)]
pub struct HttpErrorMapper;

impl HttpErrorMapper {
    /// Map a non-success response
    pub fn map_http_error(&self, status_code: u16, response_body: &str) -> IngestError {
        let message = extract_message(response_body, status_code);
        match status_code {
            401 | 403 => IngestError::Unauthorized(message),
            404 => IngestError::NotFound(message),
            503 => IngestError::ServiceUnavailable(message),
            _ => IngestError::Rejected {
                status: status_code,
                message,
            },
        }
    }
}

/// Response bodies are plain text; fall back to the status when empty
fn extract_message(response_body: &str, status_code: u16) -> String {
    let trimmed = response_body.trim();
    if trimmed.is_empty() {
        format!("Ingestion service returned HTTP {}", status_code)
    } else {
        trimmed.to_string()
    }
}
