//! Error types for the ingestion console

use thiserror::Error;

/// Result type alias for the ingestion console
pub type Result<T> = std::result::Result<T, IngestError>;

/// Main error type for the ingestion console
#[derive(Error, Debug)]
pub enum IngestError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Transport failures talking to the ingestion service
    #[error("Network error: {0}")]
    Network(String),

    /// The service answered with a non-success status
    #[error("{message}")]
    Rejected {
        /// HTTP status code returned by the service
        status: u16,
        /// Human-readable body returned by the service
        message: String,
    },

    /// Authentication errors
    #[error("Authentication error: {0}")]
    Unauthorized(String),

    /// Service unavailable errors
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Not found errors
    #[error("Not found: {0}")]
    NotFound(String),

    /// Local input validation errors
    #[error("{0}")]
    Validation(String),

    /// Operation not allowed in the current monitor state
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl IngestError {
    /// Whether the error came from the transport layer rather than the service
    pub fn is_transport(&self) -> bool {
        matches!(self, IngestError::Network(_))
    }

    /// Whether resubmitting the same request could plausibly succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            IngestError::Network(_) | IngestError::ServiceUnavailable(_)
        )
    }

    /// HTTP status carried by the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            IngestError::Rejected { status, .. } => Some(*status),
            IngestError::Unauthorized(_) => Some(401),
            IngestError::NotFound(_) => Some(404),
            IngestError::ServiceUnavailable(_) => Some(503),
            _ => None,
        }
    }
}
