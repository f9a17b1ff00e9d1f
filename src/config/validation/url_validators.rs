//! Base URL validation

use crate::utils::error::{IngestError, Result};
use url::Url;

/// Validate the ingestion service base URL
///
/// The URL must be well-formed, use http or https, and carry a host.
pub fn validate_base_url(url_str: &str, context: &str) -> Result<Url> {
    let url = Url::parse(url_str).map_err(|e| {
        IngestError::Config(format!("{} has invalid URL format: {}", context, e))
    })?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(IngestError::Config(format!(
                "{} must use http:// or https:// scheme, got: {}",
                context, scheme
            )));
        }
    }

    if url.host_str().is_none() {
        return Err(IngestError::Config(format!(
            "{} URL must have a valid host",
            context
        )));
    }

    if url.query().is_some() || url.fragment().is_some() {
        return Err(IngestError::Config(format!(
            "{} must not carry a query or fragment",
            context
        )));
    }

    Ok(url)
}
