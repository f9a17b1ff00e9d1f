use crate::utils::error::{IngestError, Result};
use serde::{Deserialize, Serialize};

/// Shortest accepted account UUID / API key
pub const MIN_CREDENTIAL_LEN: usize = 32;
/// Longest accepted account UUID / API key
pub const MAX_CREDENTIAL_LEN: usize = 36;

/// Message shown when the service rejects the pair
pub const WRONG_COMBINATION: &str = "Wrong Account UUID and API Key combination.";

/// Account credentials for the upload service
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(rename = "accountuuid")]
    pub account_uuid: String,
    #[serde(rename = "apikey")]
    pub api_key: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("account_uuid", &self.account_uuid)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    /// Create
    pub fn new(account_uuid: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            account_uuid: account_uuid.into().trim().to_string(),
            api_key: api_key.into().trim().to_string(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        check_length("Account UUID", &self.account_uuid)?;
        check_length("API Key", &self.api_key)
    }
}

fn check_length(field: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(IngestError::validation(format!("{} is required.", field)));
    }
    let len = value.chars().count();
    if !(MIN_CREDENTIAL_LEN..=MAX_CREDENTIAL_LEN).contains(&len) {
        return Err(IngestError::validation(format!(
            "{} must be between {} and {} characters long.",
            field, MIN_CREDENTIAL_LEN, MAX_CREDENTIAL_LEN
        )));
    }
    Ok(())
}
