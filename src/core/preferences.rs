//! Typed access to the service-side user preferences

use crate::core::service::PreferenceService;
use crate::core::types::{CsvUploadRequest, GuidSyntax, ImageLicense};
use crate::utils::error::Result;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Preference names the console reads and writes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreferenceKey {
    AccountUuid,
    RecordSetGuid,
    ImageLicense,
    MediaContentKeyword,
    ProviderGuid,
    PublisherGuid,
    FundingSource,
    FundingPurpose,
    IdSyntax,
    DisableStartupCheck,
}

impl PreferenceKey {
    pub fn all() -> [PreferenceKey; 10] {
        [
            PreferenceKey::AccountUuid,
            PreferenceKey::RecordSetGuid,
            PreferenceKey::ImageLicense,
            PreferenceKey::MediaContentKeyword,
            PreferenceKey::ProviderGuid,
            PreferenceKey::PublisherGuid,
            PreferenceKey::FundingSource,
            PreferenceKey::FundingPurpose,
            PreferenceKey::IdSyntax,
            PreferenceKey::DisableStartupCheck,
        ]
    }

    /// Name stored by the service
    pub fn as_str(&self) -> &'static str {
        match self {
            PreferenceKey::AccountUuid => "accountuuid",
            PreferenceKey::RecordSetGuid => "rsguid",
            PreferenceKey::ImageLicense => "imagelicense",
            PreferenceKey::MediaContentKeyword => "mediaContentKeyword",
            PreferenceKey::ProviderGuid => "iDigbioProviderGUID",
            PreferenceKey::PublisherGuid => "iDigbioPublisherGUID",
            PreferenceKey::FundingSource => "fundingSource",
            PreferenceKey::FundingPurpose => "fundingPurpose",
            PreferenceKey::IdSyntax => "idsyntax",
            PreferenceKey::DisableStartupCheck => "devmode_disable_startup_service_check",
        }
    }
}

impl fmt::Display for PreferenceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PreferenceKey {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        PreferenceKey::all()
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown preference '{}'", s))
    }
}

/// Preference store backed by the ingestion service
pub struct Preferences<P> {
    service: P,
}

impl<P: PreferenceService> Preferences<P> {
    pub fn new(service: P) -> Self {
        Self { service }
    }

    pub async fn get(&self, key: PreferenceKey) -> Result<Option<String>> {
        self.get_named(key.as_str()).await
    }

    pub async fn set(&self, key: PreferenceKey, value: &str) -> Result<()> {
        self.set_named(key.as_str(), value).await
    }

    /// Read any preference by its stored name; blank values count as unset
    pub async fn get_named(&self, name: &str) -> Result<Option<String>> {
        let value = self.service.get_preference(name).await?;
        Ok(value.filter(|v| !v.trim().is_empty()))
    }

    pub async fn set_named(&self, name: &str, value: &str) -> Result<()> {
        debug!("Setting preference {}", name);
        self.service.set_preference(name, value).await
    }

    /// Forget everything, which also signs the user out
    pub async fn clear(&self) -> Result<()> {
        self.service.clear_preferences().await
    }

    /// Whether batch commands skip the sign-in check
    pub async fn startup_check_disabled(&self) -> Result<bool> {
        Ok(self
            .get(PreferenceKey::DisableStartupCheck)
            .await?
            .is_some_and(|v| v.trim().eq_ignore_ascii_case("true")))
    }

    pub async fn license(&self) -> Result<Option<ImageLicense>> {
        Ok(self
            .get(PreferenceKey::ImageLicense)
            .await?
            .and_then(|name| name.parse().ok()))
    }

    pub async fn guid_syntax(&self) -> Result<Option<GuidSyntax>> {
        Ok(self
            .get(PreferenceKey::IdSyntax)
            .await?
            .and_then(|name| name.parse().ok()))
    }

    /// Store the values of a CSV upload for next time
    pub async fn remember_upload(&self, request: &CsvUploadRequest) -> Result<()> {
        let entries = [
            (PreferenceKey::RecordSetGuid, Some(&request.record_set_guid)),
            (PreferenceKey::ImageLicense, request.license.as_ref()),
            (
                PreferenceKey::MediaContentKeyword,
                request.media_content_keyword.as_ref(),
            ),
            (PreferenceKey::ProviderGuid, request.provider_guid.as_ref()),
            (PreferenceKey::PublisherGuid, request.publisher_guid.as_ref()),
            (PreferenceKey::FundingSource, request.funding_source.as_ref()),
            (PreferenceKey::FundingPurpose, request.funding_purpose.as_ref()),
        ];
        for (key, value) in entries {
            if let Some(value) = value {
                self.set(key, value).await?;
            }
        }
        Ok(())
    }

    /// Fill fields the caller left out with remembered values
    pub async fn complete_upload(&self, mut request: CsvUploadRequest) -> Result<CsvUploadRequest> {
        if request.record_set_guid.trim().is_empty() {
            if let Some(guid) = self.get(PreferenceKey::RecordSetGuid).await? {
                request.record_set_guid = guid;
            }
        }

        let optional = [
            (PreferenceKey::ImageLicense, &mut request.license),
            (
                PreferenceKey::MediaContentKeyword,
                &mut request.media_content_keyword,
            ),
            (PreferenceKey::ProviderGuid, &mut request.provider_guid),
            (PreferenceKey::PublisherGuid, &mut request.publisher_guid),
            (PreferenceKey::FundingSource, &mut request.funding_source),
            (PreferenceKey::FundingPurpose, &mut request.funding_purpose),
        ];
        for (key, field) in optional {
            if field.is_none() {
                *field = self.get(key).await?;
            }
        }
        Ok(request)
    }
}
