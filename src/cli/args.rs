//! Argument model

use crate::config::{CliOverrides, LogFormat};
use crate::core::types::{CsvGenerationRequest, CsvUploadRequest, GuidSyntax, ImageLicense};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Batch media ingestion console
#[derive(Debug, Parser)]
#[command(name = "ingest", version, long_version = crate::LONG_VERSION, about)]
pub struct Cli {
    /// YAML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Ingestion service base URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Log filter directive, e.g. `debug` or `ingest_console=trace`
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log output format: text or json
    #[arg(long, global = true)]
    pub log_format: Option<LogFormat>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            base_url: self.base_url.clone(),
            log_level: self.log_level.clone(),
            log_format: self.log_format,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Upload the images listed in a CSV file
    UploadCsv(UploadCsvArgs),
    /// Upload every image under a directory
    UploadDir {
        /// Root directory of the images
        root_path: String,
    },
    /// Resume the last batch; the service retries what did not upload
    Retry {
        /// Resume a directory upload instead of a CSV upload
        #[arg(long)]
        dir: bool,
    },
    /// Show the progress of the current batch
    Status,
    /// List the per-item results of the current batch
    Results,
    /// Show the last batch and whether it needs a retry
    LastBatch,
    /// List past batches, or the records of one batch
    History {
        #[arg(long)]
        batch_id: Option<String>,
    },
    /// Generate a CSV file from a directory of images
    GenerateCsv(GenerateCsvArgs),
    /// Sign in with an account UUID and API key
    Login {
        account_uuid: String,
        #[arg(env = "INGEST_API_KEY", hide_env_values = true)]
        api_key: String,
    },
    /// Sign out and forget stored preferences
    Logout,
    /// Read or change stored preferences
    Pref {
        #[command(subcommand)]
        action: PrefCommand,
    },
    /// List the licenses media can be uploaded under
    Licenses,
}

#[derive(Debug, Subcommand)]
pub enum PrefCommand {
    Get { name: String },
    Set { name: String, value: String },
    Clear,
}

#[derive(Debug, Args)]
pub struct UploadCsvArgs {
    /// CSV file listing the images
    pub csv_path: String,
    /// Defaults to the remembered record set GUID
    #[arg(long)]
    pub record_set_guid: Option<String>,
    #[arg(long)]
    pub license: Option<ImageLicense>,
    #[arg(long)]
    pub media_content_keyword: Option<String>,
    #[arg(long)]
    pub provider_guid: Option<String>,
    #[arg(long)]
    pub publisher_guid: Option<String>,
    #[arg(long)]
    pub funding_source: Option<String>,
    #[arg(long)]
    pub funding_purpose: Option<String>,
}

impl UploadCsvArgs {
    pub fn into_request(self) -> CsvUploadRequest {
        CsvUploadRequest {
            csv_path: self.csv_path,
            record_set_guid: self.record_set_guid.unwrap_or_default(),
            license: self.license.map(|l| l.name().to_string()),
            media_content_keyword: self.media_content_keyword,
            provider_guid: self.provider_guid,
            publisher_guid: self.publisher_guid,
            funding_source: self.funding_source,
            funding_purpose: self.funding_purpose,
        }
    }
}

#[derive(Debug, Args)]
pub struct GenerateCsvArgs {
    /// Directory holding the images
    pub image_dir: String,
    /// Include subdirectories
    #[arg(short, long)]
    pub recursive: bool,
    /// hash, filename or fullpath; defaults to the remembered syntax
    #[arg(long)]
    pub guid_syntax: Option<GuidSyntax>,
    #[arg(long)]
    pub guid_prefix: Option<String>,
    /// Where to write the CSV file
    #[arg(long)]
    pub save_path: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub language: Option<String>,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub digitization_device: Option<String>,
    #[arg(long)]
    pub pixel_resolution: Option<String>,
    #[arg(long)]
    pub magnification: Option<String>,
    #[arg(long)]
    pub ocr_output: Option<String>,
    #[arg(long)]
    pub ocr_technology: Option<String>,
    #[arg(long)]
    pub information_withheld: Option<String>,
    #[arg(long)]
    pub collection_object_guid: Option<String>,
}

impl GenerateCsvArgs {
    pub fn into_request(self, default_syntax: GuidSyntax) -> CsvGenerationRequest {
        CsvGenerationRequest {
            image_dir: self.image_dir,
            recursive: self.recursive,
            guid_syntax: self.guid_syntax.unwrap_or(default_syntax),
            guid_prefix: self.guid_prefix,
            save_path: self.save_path,
            description: self.description,
            language_code: self.language,
            title: self.title,
            digitization_device: self.digitization_device,
            pixel_resolution: self.pixel_resolution,
            magnification: self.magnification,
            ocr_output: self.ocr_output,
            ocr_technology: self.ocr_technology,
            information_withheld: self.information_withheld,
            collection_object_guid: self.collection_object_guid,
        }
    }
}
