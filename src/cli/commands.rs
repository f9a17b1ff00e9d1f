//! Command handlers

use super::args::{Command, GenerateCsvArgs, PrefCommand, UploadCsvArgs};
use super::render::{self, print_events};
use crate::config::Config;
use crate::core::csvgen::CsvGenMonitor;
use crate::core::monitor::{BatchMonitor, BatchOutcome, PollSchedule};
use crate::core::preferences::{PreferenceKey, Preferences};
use crate::core::service::{AuthService, BatchService, HistoryService, HttpIngestClient};
use crate::core::types::{
    Credentials, DirectoryUploadRequest, GuidSyntax, ImageLicense, JobKind, Submission,
};
use crate::utils::error::Result as IngestResult;
use anyhow::{Context, Result, bail};
use std::process::ExitCode;
use std::sync::Arc;
use tokio::sync::mpsc::unbounded_channel;
use tracing::{debug, warn};

/// Run one command against the configured service
pub async fn execute(command: Command, config: &Config) -> Result<ExitCode> {
    let client = Arc::new(
        HttpIngestClient::new(config.service()).context("Failed to create service client")?,
    );
    let console = Console {
        client,
        config: config.clone(),
    };
    console.execute(command).await
}

struct Console {
    client: Arc<HttpIngestClient>,
    config: Config,
}

impl Console {
    async fn execute(&self, command: Command) -> Result<ExitCode> {
        match command {
            Command::UploadCsv(args) => self.upload_csv(args).await,
            Command::UploadDir { root_path } => self.upload_dir(root_path).await,
            Command::Retry { dir } => {
                self.ensure_signed_in().await?;
                let kind = if dir { JobKind::Directory } else { JobKind::Csv };
                self.watch_batch(Submission::Resume(kind)).await
            }
            Command::Status => self.status().await,
            Command::Results => self.results().await,
            Command::LastBatch => self.last_batch().await,
            Command::History { batch_id } => self.history(batch_id).await,
            Command::GenerateCsv(args) => self.generate_csv(args).await,
            Command::Login {
                account_uuid,
                api_key,
            } => self.login(account_uuid, api_key).await,
            Command::Logout => {
                self.preferences()
                    .clear()
                    .await
                    .context("Failed to sign out")?;
                println!("Signed out.");
                Ok(ExitCode::SUCCESS)
            }
            Command::Pref { action } => self.pref(action).await,
            Command::Licenses => {
                println!("{}", render::license_table());
                Ok(ExitCode::SUCCESS)
            }
        }
    }

    fn preferences(&self) -> Preferences<Arc<HttpIngestClient>> {
        Preferences::new(self.client.clone())
    }

    /// Batch commands need a signed-in session unless the check is disabled
    async fn ensure_signed_in(&self) -> Result<()> {
        if self.preferences().startup_check_disabled().await? {
            debug!("Startup service check disabled");
            return Ok(());
        }
        let signed_in = self
            .client
            .is_signed_in()
            .await
            .context("Could not reach the ingestion service")?;
        if !signed_in {
            bail!("Not signed in. Run `ingest login <account-uuid> <api-key>` first.");
        }
        Ok(())
    }

    /// Print the warning for an unfinished previous batch, if there is one
    async fn warn_unfinished_last_batch(&self) {
        match self.client.last_batch().await {
            Ok(info) => {
                if let Some(warning) = info.unfinished_warning() {
                    println!("{}", warning);
                }
            }
            Err(e) => warn!("Could not read last batch info: {}", e),
        }
    }

    async fn upload_csv(&self, args: UploadCsvArgs) -> Result<ExitCode> {
        self.ensure_signed_in().await?;
        self.warn_unfinished_last_batch().await;

        let prefs = self.preferences();
        let request = prefs.complete_upload(args.into_request()).await?;
        if let Some(license) = request
            .license
            .as_deref()
            .and_then(|l| l.parse::<ImageLicense>().ok())
        {
            println!("{}", license.notice());
        }
        if request.validate().is_ok() {
            prefs.remember_upload(&request).await?;
        }

        self.watch_batch(Submission::New(request.into())).await
    }

    async fn upload_dir(&self, root_path: String) -> Result<ExitCode> {
        self.ensure_signed_in().await?;
        self.warn_unfinished_last_batch().await;
        self.watch_batch(Submission::New(DirectoryUploadRequest::new(root_path).into()))
            .await
    }

    /// Drive a batch to a terminal state while printing its events
    async fn watch_batch(&self, submission: Submission) -> Result<ExitCode> {
        let kind = submission.kind();
        let (tx, rx) = unbounded_channel();
        let printer = tokio::spawn(print_events(rx));

        let result = {
            let mut monitor = BatchMonitor::new(
                self.client.clone(),
                PollSchedule::from_config(self.config.polling()),
                tx,
            );
            match submission {
                Submission::New(request) => monitor.submit_and_watch(request).await,
                Submission::Resume(kind) => monitor.retry_and_watch(kind).await,
            }
        };
        printer.await.context("Event printer failed")?;

        if let Ok(outcome) = &result {
            if outcome.retry_offered() {
                println!("{}", render::retry_hint(kind == JobKind::Directory));
            }
        }
        Ok(batch_exit_code(&result))
    }

    async fn status(&self) -> Result<ExitCode> {
        let status = self.client.status().await?;
        println!("[{:>3}%] {}", status.percent(), status.progress_text());
        println!(
            "{}",
            if status.finished {
                "Finished."
            } else {
                "Running."
            }
        );
        Ok(ExitCode::SUCCESS)
    }

    async fn results(&self) -> Result<ExitCode> {
        for row in self.client.results().await? {
            println!("{}", row);
        }
        Ok(ExitCode::SUCCESS)
    }

    async fn last_batch(&self) -> Result<ExitCode> {
        let info = self.client.last_batch().await?;
        if !info.exists() {
            println!("No upload has been run yet.");
        } else if let Some(warning) = info.unfinished_warning() {
            println!("{}", warning);
            println!("{}", render::retry_hint(false));
        } else {
            println!(
                "Last upload from {} started at {} finished.",
                info.path.as_deref().unwrap_or("(unknown)"),
                info.start_time.as_deref().unwrap_or("(unknown)")
            );
        }
        Ok(ExitCode::SUCCESS)
    }

    async fn history(&self, batch_id: Option<String>) -> Result<ExitCode> {
        match batch_id {
            Some(id) => {
                for row in self.client.batch_records(&id).await? {
                    println!("{}", row);
                }
            }
            None => {
                for entry in self.client.batches().await? {
                    println!("{}", entry);
                }
            }
        }
        Ok(ExitCode::SUCCESS)
    }

    async fn generate_csv(&self, args: GenerateCsvArgs) -> Result<ExitCode> {
        let prefs = self.preferences();
        let default_syntax = prefs.guid_syntax().await?.unwrap_or_default();
        let request = args.into_request(default_syntax);
        let syntax: GuidSyntax = request.guid_syntax;

        let (tx, rx) = unbounded_channel();
        let printer = tokio::spawn(print_events(rx));
        let result = {
            let mut monitor = CsvGenMonitor::new(
                self.client.clone(),
                PollSchedule::csv_generation(self.config.polling()),
                tx,
            );
            monitor.generate(request).await
        };
        printer.await.context("Event printer failed")?;

        match result {
            Ok(outcome) if !outcome.is_failure() => {
                prefs.set(PreferenceKey::IdSyntax, syntax.as_str()).await?;
                Ok(ExitCode::SUCCESS)
            }
            _ => Ok(ExitCode::FAILURE),
        }
    }

    async fn login(&self, account_uuid: String, api_key: String) -> Result<ExitCode> {
        let credentials = Credentials::new(account_uuid, api_key);
        credentials.validate()?;
        self.client
            .sign_in(&credentials.account_uuid, &credentials.api_key)
            .await?;
        println!("Signed in as {}.", credentials.account_uuid);
        Ok(ExitCode::SUCCESS)
    }

    async fn pref(&self, action: PrefCommand) -> Result<ExitCode> {
        let prefs = self.preferences();
        match action {
            PrefCommand::Get { name } => match prefs.get_named(&name).await? {
                Some(value) => println!("{}", value),
                None => {
                    println!("{} is not set.", name);
                    return Ok(ExitCode::FAILURE);
                }
            },
            PrefCommand::Set { name, value } => prefs.set_named(&name, &value).await?,
            PrefCommand::Clear => prefs.clear().await?,
        }
        Ok(ExitCode::SUCCESS)
    }
}

/// Whether a watched batch should make the command fail
pub fn batch_failed(result: &IngestResult<BatchOutcome>) -> bool {
    match result {
        Ok(outcome) => outcome.is_failure(),
        Err(_) => true,
    }
}

fn batch_exit_code(result: &IngestResult<BatchOutcome>) -> ExitCode {
    if batch_failed(result) {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
