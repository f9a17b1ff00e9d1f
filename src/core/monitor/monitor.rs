use super::events::{Alert, EventSender, MonitorEvent};
use super::outcome::BatchOutcome;
use super::schedule::PollSchedule;
use super::state::MonitorState;
use crate::core::service::BatchService;
use crate::core::types::{BatchStatus, JobKind, Submission, SubmissionAck, UploadRequest};
use crate::utils::error::{IngestError, Result};
use tracing::{debug, info, warn};

/// Result of handling one status poll
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollStep {
    /// Still running; poll again after the next delay
    Continue,
    Finished(BatchOutcome),
}

/// Batch progress monitor
///
/// Holds the state of one batch at a time. Every method takes `&mut self`, so
/// polls can never overlap and each one is issued only after the previous
/// response was handled.
pub struct BatchMonitor<S> {
    service: S,
    schedule: PollSchedule,
    events: EventSender,
    state: MonitorState,
    form_enabled: bool,
    last_kind: Option<JobKind>,
    last_status: Option<BatchStatus>,
    polls_done: u32,
}

impl<S: BatchService> BatchMonitor<S> {
    /// Create
    pub fn new(service: S, schedule: PollSchedule, events: EventSender) -> Self {
        Self {
            service,
            schedule,
            events,
            state: MonitorState::Idle,
            form_enabled: true,
            last_kind: None,
            last_status: None,
            polls_done: 0,
        }
    }

    pub fn state(&self) -> &MonitorState {
        &self.state
    }

    pub fn form_enabled(&self) -> bool {
        self.form_enabled
    }

    /// Most recent status read for the current batch
    pub fn last_status(&self) -> Option<&BatchStatus> {
        self.last_status.as_ref()
    }

    /// Status polls issued for the current batch
    pub fn polls_done(&self) -> u32 {
        self.polls_done
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Submit a new batch
    ///
    /// Local validation failures and service rejections are reported as an
    /// alert and leave the form enabled.
    pub async fn submit(&mut self, request: UploadRequest) -> Result<SubmissionAck> {
        self.ensure_ready()?;
        if let Err(e) = request.validate() {
            self.emit(MonitorEvent::Alert(Alert::error(e.to_string())));
            return Err(e);
        }
        self.start(Submission::New(request)).await
    }

    /// Ask the service to resume a batch of the given kind
    ///
    /// The service decides which items remain; nothing is re-sent.
    pub async fn retry(&mut self, kind: JobKind) -> Result<SubmissionAck> {
        self.ensure_ready()?;
        self.start(Submission::Resume(kind)).await
    }

    /// Resume the batch this monitor submitted last
    pub async fn retry_last(&mut self) -> Result<SubmissionAck> {
        let kind = self
            .last_kind
            .ok_or_else(|| IngestError::invalid_state("No batch has been submitted yet"))?;
        self.retry(kind).await
    }

    /// Submit and poll until the batch reaches a terminal state
    pub async fn submit_and_watch(&mut self, request: UploadRequest) -> Result<BatchOutcome> {
        self.submit(request).await?;
        self.run().await
    }

    /// Resume and poll until the batch reaches a terminal state
    pub async fn retry_and_watch(&mut self, kind: JobKind) -> Result<BatchOutcome> {
        self.retry(kind).await?;
        self.run().await
    }

    /// Poll on the schedule until the batch finishes
    pub async fn run(&mut self) -> Result<BatchOutcome> {
        loop {
            tokio::time::sleep(self.schedule.delay_before(self.polls_done)).await;
            if let PollStep::Finished(outcome) = self.poll().await? {
                return Ok(outcome);
            }
        }
    }

    /// Read the status once and act on it
    pub async fn poll(&mut self) -> Result<PollStep> {
        if self.state != MonitorState::Polling {
            return Err(IngestError::invalid_state(format!(
                "Cannot poll while {}",
                self.state
            )));
        }

        self.polls_done += 1;
        let status = match self.service.status().await {
            Ok(status) => status,
            Err(e) => return Ok(self.abort(e)),
        };

        if !status.is_consistent() {
            warn!(
                "Inconsistent batch status: {} processed of {}",
                status.processed(),
                status.total
            );
        }
        debug!("Poll {}: {}", self.polls_done, status.progress_text());
        self.emit(MonitorEvent::Progress {
            percent: status.percent(),
            text: status.progress_text(),
            status: Some(status.clone()),
        });
        self.last_status = Some(status.clone());

        let Some(outcome) = BatchOutcome::classify(&status) else {
            return Ok(PollStep::Continue);
        };

        if status.finished && status.total > 0 {
            match self.service.results().await {
                Ok(rows) => {
                    info!("Fetched {} result rows", rows.len());
                    self.emit(MonitorEvent::Results(rows));
                }
                Err(e) => return Ok(self.abort(e)),
            }
        }

        let outcome = match outcome {
            BatchOutcome::Empty { .. } => BatchOutcome::Empty {
                error_code: self.empty_batch_error_code().await,
            },
            other => other,
        };

        self.emit(MonitorEvent::Alert(outcome.alert(&status)));
        self.finish(outcome.clone());
        Ok(PollStep::Finished(outcome))
    }

    fn ensure_ready(&self) -> Result<()> {
        if self.state.is_busy() {
            return Err(IngestError::invalid_state(format!(
                "A batch is already {}",
                self.state
            )));
        }
        Ok(())
    }

    async fn start(&mut self, submission: Submission) -> Result<SubmissionAck> {
        let kind = submission.kind();
        self.set_state(MonitorState::Submitting);

        match self.service.submit(&submission).await {
            Ok(ack) => {
                info!(
                    "{} batch submitted{}",
                    kind,
                    if ack.resumed { " for resume" } else { "" }
                );
                self.last_kind = Some(kind);
                self.last_status = None;
                self.polls_done = 0;
                self.set_form_enabled(false);
                self.set_state(MonitorState::Polling);
                Ok(ack)
            }
            Err(e) => {
                warn!("Submission failed: {}", e);
                self.emit(MonitorEvent::Alert(Alert::error(format!("Error! {}", e))));
                self.set_state(MonitorState::Idle);
                Err(e)
            }
        }
    }

    /// Error code the service recorded for an empty batch, if any
    async fn empty_batch_error_code(&self) -> Option<String> {
        match self.service.last_batch().await {
            Ok(info) => info.error_code.filter(|code| !code.trim().is_empty()),
            Err(e) => {
                warn!("Could not read last batch info: {}", e);
                None
            }
        }
    }

    fn abort(&mut self, error: IngestError) -> PollStep {
        warn!("Polling stopped: {}", error);
        self.emit(MonitorEvent::Alert(Alert::error(format!("Error! {}", error))));
        self.finish(BatchOutcome::Aborted);
        PollStep::Finished(BatchOutcome::Aborted)
    }

    fn finish(&mut self, outcome: BatchOutcome) {
        info!("Batch finished: {}", outcome);
        self.set_form_enabled(true);
        self.set_state(MonitorState::Finished(outcome));
    }

    fn set_state(&mut self, state: MonitorState) {
        if self.state != state {
            self.state = state.clone();
            self.emit(MonitorEvent::StateChanged(state));
        }
    }

    fn set_form_enabled(&mut self, enabled: bool) {
        if self.form_enabled != enabled {
            self.form_enabled = enabled;
            self.emit(MonitorEvent::FormEnabled(enabled));
        }
    }

    fn emit(&self, event: MonitorEvent) {
        // A dropped receiver only means nobody is watching
        let _ = self.events.send(event);
    }
}
