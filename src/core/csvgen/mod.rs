//! CSV generation progress monitor
//!
//! Same control loop as the batch monitor, with a flat poll interval and a
//! simpler terminal classification.

use crate::core::monitor::{
    Alert, AlertLevel, EventSender, MonitorEvent, MonitorState, PollSchedule,
};
use crate::core::service::CsvGenService;
use crate::core::types::{CsvGenState, CsvGenStatus, CsvGenerationRequest};
use crate::utils::error::{IngestError, Result};
use std::fmt;
use tracing::{debug, info, warn};

/// How a generation run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CsvGenOutcome {
    Saved { target_file: String },
    Failed { error: String },
    /// Polling stopped on a transport error
    Aborted,
}

impl CsvGenOutcome {
    pub fn is_failure(&self) -> bool {
        !matches!(self, CsvGenOutcome::Saved { .. })
    }
}

impl fmt::Display for CsvGenOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CsvGenOutcome::Saved { target_file } => write!(f, "saved to {}", target_file),
            CsvGenOutcome::Failed { error } => write!(f, "failed: {}", error),
            CsvGenOutcome::Aborted => write!(f, "aborted"),
        }
    }
}

pub struct CsvGenMonitor<G> {
    service: G,
    schedule: PollSchedule,
    events: EventSender,
    state: MonitorState,
    polls_done: u32,
}

impl<G: CsvGenService> CsvGenMonitor<G> {
    /// Create
    pub fn new(service: G, schedule: PollSchedule, events: EventSender) -> Self {
        Self {
            service,
            schedule,
            events,
            state: MonitorState::Idle,
            polls_done: 0,
        }
    }

    pub fn is_running(&self) -> bool {
        self.state.is_busy()
    }

    /// Idle between runs; generation outcomes are returned, not stored
    pub fn state(&self) -> &MonitorState {
        &self.state
    }

    pub fn polls_done(&self) -> u32 {
        self.polls_done
    }

    /// Start a generation run and poll until it ends
    pub async fn generate(&mut self, request: CsvGenerationRequest) -> Result<CsvGenOutcome> {
        if self.is_running() {
            return Err(IngestError::invalid_state(
                "A CSV generation run is already in progress",
            ));
        }
        let request = request.normalized();
        if let Err(e) = request.validate() {
            self.emit(MonitorEvent::Alert(Alert::error(e.to_string())));
            return Err(e);
        }

        self.set_state(MonitorState::Submitting);
        if let Err(e) = self.service.start_generation(&request).await {
            warn!("CSV generation request failed: {}", e);
            self.set_state(MonitorState::Idle);
            self.emit(MonitorEvent::Alert(Alert::error(format!("Error: {}", e))));
            return Err(e);
        }

        info!("CSV generation started for {}", request.image_dir);
        self.set_state(MonitorState::Polling);
        self.polls_done = 0;
        self.emit(MonitorEvent::FormEnabled(false));

        loop {
            tokio::time::sleep(self.schedule.delay_before(self.polls_done)).await;
            if let Some(outcome) = self.poll().await {
                return Ok(outcome);
            }
        }
    }

    /// `None` while generation is still running
    async fn poll(&mut self) -> Option<CsvGenOutcome> {
        self.polls_done += 1;
        let status: CsvGenStatus = match self.service.generation_status().await {
            Ok(status) => status,
            Err(e) => {
                warn!("CSV generation polling stopped: {}", e);
                self.emit(MonitorEvent::Alert(Alert::error(format!("Error: {}", e))));
                return Some(self.finish(CsvGenOutcome::Aborted));
            }
        };

        debug!("CSV generation poll {}: {} files", self.polls_done, status.count);
        self.emit(MonitorEvent::Progress {
            percent: 0,
            text: status.progress_text(),
            status: None,
        });

        let outcome = match status.state() {
            CsvGenState::Running => return None,
            CsvGenState::Saved { target_file } => {
                self.emit(MonitorEvent::Alert(Alert::new(
                    AlertLevel::Success,
                    format!("The CSV file is successfully saved to: {}", target_file),
                )));
                CsvGenOutcome::Saved { target_file }
            }
            CsvGenState::Failed { error } => {
                self.emit(MonitorEvent::Alert(Alert::error(format!("Error: {}", error))));
                CsvGenOutcome::Failed { error }
            }
        };
        Some(self.finish(outcome))
    }

    fn finish(&mut self, outcome: CsvGenOutcome) -> CsvGenOutcome {
        info!("CSV generation {}", outcome);
        self.set_state(MonitorState::Idle);
        self.emit(MonitorEvent::FormEnabled(true));
        outcome
    }

    fn set_state(&mut self, state: MonitorState) {
        if self.state != state {
            self.state = state.clone();
            self.emit(MonitorEvent::StateChanged(state));
        }
    }

    fn emit(&self, event: MonitorEvent) {
        let _ = self.events.send(event);
    }
}
