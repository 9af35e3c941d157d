// ABOUTME: Application state for the terminal host: config, the demo modal, and the
// channel that carries submission outcomes back to the UI loop

use anyhow::Result;
use chrono::NaiveDate;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::modal_host::{DemoModal, ModalHost};
use crate::components::demo_wizard::{submit_with_timeout, SubmissionError, WizardServices};
use crate::config::AppConfig;
use crate::models::{BookingConfirmation, CalendarMonth};

/// Work that must run outside the synchronous key handler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AsyncAction {
    SubmitBooking,
}

/// Result of one spawned submission, tagged with its request id
#[derive(Debug, Clone)]
pub struct SubmissionOutcome {
    pub request_id: Uuid,
    pub result: Result<BookingConfirmation, SubmissionError>,
}

pub struct AppState {
    pub config: AppConfig,
    pub modal_host: ModalHost,
    pub pending_async_action: Option<AsyncAction>,
    pub should_quit: bool,
    submission_tx: mpsc::UnboundedSender<SubmissionOutcome>,
    submission_rx: mpsc::UnboundedReceiver<SubmissionOutcome>,
}

impl AppState {
    pub fn new(config: AppConfig, today: NaiveDate) -> Self {
        let services = config.wizard_services();
        let initial_month = config.initial_month(today);
        Self::with_services(config, services, initial_month)
    }

    /// Build with explicit wizard collaborators, e.g. a mock submitter in tests
    pub fn with_services(
        config: AppConfig,
        services: WizardServices,
        initial_month: CalendarMonth,
    ) -> Self {
        let (submission_tx, submission_rx) = mpsc::unbounded_channel();
        Self {
            config,
            modal_host: ModalHost::new(services, initial_month),
            pending_async_action: None,
            should_quit: false,
            submission_tx,
            submission_rx,
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn modal(&self) -> Option<&DemoModal> {
        self.modal_host.modal()
    }

    pub fn modal_mut(&mut self) -> Option<&mut DemoModal> {
        self.modal_host.modal_mut()
    }

    pub fn is_submitting(&self) -> bool {
        self.modal()
            .is_some_and(|modal| modal.controller().is_submitting())
    }

    pub async fn process_async_action(&mut self) -> Result<()> {
        let Some(action) = self.pending_async_action.take() else {
            return Ok(());
        };
        debug!("Processing async action: {:?}", action);

        match action {
            AsyncAction::SubmitBooking => self.start_submission(),
        }
    }

    /// Begin a submission on the open wizard and run it on the runtime.
    ///
    /// The outcome comes back through the submission channel; see
    /// `poll_submission_results`.
    fn start_submission(&mut self) -> Result<()> {
        let Some(modal) = self.modal_host.modal_mut() else {
            warn!("Submit requested with no demo modal open");
            return Ok(());
        };

        let controller = modal.controller_mut();
        let request = match controller.begin_submission() {
            Ok(request) => request,
            Err(e) => {
                // Validation failures are already on the wizard as a notice
                info!("Submission not started: {}", e);
                return Ok(());
            }
        };

        let submitter = controller.submitter();
        let timeout = controller.submission_timeout();
        let tx = self.submission_tx.clone();
        let request_id = request.request_id;

        tokio::spawn(async move {
            let result = submit_with_timeout(submitter.as_ref(), request, timeout).await;
            if tx.send(SubmissionOutcome { request_id, result }).is_err() {
                warn!(%request_id, "Submission finished after the app shut down");
            }
        });

        Ok(())
    }

    /// Apply every outcome that has arrived without blocking; returns how many were applied
    pub fn poll_submission_results(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(outcome) = self.submission_rx.try_recv() {
            if self.apply_outcome(outcome) {
                applied += 1;
            }
        }
        applied
    }

    /// Wait for the next outcome and apply it; `false` if it was stale
    pub async fn await_submission_result(&mut self) -> bool {
        match self.submission_rx.recv().await {
            Some(outcome) => self.apply_outcome(outcome),
            None => false,
        }
    }

    fn apply_outcome(&mut self, outcome: SubmissionOutcome) -> bool {
        let SubmissionOutcome { request_id, result } = outcome;
        match self.modal_host.modal_mut() {
            Some(modal) => modal.controller_mut().complete_submission(request_id, result),
            None => {
                warn!(%request_id, "Dropping submission outcome: demo modal is closed");
                false
            }
        }
    }
}

pub struct App {
    pub state: AppState,
}

impl App {
    pub fn new(config: AppConfig, today: NaiveDate) -> Self {
        Self {
            state: AppState::new(config, today),
        }
    }

    pub async fn tick(&mut self) -> Result<()> {
        if let Err(e) = self.state.process_async_action().await {
            warn!("Error processing async action: {}", e);
            self.state.pending_async_action = None;
        }

        self.state.poll_submission_results();
        Ok(())
    }
}
