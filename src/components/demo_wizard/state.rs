// ABOUTME: State machine for the schedule-a-demo wizard
// Owns the current step and the booking draft, and gates every transition on its precondition

use chrono::NaiveDate;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::error::{SubmissionError, ValidationError, WizardError};
use super::submission::{
    submit_with_timeout, SimulatedSubmitter, Submitter, DEFAULT_SUBMISSION_TIMEOUT,
};
use super::validator::{BookingFormValidator, VALIDATION_DESCRIPTION, VALIDATION_TITLE};
use crate::models::{
    BookingConfirmation, BookingDraft, BookingRequest, CalendarCell, CalendarMonth, ContactInfo,
    DateAvailability, MinimumDayOfMonth, StaticSlotCatalog, TimeSlot, TimeSlotCatalog,
};

/// Steps in the demo wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WizardStep {
    DateSelection,
    TimeSelection,
    DetailsForm,
    Success,
}

impl WizardStep {
    /// Get all steps in order
    pub const fn all() -> &'static [Self] {
        &[
            Self::DateSelection,
            Self::TimeSelection,
            Self::DetailsForm,
            Self::Success,
        ]
    }

    /// Get the step number (1-indexed for display)
    pub const fn number(&self) -> usize {
        match self {
            Self::DateSelection => 1,
            Self::TimeSelection => 2,
            Self::DetailsForm => 3,
            Self::Success => 4,
        }
    }

    pub const fn total() -> usize {
        4
    }

    /// Short title used in the progress header
    pub const fn title(&self) -> &'static str {
        match self {
            Self::DateSelection => "Date",
            Self::TimeSelection => "Time",
            Self::DetailsForm => "Details",
            Self::Success => "Confirmed",
        }
    }

    pub const fn description(&self) -> &'static str {
        match self {
            Self::DateSelection => "Select a Date & Time",
            Self::TimeSelection => "Select a Date & Time",
            Self::DetailsForm => "Basic Details",
            Self::Success => "Demo Successfully Scheduled!",
        }
    }

    /// Forward edge of the transition table
    pub const fn next(&self) -> Option<Self> {
        match self {
            Self::DateSelection => Some(Self::TimeSelection),
            Self::TimeSelection => Some(Self::DetailsForm),
            Self::DetailsForm => Some(Self::Success),
            Self::Success => None,
        }
    }

    /// Backward edge of the transition table; `Success` is terminal
    pub const fn previous(&self) -> Option<Self> {
        match self {
            Self::DateSelection | Self::Success => None,
            Self::TimeSelection => Some(Self::DateSelection),
            Self::DetailsForm => Some(Self::TimeSelection),
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// User-visible notice raised by the last action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardNotice {
    Validation(ValidationError),
    SubmissionFailed(SubmissionError),
    Scheduled { date: NaiveDate, time: TimeSlot },
}

impl WizardNotice {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Validation(_) => VALIDATION_TITLE,
            Self::SubmissionFailed(_) => "Could not schedule demo",
            Self::Scheduled { .. } => "Demo Scheduled Successfully!",
        }
    }

    pub fn description(&self) -> String {
        match self {
            Self::Validation(error) if error.invalid_email.is_some() => error.to_string(),
            Self::Validation(_) => VALIDATION_DESCRIPTION.to_string(),
            Self::SubmissionFailed(error) => format!("{error}. Please try again."),
            Self::Scheduled { date, time } => {
                format!("Your demo is scheduled for {date} at {time}")
            }
        }
    }

    pub const fn is_error(&self) -> bool {
        !matches!(self, Self::Scheduled { .. })
    }
}

/// Collaborators injected into each wizard session
#[derive(Clone)]
pub struct WizardServices {
    pub availability: Arc<dyn DateAvailability>,
    pub catalog: Arc<dyn TimeSlotCatalog>,
    pub validator: BookingFormValidator,
    pub submitter: Arc<dyn Submitter>,
    pub submission_timeout: Duration,
}

impl WizardServices {
    /// The placeholder rules used on the marketing site
    pub fn reference() -> Self {
        Self {
            availability: Arc::new(MinimumDayOfMonth::default()),
            catalog: Arc::new(StaticSlotCatalog::reference()),
            validator: BookingFormValidator::new(),
            submitter: Arc::new(SimulatedSubmitter::default()),
            submission_timeout: DEFAULT_SUBMISSION_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_submitter(mut self, submitter: Arc<dyn Submitter>) -> Self {
        self.submitter = submitter;
        self
    }

    #[must_use]
    pub fn with_catalog(mut self, catalog: Arc<dyn TimeSlotCatalog>) -> Self {
        self.catalog = catalog;
        self
    }

    #[must_use]
    pub fn with_availability(mut self, availability: Arc<dyn DateAvailability>) -> Self {
        self.availability = availability;
        self
    }

    #[must_use]
    pub fn with_submission_timeout(mut self, timeout: Duration) -> Self {
        self.submission_timeout = timeout;
        self
    }
}

impl Default for WizardServices {
    fn default() -> Self {
        Self::reference()
    }
}

impl fmt::Debug for WizardServices {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WizardServices")
            .field("validator", &self.validator)
            .field("submission_timeout", &self.submission_timeout)
            .finish_non_exhaustive()
    }
}

/// One wizard session: current step, booking draft, and displayed month.
///
/// All mutation goes through these methods. Calls made out of precondition
/// return a `WizardError` and leave state untouched.
pub struct WizardController {
    step: WizardStep,
    draft: BookingDraft,
    calendar: CalendarMonth,
    initial_month: CalendarMonth,
    services: WizardServices,
    pending_request: Option<Uuid>,
    confirmation: Option<BookingConfirmation>,
    notice: Option<WizardNotice>,
}

impl WizardController {
    pub fn new(services: WizardServices, initial_month: CalendarMonth) -> Self {
        Self {
            step: WizardStep::DateSelection,
            draft: BookingDraft::default(),
            calendar: initial_month,
            initial_month,
            services,
            pending_request: None,
            confirmation: None,
            notice: None,
        }
    }

    pub const fn step(&self) -> WizardStep {
        self.step
    }

    pub const fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    pub const fn calendar_month(&self) -> CalendarMonth {
        self.calendar
    }

    pub const fn is_submitting(&self) -> bool {
        self.pending_request.is_some()
    }

    pub const fn confirmation(&self) -> Option<&BookingConfirmation> {
        self.confirmation.as_ref()
    }

    pub const fn notice(&self) -> Option<&WizardNotice> {
        self.notice.as_ref()
    }

    pub fn submitter(&self) -> Arc<dyn Submitter> {
        Arc::clone(&self.services.submitter)
    }

    pub const fn submission_timeout(&self) -> Duration {
        self.services.submission_timeout
    }

    /// Cells for the displayed month
    pub fn calendar_cells(&self) -> Vec<CalendarCell> {
        self.calendar.cells(self.services.availability.as_ref())
    }

    /// Slots offered for the selected date; empty when no date is chosen
    pub fn available_slots(&self) -> Vec<TimeSlot> {
        self.draft
            .selected_date
            .map(|date| self.services.catalog.list_slots(date))
            .unwrap_or_default()
    }

    /// Fails unless the wizard is on `expected` with no submission pending
    pub fn require_step(&self, expected: WizardStep, action: &'static str) -> Result<(), WizardError> {
        if self.is_submitting() {
            return Err(WizardError::SubmissionInFlight);
        }
        if self.step != expected {
            debug!(step = %self.step, action, "Rejected out-of-step wizard action");
            return Err(WizardError::InvalidTransition {
                step: self.step,
                action,
            });
        }
        Ok(())
    }

    /// Store a date while on the date step. Does not advance.
    pub fn select_date(&mut self, date: NaiveDate) -> Result<(), WizardError> {
        self.require_step(WizardStep::DateSelection, "select a date")?;

        if !self.services.availability.is_available(date) {
            debug!(%date, "Rejected unavailable date");
            return Err(WizardError::UnavailableDate { date });
        }

        // A previously chosen time survives only if the new date still offers it
        if let Some(time) = self.draft.selected_time {
            if !self.services.catalog.offers(date, time) {
                self.draft.selected_time = None;
            }
        }

        self.draft.selected_date = Some(date);
        if !self.calendar.contains(date) {
            self.calendar = CalendarMonth::containing(date);
        }
        info!(%date, "Demo date selected");
        Ok(())
    }

    /// Select a day of the displayed month
    pub fn select_day(&mut self, day: u32) -> Result<(), WizardError> {
        self.require_step(WizardStep::DateSelection, "select a date")?;
        let date = self
            .calendar
            .date_for_day(day)
            .ok_or_else(|| WizardError::NoSuchDay {
                day,
                month: self.calendar.title(),
            })?;
        self.select_date(date)
    }

    pub fn previous_month(&mut self) -> Result<(), WizardError> {
        self.require_step(WizardStep::DateSelection, "change month")?;
        self.calendar = self.calendar.previous();
        Ok(())
    }

    pub fn next_month(&mut self) -> Result<(), WizardError> {
        self.require_step(WizardStep::DateSelection, "change month")?;
        self.calendar = self.calendar.next();
        Ok(())
    }

    /// Store a time while on the time step. The slot must be offered for the selected date.
    pub fn select_time(&mut self, slot: TimeSlot) -> Result<(), WizardError> {
        self.require_step(WizardStep::TimeSelection, "select a time")?;

        let date = self.draft.selected_date.ok_or(WizardError::InvalidTransition {
            step: self.step,
            action: "select a time without a date",
        })?;

        if !self.services.catalog.offers(date, slot) {
            debug!(%date, %slot, "Rejected slot not in catalog");
            return Err(WizardError::UnknownSlot { date, slot });
        }

        self.draft.selected_time = Some(slot);
        info!(%date, %slot, "Demo time selected");
        Ok(())
    }

    /// Whether the precondition for leaving the current step holds
    pub fn can_advance(&self) -> bool {
        if self.is_submitting() {
            return false;
        }
        match self.step {
            WizardStep::DateSelection => self.draft.selected_date.is_some(),
            WizardStep::TimeSelection => {
                self.draft.selected_date.is_some() && self.draft.selected_time.is_some()
            }
            WizardStep::DetailsForm => self.confirmation.is_some(),
            WizardStep::Success => false,
        }
    }

    /// Move forward one step. A no-op returning `false` when the precondition fails.
    pub fn advance(&mut self) -> bool {
        if !self.can_advance() {
            debug!(step = %self.step, "Advance ignored: precondition not met");
            return false;
        }
        match self.step.next() {
            Some(next) => {
                info!(from = %self.step, to = %next, "Wizard advanced");
                self.step = next;
                self.notice = None;
                true
            }
            None => false,
        }
    }

    pub fn can_retreat(&self) -> bool {
        !self.is_submitting() && self.step.previous().is_some()
    }

    /// Move back one step, keeping every selection
    pub fn retreat(&mut self) -> bool {
        if !self.can_retreat() {
            debug!(step = %self.step, "Retreat ignored");
            return false;
        }
        match self.step.previous() {
            Some(previous) => {
                info!(from = %self.step, to = %previous, "Wizard went back");
                self.step = previous;
                self.notice = None;
                true
            }
            None => false,
        }
    }

    /// Back to the first step with an empty draft and the initial month
    pub fn reset(&mut self) {
        if let Some(request_id) = self.pending_request {
            warn!(%request_id, "Wizard reset while a scheduling request was pending");
        }
        self.step = WizardStep::DateSelection;
        self.draft = BookingDraft::default();
        self.calendar = self.initial_month;
        self.pending_request = None;
        self.confirmation = None;
        self.notice = None;
        info!("Wizard reset");
    }

    /// Change contact details while on the details step
    pub fn edit_contact<F>(&mut self, edit: F) -> Result<(), WizardError>
    where
        F: FnOnce(&mut ContactInfo),
    {
        self.require_step(WizardStep::DetailsForm, "edit contact details")?;
        edit(&mut self.draft.contact);

        // Keep an inline validation notice in sync as the user fixes fields
        if matches!(self.notice, Some(WizardNotice::Validation(_))) {
            self.notice = self
                .services
                .validator
                .validate(&self.draft.contact)
                .err()
                .map(WizardNotice::Validation);
        }
        Ok(())
    }

    /// Validate the contact details, raising or clearing the inline notice
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        let result = self.services.validator.validate(&self.draft.contact);
        match &result {
            Err(error) => self.notice = Some(WizardNotice::Validation(error.clone())),
            Ok(()) => {
                if matches!(self.notice, Some(WizardNotice::Validation(_))) {
                    self.notice = None;
                }
            }
        }
        result
    }

    /// Start a submission: validates, then marks the returned request as pending.
    ///
    /// Until `complete_submission` is called with the same request id the
    /// controller refuses every transition and any second submission.
    pub fn begin_submission(&mut self) -> Result<BookingRequest, WizardError> {
        self.require_step(WizardStep::DetailsForm, "submit")?;

        let (Some(date), Some(time)) = (self.draft.selected_date, self.draft.selected_time) else {
            return Err(WizardError::InvalidTransition {
                step: self.step,
                action: "submit without a date and time",
            });
        };

        self.validate()?;

        let request = BookingRequest::new(date, time, self.draft.contact.clone());
        self.pending_request = Some(request.request_id);
        self.notice = None;
        info!(request_id = %request.request_id, %date, %time, "Scheduling request started");
        Ok(request)
    }

    /// Apply the outcome of a submission.
    ///
    /// Returns `false` when `request_id` is not the pending request, for example
    /// after a reset; such outcomes are dropped.
    pub fn complete_submission(
        &mut self,
        request_id: Uuid,
        result: Result<BookingConfirmation, SubmissionError>,
    ) -> bool {
        if self.pending_request != Some(request_id) {
            warn!(%request_id, "Ignoring result for a request that is not pending");
            return false;
        }
        self.pending_request = None;

        match result {
            Ok(confirmation) => {
                let (date, time) = (confirmation.date, confirmation.time);
                info!(
                    %request_id,
                    confirmation_id = %confirmation.confirmation_id,
                    "Demo scheduled"
                );
                self.confirmation = Some(confirmation);
                self.advance();
                self.notice = Some(WizardNotice::Scheduled { date, time });
            }
            Err(error) => {
                warn!(%request_id, "Scheduling request failed: {}", error);
                self.notice = Some(WizardNotice::SubmissionFailed(error));
            }
        }
        true
    }

    /// Submit through the injected submitter and wait for the outcome
    pub async fn submit(&mut self) -> Result<BookingConfirmation, WizardError> {
        let request = self.begin_submission()?;
        let request_id = request.request_id;
        let submitter = self.submitter();

        let result = submit_with_timeout(submitter.as_ref(), request, self.submission_timeout()).await;
        self.complete_submission(request_id, result.clone());
        result.map_err(WizardError::from)
    }
}

impl fmt::Debug for WizardController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WizardController")
            .field("step", &self.step)
            .field("draft", &self.draft)
            .field("calendar", &self.calendar)
            .field("pending_request", &self.pending_request)
            .field("confirmation", &self.confirmation)
            .field("notice", &self.notice)
            .finish_non_exhaustive()
    }
}
