// ABOUTME: Host page state for the demo modal: opens a fresh wizard per session and
// tracks the keyboard cursor (calendar day, slot row, form field) used to drive it

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::components::demo_wizard::{WizardController, WizardError, WizardServices, WizardStep};
use crate::models::{
    CalendarMonth, ContactField, ContactMethod, PracticeSize, TimeSlot, SERVICES_OF_INTEREST,
};

/// Focusable rows of the details form, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    FirstName,
    LastName,
    Email,
    PracticeSize,
    Services,
    CurrentSoftware,
    ContactMethod,
    AdditionalInfo,
    Submit,
}

impl FormField {
    pub const fn all() -> &'static [Self] {
        &[
            Self::FirstName,
            Self::LastName,
            Self::Email,
            Self::PracticeSize,
            Self::Services,
            Self::CurrentSoftware,
            Self::ContactMethod,
            Self::AdditionalInfo,
            Self::Submit,
        ]
    }

    fn index(self) -> usize {
        Self::all().iter().position(|f| *f == self).unwrap_or(0)
    }

    /// Next field, wrapping to the first
    pub fn next(self) -> Self {
        let all = Self::all();
        all[(self.index() + 1) % all.len()]
    }

    /// Previous field, wrapping to the last
    pub fn previous(self) -> Self {
        let all = Self::all();
        all[(self.index() + all.len() - 1) % all.len()]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::FirstName => "First Name *",
            Self::LastName => "Last Name *",
            Self::Email => "Email *",
            Self::PracticeSize => "Practice Size",
            Self::Services => "Services of Interest",
            Self::CurrentSoftware => "Current Software/System",
            Self::ContactMethod => "Preferred Contact Method",
            Self::AdditionalInfo => "Additional Information",
            Self::Submit => "Schedule Demo",
        }
    }

    /// The free-text contact field this row edits, if any
    pub const fn text_field(self) -> Option<ContactField> {
        match self {
            Self::FirstName => Some(ContactField::FirstName),
            Self::LastName => Some(ContactField::LastName),
            Self::Email => Some(ContactField::Email),
            Self::CurrentSoftware => Some(ContactField::CurrentSoftware),
            Self::AdditionalInfo => Some(ContactField::AdditionalInfo),
            _ => None,
        }
    }

    /// Number of choices on an option row; zero for text rows
    pub const fn option_count(self) -> usize {
        match self {
            Self::PracticeSize => PracticeSize::all().len(),
            Self::Services => SERVICES_OF_INTEREST.len(),
            Self::ContactMethod => ContactMethod::all().len(),
            _ => 0,
        }
    }
}

/// Keyboard cursor over the wizard's current step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WizardCursor {
    /// Highlighted day of the displayed month
    pub day: u32,
    pub slot_index: usize,
    pub field: FormField,
    /// Highlighted choice on an option row
    pub option_index: usize,
}

impl Default for WizardCursor {
    fn default() -> Self {
        Self {
            day: 1,
            slot_index: 0,
            field: FormField::FirstName,
            option_index: 0,
        }
    }
}

/// One open modal session
#[derive(Debug)]
pub struct DemoModal {
    controller: WizardController,
    cursor: WizardCursor,
    /// Last rejected action, shown until the next successful one
    status: Option<String>,
}

impl DemoModal {
    pub fn new(controller: WizardController) -> Self {
        let mut modal = Self {
            controller,
            cursor: WizardCursor::default(),
            status: None,
        };
        modal.cursor.day = modal.first_available_day().unwrap_or(1);
        modal
    }

    pub const fn controller(&self) -> &WizardController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut WizardController {
        &mut self.controller
    }

    pub const fn cursor(&self) -> &WizardCursor {
        &self.cursor
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Record the outcome of a controller call for the status line
    fn record(&mut self, result: Result<(), WizardError>) -> Result<(), WizardError> {
        match &result {
            Ok(()) => self.status = None,
            Err(e) => {
                debug!("Wizard action rejected: {}", e);
                self.status = Some(e.to_string());
            }
        }
        result
    }

    fn first_available_day(&self) -> Option<u32> {
        self.controller
            .calendar_cells()
            .iter()
            .find(|cell| cell.is_available())
            .and_then(|cell| cell.date())
            .map(|date| chrono::Datelike::day(&date))
    }

    pub fn cursor_date(&self) -> Option<NaiveDate> {
        self.controller.calendar_month().date_for_day(self.cursor.day)
    }

    /// Move the day cursor, crossing into adjacent months at the edges
    pub fn move_day(&mut self, delta: i32) -> Result<(), WizardError> {
        let month = self.controller.calendar_month();
        let target = i64::from(self.cursor.day) + i64::from(delta);

        let result = if target < 1 {
            self.controller.previous_month().map(|()| {
                let days = i64::from(self.controller.calendar_month().days_in_month());
                self.cursor.day = u32::try_from((days + target).max(1)).unwrap_or(1);
            })
        } else if target > i64::from(month.days_in_month()) {
            self.controller.next_month().map(|()| {
                let overflow = target - i64::from(month.days_in_month());
                let days = self.controller.calendar_month().days_in_month();
                self.cursor.day = u32::try_from(overflow).unwrap_or(1).min(days);
            })
        } else {
            self.controller.require_step(WizardStep::DateSelection, "move the calendar cursor").map(
                |()| {
                    self.cursor.day = u32::try_from(target).unwrap_or(1);
                },
            )
        };
        self.record(result)
    }

    pub fn previous_month(&mut self) -> Result<(), WizardError> {
        let result = self.controller.previous_month();
        self.clamp_day();
        self.record(result)
    }

    pub fn next_month(&mut self) -> Result<(), WizardError> {
        let result = self.controller.next_month();
        self.clamp_day();
        self.record(result)
    }

    fn clamp_day(&mut self) {
        let days = self.controller.calendar_month().days_in_month();
        self.cursor.day = self.cursor.day.clamp(1, days);
    }

    pub fn select_cursor_day(&mut self) -> Result<(), WizardError> {
        let result = self.controller.select_day(self.cursor.day);
        self.record(result)
    }

    pub fn cursor_slot(&self) -> Option<TimeSlot> {
        self.controller.available_slots().get(self.cursor.slot_index).copied()
    }

    pub fn move_slot(&mut self, delta: i32) {
        let count = self.controller.available_slots().len();
        if count == 0 {
            return;
        }
        let current = i64::try_from(self.cursor.slot_index).unwrap_or(0);
        let max = i64::try_from(count - 1).unwrap_or(0);
        let next = (current + i64::from(delta)).clamp(0, max);
        self.cursor.slot_index = usize::try_from(next).unwrap_or(0);
    }

    pub fn select_cursor_slot(&mut self) -> Result<(), WizardError> {
        let result = match self.cursor_slot() {
            Some(slot) => self.controller.select_time(slot),
            None => Err(WizardError::InvalidTransition {
                step: self.controller.step(),
                action: "select a time when none is offered",
            }),
        };
        self.record(result)
    }

    /// Enter on the date or time step: take the highlighted choice, then advance
    pub fn confirm_step(&mut self) -> bool {
        match self.controller.step() {
            WizardStep::DateSelection => {
                if self.controller.draft().selected_date != self.cursor_date()
                    && self.select_cursor_day().is_err()
                {
                    return false;
                }
            }
            WizardStep::TimeSelection => {
                if self.controller.draft().selected_time != self.cursor_slot()
                    && self.select_cursor_slot().is_err()
                {
                    return false;
                }
            }
            WizardStep::DetailsForm | WizardStep::Success => {}
        }
        self.advance()
    }

    pub fn advance(&mut self) -> bool {
        let advanced = self.controller.advance();
        if advanced {
            self.status = None;
            self.sync_cursor_to_step();
        }
        advanced
    }

    pub fn retreat(&mut self) -> bool {
        let retreated = self.controller.retreat();
        if retreated {
            self.status = None;
            self.sync_cursor_to_step();
        }
        retreated
    }

    /// Point the cursor at the stored selection when entering a step
    fn sync_cursor_to_step(&mut self) {
        match self.controller.step() {
            WizardStep::DateSelection => {
                if let Some(date) = self.controller.draft().selected_date {
                    self.cursor.day = chrono::Datelike::day(&date);
                }
            }
            WizardStep::TimeSelection => {
                let slots = self.controller.available_slots();
                self.cursor.slot_index = self
                    .controller
                    .draft()
                    .selected_time
                    .and_then(|time| slots.iter().position(|s| *s == time))
                    .unwrap_or(0);
            }
            WizardStep::DetailsForm => {
                self.cursor.field = FormField::FirstName;
                self.cursor.option_index = 0;
            }
            WizardStep::Success => {}
        }
    }

    pub fn next_field(&mut self) {
        self.cursor.field = self.cursor.field.next();
        self.cursor.option_index = 0;
    }

    pub fn previous_field(&mut self) {
        self.cursor.field = self.cursor.field.previous();
        self.cursor.option_index = 0;
    }

    /// Move the highlight within an option row, wrapping
    pub fn move_option(&mut self, delta: i32) {
        let count = self.cursor.field.option_count();
        if count == 0 {
            return;
        }
        let count = i64::try_from(count).unwrap_or(1);
        let current = i64::try_from(self.cursor.option_index).unwrap_or(0);
        let next = (current + i64::from(delta)).rem_euclid(count);
        self.cursor.option_index = usize::try_from(next).unwrap_or(0);
    }

    pub fn type_char(&mut self, c: char) -> Result<(), WizardError> {
        let Some(field) = self.cursor.field.text_field() else {
            return Ok(());
        };
        let result = self.controller.edit_contact(|contact| contact.push_char(field, c));
        self.record(result)
    }

    pub fn backspace(&mut self) -> Result<(), WizardError> {
        let Some(field) = self.cursor.field.text_field() else {
            return Ok(());
        };
        let result = self.controller.edit_contact(|contact| contact.pop_char(field));
        self.record(result)
    }

    /// Choose or toggle the highlighted option on the focused row
    pub fn toggle_option(&mut self) -> Result<(), WizardError> {
        let index = self.cursor.option_index;
        let result = match self.cursor.field {
            FormField::PracticeSize => self.controller.edit_contact(|contact| {
                let size = PracticeSize::all().get(index).copied();
                contact.practice_size = if contact.practice_size == size { None } else { size };
            }),
            FormField::Services => self.controller.edit_contact(|contact| {
                if let Some(service) = SERVICES_OF_INTEREST.get(index) {
                    contact.toggle_service(service);
                }
            }),
            FormField::ContactMethod => self.controller.edit_contact(|contact| {
                let method = ContactMethod::all().get(index).copied();
                contact.contact_method = if contact.contact_method == method { None } else { method };
            }),
            _ => return Ok(()),
        };
        self.record(result)
    }
}

/// Page-level owner of the demo modal
#[derive(Debug)]
pub struct ModalHost {
    services: WizardServices,
    initial_month: CalendarMonth,
    modal: Option<DemoModal>,
}

impl ModalHost {
    pub fn new(services: WizardServices, initial_month: CalendarMonth) -> Self {
        Self {
            services,
            initial_month,
            modal: None,
        }
    }

    /// Open the modal with a fresh wizard session; a no-op when already open
    pub fn open_modal(&mut self) {
        if self.modal.is_some() {
            debug!("Demo modal already open");
            return;
        }
        let controller = WizardController::new(self.services.clone(), self.initial_month);
        self.modal = Some(DemoModal::new(controller));
        info!(month = %self.initial_month, "Opened demo modal");
    }

    /// Reset and discard the session. Refused while a submission is in flight.
    pub fn close_modal(&mut self) -> bool {
        let Some(modal) = self.modal.as_mut() else {
            return false;
        };
        if modal.controller().is_submitting() {
            warn!("Refusing to close demo modal while a scheduling request is pending");
            modal.status = Some("Please wait, your demo is being scheduled".to_string());
            return false;
        }
        modal.controller_mut().reset();
        self.modal = None;
        info!("Closed demo modal");
        true
    }

    pub const fn is_open(&self) -> bool {
        self.modal.is_some()
    }

    pub const fn modal(&self) -> Option<&DemoModal> {
        self.modal.as_ref()
    }

    pub fn modal_mut(&mut self) -> Option<&mut DemoModal> {
        self.modal.as_mut()
    }
}
