// ABOUTME: Booking data model: contact details, the in-progress draft, and the request/confirmation
// pair exchanged with the scheduling service

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use uuid::Uuid;

use super::time_slot::TimeSlot;

/// Services a prospect can tick on the details form, in display order
pub const SERVICES_OF_INTEREST: [&str; 6] = [
    "Electronic Health Records (EHR)",
    "Practice Management System",
    "Medical Billing Services",
    "Patient Engagement Tools",
    "Revenue Cycle Management",
    "Telemedicine Solutions",
];

/// Length of a demo session in minutes
pub const DEFAULT_SESSION_MINUTES: u32 = 45;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PracticeSize {
    Solo,
    Small,
    Medium,
    Large,
}

impl PracticeSize {
    pub const fn all() -> &'static [Self] {
        &[Self::Solo, Self::Small, Self::Medium, Self::Large]
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Solo => "Solo Practice",
            Self::Small => "2-5 Providers",
            Self::Medium => "6-15 Providers",
            Self::Large => "16+ Providers",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactMethod {
    Email,
    Phone,
    Both,
}

impl ContactMethod {
    pub const fn all() -> &'static [Self] {
        &[Self::Email, Self::Phone, Self::Both]
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Email => "Email",
            Self::Phone => "Phone",
            Self::Both => "Both Email & Phone",
        }
    }
}

/// Free-text fields of the contact form
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactField {
    FirstName,
    LastName,
    Email,
    CurrentSoftware,
    AdditionalInfo,
}

impl ContactField {
    pub const REQUIRED: [Self; 3] = [Self::FirstName, Self::LastName, Self::Email];

    pub const fn label(&self) -> &'static str {
        match self {
            Self::FirstName => "First Name",
            Self::LastName => "Last Name",
            Self::Email => "Email",
            Self::CurrentSoftware => "Current Software/System",
            Self::AdditionalInfo => "Additional Information",
        }
    }

    pub const fn is_required(&self) -> bool {
        matches!(self, Self::FirstName | Self::LastName | Self::Email)
    }
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub practice_size: Option<PracticeSize>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub services_of_interest: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_software: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_method: Option<ContactMethod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_info: Option<String>,
}

impl ContactInfo {
    /// Contact with just the required fields filled in
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            ..Self::default()
        }
    }

    /// Current text of a free-text field (empty for an unset optional field)
    pub fn text(&self, field: ContactField) -> &str {
        match field {
            ContactField::FirstName => &self.first_name,
            ContactField::LastName => &self.last_name,
            ContactField::Email => &self.email,
            ContactField::CurrentSoftware => self.current_software.as_deref().unwrap_or(""),
            ContactField::AdditionalInfo => self.additional_info.as_deref().unwrap_or(""),
        }
    }

    /// Replace a free-text field. An empty value clears an optional field.
    pub fn set_text(&mut self, field: ContactField, value: impl Into<String>) {
        let value = value.into();
        let optional = |v: String| if v.is_empty() { None } else { Some(v) };
        match field {
            ContactField::FirstName => self.first_name = value,
            ContactField::LastName => self.last_name = value,
            ContactField::Email => self.email = value,
            ContactField::CurrentSoftware => self.current_software = optional(value),
            ContactField::AdditionalInfo => self.additional_info = optional(value),
        }
    }

    pub fn push_char(&mut self, field: ContactField, c: char) {
        let mut value = self.text(field).to_string();
        value.push(c);
        self.set_text(field, value);
    }

    pub fn pop_char(&mut self, field: ContactField) {
        let mut value = self.text(field).to_string();
        value.pop();
        self.set_text(field, value);
    }

    /// Tick or untick a service; returns whether it is now selected
    pub fn toggle_service(&mut self, service: &str) -> bool {
        if self.services_of_interest.remove(service) {
            false
        } else {
            self.services_of_interest.insert(service.to_string());
            true
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }
}

/// In-progress booking accumulated across wizard steps
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingDraft {
    pub selected_date: Option<NaiveDate>,
    pub selected_time: Option<TimeSlot>,
    pub contact: ContactInfo,
}

impl BookingDraft {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Validated booking handed to the scheduling service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub request_id: Uuid,
    pub date: NaiveDate,
    pub time: TimeSlot,
    pub contact: ContactInfo,
}

impl BookingRequest {
    pub fn new(date: NaiveDate, time: TimeSlot, contact: ContactInfo) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            date,
            time,
            contact,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingConfirmation {
    pub confirmation_id: Uuid,
    pub request_id: Uuid,
    pub date: NaiveDate,
    pub time: TimeSlot,
    pub duration_minutes: u32,
    pub confirmed_at: DateTime<Utc>,
}

impl BookingConfirmation {
    /// Confirm a request as-is, stamped with the current time
    pub fn for_request(request: &BookingRequest, duration_minutes: u32) -> Self {
        Self {
            confirmation_id: Uuid::new_v4(),
            request_id: request.request_id,
            date: request.date,
            time: request.time,
            duration_minutes,
            confirmed_at: Utc::now(),
        }
    }

    /// "Your demo is scheduled for 2025-09-05 at 3:15am"
    pub fn summary(&self) -> String {
        format!("Your demo is scheduled for {} at {}", self.date, self.time)
    }
}
