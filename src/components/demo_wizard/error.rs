// ABOUTME: Error taxonomy for the demo wizard: form validation, submission, and rejected transitions

use chrono::NaiveDate;
use std::collections::BTreeSet;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

use super::state::WizardStep;
use crate::models::{ContactField, TimeSlot};

/// Contact form problems, all reported at once
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationError {
    /// Required fields that are empty after trimming
    pub missing_fields: BTreeSet<ContactField>,
    /// Malformed email, only reported when strict email checking is on
    pub invalid_email: Option<String>,
}

impl ValidationError {
    pub fn is_empty(&self) -> bool {
        self.missing_fields.is_empty() && self.invalid_email.is_none()
    }

    pub fn is_missing(&self, field: ContactField) -> bool {
        self.missing_fields.contains(&field)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if !self.missing_fields.is_empty() {
            let names: Vec<&str> = self.missing_fields.iter().map(ContactField::label).collect();
            parts.push(format!("Missing required fields: {}", names.join(", ")));
        }
        if let Some(email) = &self.invalid_email {
            parts.push(format!("'{email}' is not a valid email address"));
        }
        f.write_str(&parts.join("; "))
    }
}

impl std::error::Error for ValidationError {}

/// Failure reported by the scheduling service boundary
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error("Scheduling request rejected: {reason}")]
    Rejected { reason: String },

    #[error("Scheduling request timed out after {}s", .after.as_secs())]
    TimedOut { after: Duration },

    #[error("Scheduling service unavailable: {reason}")]
    Unavailable { reason: String },
}

impl SubmissionError {
    pub fn reason(&self) -> String {
        match self {
            Self::Rejected { reason } | Self::Unavailable { reason } => reason.clone(),
            Self::TimedOut { after } => format!("no response within {}s", after.as_secs()),
        }
    }
}

/// Controller call rejected without changing state
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    #[error("Cannot {action} on the {step} step")]
    InvalidTransition {
        step: WizardStep,
        action: &'static str,
    },

    #[error("{date} is not available for booking")]
    UnavailableDate { date: NaiveDate },

    #[error("Day {day} does not exist in {month}")]
    NoSuchDay { day: u32, month: String },

    #[error("{slot} is not offered on {date}")]
    UnknownSlot { date: NaiveDate, slot: TimeSlot },

    #[error("A scheduling request is already in flight")]
    SubmissionInFlight,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Submission(#[from] SubmissionError),
}
