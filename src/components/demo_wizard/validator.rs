// ABOUTME: Contact form validation run before a booking may be submitted

use lazy_static::lazy_static;
use regex::Regex;

use super::error::ValidationError;
use crate::models::{ContactField, ContactInfo};

lazy_static! {
    static ref EMAIL_PATTERN: Regex =
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex");
}

/// Headline shown when validation fails
pub const VALIDATION_TITLE: &str = "Please fill in required fields";

/// Detail line shown when validation fails
pub const VALIDATION_DESCRIPTION: &str = "First name, last name, and email are required.";

/// Checks the required contact fields.
///
/// By default the email is only checked for presence, matching the live site.
/// `strict_email` additionally rejects values that do not look like an address.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BookingFormValidator {
    strict_email: bool,
}

impl BookingFormValidator {
    pub const fn new() -> Self {
        Self { strict_email: false }
    }

    pub const fn with_strict_email(strict_email: bool) -> Self {
        Self { strict_email }
    }

    /// Validate without side effects; reports every problem at once
    pub fn validate(&self, contact: &ContactInfo) -> Result<(), ValidationError> {
        let missing_fields = ContactField::REQUIRED
            .into_iter()
            .filter(|field| contact.text(*field).trim().is_empty())
            .collect();

        let email = contact.email.trim();
        let invalid_email = (self.strict_email && !email.is_empty() && !EMAIL_PATTERN.is_match(email))
            .then(|| email.to_string());

        let error = ValidationError {
            missing_fields,
            invalid_email,
        };

        if error.is_empty() {
            Ok(())
        } else {
            Err(error)
        }
    }
}
