// ABOUTME: Schedule-a-demo wizard module
// Walks a prospect through date, time, and contact details, then submits the booking

pub mod component;
pub mod error;
pub mod state;
pub mod submission;
pub mod validator;

pub use component::DemoWizardComponent;
pub use error::{SubmissionError, ValidationError, WizardError};
pub use state::{WizardController, WizardNotice, WizardServices, WizardStep};
pub use submission::{
    submit_with_timeout, SimulatedSubmitter, Submitter, DEFAULT_SIMULATED_DELAY,
    DEFAULT_SUBMISSION_TIMEOUT,
};
pub use validator::BookingFormValidator;
