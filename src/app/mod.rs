// ABOUTME: Main application structure and state management for the TUI

pub mod events;
pub mod modal_host;
pub mod state;

pub use events::{AppEvent, EventHandler};
pub use modal_host::{DemoModal, FormField, ModalHost, WizardCursor};
pub use state::{App, AppState, AsyncAction, SubmissionOutcome};
