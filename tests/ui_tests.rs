// ABOUTME: UI testing framework for driving the TUI through key presses and inspecting
// the rendered buffer of the host page and the demo modal

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use demo_scheduler::app::{App, AppState, EventHandler};
use demo_scheduler::components::demo_wizard::{SimulatedSubmitter, WizardServices, WizardStep};
use demo_scheduler::components::LayoutComponent;
use demo_scheduler::config::AppConfig;
use demo_scheduler::models::CalendarMonth;
use ratatui::{backend::TestBackend, Terminal};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

/// Test harness that simulates user interactions and renders to a test backend
pub struct UITestFramework {
    app: App,
    terminal: Terminal<TestBackend>,
    layout: LayoutComponent,
}

impl UITestFramework {
    pub fn new(submit_delay: Duration) -> Self {
        let services = WizardServices::reference()
            .with_submitter(Arc::new(SimulatedSubmitter::new(submit_delay, 45)));
        let state = AppState::with_services(
            AppConfig::default(),
            services,
            CalendarMonth::new(8, 2025).unwrap(),
        );

        Self {
            app: App { state },
            terminal: Terminal::new(TestBackend::new(120, 40)).unwrap(),
            layout: LayoutComponent::new(),
        }
    }

    /// Simulate a key press and apply the resulting event
    pub fn press_key(&mut self, code: KeyCode) {
        let key = KeyEvent::new(code, KeyModifiers::NONE);
        if let Some(event) = EventHandler::handle_key_event(key, &self.app.state) {
            EventHandler::process_event(event, &mut self.app.state);
        }
    }

    pub fn type_string(&mut self, text: &str) {
        for ch in text.chars() {
            self.press_key(KeyCode::Char(ch));
        }
    }

    /// Process any pending async actions
    pub async fn process_async(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        match timeout(Duration::from_secs(5), self.app.tick()).await {
            Ok(result) => result.map_err(std::convert::Into::into),
            Err(_) => Err("Timeout waiting for async operation".into()),
        }
    }

    /// Render the current state and return the buffer for inspection
    pub fn render(&mut self) -> String {
        self.terminal
            .draw(|frame| {
                self.layout.render(frame, &self.app.state);
            })
            .unwrap();

        let buffer = self.terminal.backend().buffer().clone();
        buffer.content().iter().map(ratatui::buffer::Cell::symbol).collect::<String>()
    }

    pub fn current_step(&self) -> Option<WizardStep> {
        self.app.state.modal().map(|modal| modal.controller().step())
    }

    /// Walk the wizard up to the details form on September 5th at 3:15am
    pub fn fill_to_details(&mut self) {
        self.press_key(KeyCode::Char('d'));
        self.press_key(KeyCode::Right);
        self.press_key(KeyCode::Right);
        self.press_key(KeyCode::Enter);
        self.press_key(KeyCode::Down);
        self.press_key(KeyCode::Enter);
    }

    pub fn fill_required_fields(&mut self) {
        self.type_string("John");
        self.press_key(KeyCode::Tab);
        self.type_string("Smith");
        self.press_key(KeyCode::Tab);
        self.type_string("john@clinic.com");
    }
}

fn printable(content: &str) -> String {
    content
        .chars()
        .filter(|c| c.is_ascii_graphic() || *c == ' ')
        .collect()
}

#[test]
fn test_landing_page_shows_call_to_action() {
    let mut ui = UITestFramework::new(Duration::ZERO);
    let content = ui.render();

    assert!(content.contains("PatientClick"), "content was: {}", printable(&content));
    assert!(
        content.contains("Schedule a Demo"),
        "Landing page should offer the demo but content was: {}",
        printable(&content)
    );
    assert!(!content.contains("Web Request for demo"));
}

#[test]
fn test_calendar_step_rendering() {
    let mut ui = UITestFramework::new(Duration::ZERO);
    ui.press_key(KeyCode::Char('d'));
    let content = ui.render();

    for expected in ["Web Request for demo", "45 min", "India Standard Time", "Select a Date & Time"] {
        assert!(
            content.contains(expected),
            "Header should contain '{}' but content was: {}",
            expected,
            printable(&content)
        );
    }
    assert!(content.contains("September 2025"));
    for header in ["MON", "TUE", "SUN"] {
        assert!(content.contains(header), "Missing weekday header {header}");
    }
    assert!(content.contains("Pick a day to see available times"));
}

#[test]
fn test_month_navigation_updates_title() {
    let mut ui = UITestFramework::new(Duration::ZERO);
    ui.press_key(KeyCode::Char('d'));
    ui.press_key(KeyCode::PageDown);
    let content = ui.render();

    assert!(content.contains("October 2025"));
    assert!(!content.contains("September 2025"));
}

#[test]
fn test_unavailable_day_shows_status() {
    let mut ui = UITestFramework::new(Duration::ZERO);
    ui.press_key(KeyCode::Char('d'));
    ui.press_key(KeyCode::Left);
    ui.press_key(KeyCode::Enter);
    let content = ui.render();

    assert_eq!(ui.current_step(), Some(WizardStep::DateSelection));
    assert!(
        content.contains("2025-09-02 is not available for booking"),
        "content was: {}",
        printable(&content)
    );
}

#[test]
fn test_time_step_lists_slots() {
    let mut ui = UITestFramework::new(Duration::ZERO);
    ui.press_key(KeyCode::Char('d'));
    ui.press_key(KeyCode::Enter);
    let content = ui.render();

    assert_eq!(ui.current_step(), Some(WizardStep::TimeSelection));
    assert!(content.contains("Wednesday, September 3"));
    for slot in ["2:30am", "3:15am", "4:00am", "8:30pm"] {
        assert!(content.contains(slot), "Missing slot {slot}: {}", printable(&content));
    }
}

#[test]
fn test_details_form_rendering() {
    let mut ui = UITestFramework::new(Duration::ZERO);
    ui.fill_to_details();
    ui.type_string("John");
    let content = ui.render();

    assert_eq!(ui.current_step(), Some(WizardStep::DetailsForm));
    assert!(content.contains("Basic Details"));
    assert!(content.contains("First Name *"));
    assert!(content.contains("John"));
    assert!(content.contains("Solo Practice"));
    assert!(content.contains("[ Schedule Demo ]"));
}

#[tokio::test]
async fn test_validation_notice_is_rendered() {
    let mut ui = UITestFramework::new(Duration::ZERO);
    ui.fill_to_details();
    ui.press_key(KeyCode::Enter);
    ui.process_async().await.unwrap();
    let content = ui.render();

    assert_eq!(ui.current_step(), Some(WizardStep::DetailsForm));
    assert!(
        content.contains("Please fill in required fields"),
        "content was: {}",
        printable(&content)
    );
}

#[tokio::test(start_paused = true)]
async fn test_submitting_then_success_rendering() {
    let mut ui = UITestFramework::new(Duration::from_secs(2));
    ui.fill_to_details();
    ui.fill_required_fields();
    ui.press_key(KeyCode::Enter);
    ui.process_async().await.unwrap();

    let content = ui.render();
    assert!(
        content.contains("Scheduling Demo... please wait"),
        "content was: {}",
        printable(&content)
    );

    assert!(ui.app.state.await_submission_result().await);
    let content = ui.render();

    assert_eq!(ui.current_step(), Some(WizardStep::Success));
    for expected in [
        "Demo Successfully Scheduled!",
        "Friday, September 5, 2025",
        "3:15am",
        "Confirmation sent to John Smith <john@clinic.com>",
        "Reference: ",
        "What happens next?",
        "Perfect, I'm Ready!",
    ] {
        assert!(
            content.contains(expected),
            "Success screen should contain '{}' but content was: {}",
            expected,
            printable(&content)
        );
    }

    ui.press_key(KeyCode::Enter);
    let content = ui.render();
    assert!(!content.contains("Web Request for demo"));
    assert!(content.contains("Schedule a Demo"));
}
