// ABOUTME: Unit tests for event handling to ensure keyboard inputs map to correct app actions
// and drive the demo wizard through AppState

use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use demo_scheduler::app::{AppEvent, AppState, AsyncAction, EventHandler, FormField};
use demo_scheduler::components::demo_wizard::{SimulatedSubmitter, WizardServices, WizardStep};
use demo_scheduler::config::AppConfig;
use demo_scheduler::models::{CalendarMonth, PracticeSize};
use std::sync::Arc;
use std::time::Duration;

const fn create_key_event(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

const fn create_key_event_with_modifiers(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
    KeyEvent::new(code, modifiers)
}

fn state_with_delay(delay: Duration) -> AppState {
    let services = WizardServices::reference()
        .with_submitter(Arc::new(SimulatedSubmitter::new(delay, 45)));
    AppState::with_services(AppConfig::default(), services, CalendarMonth::new(8, 2025).unwrap())
}

fn test_state() -> AppState {
    state_with_delay(Duration::ZERO)
}

/// Map and apply one key press; returns the event it produced
fn press(state: &mut AppState, key: KeyEvent) -> Option<AppEvent> {
    let event = EventHandler::handle_key_event(key, state);
    if let Some(event) = event.clone() {
        EventHandler::process_event(event, state);
    }
    event
}

fn type_text(state: &mut AppState, text: &str) {
    for c in text.chars() {
        press(state, create_key_event(KeyCode::Char(c)));
    }
}

fn step(state: &AppState) -> WizardStep {
    state.modal().unwrap().controller().step()
}

#[test]
fn test_quit_key_events() {
    let state = test_state();

    for key in [
        create_key_event(KeyCode::Char('q')),
        create_key_event(KeyCode::Esc),
        create_key_event_with_modifiers(KeyCode::Char('c'), KeyModifiers::CONTROL),
    ] {
        assert_eq!(EventHandler::handle_key_event(key, &state), Some(AppEvent::Quit));
    }
}

#[test]
fn test_open_and_close_modal() {
    let mut state = test_state();

    assert_eq!(
        press(&mut state, create_key_event(KeyCode::Char('d'))),
        Some(AppEvent::OpenDemoScheduler)
    );
    assert!(state.modal_host.is_open());

    // Inside the modal Esc closes instead of quitting
    assert_eq!(
        press(&mut state, create_key_event(KeyCode::Esc)),
        Some(AppEvent::CloseDemoScheduler)
    );
    assert!(!state.modal_host.is_open());
    assert!(!state.should_quit);
}

#[test]
fn test_calendar_navigation_keys() {
    let mut state = test_state();
    press(&mut state, create_key_event(KeyCode::Char('d')));

    assert_eq!(
        press(&mut state, create_key_event(KeyCode::Right)),
        Some(AppEvent::MoveDay(1))
    );
    assert_eq!(state.modal().unwrap().cursor().day, 4);

    press(&mut state, create_key_event(KeyCode::Down));
    assert_eq!(state.modal().unwrap().cursor().day, 11);

    assert_eq!(
        press(&mut state, create_key_event(KeyCode::Char(']'))),
        Some(AppEvent::NextMonth)
    );
    assert_eq!(
        state.modal().unwrap().controller().calendar_month().title(),
        "October 2025"
    );

    press(&mut state, create_key_event(KeyCode::PageUp));
    press(&mut state, create_key_event(KeyCode::Char(' ')));
    assert_eq!(
        state.modal().unwrap().controller().draft().selected_date,
        NaiveDate::from_ymd_opt(2025, 9, 11)
    );
    assert_eq!(step(&state), WizardStep::DateSelection);
}

#[test]
fn test_enter_on_unavailable_day_stays_put() {
    let mut state = test_state();
    press(&mut state, create_key_event(KeyCode::Char('d')));
    press(&mut state, create_key_event(KeyCode::Left));
    press(&mut state, create_key_event(KeyCode::Left));

    press(&mut state, create_key_event(KeyCode::Enter));

    assert_eq!(step(&state), WizardStep::DateSelection);
    assert!(state.modal().unwrap().status().is_some());
}

#[test]
fn test_back_shortcut_keeps_selection() {
    let mut state = test_state();
    press(&mut state, create_key_event(KeyCode::Char('d')));
    press(&mut state, create_key_event(KeyCode::Enter));
    press(&mut state, create_key_event(KeyCode::Down));
    press(&mut state, create_key_event(KeyCode::Enter));
    assert_eq!(step(&state), WizardStep::DetailsForm);

    assert_eq!(
        press(
            &mut state,
            create_key_event_with_modifiers(KeyCode::Char('b'), KeyModifiers::CONTROL)
        ),
        Some(AppEvent::WizardBack)
    );
    assert_eq!(step(&state), WizardStep::TimeSelection);
    let modal = state.modal().unwrap();
    assert_eq!(modal.controller().draft().selected_time.unwrap().to_string(), "3:15am");
    assert_eq!(modal.cursor().slot_index, 1);
}

#[test]
fn test_enter_takes_highlighted_slot_over_earlier_choice() {
    let mut state = test_state();
    press(&mut state, create_key_event(KeyCode::Char('d')));
    press(&mut state, create_key_event(KeyCode::Enter));

    assert_eq!(
        press(&mut state, create_key_event(KeyCode::Char(' '))),
        Some(AppEvent::SelectSlot)
    );
    assert_eq!(
        state.modal().unwrap().controller().draft().selected_time.unwrap().to_string(),
        "2:30am"
    );

    for _ in 0..3 {
        press(&mut state, create_key_event(KeyCode::Down));
    }
    assert_eq!(state.modal().unwrap().cursor_slot().unwrap().to_string(), "8:30pm");

    press(&mut state, create_key_event(KeyCode::Enter));

    assert_eq!(step(&state), WizardStep::DetailsForm);
    assert_eq!(
        state.modal().unwrap().controller().draft().selected_time.unwrap().to_string(),
        "8:30pm"
    );
}

#[test]
fn test_enter_on_selected_slot_keeps_it() {
    let mut state = test_state();
    press(&mut state, create_key_event(KeyCode::Char('d')));
    press(&mut state, create_key_event(KeyCode::Enter));
    press(&mut state, create_key_event(KeyCode::Down));
    press(&mut state, create_key_event(KeyCode::Char(' ')));
    press(&mut state, create_key_event(KeyCode::Enter));

    assert_eq!(step(&state), WizardStep::DetailsForm);
    assert_eq!(
        state.modal().unwrap().controller().draft().selected_time.unwrap().to_string(),
        "3:15am"
    );
}

#[test]
fn test_form_keys_depend_on_focused_field() {
    let mut state = test_state();
    press(&mut state, create_key_event(KeyCode::Char('d')));
    press(&mut state, create_key_event(KeyCode::Enter));
    press(&mut state, create_key_event(KeyCode::Enter));

    assert_eq!(
        press(&mut state, create_key_event(KeyCode::Char('q'))),
        Some(AppEvent::InputChar('q'))
    );
    press(&mut state, create_key_event(KeyCode::Backspace));
    type_text(&mut state, "Ada");

    for _ in 0..3 {
        press(&mut state, create_key_event(KeyCode::Tab));
    }
    assert_eq!(state.modal().unwrap().cursor().field, FormField::PracticeSize);
    assert_eq!(
        EventHandler::handle_key_event(create_key_event(KeyCode::Char('x')), &state),
        None
    );
    press(&mut state, create_key_event(KeyCode::Right));
    press(&mut state, create_key_event(KeyCode::Char(' ')));

    let contact = &state.modal().unwrap().controller().draft().contact;
    assert_eq!(contact.first_name, "Ada");
    assert_eq!(contact.practice_size, Some(PracticeSize::Small));
}

#[tokio::test]
async fn test_full_keyboard_booking() {
    let mut state = test_state();
    press(&mut state, create_key_event(KeyCode::Char('d')));
    press(&mut state, create_key_event(KeyCode::Right));
    press(&mut state, create_key_event(KeyCode::Right));
    press(&mut state, create_key_event(KeyCode::Enter));
    press(&mut state, create_key_event(KeyCode::Down));
    press(&mut state, create_key_event(KeyCode::Enter));

    type_text(&mut state, "John");
    press(&mut state, create_key_event(KeyCode::Tab));
    type_text(&mut state, "Smith");
    press(&mut state, create_key_event(KeyCode::Tab));
    type_text(&mut state, "a@b.com");

    assert_eq!(press(&mut state, create_key_event(KeyCode::Enter)), Some(AppEvent::Submit));
    assert_eq!(state.pending_async_action, Some(AsyncAction::SubmitBooking));

    state.process_async_action().await.unwrap();
    assert!(state.is_submitting());
    assert!(state.await_submission_result().await);

    let controller = state.modal().unwrap().controller();
    assert_eq!(controller.step(), WizardStep::Success);
    assert_eq!(controller.draft().selected_date, NaiveDate::from_ymd_opt(2025, 9, 5));
    assert_eq!(controller.draft().selected_time.unwrap().to_string(), "3:15am");

    press(&mut state, create_key_event(KeyCode::Enter));
    assert!(!state.modal_host.is_open());
}

#[tokio::test]
async fn test_submit_with_missing_fields_does_not_start() {
    let mut state = test_state();
    press(&mut state, create_key_event(KeyCode::Char('d')));
    press(&mut state, create_key_event(KeyCode::Enter));
    press(&mut state, create_key_event(KeyCode::Enter));

    press(&mut state, create_key_event(KeyCode::Enter));
    state.process_async_action().await.unwrap();

    assert!(!state.is_submitting());
    assert_eq!(step(&state), WizardStep::DetailsForm);
    assert!(state.modal().unwrap().controller().notice().is_some());
}

#[tokio::test(start_paused = true)]
async fn test_keys_ignored_while_submitting() {
    let mut state = state_with_delay(Duration::from_secs(2));
    press(&mut state, create_key_event(KeyCode::Char('d')));
    press(&mut state, create_key_event(KeyCode::Enter));
    press(&mut state, create_key_event(KeyCode::Enter));
    type_text(&mut state, "John");
    press(&mut state, create_key_event(KeyCode::Tab));
    type_text(&mut state, "Smith");
    press(&mut state, create_key_event(KeyCode::Tab));
    type_text(&mut state, "a@b.com");
    press(&mut state, create_key_event(KeyCode::Enter));
    state.process_async_action().await.unwrap();
    assert!(state.is_submitting());

    for key in [KeyCode::Esc, KeyCode::Enter, KeyCode::Char('x')] {
        assert_eq!(EventHandler::handle_key_event(create_key_event(key), &state), None);
    }
    assert!(!state.modal_host.close_modal());
    assert_eq!(state.poll_submission_results(), 0);

    assert!(state.await_submission_result().await);
    assert_eq!(step(&state), WizardStep::Success);
    assert!(state.modal_host.close_modal());
}
