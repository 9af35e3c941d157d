// ABOUTME: Event handling system for keyboard input and app actions
// Maps keys to AppEvents based on the wizard step, then applies them to AppState

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use super::modal_host::FormField;
use crate::app::{state::AsyncAction, AppState};
use crate::components::demo_wizard::WizardStep;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Quit,
    OpenDemoScheduler,
    CloseDemoScheduler,
    // Step navigation
    WizardNext,
    WizardBack,
    // Calendar
    MoveDay(i32),
    PreviousMonth,
    NextMonth,
    SelectDay,
    // Time slots
    MoveSlot(i32),
    SelectSlot,
    // Details form
    NextField,
    PreviousField,
    MoveOption(i32),
    ToggleOption,
    InputChar(char),
    Backspace,
    Submit,
}

pub struct EventHandler;

impl EventHandler {
    pub fn handle_key_event(key_event: KeyEvent, state: &AppState) -> Option<AppEvent> {
        // Ctrl+C always quits, even mid-submission
        if key_event.modifiers.contains(KeyModifiers::CONTROL)
            && key_event.code == KeyCode::Char('c')
        {
            return Some(AppEvent::Quit);
        }

        let Some(modal) = state.modal() else {
            return match key_event.code {
                KeyCode::Char('q') | KeyCode::Esc => Some(AppEvent::Quit),
                KeyCode::Char('d') | KeyCode::Enter => Some(AppEvent::OpenDemoScheduler),
                _ => None,
            };
        };

        let controller = modal.controller();
        if controller.is_submitting() {
            return None;
        }

        if key_event.code == KeyCode::Esc {
            return Some(AppEvent::CloseDemoScheduler);
        }

        if key_event.modifiers.contains(KeyModifiers::CONTROL)
            && key_event.code == KeyCode::Char('b')
        {
            return Some(AppEvent::WizardBack);
        }

        match controller.step() {
            WizardStep::DateSelection => Self::handle_date_keys(key_event),
            WizardStep::TimeSelection => Self::handle_time_keys(key_event),
            WizardStep::DetailsForm => Self::handle_form_keys(key_event, modal.cursor().field),
            WizardStep::Success => match key_event.code {
                KeyCode::Enter | KeyCode::Char(' ') => Some(AppEvent::CloseDemoScheduler),
                _ => None,
            },
        }
    }

    fn handle_date_keys(key_event: KeyEvent) -> Option<AppEvent> {
        match key_event.code {
            KeyCode::Left | KeyCode::Char('h') => Some(AppEvent::MoveDay(-1)),
            KeyCode::Right | KeyCode::Char('l') => Some(AppEvent::MoveDay(1)),
            KeyCode::Up | KeyCode::Char('k') => Some(AppEvent::MoveDay(-7)),
            KeyCode::Down | KeyCode::Char('j') => Some(AppEvent::MoveDay(7)),
            KeyCode::PageUp | KeyCode::Char('[') => Some(AppEvent::PreviousMonth),
            KeyCode::PageDown | KeyCode::Char(']') => Some(AppEvent::NextMonth),
            KeyCode::Char(' ') => Some(AppEvent::SelectDay),
            KeyCode::Enter => Some(AppEvent::WizardNext),
            _ => None,
        }
    }

    fn handle_time_keys(key_event: KeyEvent) -> Option<AppEvent> {
        match key_event.code {
            KeyCode::Up | KeyCode::Char('k') => Some(AppEvent::MoveSlot(-1)),
            KeyCode::Down | KeyCode::Char('j') => Some(AppEvent::MoveSlot(1)),
            KeyCode::Char(' ') => Some(AppEvent::SelectSlot),
            KeyCode::Enter => Some(AppEvent::WizardNext),
            KeyCode::Backspace | KeyCode::Left => Some(AppEvent::WizardBack),
            _ => None,
        }
    }

    fn handle_form_keys(key_event: KeyEvent, field: FormField) -> Option<AppEvent> {
        match key_event.code {
            KeyCode::Tab | KeyCode::Down => Some(AppEvent::NextField),
            KeyCode::BackTab | KeyCode::Up => Some(AppEvent::PreviousField),
            KeyCode::Enter => Some(AppEvent::Submit),
            _ if field.option_count() > 0 => match key_event.code {
                KeyCode::Left => Some(AppEvent::MoveOption(-1)),
                KeyCode::Right => Some(AppEvent::MoveOption(1)),
                KeyCode::Char(' ') => Some(AppEvent::ToggleOption),
                _ => None,
            },
            _ if field.text_field().is_some() => match key_event.code {
                KeyCode::Char(c) => Some(AppEvent::InputChar(c)),
                KeyCode::Backspace => Some(AppEvent::Backspace),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn process_event(event: AppEvent, state: &mut AppState) {
        debug!("Processing event: {:?}", event);

        match event {
            AppEvent::Quit => state.quit(),
            AppEvent::OpenDemoScheduler => state.modal_host.open_modal(),
            AppEvent::CloseDemoScheduler => {
                state.modal_host.close_modal();
            }
            AppEvent::Submit => {
                if state.modal().is_some() {
                    state.pending_async_action = Some(AsyncAction::SubmitBooking);
                }
            }
            event => {
                let Some(modal) = state.modal_mut() else {
                    return;
                };
                // Rejections are already recorded on the modal's status line
                match event {
                    AppEvent::WizardNext => {
                        modal.confirm_step();
                    }
                    AppEvent::WizardBack => {
                        modal.retreat();
                    }
                    AppEvent::MoveDay(delta) => {
                        modal.move_day(delta).ok();
                    }
                    AppEvent::PreviousMonth => {
                        modal.previous_month().ok();
                    }
                    AppEvent::NextMonth => {
                        modal.next_month().ok();
                    }
                    AppEvent::SelectDay => {
                        modal.select_cursor_day().ok();
                    }
                    AppEvent::MoveSlot(delta) => modal.move_slot(delta),
                    AppEvent::SelectSlot => {
                        modal.select_cursor_slot().ok();
                    }
                    AppEvent::NextField => modal.next_field(),
                    AppEvent::PreviousField => modal.previous_field(),
                    AppEvent::MoveOption(delta) => modal.move_option(delta),
                    AppEvent::ToggleOption => {
                        modal.toggle_option().ok();
                    }
                    AppEvent::InputChar(c) => {
                        modal.type_char(c).ok();
                    }
                    AppEvent::Backspace => {
                        modal.backspace().ok();
                    }
                    AppEvent::Quit
                    | AppEvent::OpenDemoScheduler
                    | AppEvent::CloseDemoScheduler
                    | AppEvent::Submit => {}
                }
            }
        }
    }
}
