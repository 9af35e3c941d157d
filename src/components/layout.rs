// ABOUTME: Main layout component: the host page with the demo modal overlaid when open

use ratatui::prelude::*;

use super::demo_wizard::DemoWizardComponent;
use super::landing::LandingComponent;
use crate::app::AppState;

pub struct LayoutComponent {
    landing: LandingComponent,
    demo_wizard: DemoWizardComponent,
}

impl LayoutComponent {
    pub fn new() -> Self {
        Self {
            landing: LandingComponent::new(),
            demo_wizard: DemoWizardComponent::new(),
        }
    }

    pub fn render(&mut self, frame: &mut Frame, state: &AppState) {
        let area = frame.size();
        self.landing.render(frame, area);

        if let Some(modal) = state.modal() {
            let modal_area = centered_rect(90, 90, area);
            self.demo_wizard
                .render(frame, modal_area, modal, &state.config.scheduling);
        }
    }
}

impl Default for LayoutComponent {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper function to create a centered rectangle
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
