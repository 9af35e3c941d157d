// ABOUTME: Host page behind the demo modal: product blurb and the call to action

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

const CORNFLOWER_BLUE: Color = Color::Rgb(100, 149, 237);
const GOLD: Color = Color::Rgb(255, 215, 0);
const DARK_BG: Color = Color::Rgb(25, 25, 35);
const SOFT_WHITE: Color = Color::Rgb(220, 220, 230);
const MUTED_GRAY: Color = Color::Rgb(120, 120, 140);
const SUBDUED_BORDER: Color = Color::Rgb(60, 60, 80);

pub struct LandingComponent;

impl LandingComponent {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(SUBDUED_BORDER))
            .style(Style::default().bg(DARK_BG))
            .title(" PatientClick ")
            .title_style(Style::default().fg(GOLD).add_modifier(Modifier::BOLD));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .margin(2)
            .constraints([
                Constraint::Min(6),    // Pitch
                Constraint::Length(1), // Call to action
            ])
            .split(inner);

        let pitch = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "Practice management built for healthcare providers",
                Style::default().fg(SOFT_WHITE).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "EHR, billing, and patient engagement in one platform.",
                Style::default().fg(MUTED_GRAY),
            )),
            Line::from(Span::styled(
                "See it in a free 45 minute walkthrough with our team.",
                Style::default().fg(MUTED_GRAY),
            )),
        ])
        .alignment(Alignment::Center);
        frame.render_widget(pitch, layout[0]);

        let cta = Paragraph::new(Line::from(vec![
            Span::styled("[", Style::default().fg(SUBDUED_BORDER)),
            Span::styled("d", Style::default().fg(GOLD)),
            Span::styled("]", Style::default().fg(SUBDUED_BORDER)),
            Span::styled(" Schedule a Demo", Style::default().fg(CORNFLOWER_BLUE)),
            Span::styled("  |  ", Style::default().fg(SUBDUED_BORDER)),
            Span::styled("[", Style::default().fg(SUBDUED_BORDER)),
            Span::styled("q", Style::default().fg(GOLD)),
            Span::styled("]", Style::default().fg(SUBDUED_BORDER)),
            Span::styled(" Quit", Style::default().fg(MUTED_GRAY)),
        ]))
        .alignment(Alignment::Center);
        frame.render_widget(cta, layout[1]);
    }
}

impl Default for LandingComponent {
    fn default() -> Self {
        Self::new()
    }
}
