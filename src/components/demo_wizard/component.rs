// ABOUTME: Renders the schedule-a-demo modal: header with progress, the current step, notices,
// and the key hints footer

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::state::{WizardNotice, WizardStep};
use crate::app::modal_host::{DemoModal, FormField};
use crate::config::SchedulingConfig;
use crate::models::{
    format_long_date, format_short_date, CalendarCell, ContactMethod, PracticeSize,
    SERVICES_OF_INTEREST,
};
use crate::models::calendar::WEEKDAY_HEADERS;

// Color palette from TUI style guide
const CORNFLOWER_BLUE: Color = Color::Rgb(100, 149, 237);
const GOLD: Color = Color::Rgb(255, 215, 0);
const SELECTION_GREEN: Color = Color::Rgb(100, 200, 100);
const DARK_BG: Color = Color::Rgb(25, 25, 35);
const PANEL_BG: Color = Color::Rgb(30, 30, 40);
const SOFT_WHITE: Color = Color::Rgb(220, 220, 230);
const MUTED_GRAY: Color = Color::Rgb(120, 120, 140);
const SUBDUED_BORDER: Color = Color::Rgb(60, 60, 80);
const ERROR_RED: Color = Color::Rgb(220, 80, 80);
const WARNING_YELLOW: Color = Color::Rgb(220, 180, 80);

/// Width of one calendar column, header and day cells alike
const DAY_CELL_WIDTH: usize = 5;

const LABEL_WIDTH: usize = 26;

const NEXT_STEPS: [(&str, &str); 4] = [
    ("Confirmation Email", "You'll receive a detailed email with meeting link and agenda"),
    ("Reminder Call", "Our specialist will call 24 hours before to confirm"),
    ("Personalized Demo", "Live demonstration tailored to your practice size and needs"),
    ("Custom Proposal", "A tailored pricing proposal based on your requirements"),
];

pub struct DemoWizardComponent;

impl DemoWizardComponent {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        modal: &DemoModal,
        scheduling: &SchedulingConfig,
    ) {
        frame.render_widget(Clear, area);

        let container = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(CORNFLOWER_BLUE))
            .style(Style::default().bg(DARK_BG));
        let inner = container.inner(area);
        frame.render_widget(container, area);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // Header with progress
                Constraint::Min(10),   // Step content
                Constraint::Length(2), // Notice
                Constraint::Length(2), // Navigation footer
            ])
            .split(inner);

        self.render_header(frame, layout[0], modal, scheduling);
        self.render_step_content(frame, layout[1], modal, scheduling);
        self.render_notice(frame, layout[2], modal);
        self.render_navigation(frame, layout[3], modal);
    }

    fn render_header(
        &self,
        frame: &mut Frame,
        area: Rect,
        modal: &DemoModal,
        scheduling: &SchedulingConfig,
    ) {
        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(SUBDUED_BORDER))
            .style(Style::default().bg(PANEL_BG));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Length(1)])
            .split(inner);

        let title = Paragraph::new(Line::from(vec![
            Span::styled("Web Request for demo", Style::default().fg(GOLD).add_modifier(Modifier::BOLD)),
            Span::styled("  |  ", Style::default().fg(SUBDUED_BORDER)),
            Span::styled(format!("{} min", scheduling.session_minutes), Style::default().fg(SOFT_WHITE)),
            Span::styled("  |  ", Style::default().fg(SUBDUED_BORDER)),
            Span::styled(scheduling.timezone_label.clone(), Style::default().fg(MUTED_GRAY)),
        ]))
        .alignment(Alignment::Center);
        frame.render_widget(title, rows[0]);

        self.render_progress(frame, rows[1], modal.controller().step());

        let subtitle = Paragraph::new(Line::from(Span::styled(
            modal.controller().step().description(),
            Style::default().fg(SOFT_WHITE).add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(subtitle, rows[2]);
    }

    /// Render step progress dots
    fn render_progress(&self, frame: &mut Frame, area: Rect, current: WizardStep) {
        let steps = WizardStep::all();
        let current_idx = current.number() - 1;

        let mut spans = Vec::new();
        for (idx, step) in steps.iter().enumerate() {
            let (icon, style) = if idx < current_idx {
                ("●", Style::default().fg(SELECTION_GREEN))
            } else if idx == current_idx {
                ("◉", Style::default().fg(GOLD).add_modifier(Modifier::BOLD))
            } else {
                ("○", Style::default().fg(MUTED_GRAY))
            };

            spans.push(Span::styled(icon, style));
            spans.push(Span::raw(" "));
            spans.push(Span::styled(
                step.title(),
                if idx == current_idx {
                    Style::default().fg(SOFT_WHITE)
                } else {
                    Style::default().fg(MUTED_GRAY)
                },
            ));

            if idx < steps.len() - 1 {
                spans.push(Span::styled(" → ", Style::default().fg(SUBDUED_BORDER)));
            }
        }

        let progress = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
        frame.render_widget(progress, area);
    }

    fn render_step_content(
        &self,
        frame: &mut Frame,
        area: Rect,
        modal: &DemoModal,
        scheduling: &SchedulingConfig,
    ) {
        let lines = match modal.controller().step() {
            WizardStep::DateSelection => self.calendar_lines(modal),
            WizardStep::TimeSelection => self.time_lines(modal),
            WizardStep::DetailsForm => self.form_lines(modal),
            WizardStep::Success => self.success_lines(modal, scheduling),
        };

        let content = Paragraph::new(lines)
            .style(Style::default().bg(DARK_BG))
            .alignment(Alignment::Center);
        frame.render_widget(content, area);
    }

    fn calendar_lines(&self, modal: &DemoModal) -> Vec<Line<'static>> {
        let controller = modal.controller();
        let month = controller.calendar_month();
        let selected = controller.draft().selected_date;
        let cursor_date = modal.cursor_date();

        let mut lines = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled("◀  ", Style::default().fg(MUTED_GRAY)),
                Span::styled(month.title(), Style::default().fg(GOLD).add_modifier(Modifier::BOLD)),
                Span::styled("  ▶", Style::default().fg(MUTED_GRAY)),
            ]),
            Line::from(""),
        ];

        let headers: Vec<Span> = WEEKDAY_HEADERS
            .iter()
            .map(|h| {
                Span::styled(
                    format!("{h:^width$}", width = DAY_CELL_WIDTH),
                    Style::default().fg(CORNFLOWER_BLUE).add_modifier(Modifier::BOLD),
                )
            })
            .collect();
        lines.push(Line::from(headers));

        let cells = controller.calendar_cells();
        for week in cells.chunks(7) {
            let mut spans: Vec<Span> = week
                .iter()
                .map(|cell| match cell {
                    CalendarCell::Padding => Span::raw(" ".repeat(DAY_CELL_WIDTH)),
                    CalendarCell::Day { day, date, available } => {
                        let text = format!("{day:^width$}", width = DAY_CELL_WIDTH);
                        let mut style = if !available {
                            Style::default().fg(MUTED_GRAY).add_modifier(Modifier::DIM)
                        } else {
                            Style::default().fg(SOFT_WHITE)
                        };
                        if Some(*date) == selected {
                            style = Style::default()
                                .fg(DARK_BG)
                                .bg(SELECTION_GREEN)
                                .add_modifier(Modifier::BOLD);
                        }
                        if Some(*date) == cursor_date {
                            style = style.add_modifier(Modifier::REVERSED);
                        }
                        Span::styled(text, style)
                    }
                })
                .collect();
            // Keep partial last weeks aligned with the header row
            for _ in week.len()..7 {
                spans.push(Span::raw(" ".repeat(DAY_CELL_WIDTH)));
            }
            lines.push(Line::from(spans));
        }

        lines.push(Line::from(""));
        lines.push(match selected {
            Some(date) => Line::from(vec![
                Span::styled("Selected: ", Style::default().fg(MUTED_GRAY)),
                Span::styled(format_long_date(date), Style::default().fg(SELECTION_GREEN)),
            ]),
            None => Line::from(Span::styled(
                "Pick a day to see available times",
                Style::default().fg(MUTED_GRAY),
            )),
        });

        lines
    }

    fn time_lines(&self, modal: &DemoModal) -> Vec<Line<'static>> {
        let controller = modal.controller();
        let mut lines = vec![Line::from("")];

        if let Some(date) = controller.draft().selected_date {
            lines.push(Line::from(Span::styled(
                format_short_date(date),
                Style::default().fg(GOLD).add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(""));
        }

        let slots = controller.available_slots();
        if slots.is_empty() {
            lines.push(Line::from(Span::styled(
                "No times available for this date",
                Style::default().fg(MUTED_GRAY),
            )));
            return lines;
        }

        let selected = controller.draft().selected_time;
        for (idx, slot) in slots.iter().enumerate() {
            let is_cursor = idx == modal.cursor().slot_index;
            let is_selected = Some(*slot) == selected;

            let (icon, icon_color) = if is_selected {
                ("✓", SELECTION_GREEN)
            } else if is_cursor {
                ("▶", GOLD)
            } else {
                ("○", MUTED_GRAY)
            };

            let label_style = if is_selected {
                Style::default().fg(SELECTION_GREEN).add_modifier(Modifier::BOLD)
            } else if is_cursor {
                Style::default().fg(GOLD).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(SOFT_WHITE)
            };

            lines.push(Line::from(vec![
                Span::styled(format!("{icon} "), Style::default().fg(icon_color)),
                Span::styled(format!("{:<8}", slot.to_string()), label_style),
            ]));
        }

        lines
    }

    fn form_lines(&self, modal: &DemoModal) -> Vec<Line<'static>> {
        let controller = modal.controller();
        let draft = controller.draft();
        let contact = &draft.contact;
        let focused = modal.cursor().field;
        let missing = match controller.notice() {
            Some(WizardNotice::Validation(error)) => Some(error.clone()),
            _ => None,
        };

        let mut lines = Vec::new();
        if let (Some(date), Some(time)) = (draft.selected_date, draft.selected_time) {
            lines.push(Line::from(Span::styled(
                format!("{} at {}", format_long_date(date), time),
                Style::default().fg(CORNFLOWER_BLUE),
            )));
            lines.push(Line::from(""));
        }

        for field in FormField::all() {
            let is_focused = *field == focused;
            let marker = if is_focused { "▶ " } else { "  " };
            let marker_span = Span::styled(marker, Style::default().fg(GOLD));

            match field {
                FormField::Submit => {
                    let (text, style) = if controller.is_submitting() {
                        ("Scheduling Demo...", Style::default().fg(WARNING_YELLOW))
                    } else if is_focused {
                        ("[ Schedule Demo ]", Style::default().fg(DARK_BG).bg(GOLD).add_modifier(Modifier::BOLD))
                    } else {
                        ("[ Schedule Demo ]", Style::default().fg(GOLD))
                    };
                    lines.push(Line::from(""));
                    lines.push(Line::from(vec![marker_span, Span::styled(text, style)]));
                }
                FormField::Services => {
                    lines.push(Line::from(vec![marker_span, self.label_span(*field, false)]));
                    for (idx, service) in SERVICES_OF_INTEREST.iter().enumerate() {
                        let checked = contact.services_of_interest.contains(*service);
                        let highlighted = is_focused && idx == modal.cursor().option_index;
                        lines.push(Line::from(vec![
                            Span::raw(" ".repeat(4)),
                            self.option_span(
                                &format!("[{}] {}", if checked { "x" } else { " " }, service),
                                checked,
                                highlighted,
                            ),
                        ]));
                    }
                }
                FormField::PracticeSize => {
                    let mut spans = vec![marker_span, self.label_span(*field, false)];
                    for (idx, size) in PracticeSize::all().iter().enumerate() {
                        let chosen = contact.practice_size == Some(*size);
                        let highlighted = is_focused && idx == modal.cursor().option_index;
                        spans.push(self.option_span(&radio(size.label(), chosen), chosen, highlighted));
                    }
                    lines.push(Line::from(spans));
                }
                FormField::ContactMethod => {
                    let mut spans = vec![marker_span, self.label_span(*field, false)];
                    for (idx, method) in ContactMethod::all().iter().enumerate() {
                        let chosen = contact.contact_method == Some(*method);
                        let highlighted = is_focused && idx == modal.cursor().option_index;
                        spans.push(self.option_span(&radio(method.label(), chosen), chosen, highlighted));
                    }
                    lines.push(Line::from(spans));
                }
                _ => {
                    let Some(text_field) = field.text_field() else {
                        continue;
                    };
                    let is_missing = missing
                        .as_ref()
                        .is_some_and(|error| error.is_missing(text_field));
                    let value = contact.text(text_field).to_string();
                    let mut spans = vec![
                        marker_span,
                        self.label_span(*field, is_missing),
                        Span::styled(value, Style::default().fg(SOFT_WHITE)),
                    ];
                    if is_focused {
                        spans.push(Span::styled("█", Style::default().fg(GOLD)));
                    }
                    lines.push(Line::from(spans));
                }
            }
        }

        lines
    }

    fn label_span(&self, field: FormField, is_missing: bool) -> Span<'static> {
        let color = if is_missing { ERROR_RED } else { MUTED_GRAY };
        Span::styled(
            format!("{:<width$}", field.label(), width = LABEL_WIDTH),
            Style::default().fg(color),
        )
    }

    fn option_span(&self, text: &str, chosen: bool, highlighted: bool) -> Span<'static> {
        let mut style = if chosen {
            Style::default().fg(SELECTION_GREEN)
        } else {
            Style::default().fg(SOFT_WHITE)
        };
        if highlighted {
            style = style.add_modifier(Modifier::REVERSED);
        }
        Span::styled(format!("{text}  "), style)
    }

    fn success_lines(&self, modal: &DemoModal, scheduling: &SchedulingConfig) -> Vec<Line<'static>> {
        let controller = modal.controller();
        let mut lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "✓ Demo Successfully Scheduled!",
                Style::default().fg(SELECTION_GREEN).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];

        if let Some(confirmation) = controller.confirmation() {
            lines.push(Line::from(vec![
                Span::styled(format_long_date(confirmation.date), Style::default().fg(SOFT_WHITE)),
                Span::styled(format!(" at {}", confirmation.time), Style::default().fg(SOFT_WHITE)),
                Span::styled(
                    format!("  ({} min, {})", confirmation.duration_minutes, scheduling.timezone_label),
                    Style::default().fg(MUTED_GRAY),
                ),
            ]));
            let contact = &controller.draft().contact;
            lines.push(Line::from(Span::styled(
                format!("Confirmation sent to {} <{}>", contact.full_name(), contact.email.trim()),
                Style::default().fg(MUTED_GRAY),
            )));
            let reference = confirmation.confirmation_id.to_string();
            lines.push(Line::from(Span::styled(
                format!("Reference: {}", &reference[..8]),
                Style::default().fg(MUTED_GRAY),
            )));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "What happens next?",
            Style::default().fg(GOLD).add_modifier(Modifier::BOLD),
        )));
        for (idx, (title, detail)) in NEXT_STEPS.iter().enumerate() {
            lines.push(Line::from(vec![
                Span::styled(format!("{}. ", idx + 1), Style::default().fg(CORNFLOWER_BLUE)),
                Span::styled(*title, Style::default().fg(SOFT_WHITE).add_modifier(Modifier::BOLD)),
                Span::styled(format!(" - {detail}"), Style::default().fg(MUTED_GRAY)),
            ]));
        }

        lines
    }

    fn render_notice(&self, frame: &mut Frame, area: Rect, modal: &DemoModal) {
        let line = if let Some(notice) = modal.controller().notice() {
            let color = if notice.is_error() { ERROR_RED } else { SELECTION_GREEN };
            Line::from(vec![
                Span::styled(notice.title(), Style::default().fg(color).add_modifier(Modifier::BOLD)),
                Span::styled(": ", Style::default().fg(color)),
                Span::styled(notice.description(), Style::default().fg(SOFT_WHITE)),
            ])
        } else if let Some(status) = modal.status() {
            Line::from(Span::styled(status.to_string(), Style::default().fg(WARNING_YELLOW)))
        } else {
            Line::from("")
        };

        let notice = Paragraph::new(line)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(notice, area);
    }

    fn render_navigation(&self, frame: &mut Frame, area: Rect, modal: &DemoModal) {
        let block = Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(SUBDUED_BORDER))
            .style(Style::default().bg(DARK_BG));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let controller = modal.controller();
        if controller.is_submitting() {
            let waiting = Paragraph::new(Line::from(Span::styled(
                "Scheduling Demo... please wait",
                Style::default().fg(WARNING_YELLOW).add_modifier(Modifier::BOLD),
            )))
            .alignment(Alignment::Center);
            frame.render_widget(waiting, inner);
            return;
        }

        let hints: Vec<(&str, &str)> = match controller.step() {
            WizardStep::DateSelection => vec![
                ("←↑↓→", "Move"),
                ("[ ]", "Month"),
                ("Space", "Select"),
                ("Enter", "Next"),
                ("Esc", "Close"),
            ],
            WizardStep::TimeSelection => vec![
                ("↑↓", "Move"),
                ("Space", "Select"),
                ("Ctrl+B", "Back"),
                ("Enter", "Next"),
                ("Esc", "Close"),
            ],
            WizardStep::DetailsForm => vec![
                ("Tab", "Next field"),
                ("Space/←→", "Choose"),
                ("Ctrl+B", "Back"),
                ("Enter", "Schedule Demo"),
                ("Esc", "Close"),
            ],
            WizardStep::Success => vec![("Enter", "Perfect, I'm Ready!")],
        };

        let mut spans = Vec::new();
        for (idx, (key, action)) in hints.iter().enumerate() {
            if idx > 0 {
                spans.push(Span::styled("  |  ", Style::default().fg(SUBDUED_BORDER)));
            }
            spans.push(Span::styled("[", Style::default().fg(SUBDUED_BORDER)));
            spans.push(Span::styled(*key, Style::default().fg(GOLD)));
            spans.push(Span::styled("]", Style::default().fg(SUBDUED_BORDER)));
            spans.push(Span::styled(format!(" {action}"), Style::default().fg(MUTED_GRAY)));
        }

        let nav = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
        frame.render_widget(nav, inner);
    }
}

impl Default for DemoWizardComponent {
    fn default() -> Self {
        Self::new()
    }
}

fn radio(label: &str, chosen: bool) -> String {
    format!("({}) {}", if chosen { "•" } else { " " }, label)
}
