// ABOUTME: CLI calendar command - print a month grid with bookable days marked
//
// Unavailable days carry a trailing '*' in text output

use anyhow::{anyhow, Result};
use chrono::{Local, NaiveDate};
use serde::Serialize;

use super::{CalendarArgs, OutputFormat};
use crate::config::AppConfig;
use crate::models::calendar::WEEKDAY_HEADERS;
use crate::models::{CalendarCell, CalendarMonth, DateAvailability};

/// A month as reported by the calendar command
#[derive(Debug, Clone, Serialize)]
pub struct CalendarReport {
    /// "2025-09"
    pub month: String,
    pub title: String,
    pub weekday_headers: Vec<&'static str>,
    pub leading_padding: u32,
    pub cells: Vec<CalendarCell>,
}

impl CalendarReport {
    pub fn build(month: CalendarMonth, availability: &dyn DateAvailability) -> Self {
        Self {
            month: month.key(),
            title: month.title(),
            weekday_headers: WEEKDAY_HEADERS.to_vec(),
            leading_padding: month.leading_padding(),
            cells: month.cells(availability),
        }
    }

    pub fn available_days(&self) -> Vec<u32> {
        self.cells
            .iter()
            .filter_map(|cell| match cell {
                CalendarCell::Day { day, available: true, .. } => Some(*day),
                _ => None,
            })
            .collect()
    }
}

/// Execute the calendar command
pub fn execute(args: &CalendarArgs, format: OutputFormat, config: &AppConfig) -> Result<()> {
    let month = resolve_month(args, config, Local::now().date_naive())?;
    let services = config.wizard_services();
    let report = CalendarReport::build(month, services.availability.as_ref());

    match format {
        OutputFormat::Json => output_json(&report)?,
        OutputFormat::Text => print!("{}", render_text(&report)),
    }

    Ok(())
}

/// Month to show: explicit flags win, otherwise the configured initial month
pub fn resolve_month(args: &CalendarArgs, config: &AppConfig, today: NaiveDate) -> Result<CalendarMonth> {
    let base = config.initial_month(today);
    let month0 = args.month.map_or(base.month(), |m| m.saturating_sub(1));
    let year = args.year.unwrap_or_else(|| base.year());

    CalendarMonth::new(month0, year)
        .ok_or_else(|| anyhow!("No such month: {}-{:02}", year, month0 + 1))
}

fn output_json(report: &CalendarReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    println!("{json}");
    Ok(())
}

/// Month grid as plain text, one week per line
pub fn render_text(report: &CalendarReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:^35}\n", report.title));
    for header in &report.weekday_headers {
        out.push_str(&format!("{header:^5}"));
    }
    out.push('\n');

    for week in report.cells.chunks(7) {
        let line: String = week
            .iter()
            .map(|cell| match cell {
                CalendarCell::Padding => " ".repeat(5),
                CalendarCell::Day { day, available, .. } => {
                    format!("{:>3}{} ", day, if *available { ' ' } else { '*' })
                }
            })
            .collect();
        out.push_str(line.trim_end());
        out.push('\n');
    }

    out.push_str("\n* not available\n");
    out
}
