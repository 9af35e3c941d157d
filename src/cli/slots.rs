// ABOUTME: CLI slots command - list the demo times offered on a date

use anyhow::Result;
use chrono::NaiveDate;
use serde::Serialize;

use super::{OutputFormat, SlotsArgs};
use crate::components::demo_wizard::WizardServices;
use crate::config::AppConfig;
use crate::models::{format_long_date, TimeSlot};

#[derive(Debug, Clone, Serialize)]
pub struct SlotsReport {
    pub date: NaiveDate,
    /// Whether the date itself is bookable
    pub available: bool,
    pub slots: Vec<TimeSlot>,
}

impl SlotsReport {
    /// Slots for `date`; an unavailable date offers none
    pub fn build(date: NaiveDate, services: &WizardServices) -> Self {
        let available = services.availability.is_available(date);
        let slots = if available {
            services.catalog.list_slots(date)
        } else {
            Vec::new()
        };
        Self {
            date,
            available,
            slots,
        }
    }
}

/// Execute the slots command
pub fn execute(args: &SlotsArgs, format: OutputFormat, config: &AppConfig) -> Result<()> {
    let report = SlotsReport::build(args.date, &config.wizard_services());

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report)?;
            println!("{json}");
        }
        OutputFormat::Text => print!("{}", render_text(&report, &config.scheduling.timezone_label)),
    }

    Ok(())
}

pub fn render_text(report: &SlotsReport, timezone_label: &str) -> String {
    let date = format_long_date(report.date);
    if !report.available {
        return format!("{date} is not available for booking\n");
    }
    if report.slots.is_empty() {
        return format!("No times available on {date}\n");
    }

    let mut out = format!("{date} ({timezone_label})\n");
    for slot in &report.slots {
        out.push_str(&format!("  {slot}\n"));
    }
    out
}
