// ABOUTME: Configuration management for the demo scheduler
// Loads scheduling, submission, and validation settings from ~/.demo-scheduler/config.toml

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::components::demo_wizard::{BookingFormValidator, SimulatedSubmitter, WizardServices};
use crate::models::{
    reference_slots, CalendarMonth, MinimumDayOfMonth, StaticSlotCatalog, TimeSlot,
    DEFAULT_SESSION_MINUTES,
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Calendar, slot, and session settings
    #[serde(default)]
    pub scheduling: SchedulingConfig,

    /// Scheduling service settings
    #[serde(default)]
    pub submission: SubmissionConfig,

    /// Contact form rules
    #[serde(default)]
    pub validation: ValidationConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulingConfig {
    /// First bookable day of every month
    #[serde(default = "default_min_available_day")]
    pub min_available_day: u32,

    /// Slots offered on every date, e.g. "3:15am"
    #[serde(default = "reference_slots")]
    pub time_slots: Vec<TimeSlot>,

    /// Month shown when the modal opens, as "YYYY-MM". Today's month when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_month: Option<String>,

    #[serde(default = "default_session_minutes")]
    pub session_minutes: u32,

    /// Shown next to the session length in the wizard header
    #[serde(default = "default_timezone_label")]
    pub timezone_label: String,
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            min_available_day: default_min_available_day(),
            time_slots: reference_slots(),
            initial_month: None,
            session_minutes: default_session_minutes(),
            timezone_label: default_timezone_label(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionConfig {
    /// Round trip of the simulated scheduling service
    #[serde(default = "default_simulated_delay_ms")]
    pub simulated_delay_ms: u64,

    /// Upper bound on a single submission
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            simulated_delay_ms: default_simulated_delay_ms(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Reject malformed email addresses, not just empty ones
    #[serde(default)]
    pub strict_email: bool,
}

const fn default_min_available_day() -> u32 {
    MinimumDayOfMonth::REFERENCE_MIN_DAY
}

const fn default_session_minutes() -> u32 {
    DEFAULT_SESSION_MINUTES
}

fn default_timezone_label() -> String {
    "India Standard Time".to_string()
}

const fn default_simulated_delay_ms() -> u64 {
    2000
}

const fn default_timeout_secs() -> u64 {
    30
}

impl AppConfig {
    /// Get the base demo-scheduler directory
    pub fn base_dir() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Could not determine home directory")?;
        Ok(home.join(".demo-scheduler"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::base_dir()?.join("config.toml"))
    }

    /// Load from the default location
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    /// Load from `path`; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, content)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;

        Ok(())
    }

    /// Month the modal opens on. An unparseable value falls back to today's month.
    pub fn initial_month(&self, today: NaiveDate) -> CalendarMonth {
        match self.scheduling.initial_month.as_deref() {
            Some(raw) => raw.parse().unwrap_or_else(|e| {
                warn!("Ignoring scheduling.initial_month: {}", e);
                CalendarMonth::containing(today)
            }),
            None => CalendarMonth::containing(today),
        }
    }

    pub fn submission_timeout(&self) -> Duration {
        Duration::from_secs(self.submission.timeout_secs)
    }

    /// Wizard collaborators built from these settings
    pub fn wizard_services(&self) -> WizardServices {
        let submitter = SimulatedSubmitter::new(
            Duration::from_millis(self.submission.simulated_delay_ms),
            self.scheduling.session_minutes,
        );

        WizardServices {
            availability: Arc::new(MinimumDayOfMonth::new(self.scheduling.min_available_day)),
            catalog: Arc::new(StaticSlotCatalog::new(self.scheduling.time_slots.clone())),
            validator: BookingFormValidator::with_strict_email(self.validation.strict_email),
            submitter: Arc::new(submitter),
            submission_timeout: self.submission_timeout(),
        }
    }
}
