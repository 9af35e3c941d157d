// ABOUTME: Time-of-day slots offered for a demo and the catalog seam that lists them per date
//
// Slots render in the 12-hour lowercase form used on the marketing site ("3:15am").

use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Slots offered by the reference catalog, as (hour, minute) in 24-hour time
pub const REFERENCE_SLOTS: [(u32, u32); 4] = [(2, 30), (3, 15), (4, 0), (20, 30)];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid time slot '{0}': expected a 12-hour time such as 3:15am")]
pub struct ParseSlotError(pub String);

/// A discrete offerable time of day
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeSlot(NaiveTime);

impl TimeSlot {
    /// Build a slot from a 24-hour hour and minute
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }

    pub const fn time(&self) -> NaiveTime {
        self.0
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hour = self.0.hour();
        let (hour12, suffix) = match hour {
            0 => (12, "am"),
            1..=11 => (hour, "am"),
            12 => (12, "pm"),
            _ => (hour - 12, "pm"),
        };
        write!(f, "{}:{:02}{}", hour12, self.0.minute(), suffix)
    }
}

impl FromStr for TimeSlot {
    type Err = ParseSlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseSlotError(s.to_string());
        let normalized = s.trim().to_ascii_lowercase();

        let (clock, is_pm) = if let Some(rest) = normalized.strip_suffix("am") {
            (rest, false)
        } else if let Some(rest) = normalized.strip_suffix("pm") {
            (rest, true)
        } else {
            return Err(invalid());
        };

        let (hour, minute) = clock.split_once(':').ok_or_else(invalid)?;
        let all_digits = |part: &str| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit());
        if !all_digits(hour) || hour.len() > 2 || !all_digits(minute) || minute.len() != 2 {
            return Err(invalid());
        }

        let hour: u32 = hour.parse().map_err(|_| invalid())?;
        let minute: u32 = minute.parse().map_err(|_| invalid())?;
        if !(1..=12).contains(&hour) {
            return Err(invalid());
        }

        let hour24 = match (hour, is_pm) {
            (12, false) => 0,
            (12, true) => 12,
            (h, false) => h,
            (h, true) => h + 12,
        };

        Self::from_hm(hour24, minute).ok_or_else(invalid)
    }
}

impl Serialize for TimeSlot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeSlot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Source of offerable slots for a date.
///
/// An empty list is a valid answer and means the date has no availability.
pub trait TimeSlotCatalog: Send + Sync {
    /// Ordered slots offered on `date`
    fn list_slots(&self, date: NaiveDate) -> Vec<TimeSlot>;

    fn offers(&self, date: NaiveDate, slot: TimeSlot) -> bool {
        self.list_slots(date).contains(&slot)
    }
}

/// Catalog that offers the same slots on every date
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticSlotCatalog {
    slots: Vec<TimeSlot>,
}

impl StaticSlotCatalog {
    pub fn new(slots: Vec<TimeSlot>) -> Self {
        Self { slots }
    }

    /// The fixed list shown on the marketing site: 2:30am, 3:15am, 4:00am, 8:30pm
    pub fn reference() -> Self {
        Self::new(reference_slots())
    }
}

impl Default for StaticSlotCatalog {
    fn default() -> Self {
        Self::reference()
    }
}

impl TimeSlotCatalog for StaticSlotCatalog {
    fn list_slots(&self, _date: NaiveDate) -> Vec<TimeSlot> {
        self.slots.clone()
    }
}

/// Reference slots as `TimeSlot` values
pub fn reference_slots() -> Vec<TimeSlot> {
    REFERENCE_SLOTS
        .iter()
        .filter_map(|&(hour, minute)| TimeSlot::from_hm(hour, minute))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(s: &str) -> TimeSlot {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_and_display_reference_slots() {
        let rendered: Vec<String> = reference_slots().iter().map(ToString::to_string).collect();
        assert_eq!(rendered, vec!["2:30am", "3:15am", "4:00am", "8:30pm"]);

        for text in ["2:30am", "3:15am", "4:00am", "8:30pm"] {
            assert_eq!(slot(text).to_string(), text);
        }
    }

    #[test]
    fn test_midnight_and_noon() {
        assert_eq!(slot("12:00am").time(), NaiveTime::from_hms_opt(0, 0, 0).unwrap());
        assert_eq!(slot("12:45pm").time(), NaiveTime::from_hms_opt(12, 45, 0).unwrap());
        assert_eq!(TimeSlot::from_hm(0, 5).unwrap().to_string(), "12:05am");
    }

    #[test]
    fn test_parse_is_case_insensitive_and_trims() {
        assert_eq!(slot(" 3:15AM "), slot("3:15am"));
        assert_eq!(slot("08:30pm"), slot("8:30pm"));
    }

    #[test]
    fn test_parse_rejects_malformed_input() {
        for bad in ["", "3:15", "13:00pm", "0:30am", "3:5am", "3:60am", "three:15am", "3-15am", "+3:15am"] {
            assert!(bad.parse::<TimeSlot>().is_err(), "expected '{bad}' to be rejected");
        }
    }

    #[test]
    fn test_static_catalog_is_date_independent() {
        let catalog = StaticSlotCatalog::reference();
        let a = NaiveDate::from_ymd_opt(2025, 9, 5).unwrap();
        let b = NaiveDate::from_ymd_opt(2026, 1, 20).unwrap();
        assert_eq!(catalog.list_slots(a), catalog.list_slots(b));
        assert!(catalog.offers(a, slot("3:15am")));
        assert!(!catalog.offers(a, slot("1:45am")));
    }

    #[test]
    fn test_empty_catalog_offers_nothing() {
        let catalog = StaticSlotCatalog::new(Vec::new());
        let date = NaiveDate::from_ymd_opt(2025, 9, 5).unwrap();
        assert!(catalog.list_slots(date).is_empty());
        assert!(!catalog.offers(date, slot("3:15am")));
    }

    #[test]
    fn test_serde_uses_display_form() {
        let json = serde_json::to_string(&slot("8:30pm")).unwrap();
        assert_eq!(json, "\"8:30pm\"");
        let back: TimeSlot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, slot("8:30pm"));
        assert!(serde_json::from_str::<TimeSlot>("\"25:00\"").is_err());
    }
}
