// ABOUTME: Month-grid calendar model with Monday-first padding and pluggable date availability

use chrono::{Datelike, Months, NaiveDate};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Column headers for a Monday-first week
pub const WEEKDAY_HEADERS: [&str; 7] = ["MON", "TUE", "WED", "THU", "FRI", "SAT", "SUN"];

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Decides whether a calendar date can be booked
pub trait DateAvailability: Send + Sync {
    fn is_available(&self, date: NaiveDate) -> bool;
}

/// Availability rule used by the marketing site: every day from a fixed
/// day-of-month onwards is bookable, in every month.
///
/// The threshold is a constant, not a lead time computed from today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinimumDayOfMonth {
    pub min_day: u32,
}

impl MinimumDayOfMonth {
    pub const REFERENCE_MIN_DAY: u32 = 3;

    pub const fn new(min_day: u32) -> Self {
        Self { min_day }
    }
}

impl Default for MinimumDayOfMonth {
    fn default() -> Self {
        Self::new(Self::REFERENCE_MIN_DAY)
    }
}

impl DateAvailability for MinimumDayOfMonth {
    fn is_available(&self, date: NaiveDate) -> bool {
        date.day() >= self.min_day
    }
}

/// One cell of the month grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CalendarCell {
    /// Leading empty cell before the 1st of the month
    Padding,
    Day {
        day: u32,
        date: NaiveDate,
        available: bool,
    },
}

impl CalendarCell {
    pub const fn date(&self) -> Option<NaiveDate> {
        match self {
            Self::Padding => None,
            Self::Day { date, .. } => Some(*date),
        }
    }

    pub const fn is_available(&self) -> bool {
        matches!(self, Self::Day { available: true, .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid month '{0}': expected YYYY-MM")]
pub struct ParseMonthError(pub String);

/// A displayed month. `month()` is zero-based (0 = January).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarMonth {
    first: NaiveDate,
}

impl CalendarMonth {
    /// `month` is zero-based; returns `None` outside 0..=11 or chrono's year range
    pub fn new(month: u32, year: i32) -> Option<Self> {
        if month > 11 {
            return None;
        }
        NaiveDate::from_ymd_opt(year, month + 1, 1).map(|first| Self { first })
    }

    /// The month that contains `date`
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            first: date.with_day(1).unwrap_or(date),
        }
    }

    pub fn month(&self) -> u32 {
        self.first.month0()
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub const fn first_day(&self) -> NaiveDate {
        self.first
    }

    /// Previous month, wrapping December of the prior year.
    /// Saturates at the earliest month chrono can represent.
    pub fn previous(&self) -> Self {
        self.first
            .checked_sub_months(Months::new(1))
            .map_or(*self, |first| Self { first })
    }

    /// Next month, wrapping into January of the following year
    pub fn next(&self) -> Self {
        self.first
            .checked_add_months(Months::new(1))
            .map_or(*self, |first| Self { first })
    }

    pub fn days_in_month(&self) -> u32 {
        (28..=31)
            .rev()
            .find(|day| self.first.with_day(*day).is_some())
            .unwrap_or(28)
    }

    /// Count of empty cells before the 1st in a Monday-first grid (0..=6)
    pub fn leading_padding(&self) -> u32 {
        self.first.weekday().number_from_monday() - 1
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month0() == self.month()
    }

    /// Date for a day-of-month, if the month has that day
    pub fn date_for_day(&self, day: u32) -> Option<NaiveDate> {
        if day == 0 {
            return None;
        }
        self.first.with_day(day)
    }

    /// Grid cells: leading padding, then one cell per day with its availability
    pub fn cells(&self, availability: &dyn DateAvailability) -> Vec<CalendarCell> {
        let padding = self.leading_padding() as usize;
        let mut cells = Vec::with_capacity(padding + self.days_in_month() as usize);
        cells.extend(std::iter::repeat(CalendarCell::Padding).take(padding));

        for day in 1..=self.days_in_month() {
            if let Some(date) = self.first.with_day(day) {
                cells.push(CalendarCell::Day {
                    day,
                    date,
                    available: availability.is_available(date),
                });
            }
        }

        cells
    }

    /// "September 2025"
    pub fn title(&self) -> String {
        format!("{} {}", MONTH_NAMES[self.month() as usize], self.year())
    }

    /// "2025-09", the form used in config files
    pub fn key(&self) -> String {
        self.first.format("%Y-%m").to_string()
    }
}

impl fmt::Display for CalendarMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title())
    }
}

impl FromStr for CalendarMonth {
    type Err = ParseMonthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseMonthError(s.to_string());
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        if !(1..=12).contains(&month) {
            return Err(invalid());
        }
        Self::new(month - 1, year).ok_or_else(invalid)
    }
}

/// "Friday, September 5, 2025"
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

/// "Friday, September 5"
pub fn format_short_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_september_2025_grid() {
        // September 1st 2025 is a Monday
        let month = CalendarMonth::new(8, 2025).unwrap();
        assert_eq!(month.leading_padding(), 0);
        assert_eq!(month.days_in_month(), 30);
        assert_eq!(month.title(), "September 2025");

        let cells = month.cells(&MinimumDayOfMonth::default());
        assert_eq!(cells.len(), 30);
        assert!(!cells[0].is_available());
        assert!(!cells[1].is_available());
        assert!(cells[2].is_available());
        assert_eq!(cells[4].date(), Some(date(2025, 9, 5)));
    }

    #[test]
    fn test_sunday_start_gets_six_padding_cells() {
        // June 1st 2025 is a Sunday
        let month = CalendarMonth::new(5, 2025).unwrap();
        assert_eq!(month.leading_padding(), 6);

        let cells = month.cells(&MinimumDayOfMonth::default());
        assert_eq!(cells.len(), 6 + 30);
        assert!(cells[..6].iter().all(|c| *c == CalendarCell::Padding));
        assert_eq!(cells[6].date(), Some(date(2025, 6, 1)));
    }

    #[test]
    fn test_leap_february() {
        assert_eq!(CalendarMonth::new(1, 2024).unwrap().days_in_month(), 29);
        assert_eq!(CalendarMonth::new(1, 2025).unwrap().days_in_month(), 28);
        assert_eq!(CalendarMonth::new(1, 1900).unwrap().days_in_month(), 28);
        assert_eq!(CalendarMonth::new(1, 2000).unwrap().days_in_month(), 29);
    }

    #[test]
    fn test_navigation_wraps_years() {
        let january = CalendarMonth::new(0, 2025).unwrap();
        let december = january.previous();
        assert_eq!((december.month(), december.year()), (11, 2024));
        assert_eq!(december.next(), january);

        let after = CalendarMonth::new(11, 2025).unwrap().next();
        assert_eq!((after.month(), after.year()), (0, 2026));
    }

    #[test]
    fn test_new_rejects_out_of_range_month() {
        assert!(CalendarMonth::new(12, 2025).is_none());
    }

    #[test]
    fn test_minimum_day_rule() {
        let rule = MinimumDayOfMonth::default();
        assert!(!rule.is_available(date(2025, 9, 1)));
        assert!(!rule.is_available(date(2025, 9, 2)));
        assert!(rule.is_available(date(2025, 9, 3)));
        assert!(rule.is_available(date(2025, 9, 30)));

        let stricter = MinimumDayOfMonth::new(10);
        assert!(!stricter.is_available(date(2025, 9, 9)));
    }

    #[test]
    fn test_parse_month_key() {
        let month: CalendarMonth = "2025-09".parse().unwrap();
        assert_eq!((month.month(), month.year()), (8, 2025));
        assert_eq!(month.key(), "2025-09");

        for bad in ["2025", "2025-13", "2025-00", "sept-2025", ""] {
            assert!(bad.parse::<CalendarMonth>().is_err(), "expected '{bad}' to be rejected");
        }
    }

    #[test]
    fn test_date_for_day() {
        let month = CalendarMonth::new(8, 2025).unwrap();
        assert_eq!(month.date_for_day(5), Some(date(2025, 9, 5)));
        assert_eq!(month.date_for_day(0), None);
        assert_eq!(month.date_for_day(31), None);
        assert!(month.contains(date(2025, 9, 30)));
        assert!(!month.contains(date(2025, 10, 1)));
    }

    #[test]
    fn test_date_formats() {
        assert_eq!(format_long_date(date(2025, 9, 5)), "Friday, September 5, 2025");
        assert_eq!(format_short_date(date(2025, 9, 5)), "Friday, September 5");
    }
}
