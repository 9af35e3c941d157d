// ABOUTME: Property tests for calendar month arithmetic, grid layout, and date availability

use chrono::{Datelike, NaiveDate};
use demo_scheduler::components::demo_wizard::{WizardController, WizardError, WizardServices};
use demo_scheduler::models::{CalendarCell, CalendarMonth, MinimumDayOfMonth};
use proptest::prelude::*;

fn any_month() -> impl Strategy<Value = CalendarMonth> {
    (0u32..12, 1970i32..2100).prop_map(|(month, year)| CalendarMonth::new(month, year).unwrap())
}

proptest! {
    #[test]
    fn leading_padding_matches_weekday_of_first(month in any_month()) {
        let padding = month.leading_padding();
        prop_assert!(padding <= 6);
        prop_assert_eq!(padding, month.first_day().weekday().num_days_from_monday());
    }

    #[test]
    fn grid_is_padding_then_every_day(month in any_month(), min_day in 1u32..=31) {
        let rule = MinimumDayOfMonth::new(min_day);
        let cells = month.cells(&rule);
        let padding = month.leading_padding() as usize;

        prop_assert_eq!(cells.len(), padding + month.days_in_month() as usize);
        prop_assert!(cells[..padding].iter().all(|c| *c == CalendarCell::Padding));

        for (offset, cell) in cells[padding..].iter().enumerate() {
            match cell {
                CalendarCell::Day { day, date, available } => {
                    prop_assert_eq!(*day as usize, offset + 1);
                    prop_assert_eq!(date.day(), *day);
                    prop_assert_eq!(*available, *day >= min_day);
                }
                CalendarCell::Padding => prop_assert!(false, "padding after the first day"),
            }
        }
    }

    #[test]
    fn next_then_previous_is_identity(month in any_month()) {
        prop_assert_eq!(month.next().previous(), month);
        prop_assert_eq!(month.previous().next(), month);
        let next = month.next();
        prop_assert_eq!((next.month() + 12 - month.month()) % 12, 1);
    }

    #[test]
    fn early_days_are_rejected_without_touching_draft(month in any_month(), day in 1u32..3) {
        let mut controller = WizardController::new(WizardServices::reference(), month);
        let date = month.date_for_day(day).unwrap();

        let result = controller.select_date(date);

        prop_assert_eq!(result, Err(WizardError::UnavailableDate { date }));
        prop_assert!(controller.draft().selected_date.is_none());
        prop_assert_eq!(controller.calendar_month(), month);
    }

    #[test]
    fn later_days_are_selectable(month in any_month(), day in 3u32..=28) {
        let mut controller = WizardController::new(WizardServices::reference(), month);
        let date = month.date_for_day(day).unwrap();

        prop_assert!(controller.select_date(date).is_ok());
        prop_assert_eq!(controller.draft().selected_date, Some(date));
    }

    #[test]
    fn containing_month_holds_the_date(year in 1970i32..2100, ordinal in 1u32..=365) {
        let date = NaiveDate::from_yo_opt(year, ordinal).unwrap();
        let month = CalendarMonth::containing(date);
        prop_assert!(month.contains(date));
        prop_assert_eq!(month.date_for_day(date.day()), Some(date));
    }
}
