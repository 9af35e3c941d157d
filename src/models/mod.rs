// ABOUTME: Data models for the demo scheduler: bookings, the month calendar, and time slots

pub mod booking;
pub mod calendar;
pub mod time_slot;

pub use booking::{
    BookingConfirmation, BookingDraft, BookingRequest, ContactField, ContactInfo, ContactMethod,
    PracticeSize, DEFAULT_SESSION_MINUTES, SERVICES_OF_INTEREST,
};
pub use calendar::{
    CalendarCell, CalendarMonth, DateAvailability, MinimumDayOfMonth, format_long_date,
    format_short_date,
};
pub use time_slot::{reference_slots, StaticSlotCatalog, TimeSlot, TimeSlotCatalog};
