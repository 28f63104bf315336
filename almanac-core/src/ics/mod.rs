//! ICS calendar emission and read-back.
//!
//! This module writes published calendars according to RFC 5545 and can
//! read them back into their entries.

mod generate;
mod parse;

pub use generate::{generate_calendar, CalendarFile};
pub use parse::{read_calendar_events, ParsedEntry};
