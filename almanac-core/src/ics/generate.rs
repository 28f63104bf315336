//! ICS calendar generation.

use std::collections::HashMap;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use icalendar::{Calendar, Component, Property, ValueType};

use crate::error::{AlmanacError, AlmanacResult};
use crate::event::{EventRecord, EventSet};
use crate::naming::CalendarScope;

const PRODID: &str = "-//almanac//almanac-core//EN";

/// A rendered calendar, ready to be written under `file_name`.
#[derive(Debug, Clone)]
pub struct CalendarFile {
    pub scope: CalendarScope,
    pub file_name: String,
    pub content: String,
    pub event_count: usize,
}

impl CalendarFile {
    /// Render `events` as the calendar for `scope`.
    pub fn emit(
        events: &EventSet,
        scope: &CalendarScope,
        stamp: DateTime<Utc>,
    ) -> AlmanacResult<Self> {
        Ok(CalendarFile {
            scope: scope.clone(),
            file_name: scope.file_name(),
            content: generate_calendar(events, scope.display_name(), stamp)?,
            event_count: events.len(),
        })
    }
}

/// Generate a published calendar holding one all-day entry per event.
///
/// `stamp` fills CREATED, DTSTAMP and LAST-MODIFIED; everything else is a
/// function of `events` and `display_name`.
pub fn generate_calendar(
    events: &EventSet,
    display_name: &str,
    stamp: DateTime<Utc>,
) -> AlmanacResult<String> {
    if display_name.trim().is_empty() {
        return Err(AlmanacError::IcsGenerate(
            "calendar display name is empty".into(),
        ));
    }

    let mut cal = Calendar::new();
    cal.name(&format!("Global Calendar - {}", display_name));
    cal.description(&format!("AI-generated calendar of events for {}", display_name));

    let stamp = stamp.format("%Y%m%dT%H%M%SZ").to_string();
    let mut uids = UidAllocator::default();

    for event in events {
        let mut entry = icalendar::Event::new();
        entry.uid(&uids.next(event));
        entry.summary(event.name());
        entry.description(&describe(event));

        entry.add_property("DTSTAMP", &stamp);
        entry.add_property("CREATED", &stamp);
        entry.add_property("LAST-MODIFIED", &stamp);

        add_date_property(&mut entry, "DTSTART", event.start_date());
        add_date_property(&mut entry, "DTEND", event.end_exclusive());

        cal.push(entry.done());
    }

    let cal = cal.done();

    Ok(normalize_header(&cal.to_string()))
}

/// Attribution text for an entry; ranges also spell out their dates.
fn describe(event: &EventRecord) -> String {
    let group = if event.group().is_empty() {
        "Uncategorized"
    } else {
        event.group()
    };

    if event.is_range() {
        format!(
            "{} event for {} from {} to {}",
            group,
            event.subject(),
            event.start_date(),
            event.end_date()
        )
    } else {
        format!("{} event for {}", group, event.subject())
    }
}

/// Hands out `<name>-<start year>` identifiers, suffixing repeats within one calendar.
#[derive(Default)]
struct UidAllocator {
    issued: HashMap<String, usize>,
}

impl UidAllocator {
    fn next(&mut self, event: &EventRecord) -> String {
        let base = format!("{}-{}", event.name(), event.start_date().year());
        let count = self.issued.entry(base.clone()).or_insert(0);
        *count += 1;

        if *count == 1 {
            base
        } else {
            format!("{}-{}", base, count)
        }
    }
}

/// All-day date property (`;VALUE=DATE`)
fn add_date_property(entry: &mut icalendar::Event, name: &str, date: NaiveDate) {
    let mut prop = Property::new(name, date.format("%Y%m%d").to_string());
    prop.append_parameter(ValueType::Date);
    entry.append_property(prop);
}

/// Replace the icalendar crate's calendar header with a fixed one:
/// our PRODID, Gregorian scale and publish method.
fn normalize_header(ics: &str) -> String {
    let mut result = String::with_capacity(ics.len() + 64);
    let mut depth = 0usize;

    for line in ics.lines() {
        if line.starts_with("BEGIN:") {
            depth += 1;
        } else if line.starts_with("END:") {
            depth = depth.saturating_sub(1);
        }

        let calendar_level = depth == 1;
        if calendar_level
            && ["VERSION:", "PRODID:", "CALSCALE:", "METHOD:"]
                .iter()
                .any(|p| line.starts_with(p))
        {
            continue;
        }

        result.push_str(line);
        result.push_str("\r\n");

        if line == "BEGIN:VCALENDAR" {
            for header in [
                "VERSION:2.0".to_string(),
                format!("PRODID:{}", PRODID),
                "CALSCALE:GREGORIAN".to_string(),
                "METHOD:PUBLISH".to_string(),
            ] {
                result.push_str(&header);
                result.push_str("\r\n");
            }
        }
    }

    result
}
