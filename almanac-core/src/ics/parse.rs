//! Reading published calendars back, using the icalendar crate's parser.

use chrono::NaiveDate;
use icalendar::{
    CalendarDateTime, DatePerhapsTime,
    parser::{read_calendar, unfold},
};

use crate::error::{AlmanacError, AlmanacResult};

/// One VEVENT of a calendar file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedEntry {
    pub uid: String,
    pub summary: String,
    pub description: Option<String>,
    pub start: NaiveDate,
    /// DTEND, one day past the last included day for all-day entries
    pub end_exclusive: NaiveDate,
}

impl ParsedEntry {
    /// Last included day.
    pub fn end_date(&self) -> NaiveDate {
        self.end_exclusive.pred_opt().unwrap_or(self.end_exclusive).max(self.start)
    }
}

/// Parse every VEVENT in `content`. Entries missing UID, DTSTART or DTEND are skipped.
pub fn read_calendar_events(content: &str) -> AlmanacResult<Vec<ParsedEntry>> {
    let unfolded = unfold(content);
    let calendar = read_calendar(&unfolded).map_err(|e| AlmanacError::IcsParse(e.to_string()))?;

    let entries = calendar
        .components
        .iter()
        .filter(|c| c.name == "VEVENT")
        .filter_map(|vevent| {
            let uid = vevent.find_prop("UID")?.val.to_string();
            let summary = vevent
                .find_prop("SUMMARY")
                .map(|p| p.val.to_string())
                .unwrap_or_default();
            let description = vevent.find_prop("DESCRIPTION").map(|p| p.val.to_string());
            let start = to_date(DatePerhapsTime::try_from(vevent.find_prop("DTSTART")?).ok()?);
            let end_exclusive =
                to_date(DatePerhapsTime::try_from(vevent.find_prop("DTEND")?).ok()?);

            Some(ParsedEntry {
                uid,
                summary,
                description,
                start,
                end_exclusive,
            })
        })
        .collect();

    Ok(entries)
}

fn to_date(dpt: DatePerhapsTime) -> NaiveDate {
    match dpt {
        DatePerhapsTime::Date(d) => d,
        DatePerhapsTime::DateTime(cal_dt) => match cal_dt {
            CalendarDateTime::Utc(dt) => dt.date_naive(),
            CalendarDateTime::Floating(naive) => naive.date(),
            CalendarDateTime::WithTimezone { date_time, .. } => date_time.date(),
        },
    }
}
