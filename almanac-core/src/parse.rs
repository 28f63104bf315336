//! Best-effort parsing of backend replies into event records.
//!
//! Replies are natural language, not a contract. Every line is scanned on its
//! own and anything that is not confidently `Name: Date` or
//! `Name: Date - Date` is discarded with a reason instead of failing the reply.

use std::fmt;

use chrono::NaiveDate;
use tracing::debug;

use crate::error::{AlmanacError, AlmanacResult};
use crate::event::{EventRecord, EventSet};

/// Template label the prompt uses for the name column.
pub const PLACEHOLDER_NAME: &str = "Event Name";

const NAME_SEPARATOR: &str = ": ";
const RANGE_SEPARATORS: [&str; 2] = [" - ", " – "];
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Why a line did not become an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscardReason {
    MissingSeparator,
    EmptyName,
    PlaceholderName,
    InvalidDate(String),
    InvertedRange,
}

impl fmt::Display for DiscardReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscardReason::MissingSeparator => write!(f, "no 'name: date' separator"),
            DiscardReason::EmptyName => write!(f, "empty event name"),
            DiscardReason::PlaceholderName => write!(f, "placeholder event name"),
            DiscardReason::InvalidDate(date) => write!(f, "invalid date '{}'", date),
            DiscardReason::InvertedRange => write!(f, "range ends before it starts"),
        }
    }
}

/// Result of scanning a single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    Event(EventRecord),
    Blank,
    Discarded(DiscardReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscardedLine {
    /// 1-based line number in the reply
    pub line_number: usize,
    pub text: String,
    pub reason: DiscardReason,
}

/// Events recovered from one reply, plus the lines that were dropped.
#[derive(Debug, Clone, Default)]
pub struct ParsedResponse {
    pub events: EventSet,
    pub discarded: Vec<DiscardedLine>,
}

/// Parse a whole reply for `subject`.
///
/// Fails with `NoEventsParsed` when no line survives, so callers can treat
/// the subject as failed instead of silently publishing nothing.
pub fn parse_response(raw: &str, subject: &str) -> AlmanacResult<ParsedResponse> {
    let mut parsed = ParsedResponse::default();

    for (index, line) in raw.lines().enumerate() {
        match parse_line(line, subject) {
            LineOutcome::Event(event) => parsed.events.push(event),
            LineOutcome::Blank => {}
            LineOutcome::Discarded(reason) => {
                debug!(subject, line = index + 1, %reason, text = line, "skipping line");
                parsed.discarded.push(DiscardedLine {
                    line_number: index + 1,
                    text: line.to_string(),
                    reason,
                });
            }
        }
    }

    debug!(
        subject,
        events = parsed.events.len(),
        discarded = parsed.discarded.len(),
        "parsed reply"
    );

    if parsed.events.is_empty() {
        return Err(AlmanacError::NoEventsParsed {
            subject: subject.to_string(),
            discarded: parsed.discarded.len(),
        });
    }

    Ok(parsed)
}

/// Scan one line of a reply.
pub fn parse_line(line: &str, subject: &str) -> LineOutcome {
    let line = line.trim();
    if line.is_empty() {
        return LineOutcome::Blank;
    }

    let Some((name, dates)) = line.split_once(NAME_SEPARATOR) else {
        return LineOutcome::Discarded(DiscardReason::MissingSeparator);
    };

    let name = strip_list_marker(name.trim());
    if name.is_empty() {
        return LineOutcome::Discarded(DiscardReason::EmptyName);
    }
    if name.eq_ignore_ascii_case(PLACEHOLDER_NAME) {
        return LineOutcome::Discarded(DiscardReason::PlaceholderName);
    }

    let (start, end) = match parse_dates(dates.trim()) {
        Ok(range) => range,
        Err(reason) => return LineOutcome::Discarded(reason),
    };

    match EventRecord::new(name, start, end, subject) {
        Some(event) => LineOutcome::Event(event),
        None => LineOutcome::Discarded(DiscardReason::InvertedRange),
    }
}

fn parse_dates(dates: &str) -> Result<(NaiveDate, NaiveDate), DiscardReason> {
    let range = RANGE_SEPARATORS
        .iter()
        .find_map(|sep| dates.split_once(sep));

    match range {
        Some((start, end)) => Ok((parse_date(start.trim())?, parse_date(end.trim())?)),
        None => {
            let date = parse_date(dates)?;
            Ok((date, date))
        }
    }
}

fn parse_date(s: &str) -> Result<NaiveDate, DiscardReason> {
    // chrono accepts unpadded fields, so insist on the exact YYYY-MM-DD shape
    let well_formed = s.len() == 10
        && s.char_indices()
            .all(|(i, c)| if i == 4 || i == 7 { c == '-' } else { c.is_ascii_digit() });

    if !well_formed {
        return Err(DiscardReason::InvalidDate(s.to_string()));
    }

    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| DiscardReason::InvalidDate(s.to_string()))
}

/// Drop a leading markdown bullet or list number ("- ", "* ", "• ", "3. ", "3) ").
fn strip_list_marker(name: &str) -> &str {
    for bullet in ["- ", "* ", "• "] {
        if let Some(rest) = name.strip_prefix(bullet) {
            return rest.trim_start();
        }
    }

    let digits = name.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits > 0 {
        let rest = &name[digits..];
        if let Some(rest) = rest.strip_prefix(". ").or_else(|| rest.strip_prefix(") ")) {
            return rest.trim_start();
        }
    }

    name
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Days;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_single_day_and_range() {
        let raw = "New Year: 2025-01-01\nGeneric Holiday: 2025-07-04 - 2025-07-06";

        let parsed = parse_response(raw, "Holidays").unwrap();
        let events: Vec<_> = parsed.events.iter().collect();

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].name(), "New Year");
        assert_eq!(events[0].start_date(), date("2025-01-01"));
        assert_eq!(events[0].end_date(), date("2025-01-01"));

        assert_eq!(events[1].name(), "Generic Holiday");
        assert_eq!(
            events[1].end_date(),
            events[1].start_date().checked_add_days(Days::new(2)).unwrap()
        );
        assert!(parsed.events.iter().all(|e| e.subject() == "Holidays" && e.group().is_empty()));
    }

    #[test]
    fn test_noise_lines_are_discarded() {
        let raw = "\
Here are the events for 2025:

Diwali: 2025-10-20
Holi - sometime in March
Navratri: 2025-09-22 - 2025-10-01
Event Name: 2025-05-05
: 2025-06-06
Ugadi: March 30th
Onam: 2025-9-5
Pongal: 2025-01-14 - 2025-01-12
I hope this helps!";

        let parsed = parse_response(raw, "Hindu Festivals").unwrap();

        let names: Vec<_> = parsed.events.iter().map(|e| e.name()).collect();
        assert_eq!(names, vec!["Diwali", "Navratri"]);

        let reasons: Vec<_> = parsed.discarded.iter().map(|d| d.reason.clone()).collect();
        assert_eq!(
            reasons,
            vec![
                DiscardReason::MissingSeparator,
                DiscardReason::MissingSeparator,
                DiscardReason::PlaceholderName,
                DiscardReason::EmptyName,
                DiscardReason::InvalidDate("March 30th".to_string()),
                DiscardReason::InvalidDate("2025-9-5".to_string()),
                DiscardReason::InvertedRange,
                DiscardReason::MissingSeparator,
            ]
        );
        assert_eq!(parsed.discarded[0].line_number, 1);
    }

    #[test]
    fn test_only_noise_is_no_events_parsed() {
        let err = parse_response("I'm not sure about the dates this year.\n\n", "Obscure Fest")
            .unwrap_err();

        match err {
            AlmanacError::NoEventsParsed { subject, discarded } => {
                assert_eq!(subject, "Obscure Fest");
                assert_eq!(discarded, 1);
            }
            other => panic!("Expected NoEventsParsed, got {:?}", other),
        }
    }

    #[test]
    fn test_list_markers_and_whitespace_are_tolerated() {
        let raw = "  - Vesak: 2025-05-12  \r\n2. Obon: 2025-08-13 – 2025-08-16\n* Tet: 2025-01-29";

        let parsed = parse_response(raw, "Buddhist Observances").unwrap();

        let rendered: Vec<_> = parsed.events.iter().map(|e| e.to_string()).collect();
        assert_eq!(
            rendered,
            vec![
                "Vesak: 2025-05-12",
                "Obon: 2025-08-13 - 2025-08-16",
                "Tet: 2025-01-29",
            ]
        );
    }

    #[test]
    fn test_extra_separator_in_dates_is_invalid_date() {
        let outcome = parse_line("Carnival: Rio: 2025-03-01", "Carnivals");
        assert_eq!(
            outcome,
            LineOutcome::Discarded(DiscardReason::InvalidDate("Rio: 2025-03-01".to_string()))
        );
    }

    #[test]
    fn test_impossible_calendar_date_is_invalid() {
        let outcome = parse_line("Leap Day: 2025-02-29", "Misc");
        assert!(matches!(outcome, LineOutcome::Discarded(DiscardReason::InvalidDate(_))));
    }
}
