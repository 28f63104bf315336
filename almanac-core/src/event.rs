//! Event records and ordered event sets.
//!
//! Records are created by the response parser, tagged with their group by the
//! pipeline, and only read afterwards. Updating a record means building a new one.

use std::fmt;

use chrono::{Days, NaiveDate};
use serde::Serialize;

/// One parsed event spanning one or more whole days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventRecord {
    name: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    subject: String,
    group: String,
}

impl EventRecord {
    /// Build a record for `subject`, with no group yet.
    ///
    /// Returns `None` if the trimmed name is empty or `end_date` precedes `start_date`.
    pub fn new(
        name: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
        subject: &str,
    ) -> Option<Self> {
        let name = name.trim();
        if name.is_empty() || end_date < start_date {
            return None;
        }

        Some(EventRecord {
            name: name.to_string(),
            start_date,
            end_date,
            subject: subject.to_string(),
            group: String::new(),
        })
    }

    /// The same record attributed to `group`.
    pub fn with_group(self, group: &str) -> Self {
        EventRecord {
            group: group.to_string(),
            ..self
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Last day included in the event (inclusive).
    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn is_range(&self) -> bool {
        self.end_date > self.start_date
    }

    /// First day after the event, for all-day calendar entries.
    pub fn end_exclusive(&self) -> NaiveDate {
        // Only fails at NaiveDate::MAX, which YYYY-MM-DD input cannot reach
        self.end_date
            .checked_add_days(Days::new(1))
            .unwrap_or(self.end_date)
    }

    /// Identity used for deduplication: name plus date range.
    pub fn key(&self) -> (&str, NaiveDate, NaiveDate) {
        (&self.name, self.start_date, self.end_date)
    }
}

impl fmt::Display for EventRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_range() {
            write!(f, "{}: {} - {}", self.name, self.start_date, self.end_date)
        } else {
            write!(f, "{}: {}", self.name, self.start_date)
        }
    }
}

/// Ordered sequence of events, kept in generation order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EventSet(Vec<EventRecord>);

impl EventSet {
    pub fn new() -> Self {
        EventSet(Vec::new())
    }

    pub fn push(&mut self, event: EventRecord) {
        self.0.push(event);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EventRecord> {
        self.0.iter()
    }

    /// Stable-order copy holding only the events matching `predicate`.
    pub fn filtered<F>(&self, predicate: F) -> EventSet
    where
        F: Fn(&EventRecord) -> bool,
    {
        self.0.iter().filter(|e| predicate(*e)).cloned().collect()
    }

    /// Every event attributed to `group`.
    pub fn tagged(self, group: &str) -> EventSet {
        self.0.into_iter().map(|e| e.with_group(group)).collect()
    }
}

impl From<Vec<EventRecord>> for EventSet {
    fn from(events: Vec<EventRecord>) -> Self {
        EventSet(events)
    }
}

impl FromIterator<EventRecord> for EventSet {
    fn from_iter<I: IntoIterator<Item = EventRecord>>(iter: I) -> Self {
        EventSet(iter.into_iter().collect())
    }
}

impl Extend<EventRecord> for EventSet {
    fn extend<I: IntoIterator<Item = EventRecord>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for EventSet {
    type Item = EventRecord;
    type IntoIter = std::vec::IntoIter<EventRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a EventSet {
    type Item = &'a EventRecord;
    type IntoIter = std::slice::Iter<'a, EventRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
